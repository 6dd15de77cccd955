//! Application services orchestrating domain rules over repositories.

pub mod error;
pub mod posts;
pub mod repos;
