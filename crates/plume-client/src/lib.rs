//! Client-side core for the Plume blog API.
//!
//! The interesting contract lives in three pieces: a timeboxed transport
//! ([`transport::HttpPostsApi`]), a single-slot fallback cache
//! ([`cache::FallbackCache`]), and the [`sync::SyncCoordinator`] that
//! decides, per operation and connectivity state, whether to hit the
//! network, serve the cached snapshot, or report that no data is available.

pub mod cache;
pub mod connectivity;
pub mod error;
pub mod sync;
pub mod transport;

pub use cache::{CacheSnapshot, FallbackCache};
pub use connectivity::ConnectivitySignal;
pub use error::ClientError;
pub use sync::{CollectionSource, CollectionView, SyncCoordinator, SyncError};
pub use transport::{HttpPostsApi, PostsApi};
