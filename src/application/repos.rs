//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use plume_api_types::Post;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub title: String,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub content: String,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// All posts ordered by creation time, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Case-insensitive substring match across title, content, and author.
    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, RepoError>;

    async fn create_post(&self, params: CreatePostParams) -> Result<Post, RepoError>;

    /// Returns `None` when no post with the given id exists.
    async fn update_post(&self, params: UpdatePostParams) -> Result<Option<Post>, RepoError>;

    /// Returns the deleted post, or `None` when the id was unknown.
    async fn delete_post(&self, id: Uuid) -> Result<Option<Post>, RepoError>;
}
