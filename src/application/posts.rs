//! Post service: request translation plus input validation and
//! not-found detection over the posts repository.

use std::sync::Arc;

use plume_api_types::{Post, PostInput};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use crate::domain::error::DomainError;
use crate::domain::posts::PostDraft;

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for PostServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

pub struct PostService {
    repo: Arc<dyn PostsRepo>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostsRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Post>, PostServiceError> {
        Ok(self.repo.list_posts().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, PostServiceError> {
        self.repo
            .find_post(id)
            .await?
            .ok_or(PostServiceError::NotFound)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Post>, PostServiceError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(DomainError::validation("search query is required").into());
        }
        Ok(self.repo.search_posts(term).await?)
    }

    pub async fn create(&self, input: PostInput) -> Result<Post, PostServiceError> {
        let draft = PostDraft::try_from_input(input)?;
        let post = self
            .repo
            .create_post(CreatePostParams {
                title: draft.title().to_string(),
                author: draft.author().to_string(),
                content: draft.content().to_string(),
            })
            .await?;

        info!(target = "plume::posts", id = %post.id, "created post");
        Ok(post)
    }

    pub async fn update(&self, id: Uuid, input: PostInput) -> Result<Post, PostServiceError> {
        let draft = PostDraft::try_from_input(input)?;
        let updated = self
            .repo
            .update_post(UpdatePostParams {
                id,
                title: draft.title().to_string(),
                author: draft.author().to_string(),
                content: draft.content().to_string(),
            })
            .await?
            .ok_or(PostServiceError::NotFound)?;

        info!(target = "plume::posts", id = %updated.id, "updated post");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Post, PostServiceError> {
        let deleted = self
            .repo
            .delete_post(id)
            .await?
            .ok_or(PostServiceError::NotFound)?;

        info!(target = "plume::posts", id = %deleted.id, "deleted post");
        Ok(deleted)
    }
}
