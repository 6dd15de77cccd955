use async_trait::async_trait;
use plume_api_types::Post;
use sqlx::query_as;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};

use super::PostgresRepositories;

const POST_COLUMNS: &str = "id, title, author, content, created_at, updated_at";

pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::Database(db) if db.message().contains("invalid input syntax") => {
            RepoError::InvalidInput {
                message: db.message().to_string(),
            }
        }
        sqlx::Error::Database(db)
            if db
                .message()
                .contains("canceling statement due to user request") =>
        {
            RepoError::Timeout
        }
        other => RepoError::from_persistence(other),
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let pattern = format!("%{term}%");
        query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE title ILIKE $1 OR content ILIKE $1 OR author ILIKE $1 \
             ORDER BY created_at DESC"
        ))
        .bind(pattern)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn create_post(&self, params: CreatePostParams) -> Result<Post, RepoError> {
        let CreatePostParams {
            title,
            author,
            content,
        } = params;

        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        query_as::<_, Post>(&format!(
            "INSERT INTO posts (id, title, author, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(author)
        .bind(content)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<Option<Post>, RepoError> {
        let UpdatePostParams {
            id,
            title,
            author,
            content,
        } = params;

        let now = OffsetDateTime::now_utc();
        query_as::<_, Post>(&format!(
            "UPDATE posts \
             SET title = $2, author = $3, content = $4, updated_at = $5 \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(author)
        .bind(content)
        .bind(now)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_post(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        query_as::<_, Post>(&format!(
            "DELETE FROM posts WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
