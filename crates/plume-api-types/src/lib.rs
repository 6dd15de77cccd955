//! Wire types shared between the Plume server and its clients.
//!
//! Everything here is plain serde data: the server renders these shapes,
//! clients deserialize them strictly and reject anything malformed at the
//! transport boundary.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A persisted blog post as it appears on the wire.
///
/// `id`, `created_at`, and `updated_at` are server-assigned; the remaining
/// fields are guaranteed non-empty for any post the service accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Request body for creating or updating a post.
///
/// The same shape serves both operations; the server validates that every
/// field is non-blank independently of any client-side checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

impl PostInput {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            content: content.into(),
        }
    }

    /// Names of the fields that are empty or whitespace-only.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        let mut blank = Vec::new();
        if self.title.trim().is_empty() {
            blank.push("title");
        }
        if self.author.trim().is_empty() {
            blank.push("author");
        }
        if self.content.trim().is_empty() {
            blank.push("content");
        }
        blank
    }
}

/// Response body for a successful delete, echoing the removed post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostResponse {
    pub message: String,
    pub post: Post,
}

/// Error envelope rendered by the API for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
