mod posts;

pub use posts::*;

use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn health() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
