//! Posts handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use plume_api_types::{DeletePostResponse, PostInput};
use uuid::Uuid;

use crate::infra::http::api::error::{ApiError, service_to_api};
use crate::infra::http::api::models::SearchQuery;
use crate::infra::http::api::state::ApiState;

pub async fn list_posts(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state.posts.list().await.map_err(service_to_api)?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.get(id).await.map_err(service_to_api)?;
    Ok(Json(post))
}

pub async fn search_posts(
    State(state): State<ApiState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let term = query.q.unwrap_or_default();
    if term.trim().is_empty() {
        return Err(ApiError::bad_request("search query is required", None));
    }

    let posts = state.posts.search(&term).await.map_err(service_to_api)?;
    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<ApiState>,
    Json(payload): Json<PostInput>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.create(payload).await.map_err(service_to_api)?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostInput>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .posts
        .update(id, payload)
        .await
        .map_err(service_to_api)?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.delete(id).await.map_err(service_to_api)?;
    Ok(Json(DeletePostResponse {
        message: "Post deleted successfully".to_string(),
        post,
    }))
}
