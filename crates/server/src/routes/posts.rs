use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::pagination::Pagination;
use common::types::ActionResult;
use service::blog::domain::{PagedResult, PostBrief, PostDetail, PostInput, PostsByYear};
use tracing::info;

use crate::{errors::JsonApiError, routes::AppState};

#[utoipa::path(
    get, path = "/api/posts", tag = "posts",
    params(
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, clamped to the configured maximum")
    ),
    responses((status = 200, description = "One page of posts, newest first", body = crate::openapi::PostPageDoc))
)]
pub async fn list(State(state): State<AppState>, Query(paging): Query<Pagination>) -> Result<Json<PagedResult<PostBrief>>, JsonApiError> {
    Ok(Json(state.blog.query_posts(paging).await?))
}

#[utoipa::path(
    post, path = "/api/posts", tag = "posts",
    request_body = crate::openapi::PostInputDoc,
    responses(
        (status = 201, description = "Created; result is the new id"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Url already used")
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<PostInput>) -> Result<(StatusCode, Json<ActionResult<i32>>), JsonApiError> {
    let id = state.blog.insert_post(input).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::new(id))))
}

#[utoipa::path(
    get, path = "/api/posts/{post}", tag = "posts",
    params(("post" = String, Path, description = "Post url slug")),
    responses(
        (status = 200, description = "Post with category, tags and neighbours", body = crate::openapi::PostDetailDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(url): Path<String>) -> Result<Json<PostDetail>, JsonApiError> {
    Ok(Json(state.blog.get_post(&url).await?))
}

#[utoipa::path(
    put, path = "/api/posts/{post}", tag = "posts",
    params(("post" = i32, Path, description = "Post id")),
    request_body = crate::openapi::PostInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Url already used")
    )
)]
pub async fn update(State(state): State<AppState>, Path(id): Path<i32>, Json(input): Json<PostInput>) -> Result<Json<ActionResult<i32>>, JsonApiError> {
    let id = state.blog.update_post(id, input).await?;
    Ok(Json(ActionResult::new(id)))
}

#[utoipa::path(
    delete, path = "/api/posts/{post}", tag = "posts",
    params(("post" = i32, Path, description = "Post id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    if state.blog.delete_post(id).await? {
        info!(post_id = id, "post deleted via api");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("post"))
    }
}

#[utoipa::path(
    get, path = "/api/archive", tag = "posts",
    responses((status = 200, description = "All posts grouped by year", body = [crate::openapi::PostsByYearDoc]))
)]
pub async fn archive(State(state): State<AppState>) -> Result<Json<Vec<PostsByYear>>, JsonApiError> {
    Ok(Json(state.blog.query_archive().await?))
}
