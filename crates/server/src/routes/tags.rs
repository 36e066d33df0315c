use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::types::ActionResult;
use service::blog::domain::{LabelInput, PostsByYear, TagWithCount};

use crate::{errors::JsonApiError, routes::AppState};

#[utoipa::path(
    get, path = "/api/tags", tag = "tags",
    responses((status = 200, description = "Tags with post counts", body = [crate::openapi::LabelWithCountDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TagWithCount>>, JsonApiError> {
    Ok(Json(state.blog.query_tags().await?))
}

#[utoipa::path(
    post, path = "/api/tags", tag = "tags",
    request_body = crate::openapi::LabelInputDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Conflict"))
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<LabelInput>) -> Result<(StatusCode, Json<ActionResult<i32>>), JsonApiError> {
    let id = state.blog.insert_tag(input).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::new(id))))
}

#[utoipa::path(
    put, path = "/api/tags/{tag}", tag = "tags",
    params(("tag" = i32, Path, description = "Tag id")),
    request_body = crate::openapi::LabelInputDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"), (status = 409, description = "Conflict"))
)]
pub async fn update(State(state): State<AppState>, Path(id): Path<i32>, Json(input): Json<LabelInput>) -> Result<Json<ActionResult<i32>>, JsonApiError> {
    Ok(Json(ActionResult::new(state.blog.update_tag(id, input).await?)))
}

#[utoipa::path(
    delete, path = "/api/tags/{tag}", tag = "tags",
    params(("tag" = i32, Path, description = "Tag id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    match state.blog.delete_tag(id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found("tag")),
    }
}

#[utoipa::path(
    get, path = "/api/tags/{tag}/posts", tag = "tags",
    params(("tag" = String, Path, description = "Tag display name")),
    responses((status = 200, description = "Posts grouped by year", body = [crate::openapi::PostsByYearDoc]))
)]
pub async fn posts(State(state): State<AppState>, Path(display_name): Path<String>) -> Result<Json<Vec<PostsByYear>>, JsonApiError> {
    Ok(Json(state.blog.query_posts_by_tag(&display_name).await?))
}
