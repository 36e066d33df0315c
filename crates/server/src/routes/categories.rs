use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::types::ActionResult;
use service::blog::domain::{LabelInput, PostsByYear, CategoryWithCount};

use crate::{errors::JsonApiError, routes::AppState};

#[utoipa::path(
    get, path = "/api/categories", tag = "categories",
    responses((status = 200, description = "Categories with post counts", body = [crate::openapi::LabelWithCountDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryWithCount>>, JsonApiError> {
    Ok(Json(state.blog.query_categories().await?))
}

#[utoipa::path(
    post, path = "/api/categories", tag = "categories",
    request_body = crate::openapi::LabelInputDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Conflict"))
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<LabelInput>) -> Result<(StatusCode, Json<ActionResult<i32>>), JsonApiError> {
    let id = state.blog.insert_category(input).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::new(id))))
}

#[utoipa::path(
    put, path = "/api/categories/{category}", tag = "categories",
    params(("category" = i32, Path, description = "Category id")),
    request_body = crate::openapi::LabelInputDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"), (status = 409, description = "Conflict"))
)]
pub async fn update(State(state): State<AppState>, Path(id): Path<i32>, Json(input): Json<LabelInput>) -> Result<Json<ActionResult<i32>>, JsonApiError> {
    Ok(Json(ActionResult::new(state.blog.update_category(id, input).await?)))
}

#[utoipa::path(
    delete, path = "/api/categories/{category}", tag = "categories",
    params(("category" = i32, Path, description = "Category id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    match state.blog.delete_category(id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found("category")),
    }
}

#[utoipa::path(
    get, path = "/api/categories/{category}/posts", tag = "categories",
    params(("category" = String, Path, description = "Category display name")),
    responses((status = 200, description = "Posts grouped by year", body = [crate::openapi::PostsByYearDoc]))
)]
pub async fn posts(State(state): State<AppState>, Path(display_name): Path<String>) -> Result<Json<Vec<PostsByYear>>, JsonApiError> {
    Ok(Json(state.blog.query_posts_by_category(&display_name).await?))
}
