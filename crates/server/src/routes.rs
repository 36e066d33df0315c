use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::blog::{repository::BlogRepository, BlogService};

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

pub mod posts;
pub mod tags;
pub mod categories;

/// Shared handler state. The repository is erased so tests can swap in the mock.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService<dyn BlogRepository>>,
}

impl AppState {
    pub fn new(blog: BlogService<dyn BlogRepository>) -> Self { Self { blog: Arc::new(blog) } }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Prometheus text exposition.
pub async fn metrics() -> Result<impl IntoResponse, JsonApiError> {
    let body = service::metrics::encode_metrics()
        .map_err(|e| JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Metrics Error", Some(e.to_string())))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    // `:post`, `:tag` and `:category` carry an id for writes and a url or
    // display name for reads.
    let api = Router::new()
        .route("/api/posts", get(posts::list).post(posts::create))
        .route("/api/archive", get(posts::archive))
        .route("/api/posts/:post", get(posts::get).put(posts::update).delete(posts::delete))
        .route("/api/tags", get(tags::list).post(tags::create))
        .route("/api/tags/:tag", axum::routing::put(tags::update).delete(tags::delete))
        .route("/api/tags/:tag/posts", get(tags::posts))
        .route("/api/categories", get(categories::list).post(categories::create))
        .route("/api/categories/:category", axum::routing::put(categories::update).delete(categories::delete))
        .route("/api/categories/:category/posts", get(categories::posts))
        .with_state(state);

    public
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
