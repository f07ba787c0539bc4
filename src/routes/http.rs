// GET handlers: dashboard, data, version; 404 and 501 responses

use axum::{
    Json,
    extract::{Request, State},
    http::{Method, StatusCode, header},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};

use super::AppState;
use crate::models::Snapshot;
use crate::version::{NAME, VERSION};

const INDEX_HTML: &str = include_str!("index.html");

/// GET / — dashboard page; polls /data once per second.
pub(super) async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /data — one fresh snapshot per request; always 200.
pub(super) async fn data_handler(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.assembler.collect().await)
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

pub(super) async fn favicon_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "image/x-icon")], "")
}

pub(super) async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "file not found")
}

/// Anything but GET/HEAD gets 501, on known and unknown paths alike.
pub(super) async fn reject_unsupported_method(request: Request, next: Next) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return (StatusCode::NOT_IMPLEMENTED, "http method not supported").into_response();
    }
    next.run(request).await
}
