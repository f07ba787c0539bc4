// HTTP routes

mod http;

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::assembler::SnapshotAssembler;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) assembler: Arc<SnapshotAssembler>,
}

pub fn app(assembler: Arc<SnapshotAssembler>) -> Router {
    let state = AppState { assembler };
    Router::new()
        .route("/", get(http::index_handler)) // GET /
        .route("/data", get(http::data_handler)) // GET /data
        .route("/version", get(http::version_handler)) // GET /version
        .route("/favicon.ico", get(http::favicon_handler)) // GET /favicon.ico
        .fallback(http::not_found_handler)
        .layer(middleware::from_fn(http::reject_unsupported_method))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
