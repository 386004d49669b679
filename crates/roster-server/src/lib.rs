#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use rusqlite::Connection;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod config;
mod http;

pub use config::ServerConfig;

pub const CRATE_NAME: &str = "roster-server";

/// Shared handler context: the store handle and the request-id seed. The
/// connection is explicit state passed into every handler; there is no
/// ambient global store.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/sectors/add/:name", post(http::sectors::add_handler))
        .route("/sectors/all", get(http::sectors::list_all_handler))
        .route("/sectors/all/:name", get(http::sectors::list_filtered_handler))
        .route("/sectors/:name", get(http::sectors::get_handler))
        .route("/sectors/update/:name", put(http::sectors::update_handler))
        .route("/sectors/delete/:name", delete(http::sectors::delete_handler))
        .route(
            "/collaborators/add/:collab_number",
            post(http::collaborators::add_handler),
        )
        .route(
            "/collaborators/all",
            get(http::collaborators::list_all_handler),
        )
        // The substring and range routes overlap on the third segment, so
        // the router requires them to share that parameter name.
        .route(
            "/collaborators/all/:first/:second",
            get(http::collaborators::list_range_handler),
        )
        .route(
            "/collaborators/all/:first",
            get(http::collaborators::list_filtered_handler),
        )
        .route(
            "/collaborators/:collab_number",
            get(http::collaborators::get_handler),
        )
        .route(
            "/collaborators/update/:collab_number",
            put(http::collaborators::update_handler),
        )
        .route(
            "/collaborators/delete/:collab_number",
            delete(http::collaborators::delete_handler),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
