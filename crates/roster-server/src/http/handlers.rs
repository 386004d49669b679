use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_api::ApiError;
use roster_store::StoreError;
use serde_json::{json, Value};
use tracing::error;

pub(crate) async fn healthz_handler() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

pub(crate) fn json_response(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, json!({"Error": message}))
}

pub(crate) fn message_response(status: StatusCode, message: &str) -> Response {
    json_response(status, json!({"Message": message}))
}

pub(crate) fn api_error_response(err: &ApiError) -> Response {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, json!({ (err.code.body_key()): err.message }))
}

/// Terminal storage failure: logged, surfaced as an opaque 500. No retry
/// path exists anywhere in the service.
pub(crate) fn store_failure_response(route: &str, err: &StoreError) -> Response {
    error!(%route, %err, "store operation failed");
    api_error_response(&ApiError::internal())
}
