pub(crate) mod collaborators;
pub(crate) mod handlers;
pub(crate) mod sectors;

use crate::AppState;
use axum::http::HeaderValue;
use axum::response::Response;
use axum::Json;
use serde_json::{Map, Value};
use std::sync::atomic::Ordering;

pub(crate) fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

/// Normalizes the request body into a key→value map. A missing body or a
/// non-object document validates the same way as an empty payload.
pub(crate) fn json_object(payload: Option<Json<Value>>) -> Map<String, Value> {
    match payload {
        Some(Json(Value::Object(map))) => map,
        _ => Map::new(),
    }
}

// The accessors below run after schema validation, so the declared kind is
// already guaranteed; the fallbacks are unreachable.

pub(crate) fn payload_str(payload: &Map<String, Value>, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn payload_i64(payload: &Map<String, Value>, key: &str) -> i64 {
    payload.get(key).and_then(Value::as_i64).unwrap_or_default()
}

pub(crate) fn payload_f64(payload: &Map<String, Value>, key: &str) -> f64 {
    payload.get(key).and_then(Value::as_f64).unwrap_or_default()
}

pub(crate) fn payload_bool(payload: &Map<String, Value>, key: &str) -> bool {
    payload
        .get(key)
        .and_then(Value::as_bool)
        .unwrap_or_default()
}
