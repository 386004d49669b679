use crate::http::handlers::{
    api_error_response, error_response, json_response, message_response, store_failure_response,
};
use crate::http::{json_object, make_request_id, payload_str, with_request_id};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use roster_api::{validate, ApiError, SectorDto, SECTOR_SCHEMA};
use roster_model::SectorName;
use serde_json::Value;
use tracing::{info, warn};

pub(crate) async fn add_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Option<Json<Value>>,
) -> Response {
    let request_id = make_request_id(&state);
    let payload = json_object(payload);

    if let Err(err) = validate(&SECTOR_SCHEMA, &payload) {
        warn!(%err, "sector add rejected");
        return with_request_id(api_error_response(&err.into()), &request_id);
    }
    let new_name = match SectorName::parse(&payload_str(&payload, "name")) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(%err, "sector add rejected");
            return with_request_id(
                error_response(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string()),
                &request_id,
            );
        }
    };

    let db = state.db.lock().await;
    // Duplicate guard keys on the path segment, the inserted row on the
    // payload; the two are allowed to differ, as in the historical API.
    match roster_store::find_sector_by_name(&db, &name) {
        Ok(Some(_)) => {
            return with_request_id(
                api_error_response(&ApiError::duplicate_sector(&name)),
                &request_id,
            )
        }
        Ok(None) => {}
        Err(err) => {
            return with_request_id(store_failure_response("/sectors/add", &err), &request_id)
        }
    }

    match roster_store::insert_sector(&db, new_name.as_str()) {
        Ok(sector) => {
            info!(name = %sector.name, "sector added");
            with_request_id(
                json_response(
                    StatusCode::OK,
                    serde_json::json!(SectorDto::from(sector)),
                ),
                &request_id,
            )
        }
        Err(err) => with_request_id(store_failure_response("/sectors/add", &err), &request_id),
    }
}

pub(crate) async fn list_all_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let db = state.db.lock().await;
    match roster_store::list_sectors(&db) {
        Ok(sectors) if sectors.is_empty() => with_request_id(
            error_response(StatusCode::NOT_FOUND, "No sectors found"),
            &request_id,
        ),
        Ok(sectors) => {
            let dtos: Vec<SectorDto> = sectors.into_iter().map(SectorDto::from).collect();
            with_request_id(
                json_response(StatusCode::OK, serde_json::json!(dtos)),
                &request_id,
            )
        }
        Err(err) => with_request_id(store_failure_response("/sectors/all", &err), &request_id),
    }
}

pub(crate) async fn list_filtered_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let request_id = make_request_id(&state);
    let db = state.db.lock().await;
    match roster_store::list_sectors_by_substring(&db, &name) {
        // Historical wire contract: this endpoint alone reports an empty
        // result under the "Message" key.
        Ok(sectors) if sectors.is_empty() => with_request_id(
            message_response(StatusCode::NOT_FOUND, "No sectors registered"),
            &request_id,
        ),
        Ok(sectors) => {
            let dtos: Vec<SectorDto> = sectors.into_iter().map(SectorDto::from).collect();
            with_request_id(
                json_response(StatusCode::OK, serde_json::json!(dtos)),
                &request_id,
            )
        }
        Err(err) => with_request_id(store_failure_response("/sectors/all/:name", &err), &request_id),
    }
}

pub(crate) async fn get_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let request_id = make_request_id(&state);
    let db = state.db.lock().await;
    match roster_store::find_sector_by_name(&db, &name) {
        Ok(Some(sector)) => with_request_id(
            json_response(StatusCode::OK, serde_json::json!(SectorDto::from(sector))),
            &request_id,
        ),
        Ok(None) => with_request_id(
            api_error_response(&ApiError::sector_not_found(&name)),
            &request_id,
        ),
        Err(err) => with_request_id(store_failure_response("/sectors/:name", &err), &request_id),
    }
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Option<Json<Value>>,
) -> Response {
    let request_id = make_request_id(&state);
    let payload = json_object(payload);

    if let Err(err) = validate(&SECTOR_SCHEMA, &payload) {
        warn!(%err, "sector update rejected");
        return with_request_id(api_error_response(&err.into()), &request_id);
    }
    let new_name = match SectorName::parse(&payload_str(&payload, "name")) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(%err, "sector update rejected");
            return with_request_id(
                error_response(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string()),
                &request_id,
            );
        }
    };

    let db = state.db.lock().await;
    match roster_store::find_sector_by_name(&db, &name) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return with_request_id(
                api_error_response(&ApiError::sector_not_found(&name)),
                &request_id,
            )
        }
        Err(err) => {
            return with_request_id(store_failure_response("/sectors/update", &err), &request_id)
        }
    }

    if let Err(err) = roster_store::rename_sector(&db, &name, new_name.as_str()) {
        return with_request_id(store_failure_response("/sectors/update", &err), &request_id);
    }

    info!(from = %name, to = %new_name.as_str(), "sector renamed");
    // The response echoes the validated request payload, not a re-fetched
    // record.
    with_request_id(
        json_response(StatusCode::OK, Value::Object(payload)),
        &request_id,
    )
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let request_id = make_request_id(&state);
    let db = state.db.lock().await;
    let sector = match roster_store::find_sector_by_name(&db, &name) {
        Ok(Some(sector)) => sector,
        Ok(None) => {
            return with_request_id(
                api_error_response(&ApiError::sector_not_found(&name)),
                &request_id,
            )
        }
        Err(err) => {
            return with_request_id(store_failure_response("/sectors/delete", &err), &request_id)
        }
    };

    match roster_store::delete_sector(&db, sector.id) {
        Ok(()) => {
            info!(name = %sector.name, "sector deleted");
            with_request_id(
                message_response(StatusCode::OK, "Successfully deleted"),
                &request_id,
            )
        }
        Err(err) => with_request_id(store_failure_response("/sectors/delete", &err), &request_id),
    }
}
