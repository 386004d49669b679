use crate::http::handlers::{
    api_error_response, error_response, json_response, message_response, store_failure_response,
};
use crate::http::{
    json_object, make_request_id, payload_bool, payload_f64, payload_i64, payload_str,
    with_request_id,
};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use roster_api::{validate, ApiError, CollaboratorDto, COLLABORATOR_SCHEMA};
use roster_model::{CollabNumber, NewCollaborator};
use serde_json::{Map, Value};
use tracing::{info, warn};

fn parse_key(raw: &str, request_id: &str) -> Result<CollabNumber, Response> {
    CollabNumber::parse(raw).map_err(|err| {
        with_request_id(
            api_error_response(&ApiError::unparsable_key(err.to_string())),
            request_id,
        )
    })
}

/// Builds the writable field set from a validated payload, with the parent
/// reference already resolved to `sector_id`. The transient `sector_name`
/// field never reaches the store.
fn writable_fields(payload: &Map<String, Value>, sector_id: i64) -> NewCollaborator {
    NewCollaborator {
        collab_number: payload_i64(payload, "collab_number"),
        full_name: payload_str(payload, "full_name"),
        birth_date: payload_str(payload, "birth_date"),
        current_salary: payload_f64(payload, "current_salary"),
        active: payload_bool(payload, "active"),
        sector_id,
    }
}

fn collaborator_list_response(collaborators: Vec<roster_model::Collaborator>) -> Response {
    let dtos: Vec<CollaboratorDto> = collaborators
        .into_iter()
        .map(CollaboratorDto::from)
        .collect();
    json_response(StatusCode::OK, serde_json::json!(dtos))
}

pub(crate) async fn add_handler(
    State(state): State<AppState>,
    Path(raw_number): Path<String>,
    payload: Option<Json<Value>>,
) -> Response {
    let request_id = make_request_id(&state);
    let number = match parse_key(&raw_number, &request_id) {
        Ok(number) => number,
        Err(response) => return response,
    };
    let payload = json_object(payload);

    if let Err(err) = validate(&COLLABORATOR_SCHEMA, &payload) {
        warn!(%err, "collaborator add rejected");
        return with_request_id(api_error_response(&err.into()), &request_id);
    }

    let db = state.db.lock().await;
    // Duplicate guard keys on the path segment, the inserted row on the
    // payload; the two are allowed to differ, as in the historical API.
    match roster_store::find_collaborator_by_number(&db, number.value()) {
        Ok(Some(_)) => {
            return with_request_id(
                api_error_response(&ApiError::duplicate_collaborator(number.value())),
                &request_id,
            )
        }
        Ok(None) => {}
        Err(err) => {
            return with_request_id(
                store_failure_response("/collaborators/add", &err),
                &request_id,
            )
        }
    }

    // A collaborator cannot join a sector that does not exist.
    let sector_name = payload_str(&payload, "sector_name");
    let sector = match roster_store::find_sector_by_name(&db, &sector_name) {
        Ok(Some(sector)) => sector,
        Ok(None) => {
            warn!(%sector_name, "collaborator add rejected: unknown sector");
            return with_request_id(
                api_error_response(&ApiError::sector_missing_for_add(&sector_name)),
                &request_id,
            );
        }
        Err(err) => {
            return with_request_id(
                store_failure_response("/collaborators/add", &err),
                &request_id,
            )
        }
    };

    let fields = writable_fields(&payload, sector.id);
    match roster_store::insert_collaborator(&db, &fields) {
        Ok(_) => {
            info!(collab_number = fields.collab_number, "collaborator added");
            let dto = CollaboratorDto {
                collab_number: fields.collab_number,
                full_name: fields.full_name,
                birth_date: fields.birth_date,
                current_salary: fields.current_salary,
                active: fields.active,
                sector_name,
            };
            with_request_id(
                json_response(StatusCode::OK, serde_json::json!(dto)),
                &request_id,
            )
        }
        Err(err) => with_request_id(
            store_failure_response("/collaborators/add", &err),
            &request_id,
        ),
    }
}

pub(crate) async fn list_all_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let db = state.db.lock().await;
    match roster_store::list_collaborators(&db) {
        Ok(collaborators) if collaborators.is_empty() => with_request_id(
            error_response(StatusCode::NOT_FOUND, "No collaborators found"),
            &request_id,
        ),
        Ok(collaborators) => {
            with_request_id(collaborator_list_response(collaborators), &request_id)
        }
        Err(err) => with_request_id(
            store_failure_response("/collaborators/all", &err),
            &request_id,
        ),
    }
}

pub(crate) async fn list_range_handler(
    State(state): State<AppState>,
    Path((raw_lower, raw_upper)): Path<(String, String)>,
) -> Response {
    let request_id = make_request_id(&state);
    let lower = match parse_key(&raw_lower, &request_id) {
        Ok(number) => number,
        Err(response) => return response,
    };
    let upper = match parse_key(&raw_upper, &request_id) {
        Ok(number) => number,
        Err(response) => return response,
    };

    let db = state.db.lock().await;
    match roster_store::list_collaborators_by_range(&db, lower.value(), upper.value()) {
        Ok(collaborators) if collaborators.is_empty() => with_request_id(
            error_response(StatusCode::NOT_FOUND, "No collaborators found"),
            &request_id,
        ),
        Ok(collaborators) => {
            with_request_id(collaborator_list_response(collaborators), &request_id)
        }
        Err(err) => with_request_id(
            store_failure_response("/collaborators/all/:lower/:upper", &err),
            &request_id,
        ),
    }
}

pub(crate) async fn list_filtered_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let request_id = make_request_id(&state);
    let db = state.db.lock().await;
    match roster_store::list_collaborators_by_substring(&db, &name) {
        Ok(collaborators) if collaborators.is_empty() => with_request_id(
            error_response(StatusCode::NOT_FOUND, "Not found"),
            &request_id,
        ),
        Ok(collaborators) => {
            with_request_id(collaborator_list_response(collaborators), &request_id)
        }
        Err(err) => with_request_id(
            store_failure_response("/collaborators/all/:name", &err),
            &request_id,
        ),
    }
}

pub(crate) async fn get_handler(
    State(state): State<AppState>,
    Path(raw_number): Path<String>,
) -> Response {
    let request_id = make_request_id(&state);
    let number = match parse_key(&raw_number, &request_id) {
        Ok(number) => number,
        Err(response) => return response,
    };

    let db = state.db.lock().await;
    match roster_store::find_collaborator_by_number(&db, number.value()) {
        Ok(Some(collaborator)) => with_request_id(
            json_response(
                StatusCode::OK,
                serde_json::json!(CollaboratorDto::from(collaborator)),
            ),
            &request_id,
        ),
        Ok(None) => with_request_id(
            api_error_response(&ApiError::collaborator_not_found(number.value())),
            &request_id,
        ),
        Err(err) => with_request_id(
            store_failure_response("/collaborators/:collab_number", &err),
            &request_id,
        ),
    }
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path(raw_number): Path<String>,
    payload: Option<Json<Value>>,
) -> Response {
    let request_id = make_request_id(&state);
    let number = match parse_key(&raw_number, &request_id) {
        Ok(number) => number,
        Err(response) => return response,
    };
    let payload = json_object(payload);

    if let Err(err) = validate(&COLLABORATOR_SCHEMA, &payload) {
        warn!(%err, "collaborator update rejected");
        return with_request_id(api_error_response(&err.into()), &request_id);
    }

    let db = state.db.lock().await;
    match roster_store::find_collaborator_by_number(&db, number.value()) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return with_request_id(
                api_error_response(&ApiError::collaborator_not_found(number.value())),
                &request_id,
            )
        }
        Err(err) => {
            return with_request_id(
                store_failure_response("/collaborators/update", &err),
                &request_id,
            )
        }
    }

    // The patch re-resolves the parent reference; a rename of the target
    // sector between requests must fail here, not null the relation.
    let sector_name = payload_str(&payload, "sector_name");
    let sector = match roster_store::find_sector_by_name(&db, &sector_name) {
        Ok(Some(sector)) => sector,
        Ok(None) => {
            warn!(%sector_name, "collaborator update rejected: unknown sector");
            return with_request_id(
                api_error_response(&ApiError::sector_not_found(&sector_name)),
                &request_id,
            );
        }
        Err(err) => {
            return with_request_id(
                store_failure_response("/collaborators/update", &err),
                &request_id,
            )
        }
    };

    let fields = writable_fields(&payload, sector.id);
    if let Err(err) = roster_store::update_collaborator(&db, number.value(), &fields) {
        return with_request_id(
            store_failure_response("/collaborators/update", &err),
            &request_id,
        );
    }

    info!(collab_number = number.value(), "collaborator updated");
    // The response echoes the validated request payload, not a re-fetched
    // record.
    with_request_id(
        json_response(StatusCode::OK, Value::Object(payload)),
        &request_id,
    )
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(raw_number): Path<String>,
) -> Response {
    let request_id = make_request_id(&state);
    let number = match parse_key(&raw_number, &request_id) {
        Ok(number) => number,
        Err(response) => return response,
    };

    let db = state.db.lock().await;
    let collaborator = match roster_store::find_collaborator_by_number(&db, number.value()) {
        Ok(Some(collaborator)) => collaborator,
        Ok(None) => {
            return with_request_id(
                api_error_response(&ApiError::collaborator_not_found(number.value())),
                &request_id,
            )
        }
        Err(err) => {
            return with_request_id(
                store_failure_response("/collaborators/delete", &err),
                &request_id,
            )
        }
    };

    match roster_store::delete_collaborator(&db, collaborator.id) {
        Ok(()) => {
            info!(collab_number = number.value(), "collaborator deleted");
            with_request_id(
                message_response(StatusCode::OK, "Successfully deleted"),
                &request_id,
            )
        }
        Err(err) => with_request_id(
            store_failure_response("/collaborators/delete", &err),
            &request_id,
        ),
    }
}
