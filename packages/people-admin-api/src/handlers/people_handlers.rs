//! People endpoint handlers.
//!
//! Each handler is a thin adapter: parse the incoming request (form-encoded
//! for the write paths, query string for the list), call the upstream
//! people API, and shape the response for the admin screens.

use hyper::{body::Bytes, Request, Response};
use tracing::info;

use people_form_core::codec;
use people_form_core::form::parse_form_urlencoded;
use people_form_core::model::{Person, PersonSummary};

use crate::router::{AppState, GatewayError};

use super::request_utils::{
    build_empty_response, build_response, map_upstream_error, parse_list_query,
    read_request_body_with_timeout, DestroyMultipleRequest, ListQuery, MatchitParams,
};
use super::response::success_response;

/// Lists person records for the admin table.
///
/// # Endpoint
/// `GET /people?q=<name filter>&include_deleted=<bool>`
///
/// # Response
/// - **200 OK**: list rows with joined display name, primary email/phone,
///   full contact collections, and the soft-delete flag
/// ```json
/// {
///   "success": true,
///   "data": [
///     {"id": "7", "name": "Akshay Donga", "primary_email": "a@x.com", "deleted": false, ...}
///   ]
/// }
/// ```
///
/// # Errors
/// - **400 Bad Request**: malformed `include_deleted` value
/// - **502 Bad Gateway**: upstream people API unreachable or rejected the call
///
/// # Notes
/// - `q` filters case-insensitively on the display name
/// - soft-deleted records are included unless `include_deleted=false`
pub async fn list_people(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, GatewayError> {
    let query = parse_list_query(req.uri().query())?;

    let people = state.client.list().await.map_err(map_upstream_error)?;

    let rows = filter_rows(
        people.into_iter().map(Person::into_summary).collect(),
        &query,
    );

    let api_response = success_response(rows);
    let json = serde_json::to_vec(&api_response)
        .map_err(|e| GatewayError::InternalError(format!("Failed to serialize response: {}", e)))?;

    build_response(200, json)
}

/// Creates a person record from a nested form submission.
///
/// # Endpoint
/// `POST /people`
///
/// # Request Body
/// `application/x-www-form-urlencoded` pairs using the nested field naming
/// (`first_name`, `emails[0].email`, `emails[0].is_primary`, ...).
///
/// # Response
/// - **201 Created**: upstream response body, passed through in the envelope
///
/// # Errors
/// - **408 Request Timeout**: body not received in time
/// - **502 Bad Gateway**: upstream rejected the record (validation lives there)
pub async fn create_person(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, GatewayError> {
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let pairs = parse_form_urlencoded(&body_bytes);
    let payload = codec::decode(&pairs).into_payload();

    let created = state
        .client
        .create(&payload)
        .await
        .map_err(map_upstream_error)?;
    info!(first_name = payload.first_name.as_str(), "person created");

    let api_response = success_response(created);
    let json = serde_json::to_vec(&api_response)
        .map_err(|e| GatewayError::InternalError(format!("Failed to serialize response: {}", e)))?;

    build_response(201, json)
}

/// Reads one person record, shaped for the edit screen.
///
/// # Endpoint
/// `GET /people/{id}`
///
/// Collections come back under their form group names (`emails`, `phones`,
/// `addresses`) with row ids kept, so a renderer can emit fields that
/// round-trip through the codec.
pub async fn read_person(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, GatewayError> {
    let id = params.get("id").unwrap_or("unknown").to_string();

    let person = state.client.get(&id).await.map_err(map_upstream_error)?;
    let form = person.into_form();

    let api_response = success_response(form);
    let json = serde_json::to_vec(&api_response)
        .map_err(|e| GatewayError::InternalError(format!("Failed to serialize response: {}", e)))?;

    build_response(200, json)
}

/// Updates a person record from a nested form submission.
///
/// # Endpoint
/// `PUT /people/{id}`
///
/// The body uses the same form-encoded naming as create; hidden `g[i].id`
/// fields correlate rows to existing upstream records.
pub async fn update_person(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, GatewayError> {
    let id = params.get("id").unwrap_or("unknown").to_string();

    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let pairs = parse_form_urlencoded(&body_bytes);
    let payload = codec::decode(&pairs).into_payload();

    state
        .client
        .update(&id, &payload)
        .await
        .map_err(map_upstream_error)?;
    info!(id = id.as_str(), "person updated");

    build_empty_response(204)
}

/// Soft-deletes a person record.
///
/// # Endpoint
/// `DELETE /people/{id}`
///
/// The upstream API marks the record deleted rather than removing it; the
/// list endpoint keeps showing it with `deleted: true` until restored.
pub async fn delete_person(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, GatewayError> {
    let id = params.get("id").unwrap_or("unknown").to_string();

    state
        .client
        .soft_delete(&id)
        .await
        .map_err(map_upstream_error)?;
    info!(id = id.as_str(), "person soft-deleted");

    build_empty_response(204)
}

/// Restores a soft-deleted person record.
///
/// # Endpoint
/// `POST /people/{id}/restore`
pub async fn restore_person(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, GatewayError> {
    let id = params.get("id").unwrap_or("unknown").to_string();

    state.client.restore(&id).await.map_err(map_upstream_error)?;
    info!(id = id.as_str(), "person restored");

    build_empty_response(204)
}

/// Soft-deletes several person records in one call.
///
/// # Endpoint
/// `DELETE /people`
///
/// # Request Body
/// ```json
/// {"ids": ["1", "2", "3"]}
/// ```
///
/// # Errors
/// - **400 Bad Request**: malformed body or empty id list
pub async fn delete_people(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, GatewayError> {
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: DestroyMultipleRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| GatewayError::BadRequest(format!("Failed to parse request: {}", e)))?;
    if request.ids.is_empty() {
        return Err(GatewayError::BadRequest("No ids provided".to_string()));
    }

    state
        .client
        .destroy_multiple(&request.ids)
        .await
        .map_err(map_upstream_error)?;
    info!(count = request.ids.len(), "people soft-deleted in bulk");

    build_empty_response(204)
}

/// Applies the list query to the shaped rows: drops soft-deleted rows when
/// asked to, then keeps rows whose display name contains the filter,
/// case-insensitively.
fn filter_rows(mut rows: Vec<PersonSummary>, query: &ListQuery) -> Vec<PersonSummary> {
    if !query.include_deleted {
        rows.retain(|row| !row.deleted);
    }
    if let Some(q) = &query.q {
        let needle = q.to_lowercase();
        rows.retain(|row| row.name.to_lowercase().contains(&needle));
    }
    rows
}
