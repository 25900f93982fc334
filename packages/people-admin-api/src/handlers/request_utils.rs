//! Request utilities for HTTP endpoints.

use http_body_util::BodyExt;
use hyper::{body::Bytes, Request, Response};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use tokio::time;

use crate::client::UpstreamError;
use crate::router::GatewayError;

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout(
    req: Request<hyper::body::Incoming>,
    timeout_ms: u64,
) -> Result<Bytes, GatewayError> {
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.collect())
        .await
        .map_err(|_| GatewayError::Timeout)?
        .map_err(|e| GatewayError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Map UpstreamError to the appropriate GatewayError
pub fn map_upstream_error(e: UpstreamError) -> GatewayError {
    match e {
        UpstreamError::NotFound => GatewayError::NotFound("record not found upstream".to_string()),
        UpstreamError::Rejected { .. } | UpstreamError::Http(_) => {
            GatewayError::Upstream(e.to_string())
        }
    }
}

/// Query parameters accepted by the list endpoint.
#[derive(Debug, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring filter on the display name
    pub q: Option<String>,
    /// Whether soft-deleted records are included (default true)
    pub include_deleted: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            q: None,
            include_deleted: true,
        }
    }
}

/// Body for the bulk soft-delete endpoint.
#[derive(Debug, Deserialize)]
pub struct DestroyMultipleRequest {
    /// Record ids to soft-delete
    pub ids: Vec<String>,
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, GatewayError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| GatewayError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, GatewayError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| GatewayError::InternalError(format!("Failed to build response: {}", e)))
}

/// Parse list query parameters from the URL query string.
///
/// Unknown parameters are ignored; a malformed `include_deleted` is a 400.
pub fn parse_list_query(query_str: Option<&str>) -> Result<ListQuery, GatewayError> {
    let mut query = ListQuery::default();

    if let Some(query_str) = query_str {
        for pair in query_str.split('&') {
            let parts: Vec<&str> = pair.splitn(2, '=').collect();
            if parts.len() != 2 {
                continue;
            }
            let key = parts[0];
            let unplussed = parts[1].replace('+', " ");
            let decoded_value = percent_decode_str(&unplussed).decode_utf8_lossy();

            match key {
                "q" => {
                    let trimmed = decoded_value.trim();
                    if !trimmed.is_empty() {
                        query.q = Some(trimmed.to_string());
                    }
                }
                "include_deleted" => {
                    query.include_deleted = decoded_value.parse().map_err(|e| {
                        GatewayError::BadRequest(format!(
                            "Invalid include_deleted value '{}': {}",
                            decoded_value, e
                        ))
                    })?;
                }
                _ => {}
            }
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_uses_defaults() {
        let query = parse_list_query(None).unwrap();
        assert_eq!(query, ListQuery::default());
        assert!(query.include_deleted);
    }

    #[test]
    fn parses_filter_and_deleted_flag() {
        let query = parse_list_query(Some("q=aks%20d&include_deleted=false")).unwrap();
        assert_eq!(query.q.as_deref(), Some("aks d"));
        assert!(!query.include_deleted);
    }

    #[test]
    fn blank_filter_is_dropped_and_unknown_params_ignored() {
        let query = parse_list_query(Some("q=+&sort=name")).unwrap();
        assert!(query.q.is_none());
    }

    #[test]
    fn malformed_deleted_flag_is_a_bad_request() {
        let err = parse_list_query(Some("include_deleted=maybe")).unwrap_err();
        assert!(matches!(err, GatewayError::BadRequest(_)));
    }

    #[test]
    fn upstream_not_found_maps_to_gateway_not_found() {
        let err = map_upstream_error(UpstreamError::NotFound);
        assert!(matches!(err, GatewayError::NotFound(_)));

        let err = map_upstream_error(UpstreamError::Rejected {
            status: 422,
            body: String::new(),
        });
        assert!(matches!(err, GatewayError::Upstream(_)));
    }
}
