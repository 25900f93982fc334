//! JSON response envelope for the gateway endpoints.
//!
//! Every endpoint answers with the same two shapes so admin-screen clients
//! can branch on a single `success` flag:
//!
//! ```json
//! {"success": true, "data": [{"id": "7", "name": "Akshay Donga", ...}]}
//! {"success": false, "error": {"code": "404", "message": "record not found upstream"}}
//! ```

use serde::Serialize;

/// Success envelope wrapping the endpoint's data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always true
    pub success: bool,
    /// Endpoint payload: list rows, an edit-screen record, or an upstream
    /// passthrough body
    pub data: T,
}

/// Error detail carried inside the failure envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// HTTP status code as a string
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Extra context, such as the path that failed to match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Error information
    pub error: ApiError,
}

/// Wraps endpoint data in the success envelope.
pub fn success_response<T: Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
    }
}

/// Builds the failure envelope for a status code and message.
pub fn error_response(code: u16, message: String, details: Option<String>) -> ErrorResponse {
    ErrorResponse {
        success: false,
        error: ApiError {
            code: code.to_string(),
            message,
            details,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_serializes_data_inline() {
        let json = serde_json::to_value(success_response(vec!["Akshay Donga"])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][0], "Akshay Donga");
    }

    #[test]
    fn error_envelope_omits_empty_details() {
        let json = serde_json::to_value(error_response(502, "people api down".to_string(), None))
            .unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "502");
        assert!(json["error"].get("details").is_none());

        let json = serde_json::to_value(error_response(
            404,
            "Not Found".to_string(),
            Some("No route found for /invoices".to_string()),
        ))
        .unwrap();
        assert_eq!(json["error"]["details"], "No route found for /invoices");
    }
}
