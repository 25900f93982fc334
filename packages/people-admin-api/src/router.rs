//! Matchit routing configuration.

use std::sync::Arc;

use hyper::{body::Bytes, Request, Response};
use matchit::Router as MatchitRouter;

use crate::client::PeopleClient;
use crate::handlers;
use people_form_core::config::GatewayConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration
    pub config: Arc<GatewayConfig>,
    /// Upstream people API client
    pub client: Arc<PeopleClient>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the gateway routes.
    pub fn new(config: Arc<GatewayConfig>, client: Arc<PeopleClient>) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert("/people", RouteHandler::People)
            .expect("Failed to insert /people route");
        router
            .insert("/people/{id}", RouteHandler::Person)
            .expect("Failed to insert /people/{id} route");
        router
            .insert("/people/{id}/restore", RouteHandler::Restore)
            .expect("Failed to insert /people/{id}/restore route");

        Self {
            inner: router,
            state: AppState { config, client },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    pub async fn route(
        &self,
        req: Request<hyper::body::Incoming>,
    ) -> Result<Response<Bytes>, GatewayError> {
        let path = req.uri().path().to_string();

        match self.inner.at(&path) {
            Ok(matched) => {
                let handler = matched.value;
                handler
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => {
                // Return 404 for unmatched routes
                let error_response = crate::handlers::error_response(
                    404,
                    "Not Found".to_string(),
                    Some(format!("No route found for {}", path)),
                );
                let body = serde_json::to_vec(&error_response).map_err(|e| {
                    GatewayError::InternalError(format!("Failed to serialize error response: {}", e))
                })?;
                Ok(Response::builder()
                    .status(404)
                    .header("Content-Type", "application/json")
                    .body(Bytes::from(body))
                    .map_err(|e| {
                        GatewayError::InternalError(format!("Failed to build response: {}", e))
                    })?)
            }
        }
    }
}

/// Route handler selector.
enum RouteHandler {
    People,
    Person,
    Restore,
}

/// Operation selected by route and method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    ListPeople,
    CreatePerson,
    DeletePeople,
    ReadPerson,
    UpdatePerson,
    DeletePerson,
    RestorePerson,
}

impl RouteHandler {
    /// Resolves the operation for a method on this route, or 405.
    fn operation(&self, method: &hyper::Method) -> Result<Operation, GatewayError> {
        match self {
            RouteHandler::People => {
                if method == hyper::Method::GET {
                    Ok(Operation::ListPeople)
                } else if method == hyper::Method::POST {
                    Ok(Operation::CreatePerson)
                } else if method == hyper::Method::DELETE {
                    Ok(Operation::DeletePeople)
                } else {
                    Err(GatewayError::MethodNotAllowed)
                }
            }
            RouteHandler::Person => {
                if method == hyper::Method::GET {
                    Ok(Operation::ReadPerson)
                } else if method == hyper::Method::PUT {
                    Ok(Operation::UpdatePerson)
                } else if method == hyper::Method::DELETE {
                    Ok(Operation::DeletePerson)
                } else {
                    Err(GatewayError::MethodNotAllowed)
                }
            }
            RouteHandler::Restore => {
                if method == hyper::Method::POST {
                    Ok(Operation::RestorePerson)
                } else {
                    Err(GatewayError::MethodNotAllowed)
                }
            }
        }
    }

    /// Handles a request with the given route parameters.
    async fn handle(
        &self,
        req: Request<hyper::body::Incoming>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, GatewayError> {
        match self.operation(req.method())? {
            Operation::ListPeople => handlers::list_people(req, params, state).await,
            Operation::CreatePerson => handlers::create_person(req, params, state).await,
            Operation::DeletePeople => handlers::delete_people(req, params, state).await,
            Operation::ReadPerson => handlers::read_person(req, params, state).await,
            Operation::UpdatePerson => handlers::update_person(req, params, state).await,
            Operation::DeletePerson => handlers::delete_person(req, params, state).await,
            Operation::RestorePerson => handlers::restore_person(req, params, state).await,
        }
    }
}

/// Gateway error type.
#[derive(Debug)]
pub enum GatewayError {
    MethodNotAllowed,
    BadRequest(String),
    NotFound(String),
    Timeout,
    Upstream(String),
    InternalError(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            GatewayError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            GatewayError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            GatewayError::Timeout => write!(f, "Request Timeout"),
            GatewayError::Upstream(msg) => write!(f, "Bad Gateway: {}", msg),
            GatewayError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for Response<Bytes> {
    fn from(err: GatewayError) -> Self {
        let (status, message) = match &err {
            GatewayError::MethodNotAllowed => (405, "Method Not Allowed"),
            GatewayError::BadRequest(msg) => (400, msg.as_str()),
            GatewayError::NotFound(msg) => (404, msg.as_str()),
            GatewayError::Timeout => (408, "Request Timeout"),
            GatewayError::Upstream(msg) => (502, msg.as_str()),
            GatewayError::InternalError(msg) => (500, msg.as_str()),
        };

        let error_response = crate::handlers::error_response(status, message.to_string(), None);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\",\"details\":null}}}}", e).into_bytes());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(500)
                    .body(Bytes::from("Internal Server Error"))
                    .expect("Failed to build fallback error response")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_match_expected_paths() {
        let config = Arc::new(GatewayConfig::default());
        let client = Arc::new(PeopleClient::new(&config).unwrap());
        let router = Router::new(config, client);

        assert!(router.inner.at("/people").is_ok());
        let matched = router.inner.at("/people/7").unwrap();
        assert_eq!(matched.params.get("id"), Some("7"));
        assert!(router.inner.at("/people/7/restore").is_ok());
        assert!(router.inner.at("/invoices").is_err());
    }

    #[test]
    fn methods_dispatch_to_expected_operations() {
        use hyper::Method;

        assert_eq!(
            RouteHandler::People.operation(&Method::GET).unwrap(),
            Operation::ListPeople
        );
        assert_eq!(
            RouteHandler::People.operation(&Method::POST).unwrap(),
            Operation::CreatePerson
        );
        assert_eq!(
            RouteHandler::People.operation(&Method::DELETE).unwrap(),
            Operation::DeletePeople
        );
        assert_eq!(
            RouteHandler::Person.operation(&Method::GET).unwrap(),
            Operation::ReadPerson
        );
        assert_eq!(
            RouteHandler::Person.operation(&Method::PUT).unwrap(),
            Operation::UpdatePerson
        );
        assert_eq!(
            RouteHandler::Person.operation(&Method::DELETE).unwrap(),
            Operation::DeletePerson
        );
        assert_eq!(
            RouteHandler::Restore.operation(&Method::POST).unwrap(),
            Operation::RestorePerson
        );
    }

    #[test]
    fn unsupported_methods_are_rejected() {
        use hyper::Method;

        for (route, method) in [
            (RouteHandler::People, Method::PATCH),
            (RouteHandler::People, Method::PUT),
            (RouteHandler::Person, Method::PATCH),
            (RouteHandler::Person, Method::POST),
            (RouteHandler::Restore, Method::GET),
            (RouteHandler::Restore, Method::DELETE),
        ] {
            assert!(matches!(
                route.operation(&method),
                Err(GatewayError::MethodNotAllowed)
            ));
        }
    }

    #[test]
    fn errors_map_to_expected_statuses() {
        let cases = [
            (GatewayError::MethodNotAllowed, 405),
            (GatewayError::BadRequest("bad".to_string()), 400),
            (GatewayError::NotFound("gone".to_string()), 404),
            (GatewayError::Timeout, 408),
            (GatewayError::Upstream("down".to_string()), 502),
            (GatewayError::InternalError("boom".to_string()), 500),
        ];
        for (err, expected) in cases {
            let response: Response<Bytes> = err.into();
            assert_eq!(response.status().as_u16(), expected);
        }
    }

    #[test]
    fn error_body_uses_the_envelope() {
        let response: Response<Bytes> = GatewayError::Upstream("people api down".to_string()).into();
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "502");
        assert_eq!(body["error"]["message"], "people api down");
    }
}
