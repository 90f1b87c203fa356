//! Error normalization — maps internal failures to a stable, protocol-agnostic
//! error shape.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::config::Environment;

use super::message::{RequestId, RpcErrorResponse};

/// JSON-RPC 2.0 error codes used by the typed transport.
pub mod rpc_error_codes {
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Fixed message substituted for server faults in production.
pub const REDACTED_INTERNAL_MESSAGE: &str = "Internal server error";

/// All errors the gateway can surface.
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    /// Input failed shape validation before the procedure body ran.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No procedure is registered under the requested name.
    #[error("Method not found: {0}")]
    NotFound(String),

    /// Unexpected failure during context construction or handler execution.
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Build-time defect (duplicate catalog names, missing production domain).
    /// Raised during startup, never crosses the wire.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable wire shape for REST errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorShape {
    pub code: &'static str,
    pub message: String,
}

impl GatewayError {
    /// Stable protocol-agnostic error code.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::BadRequest(_) => "BAD_REQUEST",
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::Internal(_) | GatewayError::Configuration(_) | GatewayError::Io(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }

    /// HTTP status for the REST transport.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Numeric code for the typed transport.
    pub fn rpc_code(&self) -> i32 {
        use rpc_error_codes::*;
        match self {
            GatewayError::BadRequest(_) => INVALID_PARAMS,
            GatewayError::NotFound(_) => METHOD_NOT_FOUND,
            _ => INTERNAL_ERROR,
        }
    }

    /// Message as seen by the caller. Server-fault messages are replaced with
    /// a fixed generic string in production; every other code passes its
    /// message through unchanged.
    pub fn client_message(&self, environment: Environment) -> String {
        if self.code() == "INTERNAL_SERVER_ERROR" && environment == Environment::Production {
            return REDACTED_INTERNAL_MESSAGE.to_string();
        }
        self.to_string()
    }

    /// REST error body content.
    pub fn shape(&self, environment: Environment) -> ErrorShape {
        ErrorShape {
            code: self.code(),
            message: self.client_message(environment),
        }
    }

    /// Typed-transport error response, with the stable code carried in `data`.
    pub fn to_rpc_error(&self, id: RequestId, environment: Environment) -> RpcErrorResponse {
        RpcErrorResponse::new(
            id,
            self.rpc_code(),
            self.client_message(environment),
            Some(serde_json::json!({ "code": self.code() })),
        )
    }

    /// Serialized typed-transport error response.
    pub fn to_rpc_value(&self, id: RequestId, environment: Environment) -> Value {
        serde_json::to_value(self.to_rpc_error(id, environment)).unwrap_or_default()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_message_redacted_in_production() {
        let err = GatewayError::Internal("database on fire".to_string());
        assert_eq!(
            err.client_message(Environment::Production),
            REDACTED_INTERNAL_MESSAGE
        );
    }

    #[test]
    fn internal_message_passes_through_in_development() {
        let err = GatewayError::Internal("database on fire".to_string());
        assert!(err
            .client_message(Environment::Development)
            .contains("database on fire"));
    }

    #[test]
    fn client_errors_never_redacted() {
        let err = GatewayError::BadRequest("params must be an array".to_string());
        assert!(err
            .client_message(Environment::Production)
            .contains("params must be an array"));

        let err = GatewayError::NotFound("unknownMethod".to_string());
        assert!(err
            .client_message(Environment::Production)
            .contains("unknownMethod"));
    }

    #[test]
    fn status_and_code_mapping() {
        assert_eq!(
            GatewayError::BadRequest(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::NotFound(String::new()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::Internal(String::new()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(GatewayError::BadRequest(String::new()).code(), "BAD_REQUEST");
        assert_eq!(
            GatewayError::BadRequest(String::new()).rpc_code(),
            rpc_error_codes::INVALID_PARAMS
        );
        assert_eq!(
            GatewayError::NotFound(String::new()).rpc_code(),
            rpc_error_codes::METHOD_NOT_FOUND
        );
    }
}
