//! Typed error handling for bistro-api
//!
//! Every step of a request pipeline, every handler and the configuration
//! loader report failures through [`BistroError`]. Each category knows its
//! HTTP status and a stable machine-readable code, and the whole error
//! renders itself as a JSON [`ErrorResponse`] through axum's `IntoResponse`.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed, missing or out-of-range payload fields (400)
//! - [`EntityError`]: unknown record ids and body/route id conflicts (404, 400)
//! - [`RequestError`]: unreadable bodies, unknown paths, unsupported methods
//! - [`ConfigError`]: configuration parsing and seed data problems
//!
//! # Example
//!
//! ```rust,ignore
//! use bistro::prelude::*;
//!
//! match result {
//!     Err(BistroError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("no record {}", id);
//!     }
//!     Err(e) => eprintln!("{} ({})", e, e.status_code()),
//!     Ok(_) => {}
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for bistro-api
#[derive(Debug)]
pub enum BistroError {
    /// Payload validation errors
    Validation(ValidationError),

    /// Record lookup and identity errors
    Entity(EntityError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Configuration errors
    Config(ConfigError),

    /// Unexpected failures (poisoned locks, panics, broken invariants)
    Internal(String),
}

impl fmt::Display for BistroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BistroError::Validation(e) => write!(f, "{}", e),
            BistroError::Entity(e) => write!(f, "{}", e),
            BistroError::Request(e) => write!(f, "{}", e),
            BistroError::Config(e) => write!(f, "{}", e),
            BistroError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for BistroError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BistroError::Validation(e) => Some(e),
            BistroError::Entity(e) => Some(e),
            BistroError::Request(e) => Some(e),
            BistroError::Config(e) => Some(e),
            BistroError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl BistroError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BistroError::Validation(_) => StatusCode::BAD_REQUEST,
            BistroError::Entity(e) => e.status_code(),
            BistroError::Request(e) => e.status_code(),
            BistroError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BistroError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BistroError::Validation(_) => "VALIDATION_ERROR",
            BistroError::Entity(e) => e.error_code(),
            BistroError::Request(e) => e.error_code(),
            BistroError::Config(_) => "CONFIG_ERROR",
            BistroError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Internal failures never leak their message to clients.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            BistroError::Internal(_) | BistroError::Config(_) => {
                "Something went wrong on our end".to_string()
            }
            _ => self.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            BistroError::Validation(ValidationError::MissingField { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            BistroError::Validation(ValidationError::InvalidQuantity { index, problem }) => {
                Some(serde_json::json!({
                    "index": index,
                    "problem": problem.as_str()
                }))
            }
            BistroError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            BistroError::Entity(EntityError::IdMismatch {
                entity_type,
                body_id,
                route_id,
            }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "body_id": body_id,
                "route_id": route_id
            })),
            _ => None,
        }
    }
}

impl IntoResponse for BistroError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// What was wrong with an order line's quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityProblem {
    Missing,
    NotPositive,
    NotInteger,
}

impl QuantityProblem {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityProblem::Missing => "missing",
            QuantityProblem::NotPositive => "not_positive",
            QuantityProblem::NotInteger => "not_integer",
        }
    }
}

/// Errors raised by validation steps
#[derive(Debug)]
pub enum ValidationError {
    /// Required field absent, null, or (for text fields) empty
    MissingField {
        entity_type: &'static str,
        field: String,
    },

    /// Dish price is not a positive integer
    InvalidPrice,

    /// Order payload has no `dishes` field at all
    MissingDishes,

    /// Order `dishes` is not an array, or is an empty one
    EmptyDishes,

    /// An order line has a bad quantity
    InvalidQuantity {
        index: usize,
        problem: QuantityProblem,
    },

    /// Status outside the allowed set
    InvalidStatus {
        entity_type: &'static str,
        allowed: &'static [&'static str],
    },

    /// Deletion attempted on an order that is not pending
    NotPending,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField { entity_type, field } => {
                write!(f, "{} must include a {}", entity_type, field)
            }
            ValidationError::InvalidPrice => {
                write!(f, "Dish must have a price that is an integer greater than 0")
            }
            ValidationError::MissingDishes => write!(f, "Order must include a dish"),
            ValidationError::EmptyDishes => write!(f, "Order must include at least one dish"),
            ValidationError::InvalidQuantity { index, .. } => write!(
                f,
                "Dish {} must have a quantity that is an integer greater than 0",
                index
            ),
            ValidationError::InvalidStatus {
                entity_type,
                allowed,
            } => write!(
                f,
                "{} must have a status of {}",
                entity_type,
                allowed.join(", ")
            ),
            ValidationError::NotPending => {
                write!(f, "An order cannot be deleted unless it is pending")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for BistroError {
    fn from(err: ValidationError) -> Self {
        BistroError::Validation(err)
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to locating and identifying records
#[derive(Debug)]
pub enum EntityError {
    /// No record with the route id
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Body `id` conflicts with the route id
    IdMismatch {
        entity_type: &'static str,
        body_id: String,
        route_id: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound {
                entity_type: "Order",
                id,
            } => write!(f, "Order not found with id: {}", id),
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} does not exist: {}", entity_type, id)
            }
            EntityError::IdMismatch {
                entity_type,
                body_id,
                route_id,
            } => write!(
                f,
                "{} id does not match route id. {}: {}, Route: {}.",
                entity_type, entity_type, body_id, route_id
            ),
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "NOT_FOUND",
            EntityError::IdMismatch { .. } => "ID_MISMATCH",
        }
    }
}

impl From<EntityError> for BistroError {
    fn from(err: EntityError) -> Self {
        BistroError::Entity(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Body is not valid JSON
    InvalidBody { message: String },

    /// No route for this path
    RouteNotFound { path: String },

    /// Path exists but not for this method
    MethodNotAllowed { method: String, path: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::RouteNotFound { path } => write!(f, "Path not found: {}", path),
            RequestError::MethodNotAllowed { method, path } => {
                write!(f, "{} not allowed for {}", method, path)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            RequestError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
            RequestError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
        }
    }
}

impl From<RequestError> for BistroError {
    fn from(err: RequestError) -> Self {
        BistroError::Request(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => write!(
                f,
                "Invalid value '{}' for field '{}': {}",
                value, field, message
            ),
            ConfigError::IoError { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for BistroError {
    fn from(err: ConfigError) -> Self {
        BistroError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for BistroError {
    fn from(err: serde_json::Error) -> Self {
        BistroError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for BistroError {
    fn from(err: serde_yaml::Error) -> Self {
        BistroError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for bistro-api operations
pub type BistroResult<T> = Result<T, BistroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field() {
        let err = ValidationError::MissingField {
            entity_type: "Order",
            field: "deliverTo".to_string(),
        };
        assert_eq!(err.to_string(), "Order must include a deliverTo");
    }

    #[test]
    fn test_not_found_status_code() {
        let err: BistroError = EntityError::NotFound {
            entity_type: "Dish",
            id: "42".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Dish does not exist: 42");
    }

    #[test]
    fn test_order_not_found_message() {
        let err: BistroError = EntityError::NotFound {
            entity_type: "Order",
            id: "7".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Order not found with id: 7");
    }

    #[test]
    fn test_id_mismatch_is_bad_request() {
        let err = EntityError::IdMismatch {
            entity_type: "Dish",
            body_id: "3".to_string(),
            route_id: "1".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Dish id does not match route id. Dish: 3, Route: 1."
        );
    }

    #[test]
    fn test_quantity_message_identifies_index() {
        let err = ValidationError::InvalidQuantity {
            index: 2,
            problem: QuantityProblem::NotPositive,
        };
        assert!(err.to_string().starts_with("Dish 2 must have a quantity"));

        let response = BistroError::from(err).to_response();
        let details = response.details.unwrap();
        assert_eq!(details["index"], 2);
        assert_eq!(details["problem"], "not_positive");
    }

    #[test]
    fn test_internal_error_message_is_generic() {
        let err = BistroError::Internal("lock poisoned".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.to_response();
        assert_eq!(response.code, "INTERNAL_ERROR");
        assert!(!response.message.contains("poisoned"));
    }

    #[test]
    fn test_request_error_status_codes() {
        assert_eq!(
            RequestError::MethodNotAllowed {
                method: "DELETE".to_string(),
                path: "/dishes/1".to_string()
            }
            .status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RequestError::RouteNotFound {
                path: "/nope".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: BistroError = json_err.into();
        assert!(matches!(
            err,
            BistroError::Request(RequestError::InvalidBody { .. })
        ));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
