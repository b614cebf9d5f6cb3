//! Error types for route resolution
//!
//! This module provides type-safe error handling for the router.
//!
//! # Error Codes
//!
//! Error codes are represented by the [`RouteErrorCode`] enum. When serialized,
//! codes are converted to SCREAMING_SNAKE_CASE strings so transports can pass
//! them through unchanged.
//!
//! # Rejections
//!
//! Handlers and parameter resolvers fail with a [`Rejection`] rather than a
//! bare [`RouteError`]. The rejection decides what the resolver does next:
//!
//! - [`Rejection::Empty`] and [`Rejection::Ignored`] are soft: the current
//!   candidate is discarded and the next one is tried.
//! - [`Rejection::Reason`] is hard: resolution stops and the error is
//!   returned to the caller unchanged.
//!
//! # Example
//! ```rust,ignore
//! use route_resolver::{RouteError, Rejection};
//!
//! let hard: Rejection = RouteError::forbidden("Not your account").into();
//! let soft = Rejection::ignore(RouteError::not_found("No such user"));
//! let skip = Rejection::Empty;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Type-safe error codes for routing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum RouteErrorCode {
    // Resolution outcomes
    /// No candidate matched, or every candidate failed soft
    NotFound,
    /// `reverse` was asked for a name that was never registered
    UnknownRoute,
    /// `reverse` could not fill a dynamic segment
    MissingParam,

    // Client errors (4xx equivalent)
    /// A parameter failed schema validation
    ValidationError,
    /// The request path was malformed or too long
    BadRequest,
    /// The caller lacks permission
    Forbidden,
    /// The request conflicts with current state
    Conflict,

    // Server errors (5xx equivalent)
    /// An unexpected internal error occurred
    InternalError,
    /// A handler or resolver output could not be serialized
    SerializationError,
}

impl RouteErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::UnknownRoute => "UNKNOWN_ROUTE",
            Self::MissingParam => "MISSING_PARAM",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        }
    }

    /// Returns true if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::ValidationError
                | Self::BadRequest
                | Self::Forbidden
                | Self::Conflict
        )
    }

    /// Returns true if this is a server error (5xx equivalent).
    ///
    /// `UnknownRoute` and `MissingParam` count as server errors: they come
    /// from `reverse`, which is called by the application, not a client.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownRoute
                | Self::MissingParam
                | Self::InternalError
                | Self::SerializationError
        )
    }

    /// Numeric status a transport would typically map this code to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::ValidationError | Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::Conflict => 409,
            Self::UnknownRoute
            | Self::MissingParam
            | Self::InternalError
            | Self::SerializationError => 500,
        }
    }
}

impl fmt::Display for RouteErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Routing error with type-safe code and message.
///
/// # Example
/// ```rust,ignore
/// use route_resolver::{RouteError, RouteErrorCode};
///
/// let error = RouteError::new(RouteErrorCode::Conflict, "Order already shipped")
///     .with_details(serde_json::json!({"order_id": 7}))
///     .with_cause("status=shipped");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("[{code}] {message}")]
pub struct RouteError {
    /// Type-safe error code
    pub code: RouteErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (JSON value)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Optional cause for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl RouteError {
    /// Create a new error with code and message.
    pub fn new(code: RouteErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            cause: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Add a cause string for debugging.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Numeric status for this error, see [`RouteErrorCode::status_code`].
    pub fn status_code(&self) -> u16 {
        self.code.status_code()
    }

    /// Whether this is the generic "nothing matched" signal.
    pub fn is_not_found(&self) -> bool {
        self.code == RouteErrorCode::NotFound
    }

    // Convenience constructors

    /// Create a NOT_FOUND error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::NotFound, message)
    }

    /// Create the NOT_FOUND error returned when no candidate for `path` succeeds.
    pub fn no_match(path: &str) -> Self {
        Self::not_found(format!("No route matched '{}'", path))
            .with_details(serde_json::json!({ "path": path }))
    }

    /// Create an UNKNOWN_ROUTE error.
    pub fn unknown_route(name: &str) -> Self {
        Self::new(
            RouteErrorCode::UnknownRoute,
            format!("Unknown route: {}", name),
        )
        .with_details(serde_json::json!({ "route": name }))
    }

    /// Create a MISSING_PARAM error.
    pub fn missing_param(route: &str, param: &str) -> Self {
        Self::new(
            RouteErrorCode::MissingParam,
            format!(
                "Failed to reverse route {}. Missing param: {}",
                route, param
            ),
        )
        .with_details(serde_json::json!({ "route": route, "param": param }))
    }

    /// Create a VALIDATION_ERROR error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::ValidationError, message)
    }

    /// Create a BAD_REQUEST error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::BadRequest, message)
    }

    /// Create a FORBIDDEN error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::Forbidden, message)
    }

    /// Create a CONFLICT error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::Conflict, message)
    }

    /// Create an INTERNAL_ERROR error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::InternalError, message)
    }

    /// Create a SERIALIZATION_ERROR error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(RouteErrorCode::SerializationError, message)
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Result type alias for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// Failure value of a handler or parameter resolver.
///
/// The variant decides whether the resolver moves on to the next candidate
/// (soft) or aborts the whole resolution (hard).
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Rejected without a reason. Soft.
    Empty,
    /// Rejected with a reason that is explicitly marked ignorable. Soft.
    Ignored(RouteError),
    /// Rejected with a reason. Hard: surfaced to the caller as-is.
    Reason(RouteError),
}

impl Rejection {
    /// Reject with a hard reason.
    pub fn reason(error: RouteError) -> Self {
        Self::Reason(error)
    }

    /// Reject with a reason that should not stop resolution.
    pub fn ignore(error: RouteError) -> Self {
        Self::Ignored(error)
    }

    /// Returns true if resolution should fall through to the next candidate.
    pub fn is_soft(&self) -> bool {
        !matches!(self, Self::Reason(_))
    }

    /// The attached reason, if any.
    pub fn error(&self) -> Option<&RouteError> {
        match self {
            Self::Empty => None,
            Self::Ignored(error) | Self::Reason(error) => Some(error),
        }
    }

    /// Consume the rejection, returning its reason if any.
    pub fn into_error(self) -> Option<RouteError> {
        match self {
            Self::Empty => None,
            Self::Ignored(error) | Self::Reason(error) => Some(error),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "rejected without reason"),
            Self::Ignored(error) => write!(f, "ignored: {}", error),
            Self::Reason(error) => write!(f, "{}", error),
        }
    }
}

impl From<RouteError> for Rejection {
    fn from(error: RouteError) -> Self {
        Self::Reason(error)
    }
}

impl From<serde_json::Error> for Rejection {
    fn from(err: serde_json::Error) -> Self {
        Self::Reason(err.into())
    }
}
