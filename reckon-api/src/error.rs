//! Error Shapes for the Reckon API
//!
//! The backend serializes failures as JSON bodies with a stable `code` and a
//! human-readable `message`; validation failures additionally carry
//! field-level detail. This module is the client-side mirror of that shape -
//! it only parses, it never builds responses.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes the backend attaches to failed responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request lacks valid authentication credentials
    Unauthorized,

    /// Request is authenticated but lacks permission for the resource
    Forbidden,

    /// Authentication token is invalid or malformed
    InvalidToken,

    /// Authentication token has expired
    TokenExpired,

    /// Request validation failed (field detail in `details`)
    ValidationFailed,

    /// Requested entity does not exist
    NotFound,

    /// Operation conflicts with current state
    StateConflict,

    /// Request rate limit exceeded
    TooManyRequests,

    /// Internal server error
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Whether the code describes a credential problem the client may be able
    /// to recover from by refreshing the session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ErrorCode::Unauthorized | ErrorCode::InvalidToken | ErrorCode::TokenExpired
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StateConflict => "STATE_CONFLICT",
            ErrorCode::TooManyRequests => "TOO_MANY_REQUESTS",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        };
        write!(f, "{}", value)
    }
}

// ============================================================================
// ERROR BODY
// ============================================================================

/// Structured error body returned by the backend.
///
/// `details` is free-form: for validation failures it maps field names to
/// message lists; for everything else it is usually absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Parse an error body, tolerating non-JSON and differently shaped
    /// payloads by returning `None`.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
