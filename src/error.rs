use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;

/// ApiError
///
/// The single error taxonomy of the gateway. Every variant is a deterministic
/// rejection, never a transient fault, so callers propagate it with `?` and
/// nothing retries.
///
/// Per-request variants render as a JSON `ErrorBody` carrying a stable kind
/// string and a fixed message. `InconsistentDescriptor` is only produced while
/// building the descriptor table and aborts startup instead of being served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("unknown role `{0}`")]
    UnknownRole(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token role claim is outside the known role set")]
    MalformedRole,

    #[error("no endpoint matches the request")]
    RouteNotFound,

    #[error("authentication required")]
    Unauthenticated,

    #[error("role is not allowed on this endpoint")]
    Forbidden,

    #[error("endpoint descriptor `{id}` is inconsistent: {reason}")]
    InconsistentDescriptor { id: String, reason: String },

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("token could not be issued")]
    TokenIssue,

    #[error("request body rejected: {0}")]
    MalformedBody(String),

    #[error("internal task failed: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    /// Shorthand used by the descriptor table checks.
    pub fn inconsistent(id: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::InconsistentDescriptor {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Machine-readable kind string returned to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::UnknownRole(_) => "unknown_role",
            ApiError::InvalidSignature => "invalid_signature",
            ApiError::Expired => "expired",
            ApiError::MalformedRole => "malformed_role",
            ApiError::RouteNotFound => "route_not_found",
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::Forbidden => "forbidden",
            ApiError::InconsistentDescriptor { .. } => "inconsistent_descriptor",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::TokenIssue => "token_issue",
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::Internal(_) => "internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthenticated
            | ApiError::InvalidSignature
            | ApiError::Expired
            | ApiError::MalformedRole
            | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::UnknownRole(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InconsistentDescriptor { .. }
            | ApiError::TokenIssue
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Fixed per kind so that token contents and
    /// descriptor internals never reach the response body.
    fn public_message(&self) -> &'static str {
        match self {
            ApiError::UnknownRole(_) => "Unknown user role",
            ApiError::InvalidSignature | ApiError::Expired | ApiError::MalformedRole => {
                "Invalid or expired token"
            }
            ApiError::RouteNotFound => "API endpoint not found",
            ApiError::Unauthenticated => "Authentication required",
            ApiError::Forbidden => "Access denied for this role",
            ApiError::InvalidCredentials => "Invalid email or password",
            ApiError::MalformedBody(_) => "Invalid request body",
            ApiError::InconsistentDescriptor { .. }
            | ApiError::TokenIssue
            | ApiError::Internal(_) => "Something went wrong!",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "request failed");
        } else {
            tracing::debug!(error = %self, kind = self.kind(), "request rejected");
        }

        let body = ErrorBody {
            success: false,
            error: self.kind().to_string(),
            message: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
