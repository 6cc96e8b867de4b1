//! Authentication Error Types
//!
//! Two layers: [`TokenError`] is what the codec reports about a token string,
//! [`AuthError`] is what the HTTP surface reports to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Codec-level decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Wrong structure, tampered payload, wrong signature or algorithm
    #[error("Malformed token")]
    Malformed,

    /// Signature intact but the embedded expiry has passed
    #[error("Expired token")]
    Expired,
}

/// Which kind of token failure stopped the request
///
/// Expired tokens should prompt a reissue, invalid ones a fresh login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid")]
    Invalid,
}

impl AuthFailure {
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::Expired => "token_expired",
            AuthFailure::Invalid => "token_invalid",
        }
    }
}

impl From<TokenError> for AuthFailure {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthFailure::Expired,
            TokenError::Malformed => AuthFailure::Invalid,
        }
    }
}

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Authentication(AuthFailure),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Login user does not match the requested user")]
    Forbidden,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error")]
    Internal,
}

impl From<AuthFailure> for AuthError {
    fn from(kind: AuthFailure) -> Self {
        AuthError::Authentication(kind)
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Authentication(err.into())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::error!("JWT signing error: {:?}", err);
        AuthError::Internal
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            AuthError::Authentication(kind) => {
                (StatusCode::UNAUTHORIZED, kind.code(), self.to_string())
            }
            AuthError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
            ),
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AuthError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AuthError::Config(_) | AuthError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        (
            status,
            Json(serde_json::json!({
                "error": error_code,
                "message": message
            })),
        )
            .into_response()
    }
}
