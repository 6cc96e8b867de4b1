//! Authentication Middleware
//!
//! Runs once per request before any handler. A request without a bearer
//! token passes through anonymously; a request with one either gets an
//! [`AuthenticatedIdentity`] in its extensions or is rejected here.

use crate::error::{AuthError, AuthFailure};
use crate::models::AuthenticatedIdentity;
use crate::token::TokenValidator;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Fixed prefix in front of the token in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Strip the bearer prefix, or `None` if the header carries no bearer token
pub fn resolve_token(header: Option<&str>) -> Option<&str> {
    header
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// Identity for an `Authorization` header value
///
/// `Ok(None)` is the anonymous case. Any validation failure is an error.
pub fn identify(
    validator: &TokenValidator,
    header: Option<&str>,
) -> Result<Option<AuthenticatedIdentity>, AuthFailure> {
    match resolve_token(header) {
        None => Ok(None),
        Some(token) => validator
            .subject_of(token)
            .map(|subject| Some(AuthenticatedIdentity(subject))),
    }
}

/// Authentication gate
///
/// Mount with `axum::middleware::from_fn_with_state(validator, authenticate)`.
pub async fn authenticate(
    State(validator): State<TokenValidator>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match identify(&validator, auth_header) {
        Ok(Some(identity)) => {
            tracing::debug!(user_id = %identity.0, "Request authenticated");
            req.extensions_mut().insert(identity);
        }
        Ok(None) => {
            tracing::debug!(path = %req.uri().path(), "Anonymous request");
        }
        Err(kind) => {
            tracing::debug!(path = %req.uri().path(), failure = ?kind, "Rejected bearer token");
            return Err(AuthError::Authentication(kind));
        }
    }

    Ok(next.run(req).await)
}
