//! Authentication Extractors
//!
//! Handlers read the identity the middleware attached to the request. They
//! never look at the `Authorization` header themselves.

use crate::error::AuthError;
use crate::models::{AuthenticatedIdentity, SubjectId};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Authenticated caller; rejects anonymous requests with 401
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: SubjectId,
}

impl AuthUser {
    /// Require the login user to be `target`
    pub fn ensure_is(&self, target: SubjectId) -> Result<(), AuthError> {
        if self.id != target {
            tracing::debug!(login_id = %self.id, target = %target, "Login user mismatch");
            return Err(AuthError::Forbidden);
        }
        Ok(())
    }
}

impl From<AuthenticatedIdentity> for AuthUser {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self { id: identity.0 }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .copied()
            .map(AuthUser::from)
            .ok_or(AuthError::AuthenticationRequired)
    }
}

/// Caller identity if the request was authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            parts
                .extensions
                .get::<AuthenticatedIdentity>()
                .copied()
                .map(AuthUser::from),
        ))
    }
}
