//! Authentication Service
//!
//! Owns the token issuer and validator built from one [`AuthConfig`] and
//! implements the reissue flow. Nothing is persisted: a presented refresh
//! token stays valid until its own expiry.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::models::{SubjectId, TokenResponse};
use crate::middleware::BEARER_PREFIX;
use crate::token::{TokenCodec, TokenIssuer, TokenValidator};

use std::sync::Arc;

/// Authentication service
#[derive(Debug)]
pub struct AuthService {
    issuer: TokenIssuer,
    validator: TokenValidator,
}

impl AuthService {
    /// Validate `config` and build the signing key, issuer and validator
    ///
    /// Signing problems surface here, once, instead of on each request.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;

        let codec = Arc::new(TokenCodec::from_config(config)?);
        let issuer = TokenIssuer::from_config(codec.clone(), config)?;
        issuer.self_check()?;

        tracing::info!(
            issuer = %codec.issuer(),
            algorithm = ?codec.algorithm(),
            access_minutes = config.access_token_expiration_minutes,
            refresh_days = config.refresh_token_expiration_days,
            "Token service initialized"
        );

        Ok(Self {
            issuer,
            validator: TokenValidator::new(codec),
        })
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }

    /// Issue a new access/refresh pair for `subject`
    pub fn issue_tokens(&self, subject: SubjectId) -> Result<TokenResponse, AuthError> {
        let access_token = self.issuer.issue_access_token(subject)?;
        let refresh_token = self.issuer.issue_refresh_token(subject)?;
        let access_token_expired_at = self
            .validator
            .expiry_of(access_token.as_str())
            .map_err(|kind| {
                tracing::error!(failure = ?kind, "Freshly issued token failed validation");
                AuthError::Internal
            })?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
            grant_type: BEARER_PREFIX.trim_end().to_string(),
            access_token_expired_at,
        })
    }

    /// Exchange a valid refresh token for a new token pair
    pub fn reissue(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::Validation(
                "Refresh token is required".to_string(),
            ));
        }

        let subject = self.validator.subject_of(refresh_token).map_err(|kind| {
            tracing::debug!(failure = ?kind, "Refresh token rejected");
            AuthError::Authentication(kind)
        })?;

        let response = self.issue_tokens(subject)?;
        tracing::info!(user_id = %subject, "Tokens reissued");

        Ok(response)
    }
}
