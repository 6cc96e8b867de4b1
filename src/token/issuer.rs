//! Token Issuer
//!
//! Builds access and refresh tokens for a subject. Both kinds go through the
//! same codec and differ only in the lifetime added to `now`.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::models::{SubjectId, Token, TokenKind};
use crate::token::codec::TokenCodec;

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(codec: Arc<TokenCodec>, access_lifetime: Duration, refresh_lifetime: Duration) -> Self {
        Self {
            codec,
            access_lifetime,
            refresh_lifetime,
        }
    }

    pub fn from_config(codec: Arc<TokenCodec>, config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self::new(
            codec,
            config.access_token_lifetime()?,
            config.refresh_token_lifetime()?,
        ))
    }

    pub fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_lifetime,
            TokenKind::Refresh => self.refresh_lifetime,
        }
    }

    /// Generate an access token for a user
    pub fn issue_access_token(&self, subject: SubjectId) -> Result<Token, AuthError> {
        self.issue(TokenKind::Access, subject)
    }

    /// Generate a refresh token for a user
    pub fn issue_refresh_token(&self, subject: SubjectId) -> Result<Token, AuthError> {
        self.issue(TokenKind::Refresh, subject)
    }

    fn issue(&self, kind: TokenKind, subject: SubjectId) -> Result<Token, AuthError> {
        self.issue_at(kind, subject, Utc::now())
    }

    fn issue_at(
        &self,
        kind: TokenKind,
        subject: SubjectId,
        now: DateTime<Utc>,
    ) -> Result<Token, AuthError> {
        let expires_at = now
            .checked_add_signed(self.lifetime(kind))
            .ok_or_else(|| {
                AuthError::Config(format!("{kind} token expiry is out of the date range"))
            })?;

        self.codec.encode(subject, now, expires_at)
    }

    /// Sign one token of each kind so a broken key or lifetime fails at
    /// startup, not per request
    pub(crate) fn self_check(&self) -> Result<(), AuthError> {
        let subject = SubjectId::new(1).ok_or(AuthError::Internal)?;
        for kind in [TokenKind::Access, TokenKind::Refresh] {
            self.issue(kind, subject)?;
        }
        Ok(())
    }
}
