//! Authentication Configuration
//!
//! Token settings are loaded once from environment variables at startup and
//! handed to [`AuthService::new`](crate::AuthService::new). Nothing in this
//! crate reads the environment after that.

use crate::error::AuthError;
use chrono::Duration;
use std::env;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Upper bound for either token lifetime
pub const MAX_LIFETIME_DAYS: i64 = 365 * 100;

/// Minimum HMAC secret length in bytes (256 bits)
pub const MIN_SECRET_LENGTH: usize = 32;

/// Authentication configuration loaded from environment
#[derive(Clone)]
pub struct AuthConfig {
    /// Issuer embedded in every token (from JWT_ISSUER env var)
    pub issuer: String,

    /// HMAC signing secret (from JWT_SECRET_KEY env var)
    pub secret_key: String,

    /// Access token lifetime in minutes (from JWT_EXPIRED_AFTER env var)
    pub access_token_expiration_minutes: i64,

    /// Refresh token lifetime in days (from JWT_REFRESH_EXPIRED_AFTER env var)
    pub refresh_token_expiration_days: i64,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// `JWT_SECRET_KEY` is required. The remaining values fall back to their
    /// defaults when missing or unparseable.
    pub fn from_env() -> Result<Self, AuthError> {
        let secret_key = env::var("JWT_SECRET_KEY").map_err(|_| {
            AuthError::Config("JWT_SECRET_KEY environment variable must be set".to_string())
        })?;

        Ok(Self {
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "sixgaezzang".to_string()),

            secret_key,

            access_token_expiration_minutes: env::var("JWT_EXPIRED_AFTER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            refresh_token_expiration_days: env::var("JWT_REFRESH_EXPIRED_AFTER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.issuer.trim().is_empty() {
            return Err(AuthError::Config("JWT_ISSUER must not be blank".to_string()));
        }

        if self.secret_key.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Config(format!(
                "JWT_SECRET_KEY must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }

        if self.access_token_expiration_minutes <= 0 {
            return Err(AuthError::Config(
                "JWT_EXPIRED_AFTER must be positive".to_string(),
            ));
        }

        if self.refresh_token_expiration_days <= 0 {
            return Err(AuthError::Config(
                "JWT_REFRESH_EXPIRED_AFTER must be positive".to_string(),
            ));
        }

        let access = self.access_token_lifetime()?;
        let refresh = self.refresh_token_lifetime()?;
        let max = Duration::days(MAX_LIFETIME_DAYS);

        if access > max || refresh > max {
            return Err(AuthError::Config(format!(
                "token lifetimes must not exceed {MAX_LIFETIME_DAYS} days"
            )));
        }

        if refresh <= access {
            return Err(AuthError::Config(
                "refresh token lifetime must be longer than access token lifetime".to_string(),
            ));
        }

        Ok(())
    }

    pub fn access_token_lifetime(&self) -> Result<Duration, AuthError> {
        Duration::try_minutes(self.access_token_expiration_minutes).ok_or_else(|| {
            AuthError::Config("JWT_EXPIRED_AFTER is out of range".to_string())
        })
    }

    /// Refresh lifetime, configured in days and kept in minutes
    pub fn refresh_token_lifetime(&self) -> Result<Duration, AuthError> {
        self.refresh_token_expiration_days
            .checked_mul(MINUTES_PER_DAY)
            .and_then(Duration::try_minutes)
            .ok_or_else(|| {
                AuthError::Config("JWT_REFRESH_EXPIRED_AFTER is out of range".to_string())
            })
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("secret_key", &"<redacted>")
            .field(
                "access_token_expiration_minutes",
                &self.access_token_expiration_minutes,
            )
            .field(
                "refresh_token_expiration_days",
                &self.refresh_token_expiration_days,
            )
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AuthConfig {
    AuthConfig {
        issuer: "sixgaezzang".to_string(),
        secret_key: "s".repeat(64),
        access_token_expiration_minutes: 30,
        refresh_token_expiration_days: 7,
    }
}
