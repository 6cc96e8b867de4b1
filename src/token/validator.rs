//! Token Validator
//!
//! Single decode attempt per call, with codec errors re-signaled as
//! [`AuthFailure`] so callers can tell "reissue" apart from "log in again".

use crate::error::AuthFailure;
use crate::models::{Claims, SubjectId};
use crate::token::codec::TokenCodec;

use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TokenValidator {
    codec: Arc<TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Subject of a valid token
    pub fn subject_of(&self, token: &str) -> Result<SubjectId, AuthFailure> {
        Ok(self.claims_of(token)?.subject)
    }

    /// Expiry instant of a valid token
    pub fn expiry_of(&self, token: &str) -> Result<DateTime<Utc>, AuthFailure> {
        Ok(self.claims_of(token)?.expires_at)
    }

    fn claims_of(&self, token: &str) -> Result<Claims, AuthFailure> {
        self.codec.decode(token).map_err(AuthFailure::from)
    }
}
