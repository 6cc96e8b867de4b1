//! Token Codec
//!
//! Encodes a claim set into a signed compact JWT and verifies it back.
//! The HMAC algorithm follows the secret length, and expiry is checked here
//! against an explicit instant so the expired/malformed split stays exact.

use crate::config::{AuthConfig, MIN_SECRET_LENGTH};
use crate::error::{AuthError, TokenError};
use crate::models::{Claims, SubjectId, Token};

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims as they appear on the wire
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    /// Issuer
    iss: String,
    /// Issued at timestamp
    iat: i64,
    /// Expiration timestamp
    exp: i64,
    /// Subject (user ID)
    user_id: i64,
}

/// Signs and verifies tokens with the process-wide secret
///
/// Built once at startup and shared read-only.
pub struct TokenCodec {
    issuer: String,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec for `issuer` signing with `secret`
    pub fn new(issuer: impl Into<String>, secret: &[u8]) -> Result<Self, AuthError> {
        let algorithm = algorithm_for(secret)?;

        // `exp` is checked in `decode_at`, after the signature
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);

        Ok(Self {
            issuer: issuer.into(),
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::new(config.issuer.clone(), config.secret_key.as_bytes())
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Serialize and sign a claim set
    pub fn encode(
        &self,
        subject: SubjectId,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Token, AuthError> {
        let claims = JwtClaims {
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            user_id: subject.get(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?;
        Ok(Token::new(token))
    }

    /// Verify `token` against the current time
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, Utc::now())
    }

    /// Verify `token` as of `now`
    ///
    /// Signature and structure are checked first; only a well-formed token
    /// can be reported as expired.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                tracing::trace!("JWT decode failed: {:?}", e);
                TokenError::Malformed
            },
        )?;
        let raw = data.claims;

        let subject = SubjectId::new(raw.user_id).ok_or(TokenError::Malformed)?;
        let issued_at = DateTime::from_timestamp(raw.iat, 0).ok_or(TokenError::Malformed)?;
        let expires_at = DateTime::from_timestamp(raw.exp, 0).ok_or(TokenError::Malformed)?;

        if now >= expires_at {
            return Err(TokenError::Expired);
        }

        Ok(Claims {
            issuer: raw.iss,
            subject,
            issued_at,
            expires_at,
        })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Pick the strongest HMAC variant the secret length supports
fn algorithm_for(secret: &[u8]) -> Result<Algorithm, AuthError> {
    match secret.len() {
        n if n >= 64 => Ok(Algorithm::HS512),
        n if n >= 48 => Ok(Algorithm::HS384),
        n if n >= MIN_SECRET_LENGTH => Ok(Algorithm::HS256),
        n => Err(AuthError::Config(format!(
            "signing secret is {n} bytes, at least {MIN_SECRET_LENGTH} are required"
        ))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;

    pub(crate) fn codec() -> TokenCodec {
        TokenCodec::new("sixgaezzang", "s".repeat(64).as_bytes()).unwrap()
    }

    /// Replace one character of `token` at `index` with a different base64url char
    pub(crate) fn flip_char(token: &str, index: usize) -> String {
        token
            .char_indices()
            .map(|(i, c)| match (i == index, c) {
                (true, 'a') => 'b',
                (true, _) => 'a',
                (false, c) => c,
            })
            .collect()
    }

    fn subject(id: i64) -> SubjectId {
        SubjectId::new(id).unwrap()
    }

    #[test]
    fn test_algorithm_follows_secret_length() {
        assert_eq!(algorithm_for(&[0; 64]).unwrap(), Algorithm::HS512);
        assert_eq!(algorithm_for(&[0; 50]).unwrap(), Algorithm::HS384);
        assert_eq!(algorithm_for(&[0; 32]).unwrap(), Algorithm::HS256);
        assert!(matches!(algorithm_for(&[0; 31]), Err(AuthError::Config(_))));
    }

    #[test]
    fn test_encode_decode() {
        let codec = codec();
        let now = Utc::now();
        let token = codec
            .encode(subject(42), now, now + Duration::minutes(30))
            .unwrap();

        let claims = codec.decode(token.as_str()).unwrap();
        assert_eq!(claims.subject, subject(42));
        assert_eq!(claims.issuer, "sixgaezzang");
        assert_eq!(claims.issued_at.timestamp(), now.timestamp());
        assert_eq!(
            claims.expires_at.timestamp(),
            (now + Duration::minutes(30)).timestamp()
        );
    }

    #[test]
    fn test_decode_is_stable() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.encode(subject(9), now, now + Duration::hours(1)).unwrap();

        let first = codec.decode(token.as_str()).unwrap();
        let second = codec.decode(token.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = codec();
        let now = Utc::now();
        let exp = now + Duration::minutes(5);

        assert_eq!(
            codec.encode(subject(1), now, exp).unwrap(),
            codec.encode(subject(1), now, exp).unwrap()
        );
    }

    #[test]
    fn test_expired_token_is_expired_not_malformed() {
        let codec = codec();
        let issued = Utc::now() - Duration::hours(2);
        let token = codec
            .encode(subject(5), issued, issued + Duration::hours(1))
            .unwrap();

        assert_eq!(codec.decode(token.as_str()), Err(TokenError::Expired));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let codec = codec();
        let issued = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let expires = issued + Duration::minutes(30);
        let token = codec.encode(subject(5), issued, expires).unwrap();

        assert!(codec
            .decode_at(token.as_str(), expires - Duration::seconds(1))
            .is_ok());
        assert_eq!(
            codec.decode_at(token.as_str(), expires),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_tampered_payload_is_malformed() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.encode(subject(3), now, now + Duration::hours(1)).unwrap();

        let payload_start = token.as_str().find('.').unwrap() + 1;
        let tampered = flip_char(token.as_str(), payload_start + 5);

        assert_eq!(codec.decode(&tampered), Err(TokenError::Malformed));
    }

    #[test]
    fn test_tampered_signature_is_malformed() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.encode(subject(3), now, now + Duration::hours(1)).unwrap();

        let signature_start = token.as_str().rfind('.').unwrap() + 1;
        let tampered = flip_char(token.as_str(), signature_start + 10);

        assert_eq!(codec.decode(&tampered), Err(TokenError::Malformed));
    }

    #[test]
    fn test_expired_and_tampered_is_malformed() {
        let codec = codec();
        let issued = Utc::now() - Duration::days(2);
        let token = codec
            .encode(subject(3), issued, issued + Duration::days(1))
            .unwrap();

        let signature_start = token.as_str().rfind('.').unwrap() + 1;
        let tampered = flip_char(token.as_str(), signature_start + 10);

        assert_eq!(codec.decode(&tampered), Err(TokenError::Malformed));
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let other = TokenCodec::new("sixgaezzang", "o".repeat(64).as_bytes()).unwrap();
        let now = Utc::now();
        let token = other.encode(subject(3), now, now + Duration::hours(1)).unwrap();

        assert_eq!(codec().decode(token.as_str()), Err(TokenError::Malformed));
    }

    #[test]
    fn test_other_algorithm_is_malformed() {
        let secret = "s".repeat(64);
        let now = Utc::now();
        let claims = JwtClaims {
            iss: "sixgaezzang".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            user_id: 3,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec().decode(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_non_positive_subject_is_malformed() {
        let secret = "s".repeat(64);
        let now = Utc::now();
        let claims = JwtClaims {
            iss: "sixgaezzang".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            user_id: 0,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec().decode(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec();

        for input in ["", "not-a-token", "a.b.c", "Bearer x.y.z"] {
            assert_eq!(codec.decode(input), Err(TokenError::Malformed), "{input}");
        }
    }
}
