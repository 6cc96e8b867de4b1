//! Token Lifecycle
//!
//! Signing, issuance and validation of stateless access/refresh tokens.
//! One [`TokenCodec`] holds the signing key; the issuer and validator share it
//! through an `Arc` and never mutate it.

pub mod codec;
pub mod issuer;
pub mod validator;

pub use codec::TokenCodec;
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;
