//! SidePeek Authentication
//!
//! Stateless token authentication for the SidePeek API:
//! - Signed access and refresh tokens (HMAC JWT)
//! - Per-request authentication middleware
//! - Identity extractors for downstream handlers
//! - Refresh token reissue endpoint
//!
//! # Configuration
//!
//! All configuration is loaded from environment variables:
//! - `JWT_SECRET_KEY` - Secret key for signing tokens (required, min 32 bytes)
//! - `JWT_ISSUER` - Issuer claim (default: "sixgaezzang")
//! - `JWT_EXPIRED_AFTER` - Access token lifetime in minutes (default: 30)
//! - `JWT_REFRESH_EXPIRED_AFTER` - Refresh token lifetime in days (default: 7)
//!
//! # Usage
//!
//! ```rust,ignore
//! use sidepeek_auth::{create_routes, AuthConfig, AuthService};
//! use std::sync::Arc;
//!
//! let config = AuthConfig::from_env()?;
//! let auth = Arc::new(AuthService::new(&config)?);
//!
//! // Auth endpoints
//! let app = create_routes(auth.clone());
//!
//! // Application routes behind the same gate
//! let projects = Router::new()
//!     .route("/projects", get(list_projects))
//!     .layer(axum::middleware::from_fn_with_state(
//!         auth.validator().clone(),
//!         sidepeek_auth::middleware::authenticate,
//!     ));
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use config::AuthConfig;
pub use error::{AuthError, AuthFailure, TokenError};
pub use extractors::{AuthUser, MaybeAuthUser};
pub use handlers::{create_routes, AuthState};
pub use models::*;
pub use service::AuthService;
pub use token::{TokenCodec, TokenIssuer, TokenValidator};
