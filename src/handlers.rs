//! Authentication HTTP Handlers
//!
//! REST API endpoints for token reissue and identity lookup.

use crate::error::AuthError;
use crate::extractors::AuthUser;
use crate::middleware;
use crate::models::*;
use crate::service::AuthService;

use axum::{
    extract::State,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

/// Shared auth service state
pub type AuthState = Arc<AuthService>;

// ============================================
// Route Builder
// ============================================

/// Create authentication routes
///
/// Every route sits behind the authentication middleware; anonymous requests
/// still reach handlers that do not demand an [`AuthUser`].
pub fn create_routes(auth_service: Arc<AuthService>) -> Router {
    let validator = auth_service.validator().clone();

    Router::new()
        .route("/auth/reissue", post(reissue_token))
        .route("/auth/me", get(get_current_user))
        .layer(axum_middleware::from_fn_with_state(
            validator,
            middleware::authenticate,
        ))
        .with_state(auth_service)
}

// ============================================
// Token Reissue
// ============================================

/// POST /auth/reissue
///
/// Exchange a refresh token for a new access/refresh pair
pub async fn reissue_token(
    State(auth): State<AuthState>,
    Json(req): Json<ReissueTokenRequest>,
) -> Result<impl IntoResponse, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let response = auth.reissue(&req.refresh_token)?;

    Ok(Json(response))
}

// ============================================
// User Profile
// ============================================

/// GET /auth/me
///
/// Identity of the authenticated caller
pub async fn get_current_user(user: AuthUser) -> Result<impl IntoResponse, AuthError> {
    Ok(Json(CurrentUserResponse { user_id: user.id }))
}
