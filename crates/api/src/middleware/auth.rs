//! Authentication middleware.
//!
//! Admin-only routes are wrapped by `require_admin`; everything else is
//! public. There is no end-user authentication in this service.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminKeyAuth;

/// Middleware for admin-only routes.
///
/// Requires a valid `X-API-Key` header AND the key must carry admin
/// privileges. Authenticated key information is stored in request extensions
/// for downstream handlers.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let api_key = match req.headers().get("X-API-Key").and_then(|v| v.to_str().ok()) {
        Some(key) => key.to_string(),
        None => {
            return ApiError::Unauthorized("Invalid or missing API key".to_string())
                .into_response();
        }
    };

    match AdminKeyAuth::validate(&state.pool, &api_key).await {
        Ok(auth) => {
            if !auth.is_admin {
                return ApiError::Forbidden("Admin access required".to_string()).into_response();
            }
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
