//! Admin API key authentication extractor.
//!
//! Validates the `X-API-Key` header against the api_keys table. This is the
//! whole identity surface of the service: the only decision consumed anywhere
//! is "is this caller an administrator".

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::ApiKeyRepository;
use shared::crypto::sha256_hex;

/// Authenticated API key information.
#[derive(Debug, Clone)]
pub struct AdminKeyAuth {
    /// Database ID of the authenticated API key.
    pub api_key_id: Uuid,
    /// Key prefix for identification in logs.
    pub key_prefix: String,
    /// Whether this key carries admin privileges.
    pub is_admin: bool,
}

impl AdminKeyAuth {
    /// Validates an API key and returns authentication info.
    pub async fn validate(pool: &PgPool, api_key: &str) -> Result<Self, ApiError> {
        // Minimum key length: ak_ prefix + 8 chars
        if api_key.len() < 11 || !api_key.starts_with("ak_") {
            return Err(ApiError::Unauthorized(
                "Invalid or missing API key".to_string(),
            ));
        }

        let key_hash = sha256_hex(api_key);

        let repo = ApiKeyRepository::new(pool.clone());
        let key = repo
            .find_by_key_hash(&key_hash)
            .await
            .map_err(|e| {
                tracing::error!("Database error during API key lookup: {}", e);
                ApiError::Internal("Authentication service unavailable".to_string())
            })?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        if !ApiKeyRepository::is_key_valid(&key) {
            if !key.is_active {
                return Err(ApiError::Unauthorized(
                    "Invalid or missing API key".to_string(),
                ));
            }
            return Err(ApiError::Unauthorized("API key has expired".to_string()));
        }

        // Update last_used_at asynchronously (fire and forget)
        let pool_clone = pool.clone();
        let key_id = key.id;
        tokio::spawn(async move {
            let repo = ApiKeyRepository::new(pool_clone);
            if let Err(e) = repo.update_last_used(key_id).await {
                tracing::warn!("Failed to update API key last_used_at: {}", e);
            }
        });

        Ok(AdminKeyAuth {
            api_key_id: key.id,
            key_prefix: key.key_prefix,
            is_admin: key.is_admin,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get("X-API-Key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        Self::validate(&state.pool, api_key).await
    }
}
