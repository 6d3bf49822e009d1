//! Startup bootstrap: guarantees at least one admin API key exists.

use sqlx::PgPool;
use tracing::{info, warn};

use persistence::repositories::ApiKeyRepository;
use shared::crypto::{extract_key_prefix, generate_api_key, sha256_hex};

/// Ensures an active admin API key exists, generating one on first boot.
///
/// The plaintext key is logged exactly once; only its hash is stored.
pub async fn ensure_admin_key(pool: &PgPool) -> Result<(), sqlx::Error> {
    let repo = ApiKeyRepository::new(pool.clone());

    if repo.any_admin_exists().await? {
        info!("Admin API key present");
        return Ok(());
    }

    let api_key = generate_api_key();
    let key_hash = sha256_hex(&api_key);
    // Generated keys always carry a valid prefix
    let key_prefix = extract_key_prefix(&api_key).unwrap_or(&api_key[..8]);

    repo.create(&key_hash, key_prefix, "bootstrap-admin", true)
        .await?;

    warn!(
        api_key = %api_key,
        "No admin API key existed; generated one. Store it now - only the hash is kept."
    );

    Ok(())
}
