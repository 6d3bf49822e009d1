//! Repository for API key database operations.

use chrono::Utc;
use sqlx::PgPool;

use crate::entities::ApiKeyEntity;
use crate::metrics::QueryTimer;

/// Repository for API key operations.
#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
}

impl ApiKeyRepository {
    /// Creates a new API key repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an API key by its hash.
    pub async fn find_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<ApiKeyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_api_key_by_hash");
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            SELECT id, key_hash, key_prefix, name, is_active, is_admin,
                   last_used_at, created_at, expires_at
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Stores a new API key.
    pub async fn create(
        &self,
        key_hash: &str,
        key_prefix: &str,
        name: &str,
        is_admin: bool,
    ) -> Result<ApiKeyEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_api_key");
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            INSERT INTO api_keys (key_hash, key_prefix, name, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, key_hash, key_prefix, name, is_active, is_admin,
                      last_used_at, created_at, expires_at
            "#,
        )
        .bind(key_hash)
        .bind(key_prefix)
        .bind(name)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether any active admin key exists (used by startup bootstrap).
    pub async fn any_admin_exists(&self) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("any_admin_api_key_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM api_keys WHERE is_admin AND is_active)",
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Updates the last_used_at timestamp for an API key.
    ///
    /// Typically called asynchronously after successful authentication.
    pub async fn update_last_used(&self, key_id: uuid::Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_api_key_last_used");
        let result = sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = $1")
            .bind(key_id)
            .execute(&self.pool)
            .await
            .map(|_| ());
        timer.record();
        result
    }

    /// Checks if an API key is valid for authentication: active and not
    /// expired.
    pub fn is_key_valid(key: &ApiKeyEntity) -> bool {
        if !key.is_active {
            return false;
        }

        if let Some(expires_at) = key.expires_at {
            if expires_at < Utc::now() {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn make_test_key(is_active: bool, expires_at: Option<chrono::DateTime<Utc>>) -> ApiKeyEntity {
        ApiKeyEntity {
            id: Uuid::new_v4(),
            key_hash: "test_hash".to_string(),
            key_prefix: "abcdefgh".to_string(),
            name: "Test Key".to_string(),
            is_active,
            is_admin: true,
            last_used_at: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_is_key_valid_active_no_expiry() {
        let key = make_test_key(true, None);
        assert!(ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_inactive() {
        let key = make_test_key(false, None);
        assert!(!ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_expired() {
        let key = make_test_key(true, Some(Utc::now() - Duration::hours(1)));
        assert!(!ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_future_expiry() {
        let key = make_test_key(true, Some(Utc::now() + Duration::days(30)));
        assert!(ApiKeyRepository::is_key_valid(&key));
    }
}
