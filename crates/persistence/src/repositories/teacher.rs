//! Teacher reference resolution.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TeacherNameRow;
use crate::metrics::QueryTimer;

/// Repository for teacher reference lookups.
#[derive(Clone)]
pub struct TeacherRepository {
    pool: PgPool,
}

impl TeacherRepository {
    /// Creates a new TeacherRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve teacher ids to display names, preserving input order.
    ///
    /// Ids with no matching teacher record are silently dropped; inactive
    /// teachers still resolve. Nothing resolvable yields an empty vec.
    pub async fn resolve_names(&self, teacher_ids: &[Uuid]) -> Result<Vec<String>, sqlx::Error> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }

        let timer = QueryTimer::new("resolve_teacher_names");
        let rows = sqlx::query_as::<_, TeacherNameRow>(
            "SELECT id, name FROM teachers WHERE id = ANY($1)",
        )
        .bind(teacher_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        let by_id: HashMap<Uuid, String> =
            rows?.into_iter().map(|row| (row.id, row.name)).collect();

        Ok(teacher_ids
            .iter()
            .filter_map(|id| by_id.get(id).cloned())
            .collect())
    }
}
