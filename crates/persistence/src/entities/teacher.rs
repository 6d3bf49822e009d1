//! Teacher reference rows.
//!
//! Teachers are owned by an external system; this backend only reads names
//! for display resolution.

use sqlx::FromRow;
use uuid::Uuid;

/// Slim row for teacher name resolution.
#[derive(Debug, Clone, FromRow)]
pub struct TeacherNameRow {
    pub id: Uuid,
    pub name: String,
}
