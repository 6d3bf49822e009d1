//! Schedule occurrence entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::ScheduleOccurrence;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the schedule_occurrences table.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleOccurrenceEntity {
    pub id: Uuid,
    pub course_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub location: String,
    pub teacher_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ScheduleOccurrenceEntity> for ScheduleOccurrence {
    fn from(entity: ScheduleOccurrenceEntity) -> Self {
        ScheduleOccurrence {
            id: entity.id,
            start_date: entity.start_at,
            end_date: entity.end_at,
            location: entity.location,
            teachers: entity.teacher_ids,
        }
    }
}
