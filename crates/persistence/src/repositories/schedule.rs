//! Schedule occurrence repository for database operations.
//!
//! Occurrences are always addressed through their owning course; every query
//! here is scoped by course_id.

use sqlx::PgPool;
use uuid::Uuid;

use chrono::{DateTime, Utc};
use domain::models::UpdateScheduleRequest;

use crate::entities::ScheduleOccurrenceEntity;
use crate::metrics::QueryTimer;

/// Repository for schedule occurrence database operations.
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Creates a new ScheduleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a course's occurrences ordered by start instant ascending.
    ///
    /// An unknown course simply yields an empty list; the read path never
    /// fails for domain reasons.
    pub async fn list_for_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<ScheduleOccurrenceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_schedules_for_course");
        let result = sqlx::query_as::<_, ScheduleOccurrenceEntity>(
            r#"
            SELECT id, course_id, start_at, end_at, location, teacher_ids,
                   created_at, updated_at
            FROM schedule_occurrences
            WHERE course_id = $1
            ORDER BY start_at ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find one occurrence scoped to its course.
    pub async fn find_by_id(
        &self,
        course_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<Option<ScheduleOccurrenceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_schedule_by_id");
        let result = sqlx::query_as::<_, ScheduleOccurrenceEntity>(
            r#"
            SELECT id, course_id, start_at, end_at, location, teacher_ids,
                   created_at, updated_at
            FROM schedule_occurrences
            WHERE course_id = $1 AND id = $2
            "#,
        )
        .bind(course_id)
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Append an occurrence to a course. The row id is freshly generated.
    pub async fn insert(
        &self,
        course_id: Uuid,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        location: &str,
        teacher_ids: &[Uuid],
    ) -> Result<ScheduleOccurrenceEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_schedule");
        let result = sqlx::query_as::<_, ScheduleOccurrenceEntity>(
            r#"
            INSERT INTO schedule_occurrences (course_id, start_at, end_at, location, teacher_ids)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, course_id, start_at, end_at, location, teacher_ids,
                      created_at, updated_at
            "#,
        )
        .bind(course_id)
        .bind(start_at)
        .bind(end_at)
        .bind(location)
        .bind(teacher_ids)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partially update an occurrence. Only supplied fields are overwritten.
    ///
    /// Returns `None` if the occurrence is absent from the course.
    pub async fn update(
        &self,
        course_id: Uuid,
        schedule_id: Uuid,
        request: &UpdateScheduleRequest,
    ) -> Result<Option<ScheduleOccurrenceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_schedule");
        let result = sqlx::query_as::<_, ScheduleOccurrenceEntity>(
            r#"
            UPDATE schedule_occurrences
            SET start_at = COALESCE($3, start_at),
                end_at = COALESCE($4, end_at),
                location = COALESCE($5, location),
                teacher_ids = COALESCE($6, teacher_ids),
                updated_at = NOW()
            WHERE course_id = $1 AND id = $2
            RETURNING id, course_id, start_at, end_at, location, teacher_ids,
                      created_at, updated_at
            "#,
        )
        .bind(course_id)
        .bind(schedule_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.location)
        .bind(&request.teachers)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove an occurrence. A foreign-key violation from referencing
    /// applications propagates to the caller.
    ///
    /// Returns `false` if the occurrence was absent from the course.
    pub async fn remove(
        &self,
        course_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("remove_schedule");
        let result = sqlx::query(
            "DELETE FROM schedule_occurrences WHERE course_id = $1 AND id = $2",
        )
        .bind(course_id)
        .bind(schedule_id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
