//! Course repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{CreateCourseRequest, UpdateCourseRequest};

use crate::entities::CourseEntity;
use crate::metrics::QueryTimer;

/// Repository for course-related database operations.
#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Creates a new CourseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a course. A slug collision surfaces as a unique violation.
    pub async fn create(
        &self,
        request: &CreateCourseRequest,
    ) -> Result<CourseEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_course");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            INSERT INTO courses (slug, title, description, curriculum, thumbnail_url,
                                 category_id, price, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, slug, title, description, curriculum, thumbnail_url,
                      category_id, price, is_active, created_at, updated_at
            "#,
        )
        .bind(&request.slug)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.curriculum)
        .bind(&request.thumbnail_url)
        .bind(request.category_id)
        .bind(request.price)
        .bind(request.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_course_by_id");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            SELECT id, slug, title, description, curriculum, thumbnail_url,
                   category_id, price, is_active, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a course by its slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_course_by_slug");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            SELECT id, slug, title, description, curriculum, thumbnail_url,
                   category_id, price, is_active, created_at, updated_at
            FROM courses
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether a course with this ID exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("course_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List every course, newest first (admin view).
    pub async fn list_all(&self) -> Result<Vec<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_courses");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            SELECT id, slug, title, description, curriculum, thumbnail_url,
                   category_id, price, is_active, created_at, updated_at
            FROM courses
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List active courses for the public catalog, newest first.
    pub async fn list_active(&self) -> Result<Vec<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_courses");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            SELECT id, slug, title, description, curriculum, thumbnail_url,
                   category_id, price, is_active, created_at, updated_at
            FROM courses
            WHERE is_active
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partially update a course. Only supplied fields are overwritten.
    ///
    /// Returns `None` if the course does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateCourseRequest,
    ) -> Result<Option<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_course");
        let result = sqlx::query_as::<_, CourseEntity>(
            r#"
            UPDATE courses
            SET slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                curriculum = COALESCE($5, curriculum),
                thumbnail_url = COALESCE($6, thumbnail_url),
                category_id = COALESCE($7, category_id),
                price = COALESCE($8, price),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, slug, title, description, curriculum, thumbnail_url,
                      category_id, price, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.slug)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.curriculum)
        .bind(&request.thumbnail_url)
        .bind(request.category_id)
        .bind(request.price)
        .bind(request.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a course. Occurrences cascade; a foreign-key violation from
    /// referencing applications propagates to the caller.
    ///
    /// Returns `false` if the course did not exist.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_course");
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
