//! Enrollment application repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    ApplicationEntity, ApplicationStatusDb, ExperienceLevelDb, GenderDb, PaymentMethodDb,
};
use crate::metrics::QueryTimer;

/// Field bundle for inserting a new application.
#[derive(Debug)]
pub struct NewApplication<'a> {
    pub course_id: Uuid,
    pub schedule_id: Uuid,
    pub korean_name: &'a str,
    pub english_name: Option<&'a str>,
    pub email: &'a str,
    pub normalized_email: &'a str,
    pub phone: &'a str,
    pub normalized_phone: &'a str,
    pub gender: GenderDb,
    pub age: i32,
    pub occupation: &'a str,
    pub region: &'a str,
    pub pilates_experience: ExperienceLevelDb,
    pub question: Option<&'a str>,
    pub payment_method: PaymentMethodDb,
    /// Base price snapshot copied from the course at submission time.
    pub price: Option<i64>,
}

/// Repository for enrollment application database operations.
#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    /// Creates a new ApplicationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look for an existing application for the same occurrence by the same
    /// person, asserted by either normalized email or normalized phone.
    pub async fn find_duplicate(
        &self,
        course_id: Uuid,
        schedule_id: Uuid,
        normalized_email: &str,
        normalized_phone: &str,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("find_duplicate_application");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM applications
            WHERE course_id = $1 AND schedule_id = $2
              AND (normalized_email = $3 OR normalized_phone = $4)
            LIMIT 1
            "#,
        )
        .bind(course_id)
        .bind(schedule_id)
        .bind(normalized_email)
        .bind(normalized_phone)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a new application with status pending.
    ///
    /// The unique indexes on (course, schedule, normalized email/phone) back
    /// the duplicate pre-check; a violation surfaces as a database error with
    /// code 23505.
    pub async fn insert(
        &self,
        new: &NewApplication<'_>,
    ) -> Result<ApplicationEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_application");
        let result = sqlx::query_as::<_, ApplicationEntity>(
            r#"
            INSERT INTO applications (course_id, schedule_id, korean_name, english_name,
                                      email, normalized_email, phone, normalized_phone,
                                      gender, age, occupation, region, pilates_experience,
                                      question, payment_method, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id, course_id, schedule_id, korean_name, english_name,
                      email, normalized_email, phone, normalized_phone,
                      gender, age, occupation, region, pilates_experience,
                      question, payment_method, status, price, discounted_price,
                      created_at, updated_at
            "#,
        )
        .bind(new.course_id)
        .bind(new.schedule_id)
        .bind(new.korean_name)
        .bind(new.english_name)
        .bind(new.email)
        .bind(new.normalized_email)
        .bind(new.phone)
        .bind(new.normalized_phone)
        .bind(new.gender)
        .bind(new.age)
        .bind(new.occupation)
        .bind(new.region)
        .bind(new.pilates_experience)
        .bind(new.question)
        .bind(new.payment_method)
        .bind(new.price)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an application by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ApplicationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_application_by_id");
        let result = sqlx::query_as::<_, ApplicationEntity>(
            r#"
            SELECT id, course_id, schedule_id, korean_name, english_name,
                   email, normalized_email, phone, normalized_phone,
                   gender, age, occupation, region, pilates_experience,
                   question, payment_method, status, price, discounted_price,
                   created_at, updated_at
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List applications with optional status and course filters, newest
    /// first.
    pub async fn list(
        &self,
        status: Option<ApplicationStatusDb>,
        course_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ApplicationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_applications");
        let result = sqlx::query_as::<_, ApplicationEntity>(
            r#"
            SELECT id, course_id, schedule_id, korean_name, english_name,
                   email, normalized_email, phone, normalized_phone,
                   gender, age, occupation, region, pilates_experience,
                   question, payment_method, status, price, discounted_price,
                   created_at, updated_at
            FROM applications
            WHERE ($1::application_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR course_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(status)
        .bind(course_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count applications under the same filters as `list`.
    pub async fn count(
        &self,
        status: Option<ApplicationStatusDb>,
        course_id: Option<Uuid>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_applications");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM applications
            WHERE ($1::application_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR course_id = $2)
            "#,
        )
        .bind(status)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set the review status. Unconditional on the current status;
    /// re-transitioning a decided application is allowed.
    ///
    /// Returns `None` if the application does not exist.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatusDb,
    ) -> Result<Option<ApplicationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_application_status");
        let result = sqlx::query_as::<_, ApplicationEntity>(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, course_id, schedule_id, korean_name, english_name,
                      email, normalized_email, phone, normalized_phone,
                      gender, age, occupation, region, pilates_experience,
                      question, payment_method, status, price, discounted_price,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set or clear the discounted price override, in any status.
    ///
    /// Returns `None` if the application does not exist.
    pub async fn set_discounted_price(
        &self,
        id: Uuid,
        discounted_price: Option<i64>,
    ) -> Result<Option<ApplicationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_application_discount");
        let result = sqlx::query_as::<_, ApplicationEntity>(
            r#"
            UPDATE applications
            SET discounted_price = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, course_id, schedule_id, korean_name, english_name,
                      email, normalized_email, phone, normalized_phone,
                      gender, age, occupation, region, pilates_experience,
                      question, payment_method, status, price, discounted_price,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(discounted_price)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Hard-delete an application. No audit trail is kept.
    ///
    /// Returns `false` if the application did not exist.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_application");
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
