//! Common test utilities for integration tests.
//!
//! These tests run against a real PostgreSQL database. Set the
//! `TEST_DATABASE_URL` environment variable to enable them; without it every
//! integration test skips itself.

// Helper utilities; not every test file uses all of them.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use uuid::Uuid;

use academy_api::{app::create_app, config::Config};

/// Connect to the test database, or `None` when `TEST_DATABASE_URL` is not
/// set (the caller should skip the test).
///
/// A set-but-unreachable URL is a hard failure, not a skip.
pub async fn try_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("TEST_DATABASE_URL is set but the database is unreachable");

    Some(pool)
}

/// Run migrations on the test database. Safe to call concurrently.
pub async fn run_migrations(pool: &PgPool) {
    sqlx::migrate!("../persistence/src/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");
}

/// Test configuration. The pool is injected separately, so the database URL
/// here is never dialed.
pub fn test_config() -> Config {
    Config::load_for_test(&[("database.url", "postgres://unused")])
        .expect("Failed to load test config")
}

/// Build the application under test.
pub fn create_test_app(config: Config, pool: PgPool) -> Router {
    create_app(config, pool)
}

// =============================================================================
// Request helpers
// =============================================================================

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_request_with_api_key(uri: &str, api_key: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("X-API-Key", api_key)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request_with_api_key(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    api_key: &str,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("X-API-Key", api_key)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn delete_request_with_api_key(uri: &str, api_key: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("X-API-Key", api_key)
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

// =============================================================================
// Database seeding helpers
// =============================================================================

/// Create an admin API key and return the plaintext key.
pub async fn create_admin_api_key(pool: &PgPool) -> String {
    create_api_key(pool, true).await
}

/// Create a non-admin API key and return the plaintext key.
pub async fn create_member_api_key(pool: &PgPool) -> String {
    create_api_key(pool, false).await
}

async fn create_api_key(pool: &PgPool, is_admin: bool) -> String {
    let api_key = format!("ak_{}", Uuid::new_v4().simple());
    let key_prefix = shared::crypto::extract_key_prefix(&api_key)
        .expect("Test API key should have a valid format");
    let key_hash = shared::crypto::sha256_hex(&api_key);

    sqlx::query(
        r#"
        INSERT INTO api_keys (key_hash, key_prefix, name, is_active, is_admin)
        VALUES ($1, $2, $3, true, $4)
        "#,
    )
    .bind(&key_hash)
    .bind(key_prefix)
    .bind(format!("test-key-{}", key_prefix))
    .bind(is_admin)
    .execute(pool)
    .await
    .expect("Failed to create test API key");

    api_key
}

/// Unique course slug so parallel tests never collide.
pub fn unique_slug(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

/// Create a course directly in the database.
pub async fn create_test_course(pool: &PgPool, slug: &str, price: Option<i64>) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO courses (slug, title, description, price)
        VALUES ($1, $2, 'test course', $3)
        RETURNING id
        "#,
    )
    .bind(slug)
    .bind(format!("Course {}", slug))
    .bind(price)
    .fetch_one(pool)
    .await
    .expect("Failed to create test course")
}

/// Create a schedule occurrence directly in the database.
pub async fn create_test_schedule(
    pool: &PgPool,
    course_id: Uuid,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    location: &str,
    teacher_ids: &[Uuid],
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO schedule_occurrences (course_id, start_at, end_at, location, teacher_ids)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(course_id)
    .bind(start_at)
    .bind(end_at)
    .bind(location)
    .bind(teacher_ids)
    .fetch_one(pool)
    .await
    .expect("Failed to create test schedule")
}

/// Create a teacher directly in the database.
pub async fn create_test_teacher(pool: &PgPool, name: &str, is_active: bool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO teachers (name, bio, is_active)
        VALUES ($1, 'test teacher', $2)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(is_active)
    .fetch_one(pool)
    .await
    .expect("Failed to create test teacher")
}

/// A submission payload against the given course and schedule.
pub fn submission_payload(
    course_id: Uuid,
    schedule_id: Uuid,
    email: &str,
    phone: &str,
) -> serde_json::Value {
    serde_json::json!({
        "courseId": course_id,
        "scheduleId": schedule_id,
        "koreanName": "김하늘",
        "email": email,
        "phone": phone,
        "gender": "female",
        "age": 29,
        "occupation": "designer",
        "region": "Seoul",
        "pilatesExperience": "beginner",
        "paymentMethod": "card"
    })
}
