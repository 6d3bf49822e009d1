//! Course domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::schedule::ScheduleWithTeachers;

/// A course as exposed to administrators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Rich-text curriculum content, stored opaque.
    pub curriculum: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// Base price in the smallest currency unit. Absent when not priced yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Condensed course row for the public catalog listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListItem {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

/// Public course detail: the course plus its occurrences sorted by start
/// date, each with resolved teacher names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: Course,
    pub schedules: Vec<ScheduleWithTeachers>,
}

/// Admin request to create a course. Courses start with zero occurrences.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(
        length(min = 1, max = 100, message = "Slug must be 1-100 characters"),
        custom(function = "shared::validation::validate_slug")
    )]
    pub slug: String,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub curriculum: String,

    pub thumbnail_url: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(custom(function = "validate_optional_course_price"))]
    pub price: Option<i64>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Validates an optional course base price.
pub fn validate_optional_course_price(amount: i64) -> Result<(), validator::ValidationError> {
    shared::validation::validate_price(amount)
}

/// Admin request to partially update a course. Only supplied fields change.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(
        length(min = 1, max = 100, message = "Slug must be 1-100 characters"),
        custom(function = "shared::validation::validate_slug")
    )]
    pub slug: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub curriculum: Option<String>,

    pub thumbnail_url: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(custom(function = "validate_optional_course_price"))]
    pub price: Option<i64>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_request_valid() {
        let request: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "slug": "mat-pilates-101",
            "title": "Mat Pilates 101",
            "price": 100000
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(request.is_active);
        assert_eq!(request.description, "");
    }

    #[test]
    fn test_create_course_request_bad_slug() {
        let request: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "slug": "Mat Pilates",
            "title": "Mat Pilates 101"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn test_create_course_request_negative_price() {
        let request: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "slug": "mat-pilates-101",
            "title": "Mat Pilates 101",
            "price": -100
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_course_request_unpriced() {
        let request: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "slug": "intro-seminar",
            "title": "Intro Seminar"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(request.price.is_none());
    }

    #[test]
    fn test_update_course_request_partial() {
        let request: UpdateCourseRequest =
            serde_json::from_str(r#"{"title":"Renamed"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.title.as_deref(), Some("Renamed"));
        assert!(request.slug.is_none());
    }

    #[test]
    fn test_course_serializes_camel_case() {
        let course = Course {
            id: Uuid::new_v4(),
            slug: "mat-pilates-101".to_string(),
            title: "Mat Pilates 101".to_string(),
            description: String::new(),
            curriculum: String::new(),
            thumbnail_url: None,
            category_id: None,
            price: Some(100_000),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&course).unwrap();
        assert!(json.contains("\"isActive\":true"));
        assert!(json.contains("\"price\":100000"));
        assert!(!json.contains("\"thumbnailUrl\""));
    }
}
