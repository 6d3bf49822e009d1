//! Schedule occurrence domain models.
//!
//! An occurrence is one concrete offering of a course at a specific date
//! range and location, with assigned teachers. Occurrences are addressed only
//! through their owning course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A schedule occurrence as exposed across the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOccurrence {
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    /// Teacher reference ids. May point at deleted teachers; resolution
    /// degrades gracefully.
    pub teachers: Vec<Uuid>,
}

/// Occurrence plus resolved teacher display names for student-facing views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWithTeachers {
    #[serde(flatten)]
    pub occurrence: ScheduleOccurrence,
    pub teacher_names: Vec<String>,
}

/// Request payload for adding an occurrence to a course.
///
/// Date ordering is unconstrained; an occurrence may end before it starts
/// (overnight and rolling sessions).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: String,

    #[serde(default)]
    pub teachers: Vec<Uuid>,
}

/// Request payload for partially updating an occurrence.
///
/// Only supplied fields are overwritten.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub start_date: Option<DateTime<Utc>>,

    pub end_date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: Option<String>,

    pub teachers: Option<Vec<Uuid>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_occurrence_external_shape() {
        let occurrence = ScheduleOccurrence {
            id: Uuid::new_v4(),
            start_date: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
            location: "Studio A".to_string(),
            teachers: vec![Uuid::new_v4()],
        };
        let json = serde_json::to_string(&occurrence).unwrap();
        assert!(json.contains("\"startDate\":\"2024-03-01T10:00:00Z\""));
        assert!(json.contains("\"endDate\""));
        assert!(json.contains("\"teachers\""));
    }

    #[test]
    fn test_with_teachers_flattens() {
        let view = ScheduleWithTeachers {
            occurrence: ScheduleOccurrence {
                id: Uuid::new_v4(),
                start_date: Utc::now(),
                end_date: Utc::now(),
                location: "Studio A".to_string(),
                teachers: vec![],
            },
            teacher_names: vec!["Kim Jiyoon".to_string()],
        };
        let json = serde_json::to_string(&view).unwrap();
        // Flattened: occurrence fields sit at the top level next to the names.
        assert!(json.contains("\"location\":\"Studio A\""));
        assert!(json.contains("\"teacherNames\":[\"Kim Jiyoon\"]"));
    }

    #[test]
    fn test_create_request_empty_location() {
        let request: CreateScheduleRequest = serde_json::from_value(serde_json::json!({
            "startDate": "2024-03-01T10:00:00Z",
            "endDate": "2024-03-10T12:00:00Z",
            "location": ""
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_teachers_default_empty() {
        let request: CreateScheduleRequest = serde_json::from_value(serde_json::json!({
            "startDate": "2024-03-01T10:00:00Z",
            "endDate": "2024-03-10T12:00:00Z",
            "location": "Studio A"
        }))
        .unwrap();
        assert!(request.teachers.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_inverted_dates_allowed() {
        let request: CreateScheduleRequest = serde_json::from_value(serde_json::json!({
            "startDate": "2024-03-10T12:00:00Z",
            "endDate": "2024-03-01T10:00:00Z",
            "location": "Studio A"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_all_optional() {
        let request: UpdateScheduleRequest = serde_json::from_str("{}").unwrap();
        assert!(request.start_date.is_none());
        assert!(request.location.is_none());
        assert!(request.teachers.is_none());
        assert!(request.validate().is_ok());
    }
}
