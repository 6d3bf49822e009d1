//! Enrollment application domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Review status of an enrollment application.
///
/// Every application starts out `pending`; administrators move it to
/// `approved` or `rejected`. Re-transitioning an already-decided application
/// is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Parses a status label; returns `None` for unrecognized values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Applicant gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Chosen payment method. A label only; no payment is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Onsite,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "onsite" => Some(Self::Onsite),
            "card" => Some(Self::Card),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onsite => "onsite",
            Self::Card => "card",
            Self::Transfer => "transfer",
        }
    }
}

/// Prior pilates experience bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    None,
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Student-facing enrollment submission payload.
///
/// Enumerated fields arrive as strings and are checked against their allowed
/// sets here so a bad value surfaces as a per-field validation error rather
/// than a deserialization failure.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    pub course_id: Uuid,

    pub schedule_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub korean_name: String,

    #[validate(length(max = 100, message = "Romanized name must be at most 100 characters"))]
    pub english_name: Option<String>,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: String,

    #[validate(custom(function = "shared::validation::validate_gender"))]
    pub gender: String,

    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: i32,

    #[validate(length(min = 1, max = 100, message = "Occupation must be 1-100 characters"))]
    pub occupation: String,

    #[validate(length(min = 1, max = 100, message = "Region must be 1-100 characters"))]
    pub region: String,

    #[validate(custom(function = "shared::validation::validate_experience"))]
    pub pilates_experience: String,

    #[validate(length(max = 2000, message = "Question must be at most 2000 characters"))]
    pub question: Option<String>,

    #[validate(custom(function = "shared::validation::validate_payment_method"))]
    pub payment_method: String,
}

/// Admin request to set an application's review status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Admin request to set (or clear, with `null`) the discounted price override.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetDiscountRequest {
    #[validate(custom(function = "validate_optional_price"))]
    pub discounted_price: Option<i64>,
}

/// Validates an optional price override.
pub fn validate_optional_price(amount: i64) -> Result<(), validator::ValidationError> {
    shared::validation::validate_price(amount)
}

/// Query parameters for the admin application listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApplicationsQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub course_id: Option<Uuid>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

// ============================================================================
// Response DTOs
// ============================================================================

/// An enrollment application as seen by any caller across the boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub course_id: Uuid,
    pub schedule_id: Uuid,
    pub korean_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub age: i32,
    pub occupation: String,
    pub region: String,
    pub pilates_experience: ExperienceLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub payment_method: PaymentMethod,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full application record plus its derived pricing, returned by the
/// submission endpoint and the admin detail endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[serde(flatten)]
    pub application: Application,
    pub pricing: crate::services::pricing::EffectivePrice,
}

/// Condensed application row for the admin listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListItem {
    pub id: Uuid,
    pub course_id: Uuid,
    pub schedule_id: Uuid,
    pub korean_name: String,
    pub email: String,
    pub phone: String,
    pub status: ApplicationStatus,
    pub pricing: crate::services::pricing::EffectivePrice,
    pub created_at: DateTime<Utc>,
}

/// Pagination info for list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
}

/// Response for the admin application listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApplicationsResponse {
    pub data: Vec<ApplicationListItem>,
    pub pagination: Pagination,
}
