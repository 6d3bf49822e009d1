//! Enrollment confirmation notifications.
//!
//! Delivery is best-effort: a failed send is reported back to the caller for
//! logging but must never affect the enrollment itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::pricing::EffectivePrice;

/// Snapshot of an accepted application handed to the notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentConfirmation {
    pub application_id: Uuid,
    pub applicant_name: String,
    pub email: String,
    pub course_title: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed_price: Option<i64>,
}

impl EnrollmentConfirmation {
    /// Builds the notifier payload from the pieces assembled at intake time.
    pub fn new(
        application_id: Uuid,
        applicant_name: impl Into<String>,
        email: impl Into<String>,
        course_title: impl Into<String>,
        location: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        pricing: &EffectivePrice,
    ) -> Self {
        Self {
            application_id,
            applicant_name: applicant_name.into(),
            email: email.into(),
            course_title: course_title.into(),
            location: location.into(),
            start_date,
            end_date,
            displayed_price: pricing.displayed,
        }
    }
}

/// Result of a confirmation send attempt.
#[derive(Debug, Clone)]
pub enum NotificationResult {
    /// Confirmation was sent successfully.
    Sent,
    /// Sending failed (non-blocking; the enrollment stands).
    Failed(String),
    /// Sending was skipped (service disabled).
    Skipped,
}

/// Notification service boundary for enrollment confirmations.
#[async_trait::async_trait]
pub trait EnrollmentNotifier: Send + Sync {
    /// Attempts to deliver a confirmation for an accepted application.
    async fn send_confirmation(&self, confirmation: EnrollmentConfirmation) -> NotificationResult;
}

/// Recording notifier for tests.
#[derive(Default)]
pub struct MockNotifier {
    sent: std::sync::Mutex<Vec<EnrollmentConfirmation>>,
    fail_with: Option<String>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that reports every send as failed with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail_with: Some(reason.into()),
        }
    }

    /// Confirmations passed to the mock so far.
    pub fn sent(&self) -> Vec<EnrollmentConfirmation> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EnrollmentNotifier for MockNotifier {
    async fn send_confirmation(&self, confirmation: EnrollmentConfirmation) -> NotificationResult {
        self.sent.lock().unwrap().push(confirmation);
        match &self.fail_with {
            Some(reason) => NotificationResult::Failed(reason.clone()),
            None => NotificationResult::Sent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pricing::effective_price;

    fn confirmation() -> EnrollmentConfirmation {
        EnrollmentConfirmation::new(
            Uuid::new_v4(),
            "김하늘",
            "a@x.com",
            "Mat Pilates 101",
            "Studio A",
            Utc::now(),
            Utc::now(),
            &effective_price(Some(100_000), Some(90_000)),
        )
    }

    #[tokio::test]
    async fn test_mock_notifier_records_sends() {
        let notifier = MockNotifier::new();
        let result = notifier.send_confirmation(confirmation()).await;
        assert!(matches!(result, NotificationResult::Sent));
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].course_title, "Mat Pilates 101");
        assert_eq!(sent[0].displayed_price, Some(90_000));
    }

    #[tokio::test]
    async fn test_mock_notifier_failing() {
        let notifier = MockNotifier::failing("smtp down");
        let result = notifier.send_confirmation(confirmation()).await;
        match result {
            NotificationResult::Failed(reason) => assert_eq!(reason, "smtp down"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_confirmation_serializes_camel_case() {
        let json = serde_json::to_string(&confirmation()).unwrap();
        assert!(json.contains("\"applicantName\""));
        assert!(json.contains("\"displayedPrice\":90000"));
    }
}
