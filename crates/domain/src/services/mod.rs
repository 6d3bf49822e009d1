//! Domain services for the Academy backend.
//!
//! Services contain business logic that operates on domain models.

pub mod notification;
pub mod pricing;

pub use notification::{
    EnrollmentConfirmation, EnrollmentNotifier, MockNotifier, NotificationResult,
};
pub use pricing::{effective_price, EffectivePrice};
