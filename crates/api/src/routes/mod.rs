//! HTTP route handlers.

pub mod admin_applications;
pub mod admin_courses;
pub mod courses;
pub mod enrollments;
pub mod health;
