//! Entity definitions (database row mappings).

pub mod api_key;
pub mod application;
pub mod course;
pub mod schedule_occurrence;
pub mod teacher;

pub use api_key::ApiKeyEntity;
pub use application::{
    ApplicationEntity, ApplicationStatusDb, ExperienceLevelDb, GenderDb, PaymentMethodDb,
};
pub use course::CourseEntity;
pub use schedule_occurrence::ScheduleOccurrenceEntity;
pub use teacher::TeacherNameRow;
