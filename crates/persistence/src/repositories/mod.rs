//! Repository implementations.

pub mod api_key;
pub mod application;
pub mod course;
pub mod schedule;
pub mod teacher;

pub use api_key::ApiKeyRepository;
pub use application::{ApplicationRepository, NewApplication};
pub use course::CourseRepository;
pub use schedule::ScheduleRepository;
pub use teacher::TeacherRepository;
