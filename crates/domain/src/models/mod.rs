//! Domain models for the Academy backend.

pub mod application;
pub mod course;
pub mod schedule;

pub use application::{
    Application, ApplicationListItem, ApplicationResponse, ApplicationStatus,
    ExperienceLevel, Gender, ListApplicationsQuery, ListApplicationsResponse, Pagination,
    PaymentMethod, SetDiscountRequest, SubmitApplicationRequest, UpdateStatusRequest,
};
pub use course::{
    Course, CourseDetailResponse, CourseListItem, CreateCourseRequest, UpdateCourseRequest,
};
pub use schedule::{
    CreateScheduleRequest, ScheduleOccurrence, ScheduleWithTeachers, UpdateScheduleRequest,
};
