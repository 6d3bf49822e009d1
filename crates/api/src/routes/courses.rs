//! Public course catalog route handlers.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use domain::models::{CourseDetailResponse, CourseListItem, ScheduleWithTeachers};
use persistence::repositories::{CourseRepository, ScheduleRepository, TeacherRepository};

use crate::app::AppState;
use crate::error::ApiError;

/// List active courses for the public catalog.
///
/// GET /api/v1/courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let course_repo = CourseRepository::new(state.pool.clone());

    let courses: Vec<CourseListItem> = course_repo
        .list_active()
        .await?
        .into_iter()
        .map(|entity| CourseListItem {
            id: entity.id,
            slug: entity.slug,
            title: entity.title,
            description: entity.description,
            thumbnail_url: entity.thumbnail_url,
            price: entity.price,
        })
        .collect();

    Ok(Json(courses))
}

/// Course detail by slug, with occurrences sorted by start date and teacher
/// names resolved per occurrence.
///
/// GET /api/v1/courses/:slug
pub async fn course_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let course_repo = CourseRepository::new(state.pool.clone());
    let schedule_repo = ScheduleRepository::new(state.pool.clone());
    let teacher_repo = TeacherRepository::new(state.pool.clone());

    let course = course_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let entities = schedule_repo.list_for_course(course.id).await?;

    let mut schedules = Vec::with_capacity(entities.len());
    for entity in entities {
        let teacher_names = teacher_repo.resolve_names(&entity.teacher_ids).await?;
        schedules.push(ScheduleWithTeachers {
            occurrence: entity.into(),
            teacher_names,
        });
    }

    Ok(Json(CourseDetailResponse {
        course: course.into(),
        schedules,
    }))
}
