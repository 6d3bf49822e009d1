//! Admin course and schedule management route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    Course, CreateCourseRequest, CreateScheduleRequest, ScheduleOccurrence, UpdateCourseRequest,
    UpdateScheduleRequest,
};
use persistence::repositories::{CourseRepository, ScheduleRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminKeyAuth;

/// Create a course. Courses start with zero occurrences.
///
/// POST /api/v1/admin/courses
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let course_repo = CourseRepository::new(state.pool.clone());
    let entity = course_repo.create(&request).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("A course with this slug already exists".to_string())
        } else {
            e.into()
        }
    })?;

    info!(course_id = %entity.id, slug = %entity.slug, "Created course");

    Ok((StatusCode::CREATED, Json(Course::from(entity))))
}

/// List every course, including inactive ones.
///
/// GET /api/v1/admin/courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let course_repo = CourseRepository::new(state.pool.clone());
    let courses: Vec<Course> = course_repo
        .list_all()
        .await?
        .into_iter()
        .map(Course::from)
        .collect();
    Ok(Json(courses))
}

/// Get one course by ID.
///
/// GET /api/v1/admin/courses/:course_id
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let course_repo = CourseRepository::new(state.pool.clone());
    let entity = course_repo
        .find_by_id(course_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;
    Ok(Json(Course::from(entity)))
}

/// Partially update a course.
///
/// PATCH /api/v1/admin/courses/:course_id
pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(request): Json<UpdateCourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let course_repo = CourseRepository::new(state.pool.clone());
    let entity = course_repo
        .update(course_id, &request)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("A course with this slug already exists".to_string())
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    info!(course_id = %entity.id, "Updated course");

    Ok(Json(Course::from(entity)))
}

/// Delete a course. Its occurrences cascade; the delete is refused while any
/// application still references the course or one of its occurrences.
///
/// DELETE /api/v1/admin/courses/:course_id
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Extension(auth): Extension<AdminKeyAuth>,
) -> Result<impl IntoResponse, ApiError> {
    let course_repo = CourseRepository::new(state.pool.clone());
    let deleted = course_repo.delete(course_id).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            ApiError::Conflict(
                "Course has enrollment applications and cannot be deleted".to_string(),
            )
        } else {
            e.into()
        }
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    info!(
        course_id = %course_id,
        key_prefix = %auth.key_prefix,
        "Deleted course"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// List a course's occurrences, ordered by start date.
///
/// GET /api/v1/admin/courses/:course_id/schedules
///
/// The read path never fails for domain reasons: an unknown course yields an
/// empty list.
pub async fn list_schedules(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let schedule_repo = ScheduleRepository::new(state.pool.clone());
    let schedules: Vec<ScheduleOccurrence> = schedule_repo
        .list_for_course(course_id)
        .await?
        .into_iter()
        .map(ScheduleOccurrence::from)
        .collect();
    Ok(Json(schedules))
}

/// Append an occurrence to a course.
///
/// POST /api/v1/admin/courses/:course_id/schedules
pub async fn add_schedule(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let course_repo = CourseRepository::new(state.pool.clone());
    let schedule_repo = ScheduleRepository::new(state.pool.clone());

    if !course_repo.exists(course_id).await? {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let entity = schedule_repo
        .insert(
            course_id,
            request.start_date,
            request.end_date,
            &request.location,
            &request.teachers,
        )
        .await?;

    info!(
        course_id = %course_id,
        schedule_id = %entity.id,
        location = %entity.location,
        "Added schedule occurrence"
    );

    Ok((StatusCode::CREATED, Json(ScheduleOccurrence::from(entity))))
}

/// Partially update an occurrence. Only supplied fields are overwritten.
///
/// PATCH /api/v1/admin/courses/:course_id/schedules/:schedule_id
pub async fn update_schedule(
    State(state): State<AppState>,
    Path((course_id, schedule_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let schedule_repo = ScheduleRepository::new(state.pool.clone());
    let entity = schedule_repo
        .update(course_id, schedule_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Schedule not found for this course".to_string()))?;

    info!(
        course_id = %course_id,
        schedule_id = %schedule_id,
        "Updated schedule occurrence"
    );

    Ok(Json(ScheduleOccurrence::from(entity)))
}

/// Remove an occurrence. Refused while applications still reference it.
///
/// DELETE /api/v1/admin/courses/:course_id/schedules/:schedule_id
pub async fn remove_schedule(
    State(state): State<AppState>,
    Path((course_id, schedule_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let schedule_repo = ScheduleRepository::new(state.pool.clone());
    let removed = schedule_repo
        .remove(course_id, schedule_id)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::Conflict(
                    "Schedule has enrollment applications and cannot be removed".to_string(),
                )
            } else {
                e.into()
            }
        })?;

    if !removed {
        return Err(ApiError::NotFound("Schedule not found for this course".to_string()));
    }

    info!(
        course_id = %course_id,
        schedule_id = %schedule_id,
        "Removed schedule occurrence"
    );

    Ok(StatusCode::NO_CONTENT)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503"))
}
