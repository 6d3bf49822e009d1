//! Student-facing enrollment submission.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, warn};
use validator::Validate;

use domain::models::{
    Application, ApplicationResponse, ExperienceLevel, Gender, PaymentMethod,
    SubmitApplicationRequest,
};
use domain::services::notification::{EnrollmentConfirmation, NotificationResult};
use domain::services::pricing::effective_price;
use persistence::repositories::{
    ApplicationRepository, CourseRepository, NewApplication, ScheduleRepository,
};
use shared::validation::{normalize_email, normalize_phone};

use crate::app::AppState;
use crate::error::ApiError;

/// Submit an enrollment application against one course occurrence.
///
/// POST /api/v1/enrollments (no authentication)
///
/// Validation is fail-fast: field validation, then course existence, then
/// occurrence membership, then the duplicate check, then the insert. The
/// price snapshot is the course's current base price; discounts are applied
/// by an administrator afterwards.
pub async fn submit_enrollment(
    State(state): State<AppState>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let course_repo = CourseRepository::new(state.pool.clone());
    let schedule_repo = ScheduleRepository::new(state.pool.clone());
    let application_repo = ApplicationRepository::new(state.pool.clone());

    // The referenced course must exist
    let course = course_repo
        .find_by_id(request.course_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    // The occurrence must exist and belong to that course
    let schedule = schedule_repo
        .find_by_id(course.id, request.schedule_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Schedule not found for this course".to_string()))?;

    // One application per person per occurrence, where identity is asserted
    // by either email or phone
    let normalized_email = normalize_email(&request.email);
    let normalized_phone = normalize_phone(&request.phone);
    if application_repo
        .find_duplicate(course.id, schedule.id, &normalized_email, &normalized_phone)
        .await
        .map_err(|e| {
            // A storage failure here must not masquerade as a duplicate.
            warn!("Duplicate check failed: {}", e);
            ApiError::Internal(format!("Duplicate check failed: {}", e))
        })?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "An application for this schedule already exists with this email or phone".to_string(),
        ));
    }

    let gender = Gender::parse(&request.gender)
        .ok_or_else(|| ApiError::validation("Gender must be one of: male, female"))?;
    let payment_method = PaymentMethod::parse(&request.payment_method)
        .ok_or_else(|| ApiError::validation("Payment method must be one of: onsite, card, transfer"))?;
    let pilates_experience = ExperienceLevel::parse(&request.pilates_experience).ok_or_else(|| {
        ApiError::validation("Experience must be one of: none, beginner, intermediate, advanced")
    })?;

    // The unique indexes close the race between the pre-check and this
    // insert; a violation surfaces as 23505 and maps to the same conflict.
    let entity = application_repo
        .insert(&NewApplication {
            course_id: course.id,
            schedule_id: schedule.id,
            korean_name: &request.korean_name,
            english_name: request.english_name.as_deref(),
            email: &request.email,
            normalized_email: &normalized_email,
            phone: &request.phone,
            normalized_phone: &normalized_phone,
            gender: gender.into(),
            age: request.age,
            occupation: &request.occupation,
            region: &request.region,
            pilates_experience: pilates_experience.into(),
            question: request.question.as_deref(),
            payment_method: payment_method.into(),
            price: course.price,
        })
        .await?;

    info!(
        application_id = %entity.id,
        course_id = %course.id,
        schedule_id = %schedule.id,
        "Accepted enrollment application"
    );

    let application: Application = entity.into();
    let pricing = effective_price(application.price, application.discounted_price);

    // Best-effort confirmation; a failed send never affects the enrollment.
    let confirmation = EnrollmentConfirmation::new(
        application.id,
        application.korean_name.clone(),
        application.email.clone(),
        course.title.clone(),
        schedule.location.clone(),
        schedule.start_at,
        schedule.end_at,
        &pricing,
    );
    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        match notifier.send_confirmation(confirmation).await {
            NotificationResult::Sent => {}
            NotificationResult::Skipped => {}
            NotificationResult::Failed(reason) => {
                warn!(reason = %reason, "Enrollment confirmation delivery failed");
            }
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            application,
            pricing,
        }),
    ))
}
