//! Admin enrollment review route handlers.
//!
//! The review workflow: every application arrives pending; administrators
//! approve or reject it, may set a discounted price override at any point,
//! and may delete the record outright.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    Application, ApplicationListItem, ApplicationResponse, ApplicationStatus,
    ListApplicationsQuery, ListApplicationsResponse, Pagination, SetDiscountRequest,
    UpdateStatusRequest,
};
use domain::services::pricing::effective_price;
use persistence::entities::ApplicationStatusDb;
use persistence::repositories::ApplicationRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminKeyAuth;

/// List applications with optional status and course filters.
///
/// GET /api/v1/admin/applications
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let application_repo = ApplicationRepository::new(state.pool.clone());

    // An unrecognized status label simply matches nothing recognizable and
    // is ignored as a filter.
    let status_filter = query
        .status
        .as_deref()
        .and_then(ApplicationStatus::parse)
        .map(ApplicationStatusDb::from);

    let page = query.page.max(1);
    let per_page = query.per_page.clamp(1, 100);
    let limit = per_page as i64;
    let offset = ((page - 1) * per_page) as i64;

    let total = application_repo
        .count(status_filter, query.course_id)
        .await?;
    let total_pages = ((total as f64) / (per_page as f64)).ceil() as u32;

    let entities = application_repo
        .list(status_filter, query.course_id, limit, offset)
        .await?;

    let data: Vec<ApplicationListItem> = entities
        .into_iter()
        .map(|entity| {
            let pricing = effective_price(entity.price, entity.discounted_price);
            ApplicationListItem {
                id: entity.id,
                course_id: entity.course_id,
                schedule_id: entity.schedule_id,
                korean_name: entity.korean_name,
                email: entity.email,
                phone: entity.phone,
                status: entity.status.into(),
                pricing,
                created_at: entity.created_at,
            }
        })
        .collect();

    info!(
        count = data.len(),
        total = total,
        "Listed enrollment applications"
    );

    Ok(Json(ListApplicationsResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// Get a single application with its derived pricing.
///
/// GET /api/v1/admin/applications/:application_id
pub async fn get_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let application_repo = ApplicationRepository::new(state.pool.clone());
    let entity = application_repo
        .find_by_id(application_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    let application: Application = entity.into();
    let pricing = effective_price(application.price, application.discounted_price);

    Ok(Json(ApplicationResponse {
        application,
        pricing,
    }))
}

/// Set the review status.
///
/// POST /api/v1/admin/applications/:application_id/status
///
/// Any recognized status may be set regardless of the current one;
/// re-transitioning a decided application is allowed.
pub async fn set_status(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Extension(auth): Extension<AdminKeyAuth>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = ApplicationStatus::parse(&request.status).ok_or_else(|| {
        ApiError::validation("Status must be one of: pending, approved, rejected")
    })?;

    let application_repo = ApplicationRepository::new(state.pool.clone());
    let entity = application_repo
        .set_status(application_id, status.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    info!(
        application_id = %application_id,
        status = %status,
        key_prefix = %auth.key_prefix,
        "Set application status"
    );

    let application: Application = entity.into();
    let pricing = effective_price(application.price, application.discounted_price);

    Ok(Json(ApplicationResponse {
        application,
        pricing,
    }))
}

/// Set or clear the discounted price override.
///
/// POST /api/v1/admin/applications/:application_id/discount
///
/// Allowed in any status. The override is not bounded by the snapshot price;
/// only non-negativity is enforced.
pub async fn set_discount(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Extension(auth): Extension<AdminKeyAuth>,
    Json(request): Json<SetDiscountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let application_repo = ApplicationRepository::new(state.pool.clone());
    let entity = application_repo
        .set_discounted_price(application_id, request.discounted_price)
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    info!(
        application_id = %application_id,
        discounted_price = ?request.discounted_price,
        key_prefix = %auth.key_prefix,
        "Set application discount"
    );

    let application: Application = entity.into();
    let pricing = effective_price(application.price, application.discounted_price);

    Ok(Json(ApplicationResponse {
        application,
        pricing,
    }))
}

/// Hard-delete an application. No recovery.
///
/// DELETE /api/v1/admin/applications/:application_id
pub async fn delete_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Extension(auth): Extension<AdminKeyAuth>,
) -> Result<impl IntoResponse, ApiError> {
    let application_repo = ApplicationRepository::new(state.pool.clone());
    let deleted = application_repo.delete(application_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Application not found".to_string()));
    }

    info!(
        application_id = %application_id,
        key_prefix = %auth.key_prefix,
        "Deleted application"
    );

    Ok(StatusCode::NO_CONTENT)
}
