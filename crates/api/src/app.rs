use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::notification::EnrollmentNotifier;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, require_admin, trace_id};
use crate::routes::{admin_applications, admin_courses, courses, enrollments, health};
use crate::services::EmailService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub notifier: Arc<dyn EnrollmentNotifier>,
}

/// Builds the application with the email-backed notifier.
pub fn create_app(config: Config, pool: PgPool) -> Router {
    let notifier = Arc::new(EmailService::new(config.email.clone()));
    create_app_with_notifier(config, pool, notifier)
}

/// Builds the application with an injected notifier (used by tests).
pub fn create_app_with_notifier(
    config: Config,
    pool: PgPool,
    notifier: Arc<dyn EnrollmentNotifier>,
) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        notifier,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Student-facing routes: catalog reads and enrollment submission
    let catalog_routes = Router::new()
        .route("/api/v1/courses", get(courses::list_courses))
        .route("/api/v1/courses/:slug", get(courses::course_detail))
        .route("/api/v1/enrollments", post(enrollments::submit_enrollment));

    // Admin routes (require an admin API key)
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/courses",
            post(admin_courses::create_course).get(admin_courses::list_courses),
        )
        .route(
            "/api/v1/admin/courses/:course_id",
            get(admin_courses::get_course)
                .patch(admin_courses::update_course)
                .delete(admin_courses::delete_course),
        )
        .route(
            "/api/v1/admin/courses/:course_id/schedules",
            get(admin_courses::list_schedules).post(admin_courses::add_schedule),
        )
        .route(
            "/api/v1/admin/courses/:course_id/schedules/:schedule_id",
            patch(admin_courses::update_schedule).delete(admin_courses::remove_schedule),
        )
        .route(
            "/api/v1/admin/applications",
            get(admin_applications::list_applications),
        )
        .route(
            "/api/v1/admin/applications/:application_id",
            get(admin_applications::get_application)
                .delete(admin_applications::delete_application),
        )
        .route(
            "/api/v1/admin/applications/:application_id/status",
            post(admin_applications::set_status),
        )
        .route(
            "/api/v1/admin/applications/:application_id/discount",
            post(admin_applications::set_discount),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(catalog_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
