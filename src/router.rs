use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::require_teacher;
use crate::modules::academic_years::router::init_academic_years_router;
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::classrooms::router::init_classrooms_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::timetable::router::init_timetable_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/classrooms",
                    init_classrooms_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_teacher,
                    )),
                )
                .nest(
                    "/subjects",
                    init_subjects_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_teacher,
                    )),
                )
                .nest(
                    "/academic-years",
                    init_academic_years_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_teacher,
                    )),
                )
                .nest(
                    "/timetable",
                    init_timetable_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_teacher,
                    )),
                )
                .nest(
                    "/attendance",
                    init_attendance_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_teacher,
                    )),
                ),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
