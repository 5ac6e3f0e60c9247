use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::timetable::model::{
    CreatePeriodDto, Period, TimetableQuery, TimetableResponse,
};
use crate::modules::timetable::service::TimetableService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/timetable",
    params(TimetableQuery),
    responses(
        (status = 200, description = "Period descriptors for the classroom, or the scheduling context when no classroom is given", body = TimetableResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Classroom not found")
    ),
    tag = "Timetable",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_timetable(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<TimetableQuery>,
) -> Result<Json<TimetableResponse>, AppError> {
    let school_id = auth_user.school_id()?;

    let response = match query.classroom.as_deref().filter(|name| !name.is_empty()) {
        Some(classroom_name) => TimetableResponse::Periods(
            TimetableService::get_periods(&state.db, school_id, classroom_name).await?,
        ),
        None => {
            TimetableResponse::Context(TimetableService::get_context(&state.db, school_id).await?)
        }
    };

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/timetable/periods",
    request_body = CreatePeriodDto,
    responses(
        (status = 201, description = "Period created", body = Period),
        (status = 400, description = "Unknown weekday label or invalid time range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Classroom, subject or teacher not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Timetable",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_period(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePeriodDto>,
) -> Result<(StatusCode, Json<Period>), AppError> {
    let school_id = auth_user.school_id()?;

    let period = TimetableService::create_period(&state.db, school_id, dto).await?;

    Ok((StatusCode::CREATED, Json(period)))
}

#[utoipa::path(
    delete,
    path = "/api/timetable/periods/{id}",
    params(
        ("id" = Uuid, Path, description = "Period ID")
    ),
    responses(
        (status = 204, description = "Period deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Period not found")
    ),
    tag = "Timetable",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_period(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let school_id = auth_user.school_id()?;

    TimetableService::delete_period(&state.db, school_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
