use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::attendance::model::{
    AttendanceQuery, AttendanceReport, AttendanceReportQuery, AttendanceSheet, MessageResponse,
    SaveAttendanceDto,
};
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Marking sheet for the classroom and date, or the classroom picker when no filters are given", body = AttendanceSheet),
        (status = 400, description = "Malformed date"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Classroom not found")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<AttendanceSheet>, AppError> {
    let school_id = auth_user.school_id()?;

    let sheet = AttendanceService::get_sheet(&state.db, school_id, query).await?;

    Ok(Json(sheet))
}

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = SaveAttendanceDto,
    responses(
        (status = 200, description = "Attendance recorded", body = MessageResponse),
        (status = 400, description = "Malformed date, missing student status or no active academic year"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Classroom not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn save_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SaveAttendanceDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let school_id = auth_user.school_id()?;

    AttendanceService::save_attendance(&state.db, school_id, dto).await?;

    Ok(Json(MessageResponse {
        message: "Attendance details saved with success!".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/attendance/report",
    params(AttendanceReportQuery),
    responses(
        (status = 200, description = "Monthly report for the classroom, or the filter context when not all filters are given", body = AttendanceReport),
        (status = 400, description = "Month out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Classroom not found")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<AttendanceReportQuery>,
) -> Result<Json<AttendanceReport>, AppError> {
    let school_id = auth_user.school_id()?;

    let report = AttendanceService::get_report(&state.db, school_id, query).await?;

    Ok(Json(report))
}
