use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::academic_years::model::AcademicYear;
use crate::modules::academic_years::service::AcademicYearService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/api/academic-years",
    responses(
        (status = 200, description = "Academic years in the caller's school", body = Vec<AcademicYear>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - teacher role required")
    ),
    tag = "Academic years",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_academic_years(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<AcademicYear>>, AppError> {
    let school_id = auth_user.school_id()?;

    let years = AcademicYearService::get_academic_years_by_school(&state.db, school_id).await?;

    Ok(Json(years))
}
