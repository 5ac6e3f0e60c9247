use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::subjects::model::{CreateSubjectDto, Subject};
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/subjects",
    responses(
        (status = 200, description = "Subjects in the caller's school", body = Vec<Subject>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - teacher role required")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subjects(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Subject>>, AppError> {
    let school_id = auth_user.school_id()?;

    let subjects = SubjectService::get_subjects_by_school(&state.db, school_id).await?;

    Ok(Json(subjects))
}

#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Duplicate name"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let school_id = auth_user.school_id()?;

    let subject = SubjectService::create_subject(&state.db, school_id, dto).await?;

    Ok((StatusCode::CREATED, Json(subject)))
}
