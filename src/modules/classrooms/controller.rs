use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::classrooms::model::{ClassRoom, CreateClassroomDto};
use crate::modules::classrooms::service::ClassroomService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/classrooms",
    responses(
        (status = 200, description = "Classrooms in the caller's school", body = Vec<ClassRoom>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - teacher role required")
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_classrooms(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ClassRoom>>, AppError> {
    let school_id = auth_user.school_id()?;

    let classrooms = ClassroomService::get_classrooms_by_school(&state.db, school_id).await?;

    Ok(Json(classrooms))
}

#[utoipa::path(
    post,
    path = "/api/classrooms",
    request_body = CreateClassroomDto,
    responses(
        (status = 201, description = "Classroom created", body = ClassRoom),
        (status = 400, description = "Duplicate name"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_classroom(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassroomDto>,
) -> Result<(StatusCode, Json<ClassRoom>), AppError> {
    let school_id = auth_user.school_id()?;

    let classroom = ClassroomService::create_classroom(&state.db, school_id, dto).await?;

    Ok((StatusCode::CREATED, Json(classroom)))
}
