//! Role-based authorization middleware.
//!
//! Every classroom endpoint is teacher-facing: the router wraps them with
//! [`require_teacher`] so unauthenticated or student callers are rejected
//! before any handler logic runs.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

fn parse_role(role_str: &str) -> Result<UserRole, AppError> {
    match role_str {
        "admin" => Ok(UserRole::Admin),
        "teacher" => Ok(UserRole::Teacher),
        "student" => Ok(UserRole::Student),
        _ => Err(AppError::unauthorized(anyhow::anyhow!(
            "Invalid role: {}",
            role_str
        ))),
    }
}

async fn require_roles(
    state: AppState,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_role = parse_role(auth_user.role())?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Teacher privileges required."
        )));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Route layer for teacher-facing endpoints (admins pass as well).
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(state, req, next, &[UserRole::Admin, UserRole::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
