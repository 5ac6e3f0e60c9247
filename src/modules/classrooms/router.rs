use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_classroom, get_classrooms};

pub fn init_classrooms_router() -> Router<AppState> {
    Router::new().route("/", get(get_classrooms).post(create_classroom))
}
