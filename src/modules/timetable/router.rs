use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{create_period, delete_period, get_timetable};

pub fn init_timetable_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_timetable))
        .route("/periods", post(create_period))
        .route("/periods/{id}", delete(delete_period))
}
