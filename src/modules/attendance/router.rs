use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_attendance, get_attendance_report, save_attendance};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_attendance).post(save_attendance))
        .route("/report", get(get_attendance_report))
}
