use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_academic_years;

pub fn init_academic_years_router() -> Router<AppState> {
    Router::new().route("/", get(get_academic_years))
}
