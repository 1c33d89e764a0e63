use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/complete", post(handlers::complete))
        .route("/calendar_data", get(handlers::calendar_data))
        .route("/api/calendar", get(handlers::calendar_view))
        .route("/api/events", post(handlers::record_event))
        .with_state(state)
}
