use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/signup", get(handlers::signup_page).post(handlers::signup_submit))
        .route("/api/visit", post(handlers::api_visit))
        .route("/api/summary", get(handlers::api_summary))
        .route("/api/series", get(handlers::api_series))
        .route("/api/signup", post(handlers::api_signup))
        .with_state(state)
}
