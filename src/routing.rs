//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState,
    dashboard::get_dashboard_summary,
    endpoints,
    portfolio::{
        get_about_info, get_contact_info, get_experiences, get_projects, get_skills,
        submit_contact_message,
    },
    transaction::get_transactions,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::DASHBOARD, get(get_dashboard_summary))
        .route(endpoints::SKILLS, get(get_skills))
        .route(endpoints::EXPERIENCES, get(get_experiences))
        .route(endpoints::PROJECTS, get(get_projects))
        .route(endpoints::CONTACT_INFO, get(get_contact_info))
        .route(endpoints::ABOUT_INFO, get(get_about_info))
        .route(endpoints::CONTACT_MESSAGE, post(submit_contact_message))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response()
}
