pub mod capture_page;
pub mod download_report;
pub mod results_page;
pub mod submit_analysis;
pub mod submit_demo;

use axum::response::{Html, IntoResponse, Response};
use platewise_core::domain::food_analysis::entities::HealthProfile;
use tracing::warn;

use super::views::{Notification, render_capture_page};
use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

/// Re-renders the capture page with the failure as a notification, keeping
/// the submitted health fields.
pub(crate) fn capture_page_with_error(
    state: &AppState,
    error: ApiError,
    profile: &HealthProfile,
) -> Response {
    warn!(status = %error.status_code(), "Capture form rejected: {}", error);

    let message = match &error {
        ApiError::BadRequest(message) | ApiError::PayloadTooLarge(message) => message.clone(),
        other => format!("Error analyzing food image: {}", other.message()),
    };
    let html = render_capture_page(
        &state.args.server.root_path,
        Some(&Notification::error(message)),
        profile,
    );

    (error.status_code(), Html(html)).into_response()
}
