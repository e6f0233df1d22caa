use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use platewise_core::domain::food_analysis::{entities::HealthProfile, ports::FoodAnalysisService};

use super::capture_page_with_error;
use crate::application::http::{
    food_analysis::upload::read_analysis_form,
    server::{api_entities::api_error::ApiError, app_state::AppState},
};

/// Form target of the Demo button. Waits for the pipeline like the live
/// path would, then shows the mock result.
pub async fn submit_demo(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match read_analysis_form(&mut multipart, state.args.server.max_upload_bytes).await {
        Ok(form) => form,
        Err(e) => return capture_page_with_error(&state, e, &HealthProfile::default()),
    };

    match state
        .service
        .run_demo_analysis(form.profile.clone(), form.image)
        .await
    {
        Ok(_) => Redirect::to(&state.url("/results")).into_response(),
        Err(e) => capture_page_with_error(&state, ApiError::from(e), &form.profile),
    }
}
