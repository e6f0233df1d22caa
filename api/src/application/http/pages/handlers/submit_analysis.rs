use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use platewise_core::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{entities::HealthProfile, ports::FoodAnalysisService, value_objects::AnalyzeFoodInput},
};

use super::capture_page_with_error;
use crate::application::http::{
    food_analysis::upload::read_analysis_form,
    server::{api_entities::api_error::ApiError, app_state::AppState},
};

/// Form target of the Analyze button: 303 to the results page on success.
pub async fn submit_analysis(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match read_analysis_form(&mut multipart, state.args.server.max_upload_bytes).await {
        Ok(form) => form,
        Err(e) => return capture_page_with_error(&state, e, &HealthProfile::default()),
    };

    let Some(image) = form.image else {
        return capture_page_with_error(
            &state,
            ApiError::from(CoreError::NoImageSelected),
            &form.profile,
        );
    };

    let input = AnalyzeFoodInput {
        image,
        profile: form.profile.clone(),
    };

    match state.service.analyze_food(input).await {
        Ok(_) => Redirect::to(&state.url("/results")).into_response(),
        Err(e) => capture_page_with_error(&state, ApiError::from(e), &form.profile),
    }
}
