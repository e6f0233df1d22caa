use axum::extract::{Multipart, State};
use platewise_core::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::AnalysisResult, ports::FoodAnalysisService, value_objects::AnalyzeFoodInput,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    food_analysis::upload::read_analysis_form,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeFoodResponse {
    pub data: AnalysisResult,
}

#[utoipa::path(
    post,
    path = "/image",
    tag = "food-analysis",
    summary = "Analyze food from image",
    description = "Sends the uploaded photo and optional health notes to Gemini and stores the result as the latest analysis. Multipart fields: image, disease, allergies.",
    responses(
        (status = 200, body = AnalyzeFoodResponse),
        (status = 400, description = "No image, unsupported type or rejected health text"),
        (status = 422, description = "The image is not food"),
        (status = 502, description = "Gemini failed or returned unusable data"),
        (status = 503, description = "No Gemini API key configured")
    )
)]
pub async fn analyze_food_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeFoodResponse>, ApiError> {
    let form = read_analysis_form(&mut multipart, state.args.server.max_upload_bytes).await?;
    let image = form.image.ok_or(CoreError::NoImageSelected)?;

    let result = state
        .service
        .analyze_food(AnalyzeFoodInput {
            image,
            profile: form.profile,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeFoodResponse { data: result }))
}
