use axum::extract::State;
use platewise_core::domain::food_analysis::{entities::FoodImage, ports::FoodAnalysisService};

use crate::application::http::{
    food_analysis::{
        handlers::analyze_food_image::AnalyzeFoodResponse, validators::DemoAnalysisRequest,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/demo",
    tag = "food-analysis",
    summary = "Run a demo analysis",
    description = "Plays the pipeline indicator to completion, then stores a randomly generated analysis. Needs no API key.",
    request_body = DemoAnalysisRequest,
    responses(
        (status = 200, body = AnalyzeFoodResponse),
        (status = 400, description = "Invalid body or image data URL")
    )
)]
pub async fn run_demo_analysis(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<DemoAnalysisRequest>,
) -> Result<Response<AnalyzeFoodResponse>, ApiError> {
    let image = payload
        .image
        .as_deref()
        .map(FoodImage::from_data_url)
        .transpose()?;

    let result = state
        .service
        .run_demo_analysis(payload.profile(), image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeFoodResponse { data: result }))
}
