use axum::extract::State;
use platewise_core::domain::food_analysis::{
    entities::AnalysisResult, ports::FoodAnalysisService,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LatestAnalysisResponse {
    pub data: AnalysisResult,
    /// Data URL of the analysed photo, absent for demo runs without one.
    pub image: Option<String>,
}

#[utoipa::path(
    get,
    path = "/latest",
    tag = "food-analysis",
    summary = "Get the latest analysis",
    responses(
        (status = 200, body = LatestAnalysisResponse),
        (status = 404, description = "Nothing stored yet, or the stored record is unreadable")
    )
)]
pub async fn get_latest_analysis(
    State(state): State<AppState>,
) -> Result<Response<LatestAnalysisResponse>, ApiError> {
    let data = state
        .service
        .latest_analysis()
        .await?
        .ok_or_else(|| ApiError::NotFound("No analysis data found".to_string()))?;
    let image = state.service.latest_image().await?;

    Ok(Response::OK(LatestAnalysisResponse { data, image }))
}
