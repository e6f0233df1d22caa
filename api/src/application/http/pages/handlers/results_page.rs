use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use platewise_core::domain::{food_analysis::ports::FoodAnalysisService, report::ResultsView};
use tracing::info;

use crate::application::http::{
    pages::views::render_results_page,
    server::{api_entities::api_error::ApiError, app_state::AppState},
};

/// Redirects to the capture page when nothing (readable) is stored.
pub async fn results_page(State(state): State<AppState>) -> Result<Response, ApiError> {
    let Some(record) = state.service.latest_analysis().await? else {
        info!("No analysis stored, redirecting to capture page");
        return Ok(Redirect::to(&state.url("/")).into_response());
    };
    let image = state.service.latest_image().await?;

    let view = ResultsView::from_record(&record);
    let html = render_results_page(&state.args.server.root_path, &view, image.as_deref());

    Ok(Html(html).into_response())
}
