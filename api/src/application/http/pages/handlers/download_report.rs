use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use chrono::Local;
use platewise_core::{
    domain::{food_analysis::ports::FoodAnalysisService, report::ResultsView},
    infrastructure::report::{REPORT_FILE_NAME, render_report_pdf},
};
use tracing::{error, info};

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub async fn download_report(State(state): State<AppState>) -> Result<Response, ApiError> {
    let record = state
        .service
        .latest_analysis()
        .await?
        .ok_or_else(|| ApiError::NotFound("No analysis data found".to_string()))?;
    let image = state.service.latest_image().await?;
    let date = Local::now().date_naive();

    let report = tokio::task::spawn_blocking(move || {
        let view = ResultsView::from_record(&record);
        render_report_pdf(&view, image.as_deref(), date)
    })
    .await
    .map_err(|e| {
        error!("Report rendering task failed: {}", e);
        ApiError::InternalServerError("Report generation failed".to_string())
    })??;

    info!(pages = report.pages, size = report.bytes.len(), "PDF report generated");

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
            ),
        ],
        report.bytes,
    )
        .into_response())
}
