use super::handlers::{
    capture_page::capture_page, download_report::download_report, results_page::results_page,
    submit_analysis::submit_analysis, submit_demo::submit_demo,
};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// HTML pages and their form targets. Not part of the OpenAPI document.
pub fn page_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/", root_path), get(capture_page))
        .route(&format!("{}/analyze", root_path), post(submit_analysis))
        .route(&format!("{}/demo", root_path), post(submit_demo))
        .route(&format!("{}/results", root_path), get(results_page))
        .route(&format!("{}/results/report.pdf", root_path), get(download_report))
}
