use super::handlers::{
    analyze_food_image::{__path_analyze_food_image, analyze_food_image},
    get_latest_analysis::{__path_get_latest_analysis, get_latest_analysis},
    run_demo_analysis::{__path_run_demo_analysis, run_demo_analysis},
};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_food_image, run_demo_analysis, get_latest_analysis))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/food-analysis/image", state.args.server.root_path),
            post(analyze_food_image),
        )
        .route(
            &format!("{}/api/food-analysis/demo", state.args.server.root_path),
            post(run_demo_analysis),
        )
        .route(
            &format!("{}/api/food-analysis/latest", state.args.server.root_path),
            get(get_latest_analysis),
        )
}
