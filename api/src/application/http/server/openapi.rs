use crate::application::http::{
    food_analysis::router::FoodAnalysisApiDoc, health::__path_health_check,
    pipeline::router::PipelineApiDoc, server::config::__path_get_config,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Platewise API"
    ),
    paths(get_config, health_check),
    nest(
        (path = "/api/food-analysis", api = FoodAnalysisApiDoc),
        (path = "/api/pipeline", api = PipelineApiDoc),
    )
)]
pub struct ApiDoc;
