use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::app_state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConfigResponse {
    pub app_version: String,
    pub model: String,
    /// False when no API key is configured; the demo analysis still works.
    pub live_analysis_enabled: bool,
    pub max_upload_bytes: usize,
    pub pipeline_tick_ms: u64,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Get server configuration",
    responses(
        (status = 200, body = ConfigResponse)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.args.llm.model.clone(),
        live_analysis_enabled: !state.args.llm.api_key.trim().is_empty(),
        max_upload_bytes: state.args.server.max_upload_bytes,
        pipeline_tick_ms: state.args.pipeline.tick_ms,
    })
}
