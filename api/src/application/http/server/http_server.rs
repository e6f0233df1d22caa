use std::sync::{Arc, OnceLock};

use crate::application::http::food_analysis::router::food_analysis_routes;
use crate::application::http::health::health_routes;
use crate::application::http::pages::router::page_routes;
use crate::application::http::pipeline::router::pipeline_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

use super::config::get_config;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use platewise_core::{application::create_service, domain::common::PlatewiseConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Multipart framing and the two text fields on top of the image itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// The metrics recorder is process-global and can only be installed once.
static METRICS: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let platewise_config = PlatewiseConfig::from(args.as_ref().clone());
    let service = create_service(platewise_config)?;

    Ok(AppState::new(args, service))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid allowed origin {:?}: {}", origin, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT, LOCATION])
        .allow_credentials(true);

    let (prometheus_layer, metric_handle) = METRICS.get_or_init(PrometheusMetricLayer::pair).clone();

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);
    let body_limit = state.args.server.max_upload_bytes + FORM_OVERHEAD_BYTES;

    let router = axum::Router::new()
        .merge(SwaggerUi::new(format!("{}/swagger-ui", root_path)).url(api_docs_url, openapi))
        .route(&format!("{}/config", root_path), get(get_config))
        .merge(page_routes(state.clone()))
        .merge(food_analysis_routes(state.clone()))
        .merge(pipeline_routes(state.clone()))
        .merge(health_routes(&root_path))
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use test_context::test_context;

    use crate::application::http::{
        health::HealthResponse, server::config::ConfigResponse, test::TestApp,
    };

    #[test_context(TestApp)]
    #[tokio::test]
    async fn test_health_and_config(ctx: &mut TestApp) {
        let health = ctx.server.get("/health").await.json::<HealthResponse>();
        assert_eq!(health.status, "ok");

        let config = ctx.server.get("/config").await.json::<ConfigResponse>();
        assert!(config.live_analysis_enabled);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test_context(TestApp)]
    #[tokio::test]
    async fn test_openapi_document_lists_json_routes(ctx: &mut TestApp) {
        let doc = ctx.server.get("/api-docs/openapi.json").await.text();

        assert!(doc.contains("/api/food-analysis/image"));
        assert!(doc.contains("/api/pipeline/stream"));
    }

    #[test_context(TestApp)]
    #[tokio::test]
    async fn test_metrics_endpoint_is_served(ctx: &mut TestApp) {
        ctx.server.get("/health").await;
        ctx.server.get("/metrics").await.assert_status_ok();
    }
}
