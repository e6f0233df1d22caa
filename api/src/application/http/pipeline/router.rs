use super::handlers::stream_pipeline::{__path_stream_pipeline, stream_pipeline};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(stream_pipeline))]
pub struct PipelineApiDoc;

pub fn pipeline_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/pipeline/stream", state.args.server.root_path),
        get(stream_pipeline),
    )
}

#[cfg(test)]
mod tests {
    use platewise_core::domain::pipeline::{CellState, PipelineSequencer, PipelineSnapshot};
    use test_context::test_context;

    use crate::application::http::test::TestApp;

    fn data_lines<'a>(body: &'a str, event: &str) -> Vec<&'a str> {
        let marker = format!("event: {}\n", event);
        body.split("\n\n")
            .filter(|frame| frame.starts_with(&marker))
            .filter_map(|frame| frame.lines().find_map(|line| line.strip_prefix("data: ")))
            .collect()
    }

    #[test_context(TestApp)]
    #[tokio::test]
    async fn test_stream_emits_every_tick_then_completes(ctx: &mut TestApp) {
        let response = ctx.server.get("/api/pipeline/stream").await;

        response.assert_status_ok();
        let body = response.text();
        let ticks = data_lines(&body, "tick");
        let complete = data_lines(&body, "complete");

        assert_eq!(ticks.len() as u32, PipelineSequencer::total_ticks());
        assert_eq!(complete.len(), 1);

        let first: PipelineSnapshot = serde_json::from_str(ticks[0]).unwrap();
        assert_eq!(first.groups[0].cells[4], CellState::Active);
        assert_eq!(first.groups[1].cells, [CellState::Idle; 9]);

        let last: PipelineSnapshot = serde_json::from_str(complete[0]).unwrap();
        assert!(last.complete);
        assert!(last.groups.iter().all(|g| g.finished));
    }
}
