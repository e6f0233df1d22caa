use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use platewise_core::domain::{
    common::PipelineConfig,
    pipeline::{PipelineSnapshot, run_pipeline},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::application::http::server::app_state::AppState;

pub const TICK_EVENT: &str = "tick";
pub const COMPLETE_EVENT: &str = "complete";

#[derive(Debug, Clone)]
enum PipelineEvent {
    Tick(PipelineSnapshot),
    Complete(PipelineSnapshot),
}

impl PipelineEvent {
    fn into_sse(self) -> Result<Event, axum::Error> {
        match self {
            PipelineEvent::Tick(snapshot) => Event::default().event(TICK_EVENT).json_data(snapshot),
            PipelineEvent::Complete(snapshot) => {
                Event::default().event(COMPLETE_EVENT).json_data(snapshot)
            }
        }
    }
}

/// Runs the indicator in the background, feeding events to the receiver.
/// The task ends early once the receiver is dropped.
fn spawn_pipeline_events(
    config: PipelineConfig,
) -> (mpsc::UnboundedReceiver<PipelineEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel::<PipelineEvent>();

    let task = tokio::spawn(async move {
        let tick_tx = tx.clone();
        let pipeline = run_pipeline(
            &config,
            move |snapshot| {
                let _ = tick_tx.send(PipelineEvent::Tick(snapshot.clone()));
            },
            || debug!("Pipeline stream complete"),
        );

        tokio::select! {
            last = pipeline => {
                let _ = tx.send(PipelineEvent::Complete(last));
            }
            _ = tx.closed() => debug!("Pipeline stream client disconnected"),
        }
    });

    (rx, task)
}

#[utoipa::path(
    get,
    path = "/stream",
    tag = "pipeline",
    summary = "Stream the loading indicator",
    description = "Server-sent events: one `tick` event per sequencer step carrying a PipelineSnapshot, then a single `complete` event after the completion delay.",
    responses(
        (status = 200, content_type = "text/event-stream", body = PipelineSnapshot)
    )
)]
pub async fn stream_pipeline(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let (rx, _) = spawn_pipeline_events(state.service.pipeline_config().clone());

    let events = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (event.into_sse(), rx))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use platewise_core::domain::pipeline::PipelineSequencer;
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_task_stops_when_client_disconnects() {
        let config = PipelineConfig {
            tick_interval: Duration::from_secs(60),
            completion_delay: Duration::from_secs(60),
        };
        let (mut rx, task) = spawn_pipeline_events(config);

        assert!(matches!(rx.recv().await, Some(PipelineEvent::Tick(_))));
        let disconnected_at = Instant::now();
        drop(rx);

        task.await.unwrap();
        assert!(disconnected_at.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_end_with_complete() {
        let config = PipelineConfig {
            tick_interval: Duration::from_millis(1),
            completion_delay: Duration::from_millis(1),
        };
        let (mut rx, task) = spawn_pipeline_events(config);

        let mut ticks = 0;
        let mut last = None;
        while let Some(event) = rx.recv().await {
            match event {
                PipelineEvent::Tick(_) => ticks += 1,
                PipelineEvent::Complete(snapshot) => last = Some(snapshot),
            }
        }

        task.await.unwrap();
        assert_eq!(ticks, PipelineSequencer::total_ticks());
        assert!(last.is_some_and(|snapshot| snapshot.complete));
    }
}
