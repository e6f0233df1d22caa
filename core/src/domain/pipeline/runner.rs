use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval, sleep};
use tracing::debug;

use crate::domain::{
    common::PipelineConfig,
    pipeline::{
        entities::{PipelineSnapshot, TickOutcome},
        sequencer::PipelineSequencer,
    },
};

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Drives a [`PipelineSequencer`] on a fixed cadence.
///
/// `on_snapshot` sees the state after every tick. Once both groups are done
/// the runner waits `completion_delay` and calls `on_complete`. A zero
/// `tick_interval` is raised to one millisecond.
pub async fn run_pipeline<S, C>(
    config: &PipelineConfig,
    mut on_snapshot: S,
    on_complete: C,
) -> PipelineSnapshot
where
    S: FnMut(&PipelineSnapshot),
    C: FnOnce(),
{
    let mut sequencer = PipelineSequencer::new();
    let mut ticker = interval(config.tick_interval.max(MIN_TICK_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick resolves immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let outcome = sequencer.tick();
        on_snapshot(&sequencer.snapshot());
        if outcome == TickOutcome::Completed {
            break;
        }
    }

    sleep(config.completion_delay).await;
    debug!(ticks = sequencer.snapshot().tick, "Pipeline indicator complete");
    on_complete();

    sequencer.snapshot()
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_runs_fixed_number_of_ticks_then_completes_once() {
        let config = PipelineConfig::default();
        let started = Instant::now();
        let mut snapshots = Vec::new();
        let mut completed = 0;

        let last = run_pipeline(
            &config,
            |snapshot| snapshots.push(snapshot.clone()),
            || completed += 1,
        )
        .await;

        assert_eq!(completed, 1);
        assert_eq!(snapshots.len() as u32, PipelineSequencer::total_ticks());
        assert!(last.complete);
        assert_eq!(snapshots.last(), Some(&last));

        let elapsed = started.elapsed();
        let expected = config.tick_interval * PipelineSequencer::total_ticks()
            + config.completion_delay;
        assert!(elapsed >= expected, "elapsed {:?}", elapsed);
        assert!(elapsed < expected + Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_group_never_moves_before_first_finishes() {
        let config = PipelineConfig {
            tick_interval: Duration::from_millis(10),
            completion_delay: Duration::from_millis(1),
        };

        run_pipeline(
            &config,
            |snapshot| {
                if !snapshot.groups[0].finished {
                    assert_eq!(snapshot.groups[1].step, 0);
                }
            },
            || {},
        )
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_tick_interval_still_completes() {
        let config = PipelineConfig {
            tick_interval: Duration::ZERO,
            completion_delay: Duration::ZERO,
        };
        let mut ticks = 0;
        let mut completed = false;

        let last = run_pipeline(&config, |_| ticks += 1, || completed = true).await;

        assert!(completed);
        assert!(last.complete);
        assert_eq!(ticks, PipelineSequencer::total_ticks());
    }
}
