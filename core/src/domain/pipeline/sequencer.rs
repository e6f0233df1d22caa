use crate::domain::pipeline::entities::{
    CELLS_PER_GROUP, CellState, FILL_ORDER, GroupSnapshot, PipelineSnapshot, TickOutcome,
};

#[derive(Debug, Clone, Default)]
struct AgentGroup {
    cells: [CellState; CELLS_PER_GROUP],
    step: usize,
    finished: bool,
}

impl AgentGroup {
    /// Completes the previously active cell, then activates the next one.
    /// The tick after the last activation marks the group finished.
    fn advance(&mut self) -> bool {
        if self.finished {
            return false;
        }

        if self.step > 0 {
            let previous = FILL_ORDER[self.step - 1] - 1;
            self.cells[previous] = CellState::Completed;
        }

        if self.step < CELLS_PER_GROUP {
            self.cells[FILL_ORDER[self.step] - 1] = CellState::Active;
            self.step += 1;
        } else {
            self.finished = true;
        }
        true
    }

    fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            cells: self.cells,
            step: self.step,
            finished: self.finished,
        }
    }
}

/// Two gated groups of nine cells. The second group only moves once the
/// first has finished.
#[derive(Debug, Clone, Default)]
pub struct PipelineSequencer {
    first: AgentGroup,
    second: AgentGroup,
    ticks: u32,
    completion_reported: bool,
}

impl PipelineSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.completion_reported {
            return TickOutcome::Idle;
        }
        self.ticks += 1;

        let mut moved = self.first.advance();
        if self.first.finished {
            moved |= self.second.advance();
        }

        if self.is_finished() {
            self.completion_reported = true;
            return TickOutcome::Completed;
        }

        debug_assert!(moved);
        TickOutcome::Advanced
    }

    pub fn is_finished(&self) -> bool {
        self.first.finished && self.second.finished
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            tick: self.ticks,
            groups: [self.first.snapshot(), self.second.snapshot()],
            complete: self.completion_reported,
        }
    }

    /// Ticks needed from a fresh sequencer until `Completed`.
    pub const fn total_ticks() -> u32 {
        // group one: nine activations plus one finishing tick; group two starts
        // on that same tick and needs another nine plus one.
        (CELLS_PER_GROUP as u32 + 1) * 2 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_group_follows_fill_order() {
        let mut sequencer = PipelineSequencer::new();

        for (i, cell) in FILL_ORDER.iter().enumerate() {
            assert_eq!(sequencer.tick(), TickOutcome::Advanced);
            let snapshot = sequencer.snapshot();
            assert_eq!(snapshot.groups[0].cells[cell - 1], CellState::Active);
            if i > 0 {
                let previous = FILL_ORDER[i - 1];
                assert_eq!(snapshot.groups[0].cells[previous - 1], CellState::Completed);
            }
        }
    }

    #[test]
    fn test_second_group_waits_for_first() {
        let mut sequencer = PipelineSequencer::new();

        for _ in 0..CELLS_PER_GROUP {
            sequencer.tick();
            let snapshot = sequencer.snapshot();
            assert!(!snapshot.groups[0].finished);
            assert_eq!(snapshot.groups[1].step, 0);
            assert!(snapshot.groups[1].cells.iter().all(|c| *c == CellState::Idle));
        }

        sequencer.tick();
        let snapshot = sequencer.snapshot();
        assert!(snapshot.groups[0].finished);
        assert!(
            snapshot.groups[0]
                .cells
                .iter()
                .all(|c| *c == CellState::Completed)
        );
        assert_eq!(snapshot.groups[1].step, 1);
        assert_eq!(snapshot.groups[1].cells[4], CellState::Active);
    }

    #[test]
    fn test_completion_fires_once_after_fixed_ticks() {
        let mut sequencer = PipelineSequencer::new();
        let mut completions = 0;
        let mut ticks_to_complete = None;

        for tick in 1..=40 {
            if sequencer.tick() == TickOutcome::Completed {
                completions += 1;
                ticks_to_complete.get_or_insert(tick);
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(ticks_to_complete, Some(PipelineSequencer::total_ticks()));
        assert_eq!(PipelineSequencer::total_ticks(), 19);

        let snapshot = sequencer.snapshot();
        assert!(snapshot.complete);
        for group in &snapshot.groups {
            assert!(group.cells.iter().all(|c| *c == CellState::Completed));
        }
    }
}
