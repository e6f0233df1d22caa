use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CELLS_PER_GROUP: usize = 9;

/// Center-out spiral over a 3x3 grid numbered 1..=9 row by row.
pub const FILL_ORDER: [usize; CELLS_PER_GROUP] = [5, 2, 3, 6, 9, 8, 7, 4, 1];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Idle,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupSnapshot {
    /// Indexed by cell number minus one.
    pub cells: [CellState; CELLS_PER_GROUP],
    pub step: usize,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PipelineSnapshot {
    pub tick: u32,
    pub groups: [GroupSnapshot; 2],
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// At least one group moved.
    Advanced,
    /// Nothing left to move but completion was already reported.
    Idle,
    /// Both groups are done. Returned exactly once.
    Completed,
}
