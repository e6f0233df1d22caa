pub mod entities;
pub mod runner;
pub mod sequencer;

pub use entities::*;
pub use runner::*;
pub use sequencer::*;
