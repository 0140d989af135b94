//! Simulation trait

use crate::error::Result;
use crate::step::{ResetOptions, StepResult};
use crate::variables::GameVariables;

/// Trait for a steppable Doom simulation
///
/// Implemented by the simulator binding and by every wrapper layered on top,
/// so wrappers compose. Calls run to completion on the calling thread.
pub trait Simulation: GameVariables {
    /// Observation type
    type Observation;
    /// Action type
    type Action;

    /// Start a new episode
    fn reset(&mut self, options: ResetOptions) -> Result<Self::Observation>;

    /// Execute an action and advance the simulation
    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>>;
}
