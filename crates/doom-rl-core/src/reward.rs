//! Reward types and reward shaping

use std::collections::BTreeMap;

use crate::error::Result;
use crate::step::StepInfo;
use crate::variables::GameVariables;

/// Named episode metrics reported to the experiment tracker
pub type EpisodeStats = BTreeMap<String, f64>;

/// Output of one shaping step, before the final scenario scale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shaped {
    /// Shaped reward (becomes `true_objective`)
    pub reward: f64,
    /// Metrics to merge into `episode_extra_stats`
    pub stats: Vec<(&'static str, f64)>,
}

impl Shaped {
    /// Look up a metric emitted this step
    pub fn stat(&self, name: &str) -> Option<f64> {
        self.stats
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// Trait for computing per-step rewards from simulator signals
///
/// Implementations own their episode state. `reset` must replace it entirely
/// from the simulator's current variables; `shape` is called exactly once per
/// step, after the wrapped simulator has advanced.
pub trait RewardFunction: Send {
    /// Capture baselines for a new episode
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()>;

    /// Compute the unscaled reward and episode metrics for one step
    fn shape(&mut self, game: &dyn GameVariables, info: &StepInfo) -> Result<Shaped>;

    /// Multiplier applied to the shaped reward
    fn scale_factor(&self) -> f64;

    /// Reward returned to the training driver
    fn scale(&self, reward: f64) -> f64 {
        reward * self.scale_factor()
    }
}
