//! Scenario-selected reward shaper

use doom_rl_core::{GameVariables, Result, RewardFunction, Scenario, Shaped, StepInfo};

use crate::config::ShapingConfig;
use crate::scenarios::{
    ArmsDealer, Chainsaw, FloorIsLava, HealthGathering, HideAndSeek, Parkour, Pitfall,
    RaiseTheRoof, RunAndGun,
};

/// Reward shaper for any scenario
///
/// Each variant owns its tuning and its episode state, so one value is all a
/// worker needs to shape an environment instance.
#[derive(Debug, Clone)]
pub enum RewardShaper {
    ArmsDealer(ArmsDealer),
    Chainsaw(Chainsaw),
    FloorIsLava(FloorIsLava),
    HealthGathering(HealthGathering),
    HideAndSeek(HideAndSeek),
    Parkour(Parkour),
    Pitfall(Pitfall),
    RaiseTheRoof(RaiseTheRoof),
    RunAndGun(RunAndGun),
}

impl RewardShaper {
    /// Shaper with default tuning for `scenario`
    pub fn for_scenario(scenario: Scenario) -> Self {
        ShapingConfig::default().shaper(scenario)
    }

    /// Scenario this shaper was built for
    pub fn scenario(&self) -> Scenario {
        match self {
            RewardShaper::ArmsDealer(_) => Scenario::ArmsDealer,
            RewardShaper::Chainsaw(_) => Scenario::Chainsaw,
            RewardShaper::FloorIsLava(_) => Scenario::FloorIsLava,
            RewardShaper::HealthGathering(_) => Scenario::HealthGathering,
            RewardShaper::HideAndSeek(_) => Scenario::HideAndSeek,
            RewardShaper::Parkour(_) => Scenario::Parkour,
            RewardShaper::Pitfall(_) => Scenario::Pitfall,
            RewardShaper::RaiseTheRoof(_) => Scenario::RaiseTheRoof,
            RewardShaper::RunAndGun(_) => Scenario::RunAndGun,
        }
    }

    fn inner(&self) -> &dyn RewardFunction {
        match self {
            RewardShaper::ArmsDealer(s) => s,
            RewardShaper::Chainsaw(s) => s,
            RewardShaper::FloorIsLava(s) => s,
            RewardShaper::HealthGathering(s) => s,
            RewardShaper::HideAndSeek(s) => s,
            RewardShaper::Parkour(s) => s,
            RewardShaper::Pitfall(s) => s,
            RewardShaper::RaiseTheRoof(s) => s,
            RewardShaper::RunAndGun(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn RewardFunction {
        match self {
            RewardShaper::ArmsDealer(s) => s,
            RewardShaper::Chainsaw(s) => s,
            RewardShaper::FloorIsLava(s) => s,
            RewardShaper::HealthGathering(s) => s,
            RewardShaper::HideAndSeek(s) => s,
            RewardShaper::Parkour(s) => s,
            RewardShaper::Pitfall(s) => s,
            RewardShaper::RaiseTheRoof(s) => s,
            RewardShaper::RunAndGun(s) => s,
        }
    }
}

impl RewardFunction for RewardShaper {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.inner_mut().reset(game)
    }

    fn shape(&mut self, game: &dyn GameVariables, info: &StepInfo) -> Result<Shaped> {
        self.inner_mut().shape(game, info)
    }

    fn scale_factor(&self) -> f64 {
        self.inner().scale_factor()
    }

    fn scale(&self, reward: f64) -> f64 {
        self.inner().scale(reward)
    }
}
