//! Health Gathering: collect medkits on an acid floor

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Health Gathering tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HealthGatheringConfig {
    pub reward_health_kit: f64,
    pub reward_frame_survived: f64,
    pub penalty_health_loss: f64,
    pub scale: f64,
}

impl Default for HealthGatheringConfig {
    fn default() -> Self {
        Self {
            reward_health_kit: 15.0,
            reward_frame_survived: 0.01,
            penalty_health_loss: -0.01,
            scale: 0.15,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    prev_health: f64,
    kits_obtained: u32,
}

/// Health Gathering reward shaper
#[derive(Debug, Clone, Default)]
pub struct HealthGathering {
    config: HealthGatheringConfig,
    state: EpisodeState,
}

impl HealthGathering {
    pub fn new(config: HealthGatheringConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for HealthGathering {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            prev_health: game.game_variable(GameVariable::Health)?,
            kits_obtained: 0,
        };
        Ok(())
    }

    fn shape(&mut self, game: &dyn GameVariables, _info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;

        let mut reward = 0.0;
        reward += cfg.reward_frame_survived;
        // acid eats health every frame regardless of what the agent does
        reward += cfg.penalty_health_loss;

        let health = game.game_variable(GameVariable::Health)?;
        if health > state.prev_health {
            state.kits_obtained = state.kits_obtained.saturating_add(1);
            trace!(health, kits = state.kits_obtained, "health kit");
            reward += cfg.reward_health_kit;
        }
        state.prev_health = health;

        Ok(Shaped {
            reward,
            stats: vec![("kits_obtained", f64::from(state.kits_obtained))],
        })
    }

    fn scale_factor(&self) -> f64 {
        self.config.scale
    }
}
