//! Floor Is Lava: survive on platforms while the floor burns
//!
//! `USER1` accumulates time spent on a platform, `POSITION_Z` rising means a
//! platform was reached, falling health means the agent is standing in lava.

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::motion::{Odometer, position_from_game, position_from_info};

/// Floor Is Lava tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FloorIsLavaConfig {
    pub reward_on_platform: f64,
    pub reward_platform_reached: f64,
    pub reward_frame_survived: f64,
    pub penalty_lava: f64,
    pub traversal_scaler: f64,
    pub scale: f64,
}

impl Default for FloorIsLavaConfig {
    fn default() -> Self {
        Self {
            reward_on_platform: 0.1,
            reward_platform_reached: 1.0,
            reward_frame_survived: 0.01,
            penalty_lava: -0.1,
            traversal_scaler: 1e-3,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    prev_z: f64,
    prev_health: f64,
    prev_on_platform: f64,
    odometer: Odometer,
}

/// Floor Is Lava reward shaper
#[derive(Debug, Clone, Default)]
pub struct FloorIsLava {
    config: FloorIsLavaConfig,
    state: EpisodeState,
}

impl FloorIsLava {
    pub fn new(config: FloorIsLavaConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for FloorIsLava {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            prev_z: game.game_variable(GameVariable::PositionZ)?,
            prev_health: game.game_variable(GameVariable::Health)?,
            prev_on_platform: game.game_variable(GameVariable::User1)?,
            odometer: Odometer::start(position_from_game(game)?),
        };
        Ok(())
    }

    fn shape(&mut self, game: &dyn GameVariables, info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;

        let mut reward = 0.0;
        reward += cfg.reward_frame_survived;

        let dist = state.odometer.advance(position_from_info(info)?);
        reward += dist * cfg.traversal_scaler;

        let z = game.game_variable(GameVariable::PositionZ)?;
        if z > state.prev_z {
            trace!(z, prev = state.prev_z, "platform reached");
            reward += cfg.reward_platform_reached;
        }
        state.prev_z = z;

        let on_platform = game.game_variable(GameVariable::User1)?;
        if on_platform > state.prev_on_platform {
            reward += (on_platform - state.prev_on_platform) * cfg.reward_on_platform;
        }
        state.prev_on_platform = on_platform;

        let health = game.game_variable(GameVariable::Health)?;
        if health < state.prev_health {
            trace!(health, "lava damage");
            reward += cfg.penalty_lava;
        }
        state.prev_health = health;

        Ok(Shaped {
            reward,
            stats: vec![("movement", state.odometer.total())],
        })
    }

    fn scale_factor(&self) -> f64 {
        self.config.scale
    }
}
