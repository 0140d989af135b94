//! Parkour: climb across a course of ledges
//!
//! Besides movement, the agent is paid for its Manhattan distance from the
//! spawn point, so leaving the start area is always worth something.

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};

use crate::motion::{Odometer, position_from_game, position_from_info};

/// Parkour tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParkourConfig {
    pub x_start: f64,
    pub y_start: f64,
    pub traversal_scaler: f64,
    pub location_scaler: f64,
    pub scale: f64,
}

impl Default for ParkourConfig {
    fn default() -> Self {
        Self {
            x_start: 608.0,
            y_start: 608.0,
            traversal_scaler: 1e-3,
            location_scaler: 0.005,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    odometer: Odometer,
    height: f64,
}

/// Parkour reward shaper
#[derive(Debug, Clone, Default)]
pub struct Parkour {
    config: ParkourConfig,
    state: EpisodeState,
}

impl Parkour {
    pub fn new(config: ParkourConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for Parkour {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            odometer: Odometer::start(position_from_game(game)?),
            height: game.game_variable(GameVariable::PositionZ)?,
        };
        Ok(())
    }

    fn shape(&mut self, _game: &dyn GameVariables, info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;

        let (x, y) = position_from_info(info)?;
        let z = info.variable(GameVariable::PositionZ)?;

        let dist = state.odometer.advance((x, y));
        let movement_reward = dist * cfg.traversal_scaler;
        let location_reward =
            ((x - cfg.x_start).abs() + (y - cfg.y_start).abs()) * cfg.location_scaler;
        let reward = movement_reward + location_reward;

        state.height = z;

        Ok(Shaped {
            reward,
            stats: vec![
                ("height", state.height),
                ("movement", state.odometer.total()),
            ],
        })
    }

    fn scale_factor(&self) -> f64 {
        self.config.scale
    }
}
