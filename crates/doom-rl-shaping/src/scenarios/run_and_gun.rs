//! Run and Gun: shoot targets while on the move
//!
//! Position and kills are both read directly from the simulator.

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::motion::{Odometer, position_from_game};

/// Run and Gun tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunAndGunConfig {
    pub reward_kill: f64,
    pub traversal_scaler: f64,
    pub scale: f64,
}

impl Default for RunAndGunConfig {
    fn default() -> Self {
        Self {
            reward_kill: 1.0,
            traversal_scaler: 0.001,
            scale: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    prev_kills: f64,
    odometer: Odometer,
}

/// Run and Gun reward shaper
#[derive(Debug, Clone, Default)]
pub struct RunAndGun {
    config: RunAndGunConfig,
    state: EpisodeState,
}

impl RunAndGun {
    pub fn new(config: RunAndGunConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for RunAndGun {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            prev_kills: game.game_variable(GameVariable::KillCount)?,
            odometer: Odometer::start(position_from_game(game)?),
        };
        Ok(())
    }

    fn shape(&mut self, game: &dyn GameVariables, _info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;

        let mut reward = 0.0;

        let dist = state.odometer.advance(position_from_game(game)?);
        reward += dist * cfg.traversal_scaler;

        let kills = game.game_variable(GameVariable::KillCount)?;
        if kills > state.prev_kills {
            trace!(kills, prev = state.prev_kills, "kill");
            reward += (kills - state.prev_kills) * cfg.reward_kill;
        }
        state.prev_kills = kills;

        Ok(Shaped {
            reward,
            stats: vec![("kills", kills), ("movement", state.odometer.total())],
        })
    }

    fn scale_factor(&self) -> f64 {
        self.config.scale
    }
}
