//! Arms Dealer: pick up weapons and deliver them
//!
//! `USER1` counts weapons picked up, `USER2` counts deliveries. A constant
//! passivity penalty pushes the agent to keep trading.

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::motion::{Odometer, position_from_game, position_from_info};

/// Arms Dealer tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ArmsDealerConfig {
    pub traversal_scaler: f64,
    pub reward_weapon: f64,
    pub reward_delivery: f64,
    pub penalty_passivity: f64,
    pub scale: f64,
}

impl Default for ArmsDealerConfig {
    fn default() -> Self {
        Self {
            traversal_scaler: 1e-3,
            reward_weapon: 15.0,
            reward_delivery: 30.0,
            penalty_passivity: -0.1,
            scale: 0.20,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    prev_weapons: f64,
    prev_deliveries: f64,
    odometer: Odometer,
}

/// Arms Dealer reward shaper
#[derive(Debug, Clone, Default)]
pub struct ArmsDealer {
    config: ArmsDealerConfig,
    state: EpisodeState,
}

impl ArmsDealer {
    pub fn new(config: ArmsDealerConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for ArmsDealer {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            prev_weapons: game.game_variable(GameVariable::User1)?,
            prev_deliveries: game.game_variable(GameVariable::User2)?,
            odometer: Odometer::start(position_from_game(game)?),
        };
        Ok(())
    }

    fn shape(&mut self, game: &dyn GameVariables, info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;

        let mut reward = cfg.penalty_passivity;

        let dist = state.odometer.advance(position_from_info(info)?);
        reward += dist * cfg.traversal_scaler;

        let weapons = game.game_variable(GameVariable::User1)?;
        let deliveries = game.game_variable(GameVariable::User2)?;
        if weapons > state.prev_weapons {
            trace!(weapons, "weapon acquired");
            reward += cfg.reward_weapon;
        }
        if deliveries > state.prev_deliveries {
            trace!(deliveries, "arms delivered");
            reward += cfg.reward_delivery;
        }
        state.prev_weapons = weapons;
        state.prev_deliveries = deliveries;

        Ok(Shaped {
            reward,
            stats: vec![
                ("weapons_acquired", weapons),
                ("arms_dealt", deliveries),
                ("movement", state.odometer.total()),
            ],
        })
    }

    fn scale_factor(&self) -> f64 {
        self.config.scale
    }
}
