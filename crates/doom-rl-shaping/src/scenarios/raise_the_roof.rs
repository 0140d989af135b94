//! Raise the Roof: press switches before the ceiling comes down
//!
//! `USER2` counts switches pressed.

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::motion::{Odometer, position_from_game, position_from_info};

/// Raise the Roof tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RaiseTheRoofConfig {
    pub reward_switch_pressed: f64,
    pub reward_frame_survived: f64,
    pub traversal_scaler: f64,
    pub scale: f64,
}

impl Default for RaiseTheRoofConfig {
    fn default() -> Self {
        Self {
            reward_switch_pressed: 15.0,
            reward_frame_survived: 0.01,
            traversal_scaler: 0.001,
            scale: 0.3,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    prev_switches: f64,
    odometer: Odometer,
}

/// Raise the Roof reward shaper
#[derive(Debug, Clone, Default)]
pub struct RaiseTheRoof {
    config: RaiseTheRoofConfig,
    state: EpisodeState,
}

impl RaiseTheRoof {
    pub fn new(config: RaiseTheRoofConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for RaiseTheRoof {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            prev_switches: game.game_variable(GameVariable::User2)?,
            odometer: Odometer::start(position_from_game(game)?),
        };
        Ok(())
    }

    fn shape(&mut self, game: &dyn GameVariables, info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;

        let mut reward = cfg.reward_frame_survived;

        let dist = state.odometer.advance(position_from_info(info)?);
        reward += dist * cfg.traversal_scaler;

        let switches = game.game_variable(GameVariable::User2)?;
        if switches > state.prev_switches {
            trace!(switches, "switch pressed");
            reward += cfg.reward_switch_pressed;
        }
        state.prev_switches = switches;

        Ok(Shaped {
            reward,
            stats: vec![
                ("switches_pressed", switches),
                ("movement", state.odometer.total()),
            ],
        })
    }

    fn scale_factor(&self) -> f64 {
        self.config.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::Frame;

    fn frame(x: f64, y: f64, switches: f64) -> Frame {
        Frame::new().at(x, y).with(GameVariable::User2, switches)
    }

    fn step(shaper: &mut RaiseTheRoof, frame: &Frame) -> Shaped {
        shaper.shape(frame, &frame.info()).unwrap()
    }

    #[test]
    fn test_idle_step_is_survival_bonus() {
        let mut shaper = RaiseTheRoof::default();
        shaper.reset(&frame(0.0, 0.0, 0.0)).unwrap();

        let shaped = step(&mut shaper, &frame(0.0, 0.0, 0.0));

        assert_eq!(shaped.reward, 0.01);
        assert_eq!(shaper.scale(shaped.reward), 0.01 * 0.3);
    }

    #[test]
    fn test_switch_press() {
        let mut shaper = RaiseTheRoof::default();
        shaper.reset(&frame(0.0, 0.0, 0.0)).unwrap();

        let shaped = step(&mut shaper, &frame(3.0, 4.0, 1.0));

        assert!((shaped.reward - (0.01 + 0.005 + 15.0)).abs() < 1e-12);
        assert_eq!(shaped.stat("switches_pressed"), Some(1.0));
        assert_eq!(shaped.stat("movement"), Some(5.0));
    }

    #[test]
    fn test_switch_counter_only_rewards_increase() {
        let mut shaper = RaiseTheRoof::default();
        shaper.reset(&frame(0.0, 0.0, 2.0)).unwrap();

        for switches in [2.0, 1.0, 1.0] {
            let shaped = step(&mut shaper, &frame(0.0, 0.0, switches));
            assert_eq!(shaped.reward, 0.01);
        }
    }
}
