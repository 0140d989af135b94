//! Hide and Seek: evade hunters, pick up health
//!
//! Only positive rewards are amplified, so getting hit costs the same in
//! scaled and unscaled terms.

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::motion::{Odometer, position_from_game, position_from_info};

/// Hide and Seek tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HideAndSeekConfig {
    pub reward_health_kit: f64,
    pub penalty_health_loss: f64,
    pub traversal_scaler: f64,
    pub reward_frame_survived: f64,
    /// Applied to strictly positive rewards only
    pub positive_scale: f64,
}

impl Default for HideAndSeekConfig {
    fn default() -> Self {
        Self {
            reward_health_kit: 5.0,
            penalty_health_loss: -5.0,
            traversal_scaler: 1e-3,
            reward_frame_survived: 0.01,
            positive_scale: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    prev_health: f64,
    odometer: Odometer,
    hits_taken: u32,
    kits_obtained: u32,
}

/// Hide and Seek reward shaper
#[derive(Debug, Clone, Default)]
pub struct HideAndSeek {
    config: HideAndSeekConfig,
    state: EpisodeState,
}

impl HideAndSeek {
    pub fn new(config: HideAndSeekConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for HideAndSeek {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            prev_health: game.game_variable(GameVariable::Health)?,
            odometer: Odometer::start(position_from_game(game)?),
            ..EpisodeState::default()
        };
        Ok(())
    }

    fn shape(&mut self, game: &dyn GameVariables, info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;

        let mut reward = cfg.reward_frame_survived;

        let dist = state.odometer.advance(position_from_info(info)?);
        reward += dist * cfg.traversal_scaler;

        let health = game.game_variable(GameVariable::Health)?;
        if health > state.prev_health {
            state.kits_obtained = state.kits_obtained.saturating_add(1);
            trace!(health, "health kit");
            reward += cfg.reward_health_kit;
        } else if health < state.prev_health {
            state.hits_taken = state.hits_taken.saturating_add(1);
            trace!(health, "hit by hunter");
            reward += cfg.penalty_health_loss;
        }
        state.prev_health = health;

        Ok(Shaped {
            reward,
            stats: vec![
                ("kits_obtained", f64::from(state.kits_obtained)),
                ("hits_taken", f64::from(state.hits_taken)),
                ("movement", state.odometer.total()),
            ],
        })
    }

    fn scale_factor(&self) -> f64 {
        self.config.positive_scale
    }

    fn scale(&self, reward: f64) -> f64 {
        if reward > 0.0 {
            reward * self.config.positive_scale
        } else {
            reward
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::Frame;

    fn frame(x: f64, health: f64) -> Frame {
        Frame::new().at(x, 0.0).with(GameVariable::Health, health)
    }

    fn step(shaper: &mut HideAndSeek, frame: &Frame) -> Shaped {
        shaper.shape(frame, &frame.info()).unwrap()
    }

    #[test]
    fn test_conditional_scale() {
        let shaper = HideAndSeek::default();

        assert_eq!(shaper.scale(2.0), 6.0);
        assert_eq!(shaper.scale(-2.0), -2.0);
        assert_eq!(shaper.scale(0.0), 0.0);
    }

    #[test]
    fn test_idle_step_is_survival_bonus() {
        let mut shaper = HideAndSeek::default();
        shaper.reset(&frame(0.0, 100.0)).unwrap();

        let shaped = step(&mut shaper, &frame(0.0, 100.0));

        assert_eq!(shaped.reward, 0.01);
        assert_eq!(shaper.scale(shaped.reward), 0.01 * 3.0);
    }

    #[test]
    fn test_hit_is_not_amplified() {
        let mut shaper = HideAndSeek::default();
        shaper.reset(&frame(0.0, 100.0)).unwrap();

        let shaped = step(&mut shaper, &frame(0.0, 80.0));

        assert!((shaped.reward - (0.01 - 5.0)).abs() < 1e-12);
        assert_eq!(shaper.scale(shaped.reward), shaped.reward);
        assert_eq!(shaped.stat("hits_taken"), Some(1.0));
    }

    #[test]
    fn test_kit_and_movement() {
        let mut shaper = HideAndSeek::default();
        shaper.reset(&frame(0.0, 50.0)).unwrap();

        let shaped = step(&mut shaper, &frame(100.0, 75.0));

        assert!((shaped.reward - (0.01 + 0.1 + 5.0)).abs() < 1e-12);
        assert_eq!(shaped.stat("kits_obtained"), Some(1.0));
        assert_eq!(shaped.stat("movement"), Some(100.0));
    }
}
