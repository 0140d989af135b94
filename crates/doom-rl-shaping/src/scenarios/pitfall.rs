//! Pitfall: advance along +X without falling into pits
//!
//! Progress is measured on the X axis alone, read directly from the simulator.
//! Standing still (or going backwards) is free for a couple of steps, then
//! costs a small idle penalty every step until forward progress resumes.

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Pitfall tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PitfallConfig {
    /// Reward per unit of forward X progress
    pub forward_scaler: f64,
    pub penalty_death: f64,
    pub reward_goal: f64,
    /// `USER1` value at which the course counts as completed
    pub success_threshold: f64,
    pub penalty_idle: f64,
    /// Consecutive non-progress steps before the idle penalty applies
    pub idle_step_threshold: u32,
    pub scale: f64,
}

impl Default for PitfallConfig {
    fn default() -> Self {
        Self {
            forward_scaler: 0.05,
            penalty_death: -5.0,
            reward_goal: 1.0,
            success_threshold: 150_000.0,
            penalty_idle: -0.02,
            idle_step_threshold: 3,
            scale: 0.33,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    prev_x: f64,
    total_forward: f64,
    frames: u64,
    no_progress_steps: u32,
}

/// Pitfall reward shaper
#[derive(Debug, Clone, Default)]
pub struct Pitfall {
    config: PitfallConfig,
    state: EpisodeState,
}

impl Pitfall {
    pub fn new(config: PitfallConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for Pitfall {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            prev_x: game.game_variable(GameVariable::PositionX)?,
            ..EpisodeState::default()
        };
        Ok(())
    }

    fn shape(&mut self, game: &dyn GameVariables, _info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;
        state.frames += 1;

        let mut reward = 0.0;

        let x = game.game_variable(GameVariable::PositionX)?;
        let delta_x = x - state.prev_x;
        state.prev_x = x;

        if delta_x > 0.0 {
            reward += delta_x * cfg.forward_scaler;
            state.total_forward += delta_x;
            state.no_progress_steps = 0;
        } else {
            state.no_progress_steps = state.no_progress_steps.saturating_add(1);
            if state.no_progress_steps >= cfg.idle_step_threshold {
                reward += cfg.penalty_idle;
            }
        }

        // evaluated every step, not only on the terminal one
        if game.game_variable(GameVariable::Dead)? != 0.0 {
            trace!(forward = state.total_forward, "fell");
            reward += cfg.penalty_death;
            state.total_forward = 0.0;
        }

        if game.game_variable(GameVariable::User1)? >= cfg.success_threshold {
            reward += cfg.reward_goal;
        }

        let frames = state.frames.max(1) as f64;
        Ok(Shaped {
            reward,
            stats: vec![
                ("forward_distance", state.total_forward),
                ("movement", state.total_forward / frames),
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

    fn frame(x: f64) -> Frame {
        Frame::new()
            .at(x, 0.0)
            .with(GameVariable::Dead, 0.0)
            .with(GameVariable::User1, 0.0)
    }

    fn step(shaper: &mut Pitfall, frame: &Frame) -> Shaped {
        shaper.shape(frame, &frame.info()).unwrap()
    }

    #[test]
    fn test_idle_penalty_from_third_step() {
        let mut shaper = Pitfall::default();
        shaper.reset(&frame(0.0)).unwrap();

        let first = step(&mut shaper, &frame(0.0));
        let second = step(&mut shaper, &frame(-1.0));
        let third = step(&mut shaper, &frame(-1.0));
        let fourth = step(&mut shaper, &frame(-1.0));

        assert_eq!(first.reward, 0.0);
        assert_eq!(second.reward, 0.0);
        assert_eq!(third.reward, -0.02);
        assert_eq!(fourth.reward, -0.02);
    }

    #[test]
    fn test_progress_resets_idle_counter() {
        let mut shaper = Pitfall::default();
        shaper.reset(&frame(0.0)).unwrap();

        step(&mut shaper, &frame(0.0));
        step(&mut shaper, &frame(0.0));
        let forward = step(&mut shaper, &frame(10.0));
        let idle = step(&mut shaper, &frame(10.0));

        assert!((forward.reward - 0.5).abs() < 1e-12);
        assert_eq!(idle.reward, 0.0);
        assert_eq!(idle.stat("forward_distance"), Some(10.0));
        assert_eq!(idle.stat("movement"), Some(10.0 / 4.0));
    }

    #[test]
    fn test_death_clears_forward_progress() {
        let mut shaper = Pitfall::default();
        shaper.reset(&frame(0.0)).unwrap();
        step(&mut shaper, &frame(20.0));

        let fell = step(&mut shaper, &frame(20.0).with(GameVariable::Dead, 1.0));

        assert_eq!(fell.reward, -5.0);
        assert_eq!(fell.stat("forward_distance"), Some(0.0));
        assert!((shaper.scale(fell.reward) - (-5.0 * 0.33)).abs() < 1e-12);
    }

    #[test]
    fn test_goal_bonus() {
        let mut shaper = Pitfall::default();
        shaper.reset(&frame(0.0)).unwrap();

        let shaped = step(&mut shaper, &frame(2.0).with(GameVariable::User1, 150_000.0));

        assert!((shaped.reward - (2.0 * 0.05 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_reads_position_from_simulator() {
        let mut shaper = Pitfall::default();
        shaper.reset(&frame(0.0)).unwrap();

        // info disagrees with the simulator; the simulator wins
        let game = frame(4.0);
        let info = frame(0.0).info();
        let shaped = shaper.shape(&game, &info).unwrap();

        assert_eq!(shaped.stat("forward_distance"), Some(4.0));
    }

    #[test]
    fn test_long_idle_streak_keeps_penalising() {
        let mut shaper = Pitfall::default();
        shaper.reset(&frame(0.0)).unwrap();
        shaper.state.no_progress_steps = u32::MAX;

        let shaped = step(&mut shaper, &frame(0.0));

        assert_eq!(shaped.reward, -0.02);
        assert_eq!(shaper.state.no_progress_steps, u32::MAX);
    }
}
