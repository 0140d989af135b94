//! Chainsaw: melee kills
//!
//! `USER1` is the kill counter. Health drops are only counted, not penalised.

use doom_rl_core::{GameVariable, GameVariables, Result, RewardFunction, Shaped, StepInfo};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::motion::{Odometer, position_from_game, position_from_info};

/// Chainsaw tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ChainsawConfig {
    pub reward_kill: f64,
    pub traversal_scaler: f64,
    pub scale: f64,
}

impl Default for ChainsawConfig {
    fn default() -> Self {
        Self {
            reward_kill: 5.0,
            traversal_scaler: 1e-3,
            scale: 13.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EpisodeState {
    prev_health: f64,
    prev_kills: f64,
    odometer: Odometer,
    hits_taken: u32,
}

/// Chainsaw reward shaper
#[derive(Debug, Clone, Default)]
pub struct Chainsaw {
    config: ChainsawConfig,
    state: EpisodeState,
}

impl Chainsaw {
    pub fn new(config: ChainsawConfig) -> Self {
        Self {
            config,
            state: EpisodeState::default(),
        }
    }
}

impl RewardFunction for Chainsaw {
    fn reset(&mut self, game: &dyn GameVariables) -> Result<()> {
        self.state = EpisodeState {
            prev_health: game.game_variable(GameVariable::Health)?,
            prev_kills: game.game_variable(GameVariable::User1)?,
            odometer: Odometer::start(position_from_game(game)?),
            hits_taken: 0,
        };
        Ok(())
    }

    fn shape(&mut self, game: &dyn GameVariables, info: &StepInfo) -> Result<Shaped> {
        let cfg = &self.config;
        let state = &mut self.state;

        let mut reward = 0.0;

        let dist = state.odometer.advance(position_from_info(info)?);
        reward += dist * cfg.traversal_scaler;

        let kills = game.game_variable(GameVariable::User1)?;
        if kills > state.prev_kills {
            trace!(kills, prev = state.prev_kills, "kill");
            reward += (kills - state.prev_kills) * cfg.reward_kill;
        }
        state.prev_kills = kills;

        let health = game.game_variable(GameVariable::Health)?;
        if health < state.prev_health {
            state.hits_taken = state.hits_taken.saturating_add(1);
        }
        state.prev_health = health;

        Ok(Shaped {
            reward,
            stats: vec![
                ("health", health),
                ("kills", kills),
                ("movement", state.odometer.total()),
                ("hits_taken", f64::from(state.hits_taken)),
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

    fn frame(kills: f64, health: f64) -> Frame {
        Frame::new()
            .at(0.0, 0.0)
            .with(GameVariable::User1, kills)
            .with(GameVariable::Health, health)
    }

    fn step(shaper: &mut Chainsaw, frame: &Frame) -> Shaped {
        shaper.shape(frame, &frame.info()).unwrap()
    }

    #[test]
    fn test_idle_step_is_zero() {
        let mut shaper = Chainsaw::default();
        let start = frame(0.0, 100.0);
        shaper.reset(&start).unwrap();

        let shaped = step(&mut shaper, &start);

        assert_eq!(shaped.reward, 0.0);
        assert_eq!(shaper.scale(shaped.reward), 0.0);
    }

    #[test]
    fn test_kills_scale_by_delta() {
        let mut shaper = Chainsaw::default();
        shaper.reset(&frame(2.0, 100.0)).unwrap();

        let shaped = step(&mut shaper, &frame(5.0, 100.0));

        assert_eq!(shaped.reward, 15.0);
        assert_eq!(shaper.scale(shaped.reward), 15.0 * 13.0);
        assert_eq!(shaped.stat("kills"), Some(5.0));
    }

    #[test]
    fn test_hits_counted_not_penalised() {
        let mut shaper = Chainsaw::default();
        shaper.reset(&frame(0.0, 100.0)).unwrap();

        let first = step(&mut shaper, &frame(0.0, 80.0));
        let second = step(&mut shaper, &frame(0.0, 80.0));
        let third = step(&mut shaper, &frame(0.0, 55.0));

        assert_eq!(first.reward, 0.0);
        assert_eq!(first.stat("hits_taken"), Some(1.0));
        assert_eq!(second.stat("hits_taken"), Some(1.0));
        assert_eq!(third.stat("hits_taken"), Some(2.0));
        assert_eq!(third.stat("health"), Some(55.0));
    }

    #[test]
    fn test_reset_clears_hits() {
        let mut shaper = Chainsaw::default();
        shaper.reset(&frame(0.0, 100.0)).unwrap();
        step(&mut shaper, &frame(0.0, 50.0));

        shaper.reset(&frame(0.0, 100.0)).unwrap();
        let shaped = step(&mut shaper, &frame(0.0, 100.0));

        assert_eq!(shaped.stat("hits_taken"), Some(0.0));
        assert_eq!(shaped.stat("movement"), Some(0.0));
    }

    #[test]
    fn test_kill_counter_drop_is_not_rewarded() {
        let mut shaper = Chainsaw::default();
        shaper.reset(&frame(2.0, 100.0)).unwrap();

        let rewards: Vec<f64> = [2.0, 1.0, 1.0]
            .iter()
            .map(|&kills| step(&mut shaper, &frame(kills, 100.0)).reward)
            .collect();

        assert_eq!(rewards, vec![0.0, 0.0, 0.0]);

        // rises are measured from the lowered counter
        assert_eq!(step(&mut shaper, &frame(3.0, 100.0)).reward, 10.0);
    }

    #[test]
    fn test_hit_counter_saturates() {
        let mut shaper = Chainsaw::default();
        shaper.reset(&frame(0.0, 100.0)).unwrap();
        shaper.state.hits_taken = u32::MAX;

        let shaped = step(&mut shaper, &frame(0.0, 90.0));

        assert_eq!(shaped.stat("hits_taken"), Some(f64::from(u32::MAX)));
    }
}
