//! Planar movement tracking shared by the scenario shapers

use doom_rl_core::{GameVariable, GameVariables, Result, StepInfo};

/// Euclidean distance between two (x, y) points
pub fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    (dx * dx + dy * dy).sqrt()
}

/// (x, y) read through direct variable lookup
pub fn position_from_game(game: &dyn GameVariables) -> Result<(f64, f64)> {
    Ok((
        game.game_variable(GameVariable::PositionX)?,
        game.game_variable(GameVariable::PositionY)?,
    ))
}

/// (x, y) read from the numeric fields of step info
pub fn position_from_info(info: &StepInfo) -> Result<(f64, f64)> {
    Ok((
        info.variable(GameVariable::PositionX)?,
        info.variable(GameVariable::PositionY)?,
    ))
}

/// Previous position plus the distance travelled this episode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Odometer {
    prev: (f64, f64),
    total: f64,
}

impl Odometer {
    /// Start an episode at `position` with zero distance
    pub fn start(position: (f64, f64)) -> Self {
        Self {
            prev: position,
            total: 0.0,
        }
    }

    /// Move to `position`, returning the distance covered by this step
    pub fn advance(&mut self, position: (f64, f64)) -> f64 {
        let step = distance(self.prev, position);
        self.total += step;
        self.prev = position;
        step
    }

    /// Distance travelled since `start`
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Last recorded position
    pub fn position(&self) -> (f64, f64) {
        self.prev
    }
}
