//! Simulator game variables

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Named variable exposed by the Doom simulator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameVariable {
    PositionX,
    PositionY,
    PositionZ,
    Health,
    #[serde(rename = "KILLCOUNT")]
    KillCount,
    /// Non-zero while the player is dead
    Dead,
    /// Scenario-defined counter
    #[serde(rename = "USER1")]
    User1,
    /// Scenario-defined counter
    #[serde(rename = "USER2")]
    User2,
}

impl GameVariable {
    /// Canonical name, also used as the key of numeric fields in step info
    pub fn name(&self) -> &'static str {
        match self {
            GameVariable::PositionX => "POSITION_X",
            GameVariable::PositionY => "POSITION_Y",
            GameVariable::PositionZ => "POSITION_Z",
            GameVariable::Health => "HEALTH",
            GameVariable::KillCount => "KILLCOUNT",
            GameVariable::Dead => "DEAD",
            GameVariable::User1 => "USER1",
            GameVariable::User2 => "USER2",
        }
    }
}

impl fmt::Display for GameVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direct lookup of simulator variables
pub trait GameVariables {
    /// Current value of `variable`, or `MissingVariable` if the simulator does not track it
    fn game_variable(&self, variable: GameVariable) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_serde() {
        for variable in [
            GameVariable::PositionX,
            GameVariable::KillCount,
            GameVariable::Dead,
            GameVariable::User1,
            GameVariable::User2,
        ] {
            let json = serde_json::to_string(&variable).unwrap();
            assert_eq!(json, format!("\"{}\"", variable.name()));
        }
    }
}
