//! Scenario identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DoomRlError;

/// Doom scenario with its own reward shaping
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Pick up weapons and deliver them to a drop zone
    ArmsDealer,
    /// Melee-only demon slaughter
    Chainsaw,
    /// Stay on platforms while the floor turns to lava
    FloorIsLava,
    /// Collect medkits on an acid floor
    HealthGathering,
    /// Evade hunters, pick up health
    HideAndSeek,
    /// Jump and climb across a course of ledges
    Parkour,
    /// Advance along a corridor riddled with pits
    Pitfall,
    /// Press switches before the ceiling comes down
    RaiseTheRoof,
    /// Shoot targets while moving
    RunAndGun,
}

impl Scenario {
    /// Every scenario with a reward shaper
    pub const ALL: [Scenario; 9] = [
        Scenario::ArmsDealer,
        Scenario::Chainsaw,
        Scenario::FloorIsLava,
        Scenario::HealthGathering,
        Scenario::HideAndSeek,
        Scenario::Parkour,
        Scenario::Pitfall,
        Scenario::RaiseTheRoof,
        Scenario::RunAndGun,
    ];

    /// Identifier used on command lines and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::ArmsDealer => "arms_dealer",
            Scenario::Chainsaw => "chainsaw",
            Scenario::FloorIsLava => "floor_is_lava",
            Scenario::HealthGathering => "health_gathering",
            Scenario::HideAndSeek => "hide_and_seek",
            Scenario::Parkour => "parkour",
            Scenario::Pitfall => "pitfall",
            Scenario::RaiseTheRoof => "raise_the_roof",
            Scenario::RunAndGun => "run_and_gun",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = DoomRlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.as_str() == s)
            .ok_or_else(|| DoomRlError::UnknownScenario(s.to_string()))
    }
}
