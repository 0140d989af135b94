//! Shaping configuration
//!
//! One tuning record per scenario. Every field falls back to its default, so a
//! config file only needs the values it overrides:
//!
//! ```json
//! { "pitfall": { "idle_step_threshold": 5 }, "chainsaw": { "scale": 10.0 } }
//! ```

use doom_rl_core::{DoomRlError, Result, Scenario};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::scenarios::{
    ArmsDealer, ArmsDealerConfig, Chainsaw, ChainsawConfig, FloorIsLava, FloorIsLavaConfig,
    HealthGathering, HealthGatheringConfig, HideAndSeek, HideAndSeekConfig, Parkour,
    ParkourConfig, Pitfall, PitfallConfig, RaiseTheRoof, RaiseTheRoofConfig, RunAndGun,
    RunAndGunConfig,
};
use crate::shaper::RewardShaper;

/// Tuning for every scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShapingConfig {
    pub arms_dealer: ArmsDealerConfig,
    pub chainsaw: ChainsawConfig,
    pub floor_is_lava: FloorIsLavaConfig,
    pub health_gathering: HealthGatheringConfig,
    pub hide_and_seek: HideAndSeekConfig,
    pub parkour: ParkourConfig,
    pub pitfall: PitfallConfig,
    pub raise_the_roof: RaiseTheRoofConfig,
    pub run_and_gun: RunAndGunConfig,
}

impl ShapingConfig {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DoomRlError::Config(e.to_string()))
    }

    /// Load a config from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading shaping config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| DoomRlError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Build the reward shaper for `scenario` from this tuning
    pub fn shaper(&self, scenario: Scenario) -> RewardShaper {
        match scenario {
            Scenario::ArmsDealer => {
                RewardShaper::ArmsDealer(ArmsDealer::new(self.arms_dealer.clone()))
            }
            Scenario::Chainsaw => RewardShaper::Chainsaw(Chainsaw::new(self.chainsaw.clone())),
            Scenario::FloorIsLava => {
                RewardShaper::FloorIsLava(FloorIsLava::new(self.floor_is_lava.clone()))
            }
            Scenario::HealthGathering => RewardShaper::HealthGathering(HealthGathering::new(
                self.health_gathering.clone(),
            )),
            Scenario::HideAndSeek => {
                RewardShaper::HideAndSeek(HideAndSeek::new(self.hide_and_seek.clone()))
            }
            Scenario::Parkour => RewardShaper::Parkour(Parkour::new(self.parkour.clone())),
            Scenario::Pitfall => RewardShaper::Pitfall(Pitfall::new(self.pitfall.clone())),
            Scenario::RaiseTheRoof => {
                RewardShaper::RaiseTheRoof(RaiseTheRoof::new(self.raise_the_roof.clone()))
            }
            Scenario::RunAndGun => {
                RewardShaper::RunAndGun(RunAndGun::new(self.run_and_gun.clone()))
            }
        }
    }

    /// Tuning of a single scenario as JSON
    pub fn scenario_value(&self, scenario: Scenario) -> Result<serde_json::Value> {
        let value = match scenario {
            Scenario::ArmsDealer => serde_json::to_value(&self.arms_dealer)?,
            Scenario::Chainsaw => serde_json::to_value(&self.chainsaw)?,
            Scenario::FloorIsLava => serde_json::to_value(&self.floor_is_lava)?,
            Scenario::HealthGathering => serde_json::to_value(&self.health_gathering)?,
            Scenario::HideAndSeek => serde_json::to_value(&self.hide_and_seek)?,
            Scenario::Parkour => serde_json::to_value(&self.parkour)?,
            Scenario::Pitfall => serde_json::to_value(&self.pitfall)?,
            Scenario::RaiseTheRoof => serde_json::to_value(&self.raise_the_roof)?,
            Scenario::RunAndGun => serde_json::to_value(&self.run_and_gun)?,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doom_rl_core::RewardFunction;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{"pitfall": {"idle_step_threshold": 5}, "chainsaw": {"scale": 10.0}}"#;

        let config = ShapingConfig::from_json(json).unwrap();

        assert_eq!(config.pitfall.idle_step_threshold, 5);
        assert_eq!(config.pitfall.penalty_idle, -0.02);
        assert_eq!(config.chainsaw.scale, 10.0);
        assert_eq!(config.chainsaw.reward_kill, 5.0);
        assert_eq!(config.arms_dealer, ArmsDealerConfig::default());
        assert_eq!(config.shaper(Scenario::Chainsaw).scale_factor(), 10.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ShapingConfig::from_json(r#"{"pitfall": {"idle_steps": 5}}"#).unwrap_err();
        assert!(matches!(err, DoomRlError::Config(_)));

        let err = ShapingConfig::from_json(r#"{"deathmatch": {}}"#).unwrap_err();
        assert!(matches!(err, DoomRlError::Config(_)));
    }

    #[test]
    fn test_scenario_value() {
        let config = ShapingConfig::default();

        let value = config.scenario_value(Scenario::HideAndSeek).unwrap();

        assert_eq!(value["positive_scale"], 3.0);
        assert_eq!(value["penalty_health_loss"], -5.0);
    }

    #[test]
    fn test_shaper_matches_scenario() {
        let config = ShapingConfig::default();
        for scenario in Scenario::ALL {
            assert_eq!(config.shaper(scenario).scenario(), scenario);
        }
    }
}
