//! Step results and per-step info

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DoomRlError, Result};
use crate::reward::EpisodeStats;
use crate::variables::GameVariable;

/// Result of a simulation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult<O> {
    /// Observation (opaque to the shaping layer)
    pub observation: O,

    /// Scalar reward signal
    pub reward: f64,

    /// Episode ended via a terminal condition
    pub terminated: bool,

    /// Episode ended via an external limit
    pub truncated: bool,

    /// Auxiliary per-step information
    #[serde(default)]
    pub info: StepInfo,
}

impl<O> StepResult<O> {
    /// Whether the episode is over for any reason
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Info mapping returned alongside each step
///
/// On the wire the mapping is flat. Numeric top-level keys are simulator
/// variables, `episode_extra_stats` and `true_objective` are reserved, and
/// every other key is kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "InfoMap", into = "InfoMap")]
pub struct StepInfo {
    /// Numeric simulator fields populated by inner layers (e.g. `POSITION_X`)
    pub variables: HashMap<String, f64>,

    /// Episode metrics for the experiment tracker, merged across layers
    pub episode_extra_stats: EpisodeStats,

    /// Shaped reward before the final scenario scale
    pub true_objective: Option<f64>,

    /// Anything else an inner layer attaches
    pub extra: HashMap<String, serde_json::Value>,
}

/// Flat JSON form of [`StepInfo`]
#[derive(Serialize, Deserialize)]
struct InfoMap {
    #[serde(default)]
    episode_extra_stats: EpisodeStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    true_objective: Option<f64>,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl From<InfoMap> for StepInfo {
    fn from(map: InfoMap) -> Self {
        let mut variables = HashMap::new();
        let mut extra = HashMap::new();
        for (key, value) in map.fields {
            match value.as_f64() {
                Some(number) => {
                    variables.insert(key, number);
                }
                None => {
                    extra.insert(key, value);
                }
            }
        }

        Self {
            variables,
            episode_extra_stats: map.episode_extra_stats,
            true_objective: map.true_objective,
            extra,
        }
    }
}

impl From<StepInfo> for InfoMap {
    fn from(info: StepInfo) -> Self {
        let mut fields: serde_json::Map<String, serde_json::Value> =
            info.extra.into_iter().collect();
        for (key, value) in info.variables {
            fields.insert(key, serde_json::Value::from(value));
        }

        Self {
            episode_extra_stats: info.episode_extra_stats,
            true_objective: info.true_objective,
            fields,
        }
    }
}

impl StepInfo {
    /// Numeric field by key
    pub fn number(&self, key: &str) -> Result<f64> {
        self.variables
            .get(key)
            .copied()
            .ok_or_else(|| DoomRlError::MissingInfoKey(key.to_string()))
    }

    /// Numeric field stored under a game variable's name
    pub fn variable(&self, variable: GameVariable) -> Result<f64> {
        self.number(variable.name())
    }

    /// Store a game variable under its canonical name
    pub fn set_variable(&mut self, variable: GameVariable, value: f64) {
        self.variables.insert(variable.name().to_string(), value);
    }

    /// Merge metrics into `episode_extra_stats`, keeping keys set by other layers
    pub fn merge_stats<K, I>(&mut self, stats: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        self.episode_extra_stats
            .extend(stats.into_iter().map(|(key, value)| (key.into(), value)));
    }
}

/// Options passed through to the simulator on reset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetOptions {
    /// Random seed for reproducibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}
