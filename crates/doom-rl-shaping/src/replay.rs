//! Offline replay of recorded episodes
//!
//! A [`Trace`] is an initial frame plus one frame per step. [`TraceSimulation`]
//! plays it back as a [`Simulation`], so any scenario's shaping can be evaluated
//! without a running Doom instance.

use doom_rl_core::{
    DoomRlError, GameVariable, GameVariables, ResetOptions, Result, Simulation, StepInfo,
    StepResult,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Simulator variables at one point in time
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    #[serde(default)]
    pub variables: BTreeMap<GameVariable, f64>,
    #[serde(default)]
    pub terminated: bool,
    #[serde(default)]
    pub truncated: bool,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn with(mut self, variable: GameVariable, value: f64) -> Self {
        self.variables.insert(variable, value);
        self
    }

    /// Set `POSITION_X` and `POSITION_Y`
    pub fn at(self, x: f64, y: f64) -> Self {
        self.with(GameVariable::PositionX, x)
            .with(GameVariable::PositionY, y)
    }

    /// Mark the frame as the end of the episode
    pub fn terminal(mut self) -> Self {
        self.terminated = true;
        self
    }

    /// Step info carrying every variable of this frame
    pub fn info(&self) -> StepInfo {
        let mut info = StepInfo::default();
        for (variable, value) in &self.variables {
            info.set_variable(*variable, *value);
        }
        info
    }
}

impl GameVariables for Frame {
    fn game_variable(&self, variable: GameVariable) -> Result<f64> {
        self.variables
            .get(&variable)
            .copied()
            .ok_or_else(|| DoomRlError::MissingVariable(variable.name().to_string()))
    }
}

/// Recorded episode
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Trace {
    /// Variables right after reset
    pub initial: Frame,
    /// Variables after each step
    #[serde(default)]
    pub steps: Vec<Frame>,
}

impl Trace {
    pub fn new(initial: Frame, steps: Vec<Frame>) -> Self {
        Self { initial, steps }
    }

    /// Parse a trace from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a trace from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DoomRlError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
}

/// Simulation that plays back a [`Trace`]
///
/// Observations are the frames themselves and actions are ignored. The last
/// frame of a trace is reported as truncated unless it is already terminal.
pub struct TraceSimulation {
    trace: Trace,
    cursor: usize,
    current: Frame,
    expose_info: bool,
}

impl TraceSimulation {
    pub fn new(trace: Trace) -> Self {
        let current = trace.initial.clone();
        Self {
            trace,
            cursor: 0,
            current,
            expose_info: true,
        }
    }

    /// Leave step info empty, as a simulator without an info-populating layer would
    pub fn without_info_variables(mut self) -> Self {
        self.expose_info = false;
        self
    }

    /// Number of steps in the trace
    pub fn len(&self) -> usize {
        self.trace.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.steps.is_empty()
    }

    /// Steps played since the last reset
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl GameVariables for TraceSimulation {
    fn game_variable(&self, variable: GameVariable) -> Result<f64> {
        self.current.game_variable(variable)
    }
}

impl Simulation for TraceSimulation {
    type Observation = Frame;
    type Action = ();

    fn reset(&mut self, options: ResetOptions) -> Result<Frame> {
        debug!(seed = ?options.seed, steps = self.trace.steps.len(), "Replaying trace");
        self.cursor = 0;
        self.current = self.trace.initial.clone();
        Ok(self.current.clone())
    }

    fn step(&mut self, _action: ()) -> Result<StepResult<Frame>> {
        let frame = self
            .trace
            .steps
            .get(self.cursor)
            .cloned()
            .ok_or(DoomRlError::TraceExhausted(self.cursor))?;
        self.cursor += 1;

        let last = self.cursor == self.trace.steps.len();
        let info = if self.expose_info {
            frame.info()
        } else {
            StepInfo::default()
        };
        self.current = frame.clone();

        Ok(StepResult {
            terminated: frame.terminated,
            truncated: frame.truncated || (last && !frame.terminated),
            observation: frame,
            reward: 0.0,
            info,
        })
    }
}
