//! # doom-rl-core
//!
//! Core types and traits for Doom scenario reward shaping.
//!
//! This crate provides the foundational types shared by the shaping layer and the CLI:
//! - Scenario identifiers
//! - Simulator game variables and direct lookup
//! - Step results and the info mapping
//! - The `Simulation` and `RewardFunction` traits

pub mod error;
pub mod reward;
pub mod scenario;
pub mod simulation;
pub mod step;
pub mod variables;

pub use error::{DoomRlError, Result};
pub use reward::{EpisodeStats, RewardFunction, Shaped};
pub use scenario::Scenario;
pub use simulation::Simulation;
pub use step::{ResetOptions, StepInfo, StepResult};
pub use variables::{GameVariable, GameVariables};
