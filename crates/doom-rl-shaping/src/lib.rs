//! # doom-rl-shaping
//!
//! Per-scenario reward shaping for Doom simulations.
//!
//! This crate provides:
//! - One `RewardFunction` implementation per scenario, each with its own tuning and episode state
//! - `RewardShaper`, the scenario-selected union of those shapers
//! - `ShapedEnv`, a `Simulation` wrapper that applies a shaper to every step
//! - `ShapingConfig`, JSON-loadable tuning for every scenario
//! - `TraceSimulation`, offline playback of recorded episodes

pub mod config;
pub mod env;
pub mod motion;
pub mod replay;
pub mod scenarios;
pub mod shaper;

pub use config::ShapingConfig;
pub use env::{EpisodeTally, ShapedEnv};
pub use replay::{Frame, Trace, TraceSimulation};
pub use shaper::RewardShaper;
