//! Offline shaping of a recorded trace

use anyhow::{Context, Result};
use doom_rl_core::{ResetOptions, Scenario, Simulation};
use doom_rl_shaping::{EpisodeTally, ShapedEnv, ShapingConfig, Trace, TraceSimulation};
use serde_json::json;
use std::io::Write;

/// Play `trace` through the `scenario` shaper, writing one JSON line per step
/// and a final summary line
pub fn replay(
    scenario: Scenario,
    trace: Trace,
    config: &ShapingConfig,
    out: &mut impl Write,
) -> Result<EpisodeTally> {
    let mut env = ShapedEnv::for_scenario(TraceSimulation::new(trace), scenario, config);
    env.reset(ResetOptions::default())
        .with_context(|| format!("Failed to reset {} shaper", scenario))?;

    for _ in 0..env.inner().len() {
        let step = env.inner().position();
        let result = env
            .step(())
            .with_context(|| format!("Shaping failed at step {}", step))?;

        let line = json!({
            "step": step,
            "reward": result.reward,
            "true_objective": result.info.true_objective,
            "terminated": result.terminated,
            "truncated": result.truncated,
            "episode_extra_stats": result.info.episode_extra_stats,
        });
        writeln!(out, "{}", line)?;

        if result.done() {
            break;
        }
    }

    let tally = env.tally();
    let summary = json!({
        "scenario": scenario,
        "steps": tally.steps,
        "shaped_return": tally.shaped_return,
        "true_return": tally.true_return,
    });
    writeln!(out, "{}", summary)?;

    Ok(tally)
}
