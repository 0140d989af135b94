//! Training-run launcher
//!
//! Turns a [`Sequence`] into the command line of the external training entry
//! point and runs it to completion.

use anyhow::{Context, Result, bail};
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use crate::sequences::Sequence;

/// Hyperparameters shared by every launched sequence
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOptions {
    pub algo: String,
    /// Total environment steps for the whole sequence
    pub train_steps: u64,
    pub seed: u64,
    pub with_wandb: bool,
    pub log_heatmap: bool,
    pub device: String,
    pub wandb_user: String,
    pub wandb_project: String,
    /// Interpreter or binary to execute
    pub program: String,
    /// First argument passed to `program`
    pub entry_point: String,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            algo: "PPO".to_string(),
            train_steps: 7_000_000,
            seed: 123,
            with_wandb: false,
            log_heatmap: false,
            device: "cpu".to_string(),
            wandb_user: String::new(),
            wandb_project: "doomination_sequence_eval".to_string(),
            program: "python".to_string(),
            entry_point: "sample_factory/doom/train_vizdoom.py".to_string(),
        }
    }
}

/// Fully resolved invocation for one sequence
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
    pub sequence: String,
    pub steps_per_env: u64,
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchPlan {
    pub fn new(sequence: &Sequence, options: &LaunchOptions) -> Self {
        let steps_per_env = options.train_steps / sequence.scenarios.len().max(1) as u64;

        let mut args = vec![
            options.entry_point.clone(),
            "--algo".to_string(),
            options.algo.clone(),
            "--train_for_env_steps".to_string(),
            group_digits(options.train_steps),
            "--env_steps_per_env".to_string(),
            group_digits(steps_per_env),
            "--seed".to_string(),
            options.seed.to_string(),
            "--with_wandb".to_string(),
            flag(options.with_wandb),
            "--log_heatmap".to_string(),
            flag(options.log_heatmap),
            "--device".to_string(),
            options.device.clone(),
            "--wandb_user".to_string(),
            options.wandb_user.clone(),
            "--wandb_project".to_string(),
            options.wandb_project.clone(),
            "--wandb_tags".to_string(),
            sequence.name.to_string(),
            "--envs".to_string(),
        ];
        args.extend(sequence.scenarios.iter().map(|s| s.to_string()));

        Self {
            sequence: sequence.name.to_string(),
            steps_per_env,
            program: options.program.clone(),
            args,
        }
    }

    /// Printable form of the invocation
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Run one plan and wait for it to exit
pub async fn launch(plan: &LaunchPlan) -> Result<()> {
    info!(
        sequence = %plan.sequence,
        steps_per_env = plan.steps_per_env,
        "Launching: {}",
        plan.command_line()
    );

    let status = Command::new(&plan.program)
        .args(&plan.args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("Failed to spawn {}", plan.program))?;

    if !status.success() {
        bail!(
            "Sequence '{}' failed: {} exited with {}",
            plan.sequence,
            plan.program,
            status
        );
    }

    info!(sequence = %plan.sequence, "Sequence finished");
    Ok(())
}

/// Run plans one after another, stopping at the first failure
pub async fn launch_all(plans: &[LaunchPlan]) -> Result<()> {
    for plan in plans {
        launch(plan).await?;
    }
    Ok(())
}

/// `7000000` -> `7_000_000`
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('_');
        }
        grouped.push(c);
    }
    grouped
}

/// Boolean literal the training entry point parses
fn flag(value: bool) -> String {
    let literal = if value { "True" } else { "False" };
    literal.to_string()
}
