//! Reward-shaping environment wrapper

use doom_rl_core::{
    GameVariable, GameVariables, ResetOptions, Result, RewardFunction, Scenario, Simulation,
    StepResult,
};
use tracing::{debug, info};

use crate::config::ShapingConfig;
use crate::shaper::RewardShaper;

/// Running totals for the current episode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpisodeTally {
    /// Steps since reset
    pub steps: u64,
    /// Sum of returned (scaled) rewards
    pub shaped_return: f64,
    /// Sum of `true_objective`
    pub true_return: f64,
}

/// Wraps a simulation and replaces its reward with the scenario's shaped reward
///
/// Each step the shaper's metrics are merged into `info.episode_extra_stats`,
/// the unscaled reward is stored in `info.true_objective`, and the returned
/// reward is the scenario-scaled value.
pub struct ShapedEnv<S: Simulation> {
    inner: S,
    shaper: RewardShaper,
    tally: EpisodeTally,
}

impl<S: Simulation> ShapedEnv<S> {
    /// Wrap `inner` with an explicit shaper
    pub fn new(inner: S, shaper: RewardShaper) -> Self {
        Self {
            inner,
            shaper,
            tally: EpisodeTally::default(),
        }
    }

    /// Wrap `inner` with the shaper `config` defines for `scenario`
    pub fn for_scenario(inner: S, scenario: Scenario, config: &ShapingConfig) -> Self {
        Self::new(inner, config.shaper(scenario))
    }

    pub fn scenario(&self) -> Scenario {
        self.shaper.scenario()
    }

    pub fn shaper(&self) -> &RewardShaper {
        &self.shaper
    }

    /// Totals for the episode in progress
    pub fn tally(&self) -> EpisodeTally {
        self.tally
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Simulation> GameVariables for ShapedEnv<S> {
    fn game_variable(&self, variable: GameVariable) -> Result<f64> {
        self.inner.game_variable(variable)
    }
}

impl<S: Simulation> Simulation for ShapedEnv<S> {
    type Observation = S::Observation;
    type Action = S::Action;

    fn reset(&mut self, options: ResetOptions) -> Result<Self::Observation> {
        let observation = self.inner.reset(options)?;
        self.shaper.reset(&self.inner)?;
        self.tally = EpisodeTally::default();
        debug!(scenario = %self.shaper.scenario(), "Episode reset");
        Ok(observation)
    }

    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>> {
        let mut result = self.inner.step(action)?;

        let shaped = self.shaper.shape(&self.inner, &result.info)?;
        result.info.merge_stats(shaped.stats);
        result.info.true_objective = Some(shaped.reward);
        result.reward = self.shaper.scale(shaped.reward);

        self.tally.steps += 1;
        self.tally.shaped_return += result.reward;
        self.tally.true_return += shaped.reward;

        if result.done() {
            info!(
                scenario = %self.shaper.scenario(),
                steps = self.tally.steps,
                shaped_return = self.tally.shaped_return,
                true_return = self.tally.true_return,
                terminated = result.terminated,
                "Episode finished"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{Frame, Trace, TraceSimulation};
    use doom_rl_core::DoomRlError;

    /// A frame that defines every variable any scenario reads
    fn full_frame(x: f64, y: f64) -> Frame {
        Frame::new()
            .at(x, y)
            .with(GameVariable::PositionZ, 0.0)
            .with(GameVariable::Health, 100.0)
            .with(GameVariable::KillCount, 0.0)
            .with(GameVariable::Dead, 0.0)
            .with(GameVariable::User1, 0.0)
            .with(GameVariable::User2, 0.0)
    }

    fn env(scenario: Scenario, trace: Trace) -> ShapedEnv<TraceSimulation> {
        ShapedEnv::for_scenario(
            TraceSimulation::new(trace),
            scenario,
            &ShapingConfig::default(),
        )
    }

    #[test]
    fn test_idle_step_yields_scaled_base_term() {
        let base_terms = [
            (Scenario::ArmsDealer, -0.1 * 0.20),
            (Scenario::Chainsaw, 0.0),
            (Scenario::FloorIsLava, 0.01),
            (Scenario::HealthGathering, 0.0),
            (Scenario::HideAndSeek, 0.01 * 3.0),
            (Scenario::Pitfall, 0.0),
            (Scenario::RaiseTheRoof, 0.01 * 0.3),
            (Scenario::RunAndGun, 0.0),
        ];

        for (scenario, expected) in base_terms {
            let start = full_frame(100.0, 100.0);
            let mut env = env(scenario, Trace::new(start.clone(), vec![start]));

            env.reset(ResetOptions::default()).unwrap();
            let result = env.step(()).unwrap();

            assert!(
                (result.reward - expected).abs() < 1e-12,
                "{}: {} != {}",
                scenario,
                result.reward,
                expected
            );
        }
    }

    #[test]
    fn test_true_objective_and_scaling() {
        let steps = vec![
            full_frame(3.0, 4.0).with(GameVariable::User1, 1.0),
            full_frame(3.0, 4.0).with(GameVariable::Health, 50.0),
            full_frame(10.0, 4.0)
                .with(GameVariable::Health, 75.0)
                .with(GameVariable::User2, 1.0)
                .with(GameVariable::KillCount, 2.0),
        ];

        for scenario in Scenario::ALL {
            let mut env = env(scenario, Trace::new(full_frame(0.0, 0.0), steps.clone()));
            env.reset(ResetOptions::default()).unwrap();

            for _ in 0..steps.len() {
                let result = env.step(()).unwrap();
                let objective = result.info.true_objective.unwrap();
                let expected = if scenario == Scenario::HideAndSeek && objective <= 0.0 {
                    objective
                } else {
                    objective * env.shaper().scale_factor()
                };
                assert_eq!(result.reward, expected, "{}", scenario);
            }
        }
    }

    #[test]
    fn test_stats_merge_with_inner_layers() {
        struct Tagged(TraceSimulation);

        impl GameVariables for Tagged {
            fn game_variable(&self, variable: GameVariable) -> Result<f64> {
                self.0.game_variable(variable)
            }
        }

        impl Simulation for Tagged {
            type Observation = Frame;
            type Action = ();

            fn reset(&mut self, options: ResetOptions) -> Result<Frame> {
                self.0.reset(options)
            }

            fn step(&mut self, action: ()) -> Result<StepResult<Frame>> {
                let mut result = self.0.step(action)?;
                result.info.merge_stats([("deaths", 0.0)]);
                Ok(result)
            }
        }

        let trace = Trace::new(full_frame(0.0, 0.0), vec![full_frame(3.0, 4.0)]);
        let mut env = ShapedEnv::new(
            Tagged(TraceSimulation::new(trace)),
            RewardShaper::for_scenario(Scenario::Chainsaw),
        );

        env.reset(ResetOptions::default()).unwrap();
        let result = env.step(()).unwrap();

        let stats = &result.info.episode_extra_stats;
        assert_eq!(stats["deaths"], 0.0);
        assert_eq!(stats["movement"], 5.0);
        assert_eq!(stats["hits_taken"], 0.0);
    }

    #[test]
    fn test_stats_reset_between_episodes() {
        let steps: Vec<Frame> = (1..=4)
            .map(|i| full_frame(3.0 * i as f64, 4.0 * i as f64))
            .collect();
        let mut env = env(Scenario::RaiseTheRoof, Trace::new(full_frame(0.0, 0.0), steps));

        for _ in 0..2 {
            env.reset(ResetOptions::default()).unwrap();
            assert_eq!(env.tally(), EpisodeTally::default());

            let mut last = 0.0;
            for _ in 0..4 {
                let result = env.step(()).unwrap();
                let movement = result.info.episode_extra_stats["movement"];
                assert!(movement >= last);
                last = movement;
            }
            assert_eq!(last, 20.0);
            assert_eq!(env.tally().steps, 4);
        }
    }

    #[test]
    fn test_simulator_failure_propagates() {
        struct Crashing(TraceSimulation);

        impl GameVariables for Crashing {
            fn game_variable(&self, variable: GameVariable) -> Result<f64> {
                self.0.game_variable(variable)
            }
        }

        impl Simulation for Crashing {
            type Observation = Frame;
            type Action = ();

            fn reset(&mut self, options: ResetOptions) -> Result<Frame> {
                self.0.reset(options)
            }

            fn step(&mut self, _action: ()) -> Result<StepResult<Frame>> {
                Err(DoomRlError::Simulation("engine stopped".to_string()))
            }
        }

        let start = full_frame(0.0, 0.0);
        let mut env = ShapedEnv::new(
            Crashing(TraceSimulation::new(Trace::new(start.clone(), vec![start]))),
            RewardShaper::for_scenario(Scenario::RunAndGun),
        );

        env.reset(ResetOptions::default()).unwrap();
        let err = env.step(()).unwrap_err();

        assert!(matches!(err, DoomRlError::Simulation(ref msg) if msg == "engine stopped"));
        assert_eq!(env.tally().steps, 0);
    }

    #[test]
    fn test_missing_info_position_is_fatal() {
        let trace = Trace::new(full_frame(0.0, 0.0), vec![full_frame(1.0, 1.0)]);
        let mut env = ShapedEnv::new(
            TraceSimulation::new(trace).without_info_variables(),
            RewardShaper::for_scenario(Scenario::ArmsDealer),
        );

        env.reset(ResetOptions::default()).unwrap();
        let err = env.step(()).unwrap_err();

        assert!(matches!(err, DoomRlError::MissingInfoKey(ref key) if key == "POSITION_X"));
    }

    #[test]
    fn test_missing_variable_on_reset_is_fatal() {
        let start = Frame::new().at(0.0, 0.0);
        let mut env = env(Scenario::Chainsaw, Trace::new(start.clone(), vec![start]));

        let err = env.reset(ResetOptions::default()).unwrap_err();

        assert!(matches!(err, DoomRlError::MissingVariable(ref name) if name == "HEALTH"));
    }
}
