//! Experiment orchestration and cross-experiment aggregation
//!
//! The runner repeats independent experiments. Each repetition builds a
//! fresh environment, samples a shared action set sorted by true reward,
//! runs every configured agent variant on it, and folds the per-agent
//! reward traces into running means across repetitions.
//!
//! Repetitions execute in parallel via Rayon. Each gets its own seed
//! derived up front from the master seed, so parallel execution is
//! deterministic and the fold (applied afterwards in repetition order)
//! produces exactly the sequential incremental-mean result.

use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::agent::{AgentConfig, BanditAgent};
use crate::env::BanditEnvironment;
use crate::utils::fold_running_mean;

/// Scalar parameters of an experiment batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Exploration steps per agent per experiment
    pub timesteps: usize,

    /// Size of the sampled action set (duplicates allowed)
    pub num_actions: usize,

    /// Number of independent experiment repetitions
    pub num_experiments: usize,

    /// Length of the line-walk environment
    pub line_length: i64,

    /// Master seed; everything downstream derives from it
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            timesteps: 1000,
            num_actions: 10,
            num_experiments: 100,
            line_length: 10,
            seed: 0,
        }
    }
}

impl ExperimentConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.timesteps == 0 {
            return Err(anyhow!("timesteps must be positive"));
        }
        if self.num_actions < 2 {
            return Err(anyhow!(
                "num_actions must be at least 2, got {}",
                self.num_actions
            ));
        }
        if self.num_experiments == 0 {
            return Err(anyhow!("num_experiments must be positive"));
        }
        if self.line_length <= 1 {
            return Err(anyhow!(
                "line_length must be greater than 1, got {}",
                self.line_length
            ));
        }
        Ok(())
    }

    /// Set the number of timesteps
    pub fn timesteps(mut self, timesteps: usize) -> Self {
        self.timesteps = timesteps;
        self
    }

    /// Set the action set size
    pub fn num_actions(mut self, num_actions: usize) -> Self {
        self.num_actions = num_actions;
        self
    }

    /// Set the number of repetitions
    pub fn num_experiments(mut self, num_experiments: usize) -> Self {
        self.num_experiments = num_experiments;
        self
    }

    /// Set the line length
    pub fn line_length(mut self, line_length: i64) -> Self {
        self.line_length = line_length;
        self
    }

    /// Set the master seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// One agent variant entered into the comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Unique label keying this variant's results
    pub label: String,

    /// Display color, passed through to the results untouched
    pub color: String,

    /// Agent configuration
    pub agent: AgentConfig,
}

impl AgentSpec {
    /// Create a new spec
    pub fn new(label: impl Into<String>, color: impl Into<String>, agent: AgentConfig) -> Self {
        Self { label: label.into(), color: color.into(), agent }
    }
}

/// Aggregated results for one agent variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    /// Average running reward at each timestep, across repetitions
    /// (length `timesteps`)
    pub timesteps_reward: Vec<f64>,

    /// Average final value estimate per action, across repetitions
    /// (length `num_actions`, ordered like the action set: ascending
    /// true reward)
    pub actions_reward: Vec<f64>,

    /// Display color from the spec
    pub color: String,
}

/// Traces read off one agent after one repetition
struct AgentTraces {
    reward_trace: Vec<f64>,
    estimates: Vec<f64>,
}

/// Runs batches of bandit experiments and averages their results
#[derive(Debug, Clone)]
pub struct ExperimentRunner {
    config: ExperimentConfig,
}

impl ExperimentRunner {
    /// Create a runner with a validated configuration
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The runner's configuration
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run the full experiment batch
    ///
    /// `env_fn` is the environment factory: called once per repetition
    /// with the configured line length and a repetition-derived seed.
    ///
    /// Returns the aggregated results keyed by spec label. Any invalid
    /// spec or failed construction aborts the whole batch; there are no
    /// partial results.
    pub fn run<E, F>(&self, specs: &[AgentSpec], env_fn: F) -> Result<HashMap<String, AgentResult>>
    where
        E: BanditEnvironment,
        F: Fn(i64, u64) -> Result<E> + Sync,
    {
        if specs.is_empty() {
            return Err(anyhow!("no agent specs given"));
        }
        let mut labels = HashSet::new();
        for spec in specs {
            if !labels.insert(spec.label.as_str()) {
                return Err(anyhow!("duplicate agent label {:?}", spec.label));
            }
            spec.agent
                .validate()
                .with_context(|| format!("invalid config for agent {:?}", spec.label))?;
        }

        tracing::info!(
            num_experiments = self.config.num_experiments,
            timesteps = self.config.timesteps,
            num_actions = self.config.num_actions,
            agents = specs.len(),
            "running bandit experiment batch"
        );

        let mut master = StdRng::seed_from_u64(self.config.seed);
        let seeds: Vec<u64> = (0..self.config.num_experiments).map(|_| master.gen()).collect();

        let runs: Vec<Vec<AgentTraces>> = seeds
            .par_iter()
            .enumerate()
            .map(|(idx, &seed)| {
                let traces = self.run_repetition(specs, &env_fn, seed)?;
                tracing::debug!(experiment = idx + 1, "repetition complete");
                Ok(traces)
            })
            .collect::<Result<_>>()?;

        // Fold in repetition order so the aggregate matches the
        // sequential incremental-mean definition exactly.
        let mut aggregates: Vec<(Vec<f64>, Vec<f64>)> = specs
            .iter()
            .map(|_| {
                (
                    vec![0.0; self.config.timesteps],
                    vec![0.0; self.config.num_actions],
                )
            })
            .collect();
        for (e, per_agent) in runs.iter().enumerate() {
            for ((trace_agg, estimate_agg), traces) in aggregates.iter_mut().zip(per_agent) {
                fold_running_mean(trace_agg, &traces.reward_trace, e + 1);
                fold_running_mean(estimate_agg, &traces.estimates, e + 1);
            }
        }

        Ok(specs
            .iter()
            .zip(aggregates)
            .map(|(spec, (timesteps_reward, actions_reward))| {
                (
                    spec.label.clone(),
                    AgentResult {
                        timesteps_reward,
                        actions_reward,
                        color: spec.color.clone(),
                    },
                )
            })
            .collect())
    }

    /// Run one repetition: fresh environment, fresh agents
    fn run_repetition<E, F>(
        &self,
        specs: &[AgentSpec],
        env_fn: &F,
        seed: u64,
    ) -> Result<Vec<AgentTraces>>
    where
        E: BanditEnvironment,
        F: Fn(i64, u64) -> Result<E>,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut env = env_fn(self.config.line_length, rng.gen())?;
        let actions = sample_action_set(&env, &mut rng, self.config.num_actions, self.config.line_length);

        let mut traces = Vec::with_capacity(specs.len());
        for spec in specs {
            // Agents share the environment within a repetition, but run
            // one after another, never concurrently.
            let mut agent =
                BanditAgent::new(&spec.agent, actions.clone(), self.config.timesteps, rng.gen())
                    .with_context(|| format!("constructing agent {:?}", spec.label))?;
            agent.explore(&mut env);
            traces.push(AgentTraces {
                reward_trace: agent.reward_trace().to_vec(),
                estimates: agent.estimates().to_vec(),
            });
        }
        Ok(traces)
    }
}

/// Sample the shared action set for one repetition
///
/// Draws `num_actions` step sizes uniformly from
/// `[-line_length, line_length)` — duplicates stay — and sorts them
/// ascending by the environment's true reward, so index `num_actions - 1`
/// is always the best available jump.
fn sample_action_set<E: BanditEnvironment>(
    env: &E,
    rng: &mut StdRng,
    num_actions: usize,
    line_length: i64,
) -> Vec<i64> {
    let mut actions: Vec<i64> = (0..num_actions)
        .map(|_| rng.gen_range(-line_length..line_length))
        .collect();
    actions.sort_by(|a, b| env.reward(*a).total_cmp(&env.reward(*b)));
    actions
}
