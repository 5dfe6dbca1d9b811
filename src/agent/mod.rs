//! Bandit agent state machine and action-selection policies
//!
//! [`BanditAgent`] owns the state every variant shares — value estimates,
//! visit counts, the running average reward — and drives the
//! select/observe/update loop. The variant-specific part is behind the
//! [`Policy`] trait: greedy, UCB, and gradient differ only in how they
//! pick an action and, for gradient, in a post-reward bookkeeping hook.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::BanditEnvironment;

mod config;
pub mod gradient;
pub mod greedy;
pub mod ucb;

pub use config::{AgentConfig, PolicyConfig};

/// Read-only view of agent state exposed to policies
#[derive(Debug, Clone, Copy)]
pub struct PolicyView<'a> {
    /// Current value estimate per action
    pub estimates: &'a [f64],

    /// Number of times each action has been taken
    pub action_counts: &'a [u64],

    /// Running mean of rewards obtained so far, excluding the current
    /// timestep's reward
    pub average_reward: f64,
}

/// Variant-specific action selection
///
/// Implementations see agent state through a [`PolicyView`] and may keep
/// their own state (the gradient variant keeps per-action preferences).
pub trait Policy {
    /// Pick an action index for this timestep
    ///
    /// `timestep` is 1-based. The RNG belongs to the owning agent, so
    /// stochastic policies stay deterministic under a fixed agent seed.
    fn select_action(&mut self, view: &PolicyView<'_>, timestep: usize, rng: &mut StdRng) -> usize;

    /// Hook invoked after the value estimate for `chosen` was updated
    ///
    /// `view.average_reward` still excludes this timestep's reward, which
    /// makes it usable as a baseline. Default is a no-op.
    fn on_reward(&mut self, view: &PolicyView<'_>, chosen: usize, reward: f64, step_size: f64) {
        let _ = (view, chosen, reward, step_size);
    }
}

/// A bandit agent bound to one environment run
///
/// Created fresh per experiment repetition, lives for exactly
/// `timesteps` updates, and is discarded after its traces are read off.
pub struct BanditAgent {
    epsilon: f64,
    step_size: Option<f64>,
    timesteps: usize,
    allowed_actions: Vec<i64>,
    estimates: Vec<f64>,
    action_counts: Vec<u64>,
    average_reward: f64,
    reward_trace: Vec<f64>,
    policy: Box<dyn Policy>,
    rng: StdRng,
}

impl BanditAgent {
    /// Create a new agent
    ///
    /// Value estimates start uniform-random in `[0, 1)`, which gives
    /// untried actions optimistic-ish initial values and spreads early
    /// greedy choices.
    ///
    /// # Errors
    ///
    /// Rejects invalid configurations (see [`AgentConfig::validate`]),
    /// fewer than 2 allowed actions, and `timesteps == 0`.
    pub fn new(
        config: &AgentConfig,
        allowed_actions: Vec<i64>,
        timesteps: usize,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        if allowed_actions.len() < 2 {
            return Err(anyhow!(
                "allowed_actions needs at least 2 entries, got {}",
                allowed_actions.len()
            ));
        }
        if timesteps == 0 {
            return Err(anyhow!("timesteps must be positive"));
        }

        let num_actions = allowed_actions.len();
        let mut rng = StdRng::seed_from_u64(seed);
        let estimates = (0..num_actions).map(|_| rng.gen::<f64>()).collect();

        Ok(Self {
            epsilon: config.epsilon,
            step_size: config.step_size,
            timesteps,
            allowed_actions,
            estimates,
            action_counts: vec![0; num_actions],
            average_reward: 0.0,
            reward_trace: vec![0.0; timesteps],
            policy: config.build_policy(num_actions),
            rng,
        })
    }

    /// Take one action and update the value estimate
    ///
    /// With probability `epsilon` the action is uniformly random;
    /// otherwise the policy chooses. Returns the observed reward.
    pub fn act<E: BanditEnvironment>(&mut self, env: &mut E, timestep: usize) -> f64 {
        let chosen = if self.rng.gen::<f64>() < self.epsilon {
            self.rng.gen_range(0..self.allowed_actions.len())
        } else {
            let view = PolicyView {
                estimates: &self.estimates,
                action_counts: &self.action_counts,
                average_reward: self.average_reward,
            };
            self.policy.select_action(&view, timestep, &mut self.rng)
        };

        let reward = env.outcome(self.allowed_actions[chosen]);

        self.action_counts[chosen] += 1;
        let step = match self.step_size {
            Some(step) => step,
            None => 1.0 / self.action_counts[chosen] as f64,
        };
        self.estimates[chosen] += step * (reward - self.estimates[chosen]);

        let view = PolicyView {
            estimates: &self.estimates,
            action_counts: &self.action_counts,
            average_reward: self.average_reward,
        };
        self.policy.on_reward(&view, chosen, reward, step);

        reward
    }

    /// Run the full exploration loop
    ///
    /// Calls [`act`](Self::act) for timesteps `1..=timesteps`, folding
    /// each reward into the running average and recording the average
    /// into the reward trace.
    pub fn explore<E: BanditEnvironment>(&mut self, env: &mut E) {
        for t in 1..=self.timesteps {
            let reward = self.act(env, t);
            self.average_reward += (1.0 / t as f64) * (reward - self.average_reward);
            self.reward_trace[t - 1] = self.average_reward;
        }
    }

    /// Value estimate per action
    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    /// Number of times each action has been taken
    pub fn action_counts(&self) -> &[u64] {
        &self.action_counts
    }

    /// Running mean of all rewards obtained so far
    pub fn average_reward(&self) -> f64 {
        self.average_reward
    }

    /// Running average reward at each timestep, length `timesteps`
    pub fn reward_trace(&self) -> &[f64] {
        &self.reward_trace
    }

    /// The ordered action set this agent draws from
    pub fn allowed_actions(&self) -> &[i64] {
        &self.allowed_actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Environment stub replaying a fixed reward sequence
    struct FixedRewards {
        rewards: Vec<f64>,
        next: usize,
    }

    impl FixedRewards {
        fn new(rewards: Vec<f64>) -> Self {
            Self { rewards, next: 0 }
        }
    }

    impl BanditEnvironment for FixedRewards {
        fn reward(&self, _action: i64) -> f64 {
            0.5
        }

        fn outcome(&mut self, _action: i64) -> f64 {
            let r = self.rewards[self.next % self.rewards.len()];
            self.next += 1;
            r
        }
    }

    #[test]
    fn test_rejects_too_few_actions() {
        let config = AgentConfig::new();
        assert!(BanditAgent::new(&config, vec![1], 10, 0).is_err());
        assert!(BanditAgent::new(&config, vec![], 10, 0).is_err());
        assert!(BanditAgent::new(&config, vec![1, 2], 10, 0).is_ok());
    }

    #[test]
    fn test_rejects_zero_timesteps() {
        let config = AgentConfig::new();
        assert!(BanditAgent::new(&config, vec![1, 2], 0, 0).is_err());
    }

    #[test]
    fn test_rejects_invalid_epsilon() {
        let config = AgentConfig::new().epsilon(1.5);
        assert!(BanditAgent::new(&config, vec![1, 2], 10, 0).is_err());
    }

    #[test]
    fn test_sample_average_update_equals_arithmetic_mean() {
        // With epsilon = 0, greedy selection, and estimate 0 pinned far
        // above the alternative, action 0 is chosen every time; its
        // estimate after n sample-average updates must equal the exact
        // mean of the rewards seen.
        let rewards = vec![0.2, 0.8, 0.5, 0.1, 0.9, 0.4];
        let mut env = FixedRewards::new(rewards.clone());

        let config = AgentConfig::new();
        let mut agent = BanditAgent::new(&config, vec![1, 2], rewards.len(), 7).unwrap();
        agent.estimates = vec![5.0, -5.0];

        for t in 1..=rewards.len() {
            agent.act(&mut env, t);
        }

        assert_eq!(agent.action_counts(), &[rewards.len() as u64, 0]);
        let mean: f64 = rewards.iter().sum::<f64>() / rewards.len() as f64;
        assert!(
            (agent.estimates()[0] - mean).abs() < 1e-12,
            "estimate {} != mean {}",
            agent.estimates()[0],
            mean
        );
        assert_eq!(agent.estimates()[1], -5.0, "untaken action's estimate moved");
    }

    #[test]
    fn test_constant_step_is_exponential_recency_weighting() {
        let mut env = FixedRewards::new(vec![1.0]);
        let config = AgentConfig::new().constant_step(0.5);
        let mut agent = BanditAgent::new(&config, vec![1, 2], 3, 7).unwrap();
        agent.estimates = vec![0.0, -5.0];

        // estimate halves its distance to 1.0 each step: 0.5, 0.75, 0.875
        agent.act(&mut env, 1);
        assert!((agent.estimates()[0] - 0.5).abs() < 1e-12);
        agent.act(&mut env, 2);
        assert!((agent.estimates()[0] - 0.75).abs() < 1e-12);
        agent.act(&mut env, 3);
        assert!((agent.estimates()[0] - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_epsilon_zero_never_explores() {
        let mut env = FixedRewards::new(vec![0.3]);
        let config = AgentConfig::new();
        let mut agent = BanditAgent::new(&config, vec![1, 2, 3], 50, 11).unwrap();
        agent.estimates = vec![5.0, 0.1, 0.4];

        for t in 1..=50 {
            agent.act(&mut env, t);
        }
        assert_eq!(agent.action_counts(), &[50, 0, 0]);
    }

    #[test]
    fn test_epsilon_one_is_uniformly_random() {
        let mut env = FixedRewards::new(vec![0.5]);
        let config = AgentConfig::new().epsilon(1.0);
        let draws = 4000;
        let mut agent = BanditAgent::new(&config, vec![1, 2, 3, 4], draws, 13).unwrap();

        for t in 1..=draws {
            agent.act(&mut env, t);
        }

        // Expect ~1000 per action; allow generous slack for a fixed seed
        for (idx, &count) in agent.action_counts().iter().enumerate() {
            assert!(
                (700..1300).contains(&(count as usize)),
                "action {idx} drawn {count} times out of {draws}, far from uniform"
            );
        }
    }

    #[test]
    fn test_explore_fills_trace_with_running_average() {
        let rewards = vec![1.0, 0.0, 1.0, 0.0];
        let mut env = FixedRewards::new(rewards);
        let config = AgentConfig::new();
        let mut agent = BanditAgent::new(&config, vec![1, 2], 4, 7).unwrap();
        agent.estimates = vec![5.0, -5.0];

        agent.explore(&mut env);

        let trace = agent.reward_trace();
        assert_eq!(trace.len(), 4);
        assert!((trace[0] - 1.0).abs() < 1e-12);
        assert!((trace[1] - 0.5).abs() < 1e-12);
        assert!((trace[2] - 2.0 / 3.0).abs() < 1e-12);
        assert!((trace[3] - 0.5).abs() < 1e-12);
        assert!((agent.average_reward() - 0.5).abs() < 1e-12);
    }
}
