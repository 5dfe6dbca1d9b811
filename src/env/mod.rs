//! Environment trait and implementations
//!
//! This module defines the reward oracle interface bandit agents run
//! against and provides the built-in line-walk environment.

/// Core trait for bandit environments
///
/// An environment pairs a deterministic true-reward function with a
/// stochastic outcome channel. Agents only ever observe [`outcome`]
/// draws; [`reward`] exists so callers (e.g. the experiment runner) can
/// rank actions by their true value.
///
/// [`reward`]: BanditEnvironment::reward
/// [`outcome`]: BanditEnvironment::outcome
pub trait BanditEnvironment {
    /// True (pre-stochastic) reward for an action
    ///
    /// Pure function of environment state and the action; implementations
    /// must return a value in `(0, 1]` so it can double as a Bernoulli
    /// success probability.
    fn reward(&self, action: i64) -> f64;

    /// Draw a stochastic outcome for an action
    ///
    /// Returns 1.0 with probability `reward(action)` and 0.0 otherwise.
    /// Each call is an independent draw.
    fn outcome(&mut self, action: i64) -> f64;
}

pub mod line_walk;
