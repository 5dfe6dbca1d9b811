//! Agent configuration
//!
//! Each policy variant gets an explicit, validated configuration instead
//! of a loosely typed parameter bag. Validation happens once, up front;
//! invalid parameters are rejected with a message naming the offender
//! rather than clamped.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::gradient::GradientBandit;
use super::greedy::Greedy;
use super::ucb::Ucb;
use super::Policy;

/// Action-selection policy variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolicyConfig {
    /// Pick the action with the highest value estimate
    Greedy,

    /// Greedy plus an uncertainty bonus favoring less-visited actions
    Ucb {
        /// Confidence level `c` scaling the uncertainty bonus; must be
        /// positive
        confidence: f64,
    },

    /// Sample actions from a softmax over learned preferences
    Gradient,
}

/// Configuration for a bandit agent
///
/// Combines the shared exploration parameters with the policy variant.
/// Defaults to a pure greedy agent with sample-average step sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Probability of taking a uniformly random action instead of the
    /// policy's choice; must be in `[0, 1]`
    pub epsilon: f64,

    /// Constant step size for value updates; `None` uses the
    /// sample-average step `1 / action_count`
    pub step_size: Option<f64>,

    /// Action-selection policy
    pub policy: PolicyConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { epsilon: 0.0, step_size: None, policy: PolicyConfig::Greedy }
    }
}

impl AgentConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(anyhow!("epsilon must be in [0, 1], got {}", self.epsilon));
        }
        if let Some(step) = self.step_size {
            if step <= 0.0 || !step.is_finite() {
                return Err(anyhow!("step_size must be positive, got {step}"));
            }
        }
        if let PolicyConfig::Ucb { confidence } = self.policy {
            if confidence <= 0.0 || !confidence.is_finite() {
                return Err(anyhow!("confidence must be positive, got {confidence}"));
            }
        }
        Ok(())
    }

    /// Set the exploration probability
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Use a constant step size instead of sample averaging
    pub fn constant_step(mut self, step_size: f64) -> Self {
        self.step_size = Some(step_size);
        self
    }

    /// Set the action-selection policy
    pub fn policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Build the policy instance for an action set of the given size
    ///
    /// Callers must `validate()` first; building does not re-check.
    pub(crate) fn build_policy(&self, num_actions: usize) -> Box<dyn Policy> {
        match self.policy {
            PolicyConfig::Greedy => Box::new(Greedy),
            PolicyConfig::Ucb { confidence } => Box::new(Ucb::new(confidence)),
            PolicyConfig::Gradient => Box::new(GradientBandit::new(num_actions)),
        }
    }
}
