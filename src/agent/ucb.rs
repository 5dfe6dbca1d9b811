//! Upper-confidence-bound action selection

use rand::rngs::StdRng;

use crate::utils::argmax;

use super::{Policy, PolicyView};

/// Guard against division by zero for actions never taken; small enough
/// that any unvisited action gets an effectively unbounded bonus.
const COUNT_EPSILON: f64 = 1e-9;

/// UCB1-style selection: estimate plus an uncertainty bonus
///
/// Scores each action as
/// `estimate[i] + c * sqrt(ln(timestep) / (count[i] + 1e-9))` and takes
/// the argmax. Rarely tried actions carry a large bonus, so exploration
/// focuses on actions whose value is still uncertain rather than being
/// uniformly random.
#[derive(Debug, Clone, Copy)]
pub struct Ucb {
    confidence: f64,
}

impl Ucb {
    /// Create a UCB policy with confidence level `c`
    ///
    /// Positivity of `c` is enforced by [`AgentConfig::validate`] before
    /// a policy is built.
    ///
    /// [`AgentConfig::validate`]: super::AgentConfig::validate
    pub fn new(confidence: f64) -> Self {
        Self { confidence }
    }

    /// Uncertainty bonus for an action at a given timestep
    pub fn exploration_bonus(&self, timestep: usize, count: u64) -> f64 {
        self.confidence * ((timestep as f64).ln() / (count as f64 + COUNT_EPSILON)).sqrt()
    }
}

impl Policy for Ucb {
    fn select_action(&mut self, view: &PolicyView<'_>, timestep: usize, _rng: &mut StdRng) -> usize {
        let scores: Vec<f64> = view
            .estimates
            .iter()
            .zip(view.action_counts.iter())
            .map(|(&estimate, &count)| estimate + self.exploration_bonus(timestep, count))
            .collect();
        argmax(&scores)
    }
}
