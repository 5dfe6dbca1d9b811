//! One-dimensional line-walk environment
//!
//! The agent stands at a random position on a line of integer positions
//! `[0, line_length)` and can jump by a signed step size. The true reward
//! of a jump decays with the distance between the landing position and a
//! hidden goal position:
//!
//! ```text
//! reward(action) = 1 / (|goal - (position + action)| + 1)
//! ```
//!
//! which is 1 exactly when the jump lands on the goal and falls off
//! hyperbolically with distance. Observed outcomes are Bernoulli draws
//! with that reward as the success probability.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::BanditEnvironment;

/// Line-walk bandit environment
///
/// Positions are sampled once at construction and never change: the
/// environment is a stateless reward oracle afterwards, apart from its
/// private RNG used for outcome draws. The goal is sampled from
/// `[1, line_length)` — position 0 is reserved as a possible agent start
/// and is never the goal.
///
/// Invariant: `agent_position != goal_position`.
#[derive(Debug)]
pub struct LineWalk {
    line_length: i64,
    goal_position: i64,
    agent_position: i64,
    rng: StdRng,
}

impl LineWalk {
    /// Create a new line-walk environment
    ///
    /// Samples the goal position uniformly from `[1, line_length)` and
    /// the agent position uniformly from `[0, line_length)` with the goal
    /// excluded.
    ///
    /// # Errors
    ///
    /// Fails if `line_length <= 1`: shorter lines leave no room for a
    /// goal and a distinct agent position.
    pub fn new(line_length: i64, seed: u64) -> Result<Self> {
        if line_length <= 1 {
            return Err(anyhow!(
                "line_length must be greater than 1, got {line_length}"
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let goal_position = rng.gen_range(1..line_length);

        // Sample from the line with the goal removed: draw from a range
        // one shorter and shift draws at or past the goal up by one.
        let mut agent_position = rng.gen_range(0..line_length - 1);
        if agent_position >= goal_position {
            agent_position += 1;
        }

        Ok(Self { line_length, goal_position, agent_position, rng })
    }

    /// Length of the line
    pub fn line_length(&self) -> i64 {
        self.line_length
    }

    /// Hidden goal position, in `[1, line_length)`
    pub fn goal_position(&self) -> i64 {
        self.goal_position
    }

    /// Agent start position, in `[0, line_length)`, never the goal
    pub fn agent_position(&self) -> i64 {
        self.agent_position
    }
}

impl BanditEnvironment for LineWalk {
    fn reward(&self, action: i64) -> f64 {
        let landing = self.agent_position + action;
        1.0 / ((self.goal_position - landing).abs() as f64 + 1.0)
    }

    fn outcome(&mut self, action: i64) -> f64 {
        let p = self.reward(action);
        if self.rng.gen::<f64>() < p {
            1.0
        } else {
            0.0
        }
    }
}
