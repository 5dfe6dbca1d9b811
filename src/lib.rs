//! # Linewalk
//!
//! Multi-armed bandit experiments on a synthetic one-dimensional
//! "line-walk" environment.
//!
//! An agent sits at a random position on a line and can jump by one of a
//! fixed set of step sizes. Jumps that land closer to a hidden goal
//! position pay off more often. Agents never observe the goal directly:
//! they see only Bernoulli outcomes, and must learn which jump is best by
//! balancing exploration against exploitation.
//!
//! ## Architecture
//!
//! - **Environment** (`env`): the [`env::BanditEnvironment`] trait — a
//!   deterministic true-reward oracle plus stochastic outcome draws — and
//!   the [`env::line_walk::LineWalk`] implementation.
//!
//! - **Agent** (`agent`): [`agent::BanditAgent`] owns the value estimates,
//!   visit counts, and the shared decide/observe/update loop; the
//!   [`agent::Policy`] trait carries the variant-specific action selection
//!   (greedy, UCB, gradient/softmax).
//!
//! - **Runner** (`runner`): [`runner::ExperimentRunner`] repeats
//!   independent experiments, each with a fresh environment and a fresh
//!   agent per configured variant, and folds reward traces into running
//!   cross-experiment averages.
//!
//! - **Utils** (`utils`): numerically stable softmax and small shared
//!   numeric helpers.
//!
//! All randomness flows through explicitly seeded [`rand::rngs::StdRng`]
//! instances, so a fixed master seed reproduces a run bit for bit.
//!
//! ## Quick start
//!
//! ```rust
//! use linewalk::prelude::*;
//!
//! let config = ExperimentConfig::new()
//!     .timesteps(100)
//!     .num_actions(5)
//!     .num_experiments(20)
//!     .line_length(10)
//!     .seed(7);
//!
//! let specs = vec![
//!     AgentSpec::new("greedy", "red", AgentConfig::new().epsilon(0.1)),
//!     AgentSpec::new(
//!         "ucb",
//!         "blue",
//!         AgentConfig::new().policy(PolicyConfig::Ucb { confidence: 2.0 }),
//!     ),
//! ];
//!
//! let runner = ExperimentRunner::new(config).unwrap();
//! let results = runner
//!     .run(&specs, |line_length, seed| LineWalk::new(line_length, seed))
//!     .unwrap();
//! assert_eq!(results["ucb"].timesteps_reward.len(), 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Environment trait and implementations
pub mod env;

/// Bandit agent state machine and action-selection policies
pub mod agent;

/// Experiment orchestration and cross-experiment aggregation
pub mod runner;

/// Numeric helpers (stable softmax, argmax)
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::agent::{AgentConfig, BanditAgent, Policy, PolicyConfig};
    pub use crate::env::line_walk::LineWalk;
    pub use crate::env::BanditEnvironment;
    pub use crate::runner::{AgentResult, AgentSpec, ExperimentConfig, ExperimentRunner};
    pub use crate::utils::softmax::stable_softmax;
}

/// Current version of linewalk
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
