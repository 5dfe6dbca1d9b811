//! Gradient bandit with softmax action selection

use rand::rngs::StdRng;
use rand::Rng;

use crate::utils::softmax::stable_softmax;

use super::{Policy, PolicyView};

/// Preference-based policy sampling actions from a softmax distribution
///
/// Maintains a numerical preference per action rather than a value
/// estimate. Actions are sampled from `softmax(preferences)`, and after
/// each reward the preferences move by stochastic gradient ascent on
/// expected reward, using the agent's running average reward as the
/// baseline: rewards above the baseline push the chosen action's
/// preference up and all others down, rewards below do the reverse.
#[derive(Debug, Clone)]
pub struct GradientBandit {
    preferences: Vec<f64>,
}

impl GradientBandit {
    /// Create a gradient policy with all preferences at zero
    ///
    /// Zero preferences make the initial distribution uniform.
    pub fn new(num_actions: usize) -> Self {
        Self { preferences: vec![0.0; num_actions] }
    }

    /// Current per-action preferences
    pub fn preferences(&self) -> &[f64] {
        &self.preferences
    }

    fn sample_categorical(probs: &[f64], rng: &mut StdRng) -> usize {
        let draw: f64 = rng.gen();
        let mut cumulative = 0.0;
        for (idx, &p) in probs.iter().enumerate() {
            cumulative += p;
            if draw < cumulative {
                return idx;
            }
        }
        // Rounding can leave the cumulative sum a hair below 1.0
        probs.len() - 1
    }
}

impl Policy for GradientBandit {
    fn select_action(&mut self, _view: &PolicyView<'_>, _timestep: usize, rng: &mut StdRng) -> usize {
        let probs = stable_softmax(&self.preferences);
        Self::sample_categorical(&probs, rng)
    }

    fn on_reward(&mut self, view: &PolicyView<'_>, chosen: usize, reward: f64, step_size: f64) {
        let probs = stable_softmax(&self.preferences);
        let advantage = reward - view.average_reward;
        for (idx, preference) in self.preferences.iter_mut().enumerate() {
            if idx == chosen {
                *preference += step_size * advantage * (1.0 - probs[idx]);
            } else {
                *preference -= step_size * advantage * probs[idx];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn view_with_average(average_reward: f64) -> PolicyView<'static> {
        PolicyView { estimates: &[], action_counts: &[], average_reward }
    }

    #[test]
    fn test_reward_above_baseline_favors_chosen_action() {
        let mut policy = GradientBandit::new(2);
        let view = view_with_average(0.0);

        policy.on_reward(&view, 0, 1.0, 0.1);

        assert!(
            policy.preferences()[0] > 0.0,
            "chosen preference {} did not increase",
            policy.preferences()[0]
        );
        assert!(
            policy.preferences()[1] < 0.0,
            "other preference {} did not decrease",
            policy.preferences()[1]
        );
    }

    #[test]
    fn test_reward_below_baseline_penalizes_chosen_action() {
        let mut policy = GradientBandit::new(3);
        let view = view_with_average(0.8);

        policy.on_reward(&view, 1, 0.0, 0.1);

        assert!(policy.preferences()[1] < 0.0);
        assert!(policy.preferences()[0] > 0.0);
        assert!(policy.preferences()[2] > 0.0);
    }

    #[test]
    fn test_reward_at_baseline_is_neutral() {
        let mut policy = GradientBandit::new(2);
        let view = view_with_average(0.5);

        policy.on_reward(&view, 0, 0.5, 0.1);

        assert_eq!(policy.preferences(), &[0.0, 0.0]);
    }

    #[test]
    fn test_repeated_wins_concentrate_the_distribution() {
        let mut policy = GradientBandit::new(2);
        let view = view_with_average(0.0);

        for _ in 0..200 {
            policy.on_reward(&view, 0, 1.0, 0.1);
        }

        let probs = stable_softmax(policy.preferences());
        assert!(
            probs[0] > 0.95,
            "preferred action probability only {}",
            probs[0]
        );
    }

    #[test]
    fn test_zero_preferences_sample_uniformly() {
        let mut policy = GradientBandit::new(4);
        let mut rng = StdRng::seed_from_u64(17);
        let view = view_with_average(0.0);

        let mut counts = [0usize; 4];
        let draws = 4000;
        for _ in 0..draws {
            counts[policy.select_action(&view, 1, &mut rng)] += 1;
        }

        for (idx, &count) in counts.iter().enumerate() {
            assert!(
                (700..1300).contains(&count),
                "action {idx} sampled {count} times out of {draws}, far from uniform"
            );
        }
    }

    #[test]
    fn test_categorical_sampling_respects_skew() {
        let mut policy = GradientBandit::new(2);
        policy.preferences = vec![3.0, -3.0];
        let mut rng = StdRng::seed_from_u64(23);
        let view = view_with_average(0.0);

        let picks_of_zero = (0..1000)
            .filter(|_| policy.select_action(&view, 1, &mut rng) == 0)
            .count();
        // softmax([3, -3])[0] ≈ 0.9975
        assert!(picks_of_zero > 980, "only {picks_of_zero} draws of the dominant action");
    }
}
