//! Greedy action selection

use rand::rngs::StdRng;

use crate::utils::argmax;

use super::{Policy, PolicyView};

/// Always exploit: pick the action with the highest value estimate
///
/// Ties go to the lowest index. Exploration, if any, comes from the
/// agent's epsilon gate, not from this policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Policy for Greedy {
    fn select_action(&mut self, view: &PolicyView<'_>, _timestep: usize, _rng: &mut StdRng) -> usize {
        argmax(view.estimates)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn view<'a>(estimates: &'a [f64], counts: &'a [u64]) -> PolicyView<'a> {
        PolicyView { estimates, action_counts: counts, average_reward: 0.0 }
    }

    #[test]
    fn test_selects_highest_estimate() {
        let mut policy = Greedy;
        let mut rng = StdRng::seed_from_u64(0);
        let counts = [0, 0, 0];

        let v = view(&[0.1, 0.9, 0.5], &counts);
        assert_eq!(policy.select_action(&v, 1, &mut rng), 1);

        let v = view(&[-0.2, -0.9, -0.5], &counts);
        assert_eq!(policy.select_action(&v, 1, &mut rng), 0);
    }

    #[test]
    fn test_ties_break_to_first_index() {
        let mut policy = Greedy;
        let mut rng = StdRng::seed_from_u64(0);
        let counts = [0, 0, 0];

        let v = view(&[0.7, 0.7, 0.7], &counts);
        assert_eq!(policy.select_action(&v, 1, &mut rng), 0);
    }
}
