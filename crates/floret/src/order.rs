//! Left-to-right arrangement of the clusters inside one bar.

use serde::{Deserialize, Serialize};

/// Orders items by radius for a visually balanced row.
///
/// `order` returns indices into `radii`; the result must be a permutation of `0..radii.len()`.
pub trait SymmetricOrder {
    fn order(&self, radii: &[f64]) -> Vec<usize>;
}

/// Largest in the middle, sizes falling off towards both ends.
///
/// Ties keep their input order. The second largest goes to the left of the peak, the third to the
/// right, and so on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Summit;

impl SymmetricOrder for Summit {
    fn order(&self, radii: &[f64]) -> Vec<usize> {
        let mut sorted: Vec<usize> = (0..radii.len()).collect();
        sorted.sort_by(|&a, &b| radii[b].total_cmp(&radii[a]));

        let mut out = std::collections::VecDeque::with_capacity(sorted.len());
        for (k, idx) in sorted.into_iter().enumerate() {
            if k % 2 == 0 {
                out.push_back(idx);
            } else {
                out.push_front(idx);
            }
        }
        out.into()
    }
}

/// Smallest in the middle: the reverse of [`Summit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Valley;

impl SymmetricOrder for Valley {
    fn order(&self, radii: &[f64]) -> Vec<usize> {
        let mut out = Summit.order(radii);
        out.reverse();
        out
    }
}

/// Keeps the bar's own order (descending radius).
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOrder;

impl SymmetricOrder for InputOrder {
    fn order(&self, radii: &[f64]) -> Vec<usize> {
        (0..radii.len()).collect()
    }
}

/// Configurable choice among the built-in orderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordering {
    #[default]
    Summit,
    Valley,
    Input,
}

impl SymmetricOrder for Ordering {
    fn order(&self, radii: &[f64]) -> Vec<usize> {
        match self {
            Ordering::Summit => Summit.order(radii),
            Ordering::Valley => Valley.order(radii),
            Ordering::Input => InputOrder.order(radii),
        }
    }
}

/// Returns `true` when `order` is a permutation of `0..len`.
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summit_puts_the_largest_in_the_middle() {
        let radii = [1.0, 5.0, 3.0, 4.0, 2.0];
        let order = Summit.order(&radii);
        let arranged: Vec<f64> = order.iter().map(|&i| radii[i]).collect();
        assert_eq!(arranged, vec![2.0, 4.0, 5.0, 3.0, 1.0]);
    }

    #[test]
    fn summit_keeps_ties_stable() {
        let radii = [2.0, 2.0, 2.0];
        assert_eq!(Summit.order(&radii), vec![1, 0, 2]);
    }

    #[test]
    fn valley_is_reversed_summit() {
        let radii = [1.0, 5.0, 3.0, 4.0];
        let mut summit = Summit.order(&radii);
        summit.reverse();
        assert_eq!(Valley.order(&radii), summit);
    }

    #[test]
    fn builtins_are_permutations() {
        let radii = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        for ordering in [Ordering::Summit, Ordering::Valley, Ordering::Input] {
            assert!(is_permutation(&ordering.order(&radii), radii.len()));
        }
        assert!(Summit.order(&[]).is_empty());
    }

    #[test]
    fn is_permutation_rejects_drops_and_duplicates() {
        assert!(!is_permutation(&[0, 0], 2));
        assert!(!is_permutation(&[0], 2));
        assert!(!is_permutation(&[0, 2], 2));
        assert!(is_permutation(&[1, 0], 2));
    }

    #[test]
    fn ordering_parses_from_config() {
        let o: Ordering = serde_json::from_str("\"valley\"").expect("json");
        assert_eq!(o, Ordering::Valley);
    }
}
