//! Ordering policy: the sequence in which images are offered to the packer

use std::cmp::Reverse;

use crate::types::NormalizedSize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderingPolicy {
    /// Height descending, ties kept in input order
    #[default]
    TallestFirst,
    /// Keep the input order untouched
    InputOrder,
}

impl OrderingPolicy {
    /// Reorder the sizes. Deterministic: the same input always yields the
    /// same permutation.
    pub fn apply(self, mut sizes: Vec<NormalizedSize>) -> Vec<NormalizedSize> {
        match self {
            OrderingPolicy::TallestFirst => {
                // sort_by_key is stable, so equal heights keep their input order
                sizes.sort_by_key(|size| Reverse(size.height));
            }
            OrderingPolicy::InputOrder => {}
        }
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(id: usize, width: u32, height: u32) -> NormalizedSize {
        NormalizedSize { id, width, height }
    }

    fn ids(sizes: &[NormalizedSize]) -> Vec<usize> {
        sizes.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_tallest_first() {
        let sizes = vec![size(0, 10, 5), size(1, 10, 30), size(2, 10, 20)];
        let ordered = OrderingPolicy::TallestFirst.apply(sizes);
        assert_eq!(ids(&ordered), vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let sizes = vec![
            size(0, 10, 20),
            size(1, 99, 40),
            size(2, 50, 20),
            size(3, 1, 40),
            size(4, 7, 20),
        ];
        let ordered = OrderingPolicy::TallestFirst.apply(sizes.clone());
        assert_eq!(ids(&ordered), vec![1, 3, 0, 2, 4]);

        // Same input, same permutation
        let again = OrderingPolicy::TallestFirst.apply(sizes);
        assert_eq!(ordered, again);
    }

    #[test]
    fn test_input_order_is_identity() {
        let sizes = vec![size(0, 10, 5), size(1, 10, 30), size(2, 10, 20)];
        let ordered = OrderingPolicy::InputOrder.apply(sizes.clone());
        assert_eq!(ordered, sizes);
    }
}
