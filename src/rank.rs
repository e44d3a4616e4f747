//! Rank bookkeeping for binomial trees.
//!
//! The rank of a node is the number of its direct children. A binomial tree
//! whose root has rank `r` contains exactly 2ʳ nodes, so any rank occurring
//! in a forest that fits in memory is at most ~64. `u8` therefore covers
//! every reachable value with room to spare while keeping the node record
//! a single byte wider instead of eight.
//!
//! Rank increments go through [`checked_increment`], which panics on
//! overflow: a rank past [`MAX_RANK`] cannot be produced by the linking
//! rules and signals a corrupted forest, not a recoverable condition.
//! Decrements saturate, since rank 0 (a leaf) is a legitimate floor.

/// Number of direct children of a node; the order of its binomial tree.
pub type Rank = u8;

/// Largest representable rank. A tree of this rank would hold 2²⁵⁵ nodes,
/// far beyond anything addressable, so hitting the bound means corruption.
pub const MAX_RANK: Rank = u8::MAX;

/// Increments a rank, panicking past [`MAX_RANK`].
///
/// # Panics
///
/// Panics on overflow. Valid link sequences keep rank at or below
/// log₂(node count), so an overflow can only come from a structural bug.
///
/// # Example
///
/// ```rust
/// use binomial_forest::rank::{checked_increment, Rank};
///
/// let rank: Rank = 3;
/// assert_eq!(checked_increment(rank), 4);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: rank is bounded by log2 of the node count, \
         so exceeding u8::MAX indicates a corrupted forest",
    )
}

/// Decrements a rank, staying at 0 for leaves.
///
/// # Example
///
/// ```rust
/// use binomial_forest::rank::{saturating_decrement, Rank};
///
/// assert_eq!(saturating_decrement(3), 2);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}

/// Number of nodes in a binomial tree of the given rank, saturating at
/// `usize::MAX` for ranks no real tree can reach.
#[inline]
pub fn subtree_size(rank: Rank) -> usize {
    1usize.checked_shl(u32::from(rank)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_steps() {
        assert_eq!(checked_increment(0), 1);
        assert_eq!(checked_increment(63), 64);
        assert_eq!(checked_increment(254), 255);
    }

    #[test]
    #[should_panic(expected = "rank overflow")]
    fn increment_past_max_panics() {
        checked_increment(MAX_RANK);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        assert_eq!(saturating_decrement(5), 4);
        assert_eq!(saturating_decrement(1), 0);
        assert_eq!(saturating_decrement(0), 0);
    }

    #[test]
    fn subtree_sizes_double() {
        assert_eq!(subtree_size(0), 1);
        assert_eq!(subtree_size(1), 2);
        assert_eq!(subtree_size(4), 16);
        assert_eq!(subtree_size(10), 1024);
        assert_eq!(subtree_size(MAX_RANK), usize::MAX);
    }

    #[test]
    fn rank_stays_one_byte() {
        assert_eq!(std::mem::size_of::<Rank>(), 1);
    }
}
