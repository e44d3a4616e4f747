//! Min/max ordering strategy.
//!
//! A forest compares keys through a [`HeapOrder`] captured once at
//! construction. Every comparison in the crate goes through [`prec`] or
//! [`preceq`], so a min-forest and a max-forest run the same algorithms
//! with the sense of "extreme" flipped.
//!
//! [`prec`]: HeapOrder::prec
//! [`preceq`]: HeapOrder::preceq

use crate::node::Key;

/// Which end of the key range a forest treats as the extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOrder {
    /// Smallest key wins; extract yields keys in ascending order.
    Min,
    /// Largest key wins; extract yields keys in descending order.
    Max,
}

impl HeapOrder {
    /// Strict comparison: does `a` beat `b` outright?
    ///
    /// Equal keys never satisfy `prec`, which is what makes scans
    /// first-wins: a later candidate must strictly beat the incumbent.
    #[inline]
    pub fn prec(self, a: Key, b: Key) -> bool {
        match self {
            HeapOrder::Min => a < b,
            HeapOrder::Max => a > b,
        }
    }

    /// Non-strict companion of [`prec`](HeapOrder::prec).
    ///
    /// Heap order between parent and child is stated in terms of `preceq`,
    /// so equal keys may stack either way within a tree. When two roots of
    /// equal rank are linked, `preceq` keeps the incumbent on ties.
    #[inline]
    pub fn preceq(self, a: Key, b: Key) -> bool {
        match self {
            HeapOrder::Min => a <= b,
            HeapOrder::Max => a >= b,
        }
    }
}
