//! Node record and its arena key.
//!
//! Nodes live in a generational arena and reference each other by
//! [`NodeId`]. The four relational links mirror the classic binomial-heap
//! layout: an optional parent, an optional entry point into the child ring,
//! and the always-valid `left`/`right` neighbours of the circular sibling
//! ring. A node with no siblings points both neighbours at itself, so ring
//! walks never branch on a null case.

use slotmap::new_key_type;

use crate::rank::Rank;

/// Priority carried by a node. Totally ordered scalar.
pub type Key = i64;

new_key_type! {
    /// Stable identifier of a node inside one [`BinomialForest`].
    ///
    /// Ids are generational: once the node is removed, its id goes stale and
    /// every query answers `None`/`false` for it instead of observing a
    /// recycled slot. Being a real `slotmap` key, `NodeId` also works as the
    /// key of a [`slotmap::SecondaryMap`] for caller-side per-node data.
    ///
    /// [`BinomialForest`]: crate::BinomialForest
    pub struct NodeId;
}

/// One node of the forest.
///
/// `rank` always equals the length of the child ring, and every member of
/// that ring has `parent` pointing back here. `cut` records whether the node
/// has lost a child since it last became a child itself; it is always false
/// on roots.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub key: Key,
    pub rank: Rank,
    pub cut: bool,
    pub parent: Option<NodeId>,
    pub child: Option<NodeId>,
    pub left: NodeId,
    pub right: NodeId,
}

impl Node {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.child.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_id_has_no_overhead() {
        // The slotmap key keeps a niche, so Option<NodeId> costs nothing.
        assert_eq!(
            std::mem::size_of::<Option<NodeId>>(),
            std::mem::size_of::<NodeId>()
        );
    }

    #[test]
    fn fresh_node_shape() {
        let id = NodeId::default();
        let node = Node {
            key: 7,
            rank: 0,
            cut: false,
            parent: None,
            child: None,
            left: id,
            right: id,
        };
        assert!(node.is_root());
        assert!(node.is_leaf());
    }
}
