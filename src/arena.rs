//! Arena storage and the constant-time link/unlink primitives.
//!
//! Every structural mutation of the forest bottoms out in one of the six
//! primitives defined here. Each is O(1), touches only the nodes named in
//! its contract, and leaves every node in exactly one ring. The controller
//! in [`crate::forest`] composes them; nothing else writes to the
//! `left`/`right`/`parent`/`child` fields.
//!
//! Preconditions are `debug_assert!`ed rather than returned as errors. A
//! violated precondition is a bug in the calling code, and the public API
//! is shaped so safe callers cannot reach one.

use slotmap::SlotMap;

use crate::node::{Key, Node, NodeId};
use crate::rank;

/// Slotmap-backed node pool.
///
/// Generational keys make stale ids detectable: `get`/`contains` answer
/// `None`/`false` for a freed id even after its slot is reused.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena {
    nodes: SlotMap<NodeId, Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Allocates a detached rank-0 node: no parent, no children, and a
    /// sibling ring consisting of itself.
    pub fn alloc(&mut self, key: Key) -> NodeId {
        self.nodes.insert_with_key(|id| Node {
            key,
            rank: 0,
            cut: false,
            parent: None,
            child: None,
            left: id,
            right: id,
        })
    }

    /// Removes a fully detached node, returning its record.
    ///
    /// The node must be a singleton with no parent and no children; detach
    /// it with [`unlink`](Self::unlink) and promote its children first.
    pub fn free(&mut self, id: NodeId) -> Node {
        debug_assert!(self.is_singleton(id), "freed node still has siblings");
        debug_assert!(self.nodes[id].parent.is_none(), "freed node still has a parent");
        debug_assert!(self.nodes[id].child.is_none(), "freed node still has children");
        self.nodes.remove(id).expect("free called on a stale id")
    }

    /// Removes a node without link repair. Bulk-teardown only: the caller
    /// is dropping every node of the structure, so neighbours need no fix.
    pub fn discard(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(id)
    }

    /// Whether `v`'s sibling ring contains only `v`.
    #[inline]
    pub fn is_singleton(&self, v: NodeId) -> bool {
        self.nodes[v].right == v
    }

    /// Detaches `v` from its parent and sibling ring.
    ///
    /// If `v` has a parent, the parent's child entry is repaired (next
    /// sibling, or cleared if `v` was the only child) and its rank drops by
    /// one. The ring is spliced shut and `v` becomes a self-looped
    /// singleton. `v` keeps its own children.
    pub fn unlink(&mut self, v: NodeId) {
        if let Some(p) = self.nodes[v].parent {
            let right = self.nodes[v].right;
            if self.nodes[p].child == Some(v) {
                self.nodes[p].child = if right == v { None } else { Some(right) };
            }
            self.nodes[p].rank = rank::saturating_decrement(self.nodes[p].rank);
            self.nodes[v].parent = None;
        }
        let left = self.nodes[v].left;
        let right = self.nodes[v].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[v].left = v;
        self.nodes[v].right = v;
    }

    /// Makes `v` the new child entry of `p`, growing `p`'s rank.
    ///
    /// `v` joins the child ring just left of the previous entry, so the
    /// entry always names the most recently linked (highest-rank) child.
    pub fn link_child(&mut self, p: NodeId, v: NodeId) {
        debug_assert_ne!(p, v, "cannot link a node under itself");
        debug_assert!(self.is_singleton(v), "new child still has siblings");
        debug_assert!(self.nodes[v].parent.is_none(), "new child still has a parent");
        if let Some(c) = self.nodes[p].child {
            let end = self.nodes[c].left;
            self.nodes[v].left = end;
            self.nodes[v].right = c;
            self.nodes[end].right = v;
            self.nodes[c].left = v;
        }
        self.nodes[v].parent = Some(p);
        self.nodes[p].child = Some(v);
        self.nodes[p].rank = rank::checked_increment(self.nodes[p].rank);
    }

    /// Splices singleton `v` into the ring immediately left of `at`.
    pub fn link_left(&mut self, at: NodeId, v: NodeId) {
        debug_assert_ne!(at, v, "cannot splice a node next to itself");
        debug_assert!(self.is_singleton(v), "spliced node still has siblings");
        self.nodes[v].parent = None;
        let left = self.nodes[at].left;
        self.nodes[left].right = v;
        self.nodes[v].left = left;
        self.nodes[v].right = at;
        self.nodes[at].left = v;
    }

    /// Splices singleton `v` into the ring immediately right of `at`.
    pub fn link_right(&mut self, at: NodeId, v: NodeId) {
        debug_assert_ne!(at, v, "cannot splice a node next to itself");
        debug_assert!(self.is_singleton(v), "spliced node still has siblings");
        self.nodes[v].parent = None;
        let right = self.nodes[at].right;
        self.nodes[right].left = v;
        self.nodes[v].left = at;
        self.nodes[v].right = right;
        self.nodes[at].right = v;
    }

    /// Concatenates the ring containing `b` into the ring containing `a`.
    ///
    /// One four-pointer exchange, so O(1) regardless of ring sizes. The two
    /// rings must be distinct. Parent pointers are untouched; when promoting
    /// a child ring the caller clears them.
    pub fn link_all(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b, "cannot concatenate a ring with itself");
        let a_end = self.nodes[a].left;
        let b_end = self.nodes[b].left;
        self.nodes[a_end].right = b;
        self.nodes[b].left = a_end;
        self.nodes[a].left = b_end;
        self.nodes[b_end].right = a;
    }

    /// Iterates a ring once, starting at `start`. Stale or absent entries
    /// yield an empty iterator.
    pub fn ring(&self, start: Option<NodeId>) -> Ring<'_> {
        match start {
            Some(s) if self.contains(s) => Ring {
                arena: self,
                next: Some(s),
                start: s,
            },
            _ => Ring {
                arena: self,
                next: None,
                start: NodeId::default(),
            },
        }
    }
}

impl std::ops::Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

impl std::ops::IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
}

/// Iterator over one full lap of a sibling ring.
///
/// Yields the entry node first, then follows `right` until the lap closes.
/// The ring must not be mutated while the iterator is alive, which the
/// borrow on the forest already guarantees.
pub struct Ring<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
    start: NodeId,
}

impl Iterator for Ring<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        let right = self.arena[cur].right;
        self.next = (right != self.start).then_some(right);
        Some(cur)
    }
}
