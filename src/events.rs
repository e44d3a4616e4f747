//! Structural change notifications.
//!
//! A forest can carry one hook that observes every structural change as it
//! happens: node lifecycle, tree links, promotions into a root ring, and
//! cut-mark flips. Renderers and trace collectors subscribe here instead of
//! polling the whole structure after each operation.
//!
//! The hook never influences control flow. Consolidation dismantles and
//! rebuilds a root ring internally; those pointer shuffles are not
//! reported, only the [`LinkedChild`] links that actually change the tree
//! shape. [`LinkedRoot`] fires when a node enters a root ring from outside
//! it: a fresh insert, a cut promotion, or a child promoted by a root
//! removal. Melding two root rings moves no node across that boundary and
//! is therefore silent apart from the links of the following consolidation.
//!
//! [`LinkedChild`]: StructuralEvent::LinkedChild
//! [`LinkedRoot`]: StructuralEvent::LinkedRoot

use crate::node::{Key, NodeId};

/// One structural change inside a [`BinomialForest`].
///
/// [`BinomialForest`]: crate::BinomialForest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralEvent {
    /// A node was allocated by insert.
    Created { node: NodeId, key: Key },
    /// `child` was linked under `parent`, growing the parent's rank.
    LinkedChild { parent: NodeId, child: NodeId },
    /// `node` entered a root ring from outside it.
    LinkedRoot { node: NodeId },
    /// `node` was detached from its parent and siblings by a cut.
    Unlinked { node: NodeId },
    /// The cut mark of `node` flipped to `cut`.
    CutMark { node: NodeId, cut: bool },
    /// `node` left the forest; its id is stale from here on.
    Removed { node: NodeId, key: Key },
}

/// Boxed observer installed with
/// [`BinomialForest::set_event_hook`](crate::BinomialForest::set_event_hook).
pub type EventHook = Box<dyn FnMut(StructuralEvent)>;
