//! Binomial forest controller.
//!
//! A [`BinomialForest`] owns one arena of nodes and hosts any number of
//! heaps in it. Each [`Heap`] is a circular ring of tree roots; the trees
//! are heap-ordered binomial trees whose siblings likewise form circular
//! rings at every level. Because all heaps share the arena, melding two of
//! them is a ring splice plus consolidation: no node is created, moved, or
//! rekeyed, and every outstanding [`NodeId`] stays valid.
//!
//! # Algorithm overview
//!
//! **Consolidation** keeps at most one root per rank, exactly like binary
//! addition keeps at most one bit per position: roots are filed into a
//! rank-indexed table, two roots of equal rank are linked into one tree of
//! the next rank (the `preceq` winner on top), and the resulting carry may
//! collide again. Insert is the merge of a singleton; extract promotes the
//! removed root's children and reconsolidates.
//!
//! **Decrease-key** updates in place while heap order holds, otherwise it
//! cuts the subtree into the root ring and walks the former ancestor chain:
//! a marked ancestor is cut as well, the first unmarked non-root ancestor is
//! marked, roots are never marked. The walk is a plain loop, so deep trees
//! cannot overflow the stack. Cuts may leave duplicate root ranks; the next
//! consolidating operation restores uniqueness.
//!
//! # Complexity
//!
//! | operation         | cost                     |
//! |-------------------|--------------------------|
//! | `insert`          | O(log n)                 |
//! | `meld`            | O(log n)                 |
//! | `peek` / find     | O(log n)                 |
//! | `extract_extreme` | O(log n)                 |
//! | `decrease_key`    | O(log n)                 |
//! | `delete`          | O(log n)                 |
//! | `clear`           | O(n)                     |

use std::fmt;

use smallvec::SmallVec;

use crate::arena::{NodeArena, Ring};
use crate::error::ForestError;
use crate::events::{EventHook, StructuralEvent};
use crate::node::{Key, Node, NodeId};
use crate::order::HeapOrder;
use crate::rank::Rank;

/// One priority queue inside a [`BinomialForest`]: a root ring plus its
/// element count.
///
/// Creating a heap allocates nothing; nodes enter it through
/// [`BinomialForest::insert`] and [`BinomialForest::meld`]. A heap value is
/// only meaningful together with the forest that populated it, and it is
/// deliberately not `Clone`: two live handles to one root ring would let a
/// meld alias itself. Dropping an undrained heap leaves its nodes pooled in
/// the arena until the forest itself drops.
#[derive(Debug, Default)]
pub struct Heap {
    root: Option<NodeId>,
    len: usize,
}

impl Heap {
    /// Creates an empty heap tied to no nodes yet.
    pub const fn new() -> Self {
        Heap { root: None, len: 0 }
    }

    /// Number of nodes in this heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this heap holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Arena, ordering strategy, and event hook shared by every heap built on
/// this forest.
pub struct BinomialForest {
    arena: NodeArena,
    order: HeapOrder,
    hook: Option<EventHook>,
}

impl BinomialForest {
    /// Creates a forest with the given ordering. The ordering is fixed for
    /// the lifetime of the forest.
    pub fn new(order: HeapOrder) -> Self {
        BinomialForest {
            arena: NodeArena::new(),
            order,
            hook: None,
        }
    }

    /// Like [`new`](Self::new), preallocating arena slots for `capacity`
    /// nodes.
    pub fn with_capacity(order: HeapOrder, capacity: usize) -> Self {
        BinomialForest {
            arena: NodeArena::with_capacity(capacity),
            order,
            hook: None,
        }
    }

    /// The ordering this forest was built with.
    #[inline]
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// Total number of live nodes across all heaps of this forest.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Installs the structural event hook, replacing any previous one.
    ///
    /// The hook observes every change as it happens; see
    /// [`StructuralEvent`] for the taxonomy. It must not call back into the
    /// forest (it cannot: the forest is mutably borrowed while it runs).
    pub fn set_event_hook<F>(&mut self, hook: F)
    where
        F: FnMut(StructuralEvent) + 'static,
    {
        self.hook = Some(Box::new(hook));
    }

    /// Removes the event hook.
    pub fn clear_event_hook(&mut self) {
        self.hook = None;
    }

    #[inline]
    fn emit(&mut self, event: StructuralEvent) {
        if let Some(hook) = self.hook.as_mut() {
            hook(event);
        }
    }

    // ------------------------------------------------------------------
    // Core operations
    // ------------------------------------------------------------------

    /// Inserts a new key into `heap`, returning the id of the node that
    /// carries it. O(log n).
    pub fn insert(&mut self, heap: &mut Heap, key: Key) -> NodeId {
        let v = self.arena.alloc(key);
        ftrace!("insert: id={:?} key={}", v, key);
        self.emit(StructuralEvent::Created { node: v, key });
        match heap.root {
            None => heap.root = Some(v),
            Some(entry) => self.arena.link_right(entry, v),
        }
        self.emit(StructuralEvent::LinkedRoot { node: v });
        heap.len += 1;
        self.consolidate(heap);
        v
    }

    /// Melds `from` into `into`, consuming `from`. O(log n).
    ///
    /// All nodes of `from` become part of `into`; their ids stay valid.
    /// Both heaps must have been populated by this forest.
    pub fn meld(&mut self, into: &mut Heap, from: Heap) {
        ftrace!("meld: {} nodes into {}", from.len, into.len);
        let Some(b) = from.root else { return };
        debug_assert!(self.arena.contains(b), "melding a heap from another forest");
        match into.root {
            None => into.root = Some(b),
            Some(a) => self.arena.link_all(a, b),
        }
        into.len += from.len;
        self.consolidate(into);
    }

    /// Id of the extreme root of `heap`. Scans the root ring once; among
    /// equal keys the first root in ring order wins.
    pub fn find_extreme(&self, heap: &Heap) -> Result<NodeId, ForestError> {
        let entry = heap.root.ok_or(ForestError::EmptyHeap)?;
        let mut best = entry;
        let mut cur = self.arena[entry].right;
        while cur != entry {
            if self.order.prec(self.arena[cur].key, self.arena[best].key) {
                best = cur;
            }
            cur = self.arena[cur].right;
        }
        Ok(best)
    }

    /// Extreme key of `heap` without removing it, or `None` when empty.
    pub fn peek(&self, heap: &Heap) -> Option<Key> {
        self.find_extreme(heap).ok().map(|v| self.arena[v].key)
    }

    /// Removes the extreme root of `heap` and returns its key. The root's
    /// children are promoted into the root ring and the ring is
    /// reconsolidated. O(log n).
    pub fn extract_extreme(&mut self, heap: &mut Heap) -> Result<Key, ForestError> {
        let v = self.find_extreme(heap)?;
        ftrace!("extract: id={:?} key={}", v, self.arena[v].key);
        Ok(self.remove_root(heap, v))
    }

    /// Moves `v`'s key toward the extreme of this forest's ordering.
    ///
    /// Under [`HeapOrder::Min`] the new key must be strictly smaller, under
    /// [`HeapOrder::Max`] strictly larger. If the new key violates heap
    /// order with the parent, the subtree is cut into the root ring and the
    /// cascade walks the former ancestor chain. O(log n).
    ///
    /// # Errors
    ///
    /// [`ForestError::KeyNotFound`] if `v` is stale or not owned by `heap`,
    /// [`ForestError::KeyNotDecreased`] if the new key does not strictly
    /// precede the current one.
    pub fn decrease_key(
        &mut self,
        heap: &mut Heap,
        v: NodeId,
        new_key: Key,
    ) -> Result<(), ForestError> {
        if !self.owns(heap, v) {
            return Err(ForestError::KeyNotFound);
        }
        let old = self.arena[v].key;
        if !self.order.prec(new_key, old) {
            return Err(ForestError::KeyNotDecreased);
        }
        ftrace!("decrease_key: id={:?} {} -> {}", v, old, new_key);
        self.arena[v].key = new_key;
        let Some(p) = self.arena[v].parent else {
            // Already a root: the key moved toward the extreme, so order
            // with the children can only have improved.
            return Ok(());
        };
        if self.order.preceq(self.arena[p].key, new_key) {
            return Ok(());
        }
        self.cut_to_root(heap, v);
        self.cascade(heap, p);
        Ok(())
    }

    /// Removes `v` from `heap` regardless of its position and returns its
    /// key. A non-root is first forced into the root ring by the same cut
    /// and cascade decrease-key uses, then removed like an extracted root.
    /// O(log n).
    ///
    /// # Errors
    ///
    /// [`ForestError::KeyNotFound`] if `v` is stale or not owned by `heap`.
    pub fn delete(&mut self, heap: &mut Heap, v: NodeId) -> Result<Key, ForestError> {
        if !self.owns(heap, v) {
            return Err(ForestError::KeyNotFound);
        }
        ftrace!("delete: id={:?}", v);
        if let Some(p) = self.arena[v].parent {
            self.cut_to_root(heap, v);
            self.cascade(heap, p);
        }
        Ok(self.remove_root(heap, v))
    }

    /// Frees every node of `heap`, leaving it empty. Emits one `Removed`
    /// event per node. O(n).
    pub fn clear(&mut self, heap: &mut Heap) {
        ftrace!("clear: {} nodes", heap.len);
        let mut ids = Vec::with_capacity(heap.len);
        self.for_each_node(heap, |id, _| ids.push(id));
        heap.root = None;
        heap.len = 0;
        for id in ids {
            if let Some(node) = self.arena.discard(id) {
                self.emit(StructuralEvent::Removed { node: id, key: node.key });
            }
        }
    }

    // ------------------------------------------------------------------
    // Structural queries
    // ------------------------------------------------------------------

    /// Whether `v` names a live node of this forest.
    #[inline]
    pub fn contains(&self, v: NodeId) -> bool {
        self.arena.contains(v)
    }

    /// Key carried by `v`, or `None` if stale.
    #[inline]
    pub fn key(&self, v: NodeId) -> Option<Key> {
        self.arena.get(v).map(|n| n.key)
    }

    /// Rank (child count) of `v`, or `None` if stale.
    #[inline]
    pub fn rank(&self, v: NodeId) -> Option<Rank> {
        self.arena.get(v).map(|n| n.rank)
    }

    /// Parent of `v`; `None` for roots and stale ids.
    #[inline]
    pub fn parent(&self, v: NodeId) -> Option<NodeId> {
        self.arena.get(v).and_then(|n| n.parent)
    }

    /// Entry point of `v`'s child ring; `None` for leaves and stale ids.
    #[inline]
    pub fn first_child(&self, v: NodeId) -> Option<NodeId> {
        self.arena.get(v).and_then(|n| n.child)
    }

    /// Left (counter-clockwise) neighbour in `v`'s sibling ring.
    #[inline]
    pub fn left(&self, v: NodeId) -> Option<NodeId> {
        self.arena.get(v).map(|n| n.left)
    }

    /// Right (clockwise) neighbour in `v`'s sibling ring.
    #[inline]
    pub fn right(&self, v: NodeId) -> Option<NodeId> {
        self.arena.get(v).map(|n| n.right)
    }

    /// Whether `v` is a tree root. `false` for stale ids.
    #[inline]
    pub fn is_root(&self, v: NodeId) -> bool {
        self.arena.get(v).is_some_and(Node::is_root)
    }

    /// Whether `v` has no children. `false` for stale ids.
    #[inline]
    pub fn is_leaf(&self, v: NodeId) -> bool {
        self.arena.get(v).is_some_and(Node::is_leaf)
    }

    /// Whether `v` carries the cut mark. `false` for stale ids and roots.
    #[inline]
    pub fn is_cut(&self, v: NodeId) -> bool {
        self.arena.get(v).is_some_and(|n| n.cut)
    }

    /// Whether `v` is a live node belonging to `heap`. Climbs to `v`'s tree
    /// root and scans the heap's root ring: O(log n) on a consolidated
    /// ring.
    pub fn owns(&self, heap: &Heap, v: NodeId) -> bool {
        if !self.arena.contains(v) {
            return false;
        }
        let mut top = v;
        while let Some(p) = self.arena[top].parent {
            top = p;
        }
        self.roots(heap).any(|r| r == top)
    }

    /// Iterates the root ring of `heap` in ring order.
    pub fn roots(&self, heap: &Heap) -> Ring<'_> {
        self.arena.ring(heap.root)
    }

    /// Iterates `v`'s sibling ring starting at `v` itself. Empty for stale
    /// ids.
    pub fn ring(&self, v: NodeId) -> Ring<'_> {
        self.arena.ring(self.arena.contains(v).then_some(v))
    }

    /// Iterates `v`'s direct children. Empty for leaves and stale ids.
    pub fn children(&self, v: NodeId) -> Ring<'_> {
        self.arena.ring(self.first_child(v))
    }

    /// Visits every node of `heap` exactly once. The visit order is
    /// unspecified.
    pub fn for_each_node<F>(&self, heap: &Heap, mut f: F)
    where
        F: FnMut(NodeId, Key),
    {
        let mut stack: Vec<NodeId> = self.roots(heap).collect();
        while let Some(v) = stack.pop() {
            f(v, self.arena[v].key);
            stack.extend(self.children(v));
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Detaches `v` from its parent and splices it into `heap`'s root ring
    /// just right of the entry. Clears the cut mark: the node starts a
    /// fresh life as a root.
    fn cut_to_root(&mut self, heap: &mut Heap, v: NodeId) {
        self.arena.unlink(v);
        self.emit(StructuralEvent::Unlinked { node: v });
        if std::mem::replace(&mut self.arena[v].cut, false) {
            self.emit(StructuralEvent::CutMark { node: v, cut: false });
        }
        match heap.root {
            None => heap.root = Some(v),
            Some(entry) => self.arena.link_right(entry, v),
        }
        self.emit(StructuralEvent::LinkedRoot { node: v });
    }

    /// Walks the ancestor chain after a cut: marked ancestors are cut too,
    /// the first unmarked non-root ancestor is marked, roots stay unmarked.
    fn cascade(&mut self, heap: &mut Heap, from: NodeId) {
        let mut cur = from;
        while let Some(parent) = self.arena[cur].parent {
            if !self.arena[cur].cut {
                self.arena[cur].cut = true;
                self.emit(StructuralEvent::CutMark { node: cur, cut: true });
                break;
            }
            self.cut_to_root(heap, cur);
            cur = parent;
        }
    }

    /// Removes root `v` from `heap`: detaches it, promotes its children
    /// into the root ring, frees the node, reconsolidates. Returns the key.
    fn remove_root(&mut self, heap: &mut Heap, v: NodeId) -> Key {
        debug_assert!(self.arena[v].parent.is_none(), "removing a non-root");
        if heap.root == Some(v) {
            heap.root = if self.arena.is_singleton(v) {
                None
            } else {
                Some(self.arena[v].right)
            };
        }
        self.arena.unlink(v);
        let child = {
            let n = &mut self.arena[v];
            n.rank = 0;
            n.child.take()
        };
        if let Some(c) = child {
            let members: SmallVec<[NodeId; 16]> = self.arena.ring(Some(c)).collect();
            for &m in &members {
                let was_cut = {
                    let n = &mut self.arena[m];
                    n.parent = None;
                    std::mem::replace(&mut n.cut, false)
                };
                if was_cut {
                    self.emit(StructuralEvent::CutMark { node: m, cut: false });
                }
                self.emit(StructuralEvent::LinkedRoot { node: m });
            }
            match heap.root {
                None => heap.root = Some(c),
                Some(entry) => self.arena.link_all(entry, c),
            }
        }
        heap.len -= 1;
        let node = self.arena.free(v);
        self.emit(StructuralEvent::Removed { node: v, key: node.key });
        self.consolidate(heap);
        node.key
    }

    /// Restores rank uniqueness among the roots of `heap`.
    ///
    /// Collects the ring, dismantles it into singletons, files each root
    /// into a rank-indexed table linking collisions as it goes (the carry of
    /// rank r+1 may collide again), then rebuilds the ring in ascending rank
    /// order. Each rank is touched O(1) times, so the pass is O(log n) plus
    /// the number of links performed.
    fn consolidate(&mut self, heap: &mut Heap) {
        let Some(entry) = heap.root else { return };
        let roots: SmallVec<[NodeId; 16]> = self.arena.ring(Some(entry)).collect();
        if roots.len() < 2 {
            return;
        }
        for &r in &roots {
            self.arena.unlink(r);
        }
        let mut slots: SmallVec<[Option<NodeId>; 16]> = SmallVec::new();
        for &r in &roots {
            let mut x = r;
            loop {
                let d = self.arena[x].rank as usize;
                while slots.len() <= d {
                    slots.push(None);
                }
                match slots[d].take() {
                    None => {
                        slots[d] = Some(x);
                        break;
                    }
                    Some(y) => x = self.link_pair(y, x),
                }
            }
        }
        fdebug!(
            "consolidate: {} roots -> {}",
            roots.len(),
            slots.iter().flatten().count()
        );
        heap.root = None;
        for x in slots.into_iter().flatten() {
            match heap.root {
                None => heap.root = Some(x),
                Some(e) => self.arena.link_left(e, x),
            }
        }
    }

    /// Links two equal-rank roots into one tree of the next rank. `y` is
    /// the incumbent from earlier in ring order and keeps the top on ties.
    fn link_pair(&mut self, y: NodeId, x: NodeId) -> NodeId {
        debug_assert_eq!(
            self.arena[y].rank, self.arena[x].rank,
            "linking trees of unequal rank"
        );
        let (winner, loser) = if self.order.preceq(self.arena[y].key, self.arena[x].key) {
            (y, x)
        } else {
            (x, y)
        };
        self.arena.link_child(winner, loser);
        self.emit(StructuralEvent::LinkedChild {
            parent: winner,
            child: loser,
        });
        winner
    }
}

impl fmt::Debug for BinomialForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialForest")
            .field("order", &self.order)
            .field("node_count", &self.arena.len())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(forest: &mut BinomialForest, heap: &mut Heap) -> Vec<Key> {
        let mut out = Vec::with_capacity(heap.len());
        while let Ok(key) = forest.extract_extreme(heap) {
            out.push(key);
        }
        out
    }

    #[test]
    fn insert_and_extract_sorted() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut heap = Heap::new();
        for key in [5, 3, 8, 1] {
            forest.insert(&mut heap, key);
        }
        assert_eq!(heap.len(), 4);
        assert_eq!(forest.peek(&heap), Some(1));
        assert_eq!(drain(&mut forest, &mut heap), vec![1, 3, 5, 8]);
        assert!(heap.is_empty());
        assert_eq!(forest.node_count(), 0);
    }

    #[test]
    fn max_order_extracts_descending() {
        let mut forest = BinomialForest::new(HeapOrder::Max);
        let mut heap = Heap::new();
        for key in [5, 3, 8, 1] {
            forest.insert(&mut heap, key);
        }
        assert_eq!(forest.peek(&heap), Some(8));
        assert_eq!(drain(&mut forest, &mut heap), vec![8, 5, 3, 1]);
    }

    #[test]
    fn empty_heap_errors() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut heap = Heap::new();
        assert_eq!(forest.peek(&heap), None);
        assert_eq!(forest.find_extreme(&heap), Err(ForestError::EmptyHeap));
        assert_eq!(forest.extract_extreme(&mut heap), Err(ForestError::EmptyHeap));
    }

    #[test]
    fn decrease_key_on_root_updates_in_place() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut heap = Heap::new();
        let v = forest.insert(&mut heap, 10);
        forest.insert(&mut heap, 20);
        assert_eq!(forest.decrease_key(&mut heap, v, 5), Ok(()));
        assert_eq!(forest.key(v), Some(5));
        assert_eq!(forest.peek(&heap), Some(5));
    }

    #[test]
    fn decrease_key_rejects_non_preceding() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut heap = Heap::new();
        let v = forest.insert(&mut heap, 10);
        assert_eq!(
            forest.decrease_key(&mut heap, v, 10),
            Err(ForestError::KeyNotDecreased)
        );
        assert_eq!(
            forest.decrease_key(&mut heap, v, 15),
            Err(ForestError::KeyNotDecreased)
        );
        // Under Max ordering "decrease" means moving upward.
        let mut max_forest = BinomialForest::new(HeapOrder::Max);
        let mut max_heap = Heap::new();
        let w = max_forest.insert(&mut max_heap, 10);
        assert_eq!(
            max_forest.decrease_key(&mut max_heap, w, 5),
            Err(ForestError::KeyNotDecreased)
        );
        assert_eq!(max_forest.decrease_key(&mut max_heap, w, 15), Ok(()));
    }

    #[test]
    fn stale_id_is_key_not_found() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut heap = Heap::new();
        let v = forest.insert(&mut heap, 1);
        assert_eq!(forest.extract_extreme(&mut heap), Ok(1));
        assert!(!forest.contains(v));
        assert_eq!(
            forest.decrease_key(&mut heap, v, 0),
            Err(ForestError::KeyNotFound)
        );
        assert_eq!(forest.delete(&mut heap, v), Err(ForestError::KeyNotFound));
    }

    #[test]
    fn node_in_other_heap_is_key_not_found() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut a = Heap::new();
        let mut b = Heap::new();
        let va = forest.insert(&mut a, 1);
        forest.insert(&mut b, 2);
        assert!(forest.owns(&a, va));
        assert!(!forest.owns(&b, va));
        assert_eq!(
            forest.decrease_key(&mut b, va, 0),
            Err(ForestError::KeyNotFound)
        );
    }

    #[test]
    fn meld_consumes_and_preserves_ids() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut a = Heap::new();
        let mut b = Heap::new();
        for key in [2, 7] {
            forest.insert(&mut a, key);
        }
        let vb = forest.insert(&mut b, 4);
        forest.insert(&mut b, 1);
        forest.meld(&mut a, b);
        assert_eq!(a.len(), 4);
        assert!(forest.owns(&a, vb));
        assert_eq!(drain(&mut forest, &mut a), vec![1, 2, 4, 7]);
    }

    #[test]
    fn delete_non_root_then_drain() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut heap = Heap::new();
        let ids: Vec<NodeId> = (1..=8).map(|k| forest.insert(&mut heap, k)).collect();
        // 8 nodes form one rank-3 tree; delete something buried in it.
        let buried = ids
            .iter()
            .copied()
            .find(|&v| !forest.is_root(v))
            .expect("a tree of eight nodes has non-roots");
        let gone = forest.key(buried).unwrap();
        assert_eq!(forest.delete(&mut heap, buried), Ok(gone));
        assert_eq!(heap.len(), 7);
        let rest = drain(&mut forest, &mut heap);
        let expected: Vec<Key> = (1..=8).filter(|&k| k != gone).collect();
        assert_eq!(rest, expected);
    }

    #[test]
    fn clear_frees_everything() {
        let mut forest = BinomialForest::new(HeapOrder::Min);
        let mut heap = Heap::new();
        let ids: Vec<NodeId> = (0..20).map(|k| forest.insert(&mut heap, k)).collect();
        forest.clear(&mut heap);
        assert!(heap.is_empty());
        assert_eq!(forest.node_count(), 0);
        assert!(ids.iter().all(|&v| !forest.contains(v)));
        // The emptied heap is immediately reusable.
        forest.insert(&mut heap, 9);
        assert_eq!(forest.peek(&heap), Some(9));
    }
}
