//! Arena-backed binomial forest for meldable priority queues.
//!
//! One [`BinomialForest`] owns a pool of nodes and hosts any number of
//! [`Heap`]s in it. Every heap is a circular ring of binomial-tree roots;
//! siblings at every tree level form circular rings too, which makes
//! melding two heaps a constant-time ring splice followed by an O(log n)
//! consolidation pass. Nodes are addressed by generational [`NodeId`]s that
//! survive every meld and go detectably stale on removal.
//!
//! # Features
//!
//! - **Min or max ordering**, fixed per forest at construction
//! - **Meld** that creates no nodes and invalidates no ids
//! - **Decrease-key** via cut and iterative cascading cut
//! - **Delete** of arbitrary live nodes
//! - **Structural event hook** reporting every link, cut, and removal,
//!   suitable for driving a renderer or trace collector
//! - **Structural queries** (parent, children, rings, ranks, cut marks)
//!   for walking the forest read-only
//!
//! # Example
//!
//! ```rust
//! use binomial_forest::{BinomialForest, Heap, HeapOrder};
//!
//! let mut forest = BinomialForest::new(HeapOrder::Min);
//! let mut heap = Heap::new();
//!
//! let a = forest.insert(&mut heap, 5);
//! forest.insert(&mut heap, 3);
//! forest.decrease_key(&mut heap, a, 1)?;
//!
//! assert_eq!(forest.peek(&heap), Some(1));
//! assert_eq!(forest.extract_extreme(&mut heap)?, 1);
//! assert_eq!(forest.extract_extreme(&mut heap)?, 3);
//! # Ok::<(), binomial_forest::ForestError>(())
//! ```
//!
//! Logging is available behind the `tracing` feature and is compiled out
//! entirely by default.

#[macro_use]
mod macros;

mod arena;
pub mod error;
pub mod events;
pub mod forest;
pub mod node;
pub mod order;
pub mod rank;

pub use arena::Ring;
pub use error::ForestError;
pub use events::{EventHook, StructuralEvent};
pub use forest::{BinomialForest, Heap};
pub use node::{Key, NodeId};
pub use order::HeapOrder;
pub use rank::Rank;
