//! Liaison Graph Traversal Engine
//!
//! Stateless multi-hop analysis over the relationship manager's read surface:
//! bounded breadth-first traversal, shortest path, cycle detection, common
//! connections, and pre-flight complexity estimation. Every call owns its own
//! queue/stack and visited set, so concurrent calls never interfere.
//!
//! Traversal cost is bounded two ways:
//! - a hard depth ceiling on requests ([`GraphLimits::max_depth_ceiling`]),
//!   violated requests fail up front with [`GraphError::DepthExceeded`];
//! - a complexity budget on processed nodes during execution
//!   ([`GraphLimits::complexity_budget`]), exhaustion is soft: the partial
//!   result is returned with `stats.budget_exhausted` set.
//!
//! Stores that implement [`liaison_domain::traits::GraphAccelerator`]
//! additionally get [`GraphEngine::traverse_accelerated`] and
//! [`GraphEngine::shortest_path_accelerated`], which push the walk into the
//! store's recursive query machinery. The in-process implementations remain
//! the behavioral reference; the two paths agree on nodes and depths, though
//! edge ordering may differ.

#![warn(missing_docs)]

mod accel;
mod analysis;
mod cycles;
mod engine;
mod error;
mod paths;
mod traversal;

pub use analysis::{ComplexityEstimate, NetworkStats};
pub use engine::{GraphEngine, GraphLimits};
pub use error::GraphError;
pub use traversal::{GraphData, GraphEdge, GraphNode, TraversalOptions, TraversalStats};
