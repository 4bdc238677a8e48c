//! Liaison Relationship Manager
//!
//! Owns the edge lifecycle: creation, update, soft termination, temporal
//! validation, and the hierarchy-acyclicity invariant. All graph algorithms
//! (liaison-graph) read through this crate's query surface rather than
//! touching the store directly.
//!
//! The manager is generic over any [`liaison_domain::traits::EdgeStore`]
//! implementation; store failures are wrapped as [`RelationError::Store`].

#![warn(missing_docs)]

mod error;
mod hierarchy;
mod manager;

pub use error::RelationError;
pub use hierarchy::HIERARCHY_DEPTH_CEILING;
pub use manager::{
    AdjacentEdge, AnnotatedRelationship, NewRelationship, RelationshipFilter, RelationshipManager,
    RelationshipPatch, RelationshipStats,
};
