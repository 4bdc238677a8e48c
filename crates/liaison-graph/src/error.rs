//! Graph engine error types

use liaison_domain::DossierId;
use liaison_relations::RelationError;
use thiserror::Error;

/// Errors that can occur during graph operations
///
/// Budget exhaustion is not in this taxonomy: it is signaled through
/// [`crate::TraversalStats::budget_exhausted`] on a partial result, never as
/// an error.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Requested depth above the hard ceiling (request-time validation)
    #[error("max_depth {requested} exceeds the ceiling of {ceiling}")]
    DepthExceeded {
        /// The requested depth
        requested: u32,
        /// The configured ceiling
        ceiling: u32,
    },

    /// Starting dossier does not resolve
    #[error("Starting dossier not found: {0}")]
    StartNotFound(DossierId),

    /// Failure surfaced by the relationship manager's read surface
    #[error(transparent)]
    Relations(#[from] RelationError),

    /// Failure from a store-side accelerator call
    #[error("Store error: {0}")]
    Store(String),
}
