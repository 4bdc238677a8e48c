//! Relationship manager error types

use liaison_domain::{DossierId, RelationshipId};
use thiserror::Error;

/// Errors that can occur during relationship management
///
/// All validation failures are raised before any store mutation, so a failed
/// `create`/`update`/`terminate` call never leaves a partial write behind.
#[derive(Error, Debug)]
pub enum RelationError {
    /// Self-loop: a dossier cannot relate to itself
    #[error("A dossier cannot have a relationship with itself")]
    InvalidReference,

    /// Both temporal bounds present and effective_to < effective_from
    #[error("Invalid temporal range: effective_to precedes effective_from")]
    InvalidTemporalRange,

    /// Relationship kind outside the curated vocabulary
    #[error("Unknown relationship kind: {0}")]
    UnknownKind(String),

    /// An active edge of this kind already exists between the dossiers
    #[error("An active '{kind}' relationship already exists between these dossiers")]
    Duplicate {
        /// The duplicated kind
        kind: String,
    },

    /// Referenced dossier does not exist
    #[error("Dossier not found: {0}")]
    UnknownDossier(DossierId),

    /// Edge not found
    #[error("Relationship not found: {0}")]
    NotFound(RelationshipId),

    /// Inserting the hierarchy edge would close a parent/subsidiary cycle
    #[error("Circular hierarchy: {child} is already an ancestor of {parent}")]
    CircularHierarchy {
        /// Proposed parent
        parent: DossierId,
        /// Proposed child, found in the parent's ancestor chain
        child: DossierId,
    },

    /// Update patch carried no fields
    #[error("No fields to update")]
    NoFieldsToUpdate,

    /// Store error during an operation
    #[error("Store error: {0}")]
    Store(String),
}
