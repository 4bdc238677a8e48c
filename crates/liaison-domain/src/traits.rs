//! Trait definitions for the storage boundary
//!
//! These traits define the seam between the graph core and the backing
//! relational store. Infrastructure implementations live in other crates
//! (liaison-store).

use crate::dossier::{DossierId, DossierRef};
use crate::relationship::{Relationship, RelationshipId, RelationshipStatus};

/// Trait for the relational edge store
///
/// The store provides transactional single-row CRUD and indexed point queries.
/// Implemented by the infrastructure layer (liaison-store).
pub trait EdgeStore {
    /// Error type for store operations
    type Error;

    /// Insert a new edge row
    fn insert_edge(&mut self, edge: Relationship) -> Result<RelationshipId, Self::Error>;

    /// Overwrite an existing edge row
    fn update_edge(&mut self, edge: &Relationship) -> Result<(), Self::Error>;

    /// Get an edge by id
    fn get_edge(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error>;

    /// Hard-delete an edge row (administrative escape hatch only)
    ///
    /// Returns whether a row was removed. Normal retirement goes through the
    /// manager's soft termination.
    fn delete_edge(&mut self, id: RelationshipId) -> Result<bool, Self::Error>;

    /// Query edges matching the given criteria
    fn query_edges(&self, query: &EdgeQuery) -> Result<Vec<Relationship>, Self::Error>;

    /// Get the minimal projection for a dossier
    fn get_dossier(&self, id: DossierId) -> Result<Option<DossierRef>, Self::Error>;
}

/// Query criteria for retrieving edges
#[derive(Debug, Clone, Default)]
pub struct EdgeQuery {
    /// Match edges with this source
    pub source: Option<DossierId>,

    /// Match edges with this target
    pub target: Option<DossierId>,

    /// Match edges where this dossier is either endpoint
    pub either: Option<DossierId>,

    /// Filter by relationship kinds
    pub kinds: Option<Vec<String>>,

    /// Filter by status
    pub status: Option<RelationshipStatus>,

    /// Maximum results to return
    pub limit: Option<usize>,

    /// Results to skip (pagination)
    pub offset: Option<usize>,
}

impl EdgeQuery {
    /// Edges touching `id` as either endpoint
    pub fn touching(id: DossierId) -> Self {
        Self {
            either: Some(id),
            ..Default::default()
        }
    }
}

/// One row of a store-side recursive traversal
#[derive(Debug, Clone)]
pub struct TraversalRow {
    /// Dossier reached by the walk
    pub dossier_id: DossierId,

    /// Hop distance from the start node
    pub degree: u32,

    /// Node-id sequence from the start to this dossier (inclusive)
    pub path: Vec<DossierId>,

    /// Relationship kind for each hop in `path` (length = path.len() - 1)
    pub kind_path: Vec<String>,
}

/// A store-side shortest-path result
#[derive(Debug, Clone)]
pub struct PathRow {
    /// Node-id sequence from source to target (inclusive)
    pub path: Vec<DossierId>,

    /// Relationship kind for each hop
    pub kind_path: Vec<String>,

    /// Hop count (path.len() - 1)
    pub length: u32,
}

/// Optional server-side recursive-query accelerator
///
/// Stores that can evaluate recursive queries (e.g. SQL `WITH RECURSIVE`)
/// implement this alongside [`EdgeStore`]. The graph engine's accelerated
/// operations require this bound; the in-process BFS implementations remain
/// the universal fallback and the correctness reference.
pub trait GraphAccelerator {
    /// Error type for accelerator operations
    type Error;

    /// Walk active edges bidirectionally from `start` up to `max_depth` hops,
    /// optionally restricted to a single relationship kind
    fn recursive_traverse(
        &self,
        start: DossierId,
        max_depth: u32,
        kind_filter: Option<&str>,
    ) -> Result<Vec<TraversalRow>, Self::Error>;

    /// Find one shortest active-edge path from `source` to `target` within
    /// `max_depth` hops
    fn recursive_shortest_path(
        &self,
        source: DossierId,
        target: DossierId,
        max_depth: u32,
    ) -> Result<Option<PathRow>, Self::Error>;
}
