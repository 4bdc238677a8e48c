//! Edge lifecycle and query surface

use std::collections::HashMap;
use std::fmt::Display;

use liaison_domain::traits::{EdgeQuery, EdgeStore};
use liaison_domain::{
    current_timestamp_millis, kind, Direction, DossierId, DossierRef, EdgeDirection, Metadata,
    Relationship, RelationshipId, RelationshipStatus,
};

use crate::RelationError;

/// Request to create a new relationship edge
#[derive(Debug, Clone)]
pub struct NewRelationship {
    /// Source dossier
    pub source_id: DossierId,

    /// Target dossier
    pub target_id: DossierId,

    /// Relationship kind
    pub kind: String,

    /// Free-form metadata (defaults to empty)
    pub metadata: Option<Metadata>,

    /// English notes
    pub notes_en: Option<String>,

    /// Arabic notes
    pub notes_ar: Option<String>,

    /// Effective-from bound (defaults to creation time)
    pub effective_from: Option<u64>,

    /// Effective-to bound
    pub effective_to: Option<u64>,

    /// Initial status (defaults to active)
    pub status: Option<RelationshipStatus>,
}

impl NewRelationship {
    /// A minimal request with only the required fields set
    pub fn new(source_id: DossierId, target_id: DossierId, kind: impl Into<String>) -> Self {
        Self {
            source_id,
            target_id,
            kind: kind.into(),
            metadata: None,
            notes_en: None,
            notes_ar: None,
            effective_from: None,
            effective_to: None,
            status: None,
        }
    }
}

/// Partial update to an existing edge
///
/// An edge's endpoints are immutable; a patch can change the kind, metadata,
/// notes, temporal bounds, and status, nothing else.
#[derive(Debug, Clone, Default)]
pub struct RelationshipPatch {
    /// New relationship kind
    pub kind: Option<String>,

    /// Replacement metadata
    pub metadata: Option<Metadata>,

    /// New English notes
    pub notes_en: Option<String>,

    /// New Arabic notes
    pub notes_ar: Option<String>,

    /// New effective-from bound
    pub effective_from: Option<u64>,

    /// New effective-to bound
    pub effective_to: Option<u64>,

    /// New status
    pub status: Option<RelationshipStatus>,
}

impl RelationshipPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.metadata.is_none()
            && self.notes_en.is_none()
            && self.notes_ar.is_none()
            && self.effective_from.is_none()
            && self.effective_to.is_none()
            && self.status.is_none()
    }
}

/// Filter for [`RelationshipManager::relationships_for`]
#[derive(Debug, Clone, Default)]
pub struct RelationshipFilter {
    /// Restrict to one kind
    pub kind: Option<String>,

    /// Restrict to one status (overrides `include_historical`)
    pub status: Option<RelationshipStatus>,

    /// When no explicit status is given, include historical and terminated
    /// edges instead of active-only
    pub include_historical: bool,

    /// Maximum results
    pub limit: Option<usize>,

    /// Results to skip
    pub offset: Option<usize>,
}

/// An edge annotated with its orientation relative to a queried dossier
#[derive(Debug, Clone)]
pub struct AnnotatedRelationship {
    /// The edge itself
    pub relationship: Relationship,

    /// Orientation relative to the queried dossier
    pub direction: EdgeDirection,
}

/// A normalized adjacency entry: the read primitive for graph traversal
///
/// `source_id` is always the queried node and `target_id` the far endpoint,
/// regardless of which side of the stored edge the queried node occupies.
#[derive(Debug, Clone)]
pub struct AdjacentEdge {
    /// The queried node
    pub source_id: DossierId,

    /// The far endpoint
    pub target_id: DossierId,

    /// Relationship kind traversed
    pub kind: String,

    /// Stored orientation of the underlying edge
    pub direction: EdgeDirection,

    /// Edge metadata
    pub metadata: Metadata,
}

/// Per-node relationship statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipStats {
    /// Total edges touching the node
    pub total: usize,

    /// Edges where the node is the source
    pub outgoing: usize,

    /// Edges where the node is the target
    pub incoming: usize,

    /// Edge count per relationship kind
    pub by_kind: HashMap<String, usize>,
}

/// The Relationship Manager owns edge lifecycle and the acyclicity invariant
///
/// Edges are created and mutated only through this component; retirement is a
/// soft status transition ([`terminate`](Self::terminate)). The lone
/// hard-delete path, [`purge`](Self::purge), is an administrative escape
/// hatch.
pub struct RelationshipManager<S> {
    store: S,
}

impl<S> RelationshipManager<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Recover the underlying store
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: EdgeStore> RelationshipManager<S>
where
    S::Error: Display,
{
    /// Create a new relationship edge
    ///
    /// Validation order: self-loop, kind vocabulary, dossier existence,
    /// temporal range (after defaulting `effective_from` to now), duplicate
    /// active (source, target, kind). Hierarchy acyclicity is NOT checked
    /// here. Callers inserting `parent_of`/`subsidiary_of` edges must run
    /// [`validate_hierarchy`](Self::validate_hierarchy) first, so that
    /// ordinary kinds skip the extra ancestor lookups.
    pub fn create(&mut self, request: NewRelationship) -> Result<Relationship, RelationError> {
        if request.source_id == request.target_id {
            return Err(RelationError::InvalidReference);
        }

        if !kind::is_known(&request.kind) {
            return Err(RelationError::UnknownKind(request.kind));
        }

        for id in [request.source_id, request.target_id] {
            if self.dossier(id)?.is_none() {
                return Err(RelationError::UnknownDossier(id));
            }
        }

        let now = current_timestamp_millis();
        let effective_from = request.effective_from.or(Some(now));
        if let (Some(from), Some(to)) = (effective_from, request.effective_to) {
            if to < from {
                return Err(RelationError::InvalidTemporalRange);
            }
        }

        let duplicates = self
            .store
            .query_edges(&EdgeQuery {
                source: Some(request.source_id),
                target: Some(request.target_id),
                kinds: Some(vec![request.kind.clone()]),
                status: Some(RelationshipStatus::Active),
                ..Default::default()
            })
            .map_err(|e| RelationError::Store(e.to_string()))?;
        if !duplicates.is_empty() {
            return Err(RelationError::Duplicate { kind: request.kind });
        }

        let edge = Relationship {
            id: RelationshipId::new(),
            source_id: request.source_id,
            target_id: request.target_id,
            kind: request.kind,
            status: request.status.unwrap_or(RelationshipStatus::Active),
            metadata: request.metadata.unwrap_or_default(),
            notes_en: request.notes_en,
            notes_ar: request.notes_ar,
            effective_from,
            effective_to: request.effective_to,
            created_at: now,
            updated_at: now,
        };

        self.store
            .insert_edge(edge.clone())
            .map_err(|e| RelationError::Store(e.to_string()))?;

        tracing::debug!(
            "Created {} relationship {} -> {}",
            edge.kind,
            edge.source_id,
            edge.target_id
        );
        Ok(edge)
    }

    /// Apply a partial update to an edge
    ///
    /// Re-validates the kind and the merged temporal range. Endpoints cannot
    /// be moved; create a new edge instead.
    pub fn update(
        &mut self,
        id: RelationshipId,
        patch: RelationshipPatch,
    ) -> Result<Relationship, RelationError> {
        if patch.is_empty() {
            return Err(RelationError::NoFieldsToUpdate);
        }

        let mut edge = self.require(id)?;

        if let Some(new_kind) = patch.kind {
            if !kind::is_known(&new_kind) {
                return Err(RelationError::UnknownKind(new_kind));
            }
            edge.kind = new_kind;
        }
        if let Some(metadata) = patch.metadata {
            edge.metadata = metadata;
        }
        if let Some(notes) = patch.notes_en {
            edge.notes_en = Some(notes);
        }
        if let Some(notes) = patch.notes_ar {
            edge.notes_ar = Some(notes);
        }
        if let Some(from) = patch.effective_from {
            edge.effective_from = Some(from);
        }
        if let Some(to) = patch.effective_to {
            edge.effective_to = Some(to);
        }
        if let Some(status) = patch.status {
            edge.status = status;
        }

        if !edge.temporal_range_valid() {
            return Err(RelationError::InvalidTemporalRange);
        }

        edge.updated_at = current_timestamp_millis();
        self.store
            .update_edge(&edge)
            .map_err(|e| RelationError::Store(e.to_string()))?;

        tracing::debug!("Updated relationship {}", edge.id);
        Ok(edge)
    }

    /// Soft-terminate an edge
    ///
    /// Sets `status = terminated` and stamps `effective_to` with the current
    /// time. Idempotent: terminating an already-terminated edge is a no-op
    /// that preserves the original `effective_to`.
    pub fn terminate(&mut self, id: RelationshipId) -> Result<Relationship, RelationError> {
        let mut edge = self.require(id)?;

        if edge.status == RelationshipStatus::Terminated {
            return Ok(edge);
        }

        edge.status = RelationshipStatus::Terminated;
        edge.effective_to = Some(current_timestamp_millis());
        edge.updated_at = current_timestamp_millis();

        self.store
            .update_edge(&edge)
            .map_err(|e| RelationError::Store(e.to_string()))?;

        tracing::info!(
            "Terminated {} relationship {} -> {}",
            edge.kind,
            edge.source_id,
            edge.target_id
        );
        Ok(edge)
    }

    /// Hard-delete an edge (administrative escape hatch)
    ///
    /// Normal flows retire edges via [`terminate`](Self::terminate); this
    /// removes the row outright. Returns whether a row was removed.
    pub fn purge(&mut self, id: RelationshipId) -> Result<bool, RelationError> {
        let removed = self
            .store
            .delete_edge(id)
            .map_err(|e| RelationError::Store(e.to_string()))?;
        if removed {
            tracing::warn!("Purged relationship {}", id);
        }
        Ok(removed)
    }

    /// Get an edge by id
    pub fn get(&self, id: RelationshipId) -> Result<Option<Relationship>, RelationError> {
        self.store
            .get_edge(id)
            .map_err(|e| RelationError::Store(e.to_string()))
    }

    /// Get the minimal projection for a dossier
    pub fn dossier(&self, id: DossierId) -> Result<Option<DossierRef>, RelationError> {
        self.store
            .get_dossier(id)
            .map_err(|e| RelationError::Store(e.to_string()))
    }

    /// All relationships touching a dossier (bidirectional), annotated with
    /// the edge's orientation relative to that dossier
    pub fn relationships_for(
        &self,
        dossier_id: DossierId,
        filter: &RelationshipFilter,
    ) -> Result<Vec<AnnotatedRelationship>, RelationError> {
        let status = match (filter.status, filter.include_historical) {
            (Some(status), _) => Some(status),
            (None, false) => Some(RelationshipStatus::Active),
            (None, true) => None,
        };

        let edges = self
            .store
            .query_edges(&EdgeQuery {
                either: Some(dossier_id),
                kinds: filter.kind.clone().map(|k| vec![k]),
                status,
                limit: filter.limit,
                offset: filter.offset,
                ..Default::default()
            })
            .map_err(|e| RelationError::Store(e.to_string()))?;

        Ok(edges
            .into_iter()
            .map(|relationship| {
                let direction = if relationship.source_id == dossier_id {
                    EdgeDirection::Outgoing
                } else {
                    EdgeDirection::Incoming
                };
                AnnotatedRelationship {
                    relationship,
                    direction,
                }
            })
            .collect())
    }

    /// Normalized adjacency for a dossier: the read primitive used by the
    /// graph traversal engine
    ///
    /// The far endpoint is always reported as `target_id` regardless of the
    /// stored orientation. Only active edges are followed unless
    /// `include_inactive` is set.
    pub fn adjacent(
        &self,
        dossier_id: DossierId,
        direction: Direction,
        kinds: Option<&[String]>,
        include_inactive: bool,
    ) -> Result<Vec<AdjacentEdge>, RelationError> {
        let mut query = EdgeQuery {
            kinds: kinds.map(|k| k.to_vec()),
            status: if include_inactive {
                None
            } else {
                Some(RelationshipStatus::Active)
            },
            ..Default::default()
        };
        match direction {
            Direction::Outgoing => query.source = Some(dossier_id),
            Direction::Incoming => query.target = Some(dossier_id),
            Direction::Both => query.either = Some(dossier_id),
        }

        let edges = self
            .store
            .query_edges(&query)
            .map_err(|e| RelationError::Store(e.to_string()))?;

        Ok(edges
            .into_iter()
            .map(|edge| {
                if edge.target_id == dossier_id {
                    AdjacentEdge {
                        source_id: dossier_id,
                        target_id: edge.source_id,
                        kind: edge.kind,
                        direction: EdgeDirection::Incoming,
                        metadata: edge.metadata,
                    }
                } else {
                    AdjacentEdge {
                        source_id: edge.source_id,
                        target_id: edge.target_id,
                        kind: edge.kind,
                        direction: EdgeDirection::Outgoing,
                        metadata: edge.metadata,
                    }
                }
            })
            .collect())
    }

    /// Relationship statistics for a dossier, across all statuses
    pub fn stats(&self, dossier_id: DossierId) -> Result<RelationshipStats, RelationError> {
        let edges = self
            .store
            .query_edges(&EdgeQuery::touching(dossier_id))
            .map_err(|e| RelationError::Store(e.to_string()))?;

        let mut stats = RelationshipStats {
            total: edges.len(),
            outgoing: 0,
            incoming: 0,
            by_kind: HashMap::new(),
        };
        for edge in &edges {
            if edge.source_id == dossier_id {
                stats.outgoing += 1;
            } else {
                stats.incoming += 1;
            }
            *stats.by_kind.entry(edge.kind.clone()).or_insert(0) += 1;
        }
        Ok(stats)
    }

    pub(crate) fn require(&self, id: RelationshipId) -> Result<Relationship, RelationError> {
        self.get(id)?.ok_or(RelationError::NotFound(id))
    }
}
