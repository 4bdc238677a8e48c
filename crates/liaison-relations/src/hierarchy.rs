//! Hierarchy-acyclicity validation
//!
//! `parent_of`/`subsidiary_of` edges are the only edges subject to a global
//! structural constraint: they must never close a cycle. Validation walks the
//! ancestor chain of the proposed parent and rejects the insert when the
//! proposed child already appears in it.

use std::fmt::Display;

use liaison_domain::traits::{EdgeQuery, EdgeStore};
use liaison_domain::{kind, DossierId, RelationshipStatus};

use crate::{RelationError, RelationshipManager};

/// Maximum ancestor-chain length examined by hierarchy validation
pub const HIERARCHY_DEPTH_CEILING: usize = 10;

impl<S: EdgeStore> RelationshipManager<S>
where
    S::Error: Display,
{
    /// Check that making `parent_id` a hierarchy parent of `child_id` would
    /// not close a cycle
    ///
    /// Walks the ancestor chain of `parent_id` by repeatedly following the
    /// single active inbound `parent_of`/`subsidiary_of` edge, up to
    /// [`HIERARCHY_DEPTH_CEILING`] steps; fails with
    /// [`RelationError::CircularHierarchy`] if `child_id` appears in the
    /// chain.
    ///
    /// The walk is single-parent: it takes the first active inbound hierarchy
    /// edge and stops when none is found. If the data model is ever relaxed
    /// to allow multiple hierarchy parents, this must become an ancestor-set
    /// BFS; that widening is deliberately out of scope.
    ///
    /// Not invoked automatically by [`create`](Self::create): callers insert
    /// hierarchy edges in two steps (validate, then create) so ordinary kinds
    /// skip the ancestor lookups.
    pub fn validate_hierarchy(
        &self,
        parent_id: DossierId,
        child_id: DossierId,
    ) -> Result<(), RelationError> {
        if parent_id == child_id {
            return Err(RelationError::CircularHierarchy {
                parent: parent_id,
                child: child_id,
            });
        }

        let hierarchy_kinds: Vec<String> = vec![
            kind::PARENT_OF.to_string(),
            kind::SUBSIDIARY_OF.to_string(),
        ];

        let mut current = parent_id;
        for _ in 0..HIERARCHY_DEPTH_CEILING {
            let inbound = self
                .store()
                .query_edges(&EdgeQuery {
                    target: Some(current),
                    kinds: Some(hierarchy_kinds.clone()),
                    status: Some(RelationshipStatus::Active),
                    limit: Some(1),
                    ..Default::default()
                })
                .map_err(|e| RelationError::Store(e.to_string()))?;

            let Some(edge) = inbound.into_iter().next() else {
                return Ok(());
            };

            let ancestor = edge.source_id;
            if ancestor == child_id {
                tracing::debug!(
                    "Rejected hierarchy edge {} -> {}: {} is an ancestor of {}",
                    parent_id,
                    child_id,
                    child_id,
                    parent_id
                );
                return Err(RelationError::CircularHierarchy {
                    parent: parent_id,
                    child: child_id,
                });
            }
            current = ancestor;
        }

        // Chain longer than the ceiling: treat as acyclic, matching the
        // bounded walk contract.
        Ok(())
    }
}
