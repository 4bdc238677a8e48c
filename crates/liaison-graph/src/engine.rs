//! Engine handle and limits

use std::fmt::Display;

use liaison_domain::traits::EdgeStore;
use liaison_domain::{DossierId, DossierRef};
use liaison_relations::RelationshipManager;

use crate::GraphError;

/// Work bounds for graph operations
#[derive(Debug, Clone, Copy)]
pub struct GraphLimits {
    /// Hard ceiling on requested traversal depth
    pub max_depth_ceiling: u32,

    /// Depth used when a caller does not specify one
    pub default_depth: u32,

    /// Maximum nodes processed in a single traversal or cycle walk
    pub complexity_budget: usize,
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            max_depth_ceiling: 10,
            default_depth: 5,
            complexity_budget: 10_000,
        }
    }
}

/// The graph traversal engine
///
/// Borrows the relationship manager and reads exclusively through its
/// normalized [`adjacent`](RelationshipManager::adjacent) primitive and
/// dossier projections. Holds no cross-call state.
pub struct GraphEngine<'a, S> {
    relations: &'a RelationshipManager<S>,
    limits: GraphLimits,
}

impl<'a, S> GraphEngine<'a, S> {
    /// Create an engine with default limits
    pub fn new(relations: &'a RelationshipManager<S>) -> Self {
        Self::with_limits(relations, GraphLimits::default())
    }

    /// Create an engine with explicit limits
    ///
    /// Mainly for tests and callers that need a tighter budget.
    pub fn with_limits(relations: &'a RelationshipManager<S>, limits: GraphLimits) -> Self {
        Self { relations, limits }
    }

    /// The configured limits
    pub fn limits(&self) -> GraphLimits {
        self.limits
    }

    pub(crate) fn relations(&self) -> &'a RelationshipManager<S> {
        self.relations
    }

    pub(crate) fn check_depth(&self, requested: u32) -> Result<(), GraphError> {
        if requested > self.limits.max_depth_ceiling {
            return Err(GraphError::DepthExceeded {
                requested,
                ceiling: self.limits.max_depth_ceiling,
            });
        }
        Ok(())
    }
}

impl<'a, S: EdgeStore> GraphEngine<'a, S>
where
    S::Error: Display,
{
    pub(crate) fn require_start(&self, start: DossierId) -> Result<DossierRef, GraphError> {
        self.relations
            .dossier(start)?
            .ok_or(GraphError::StartNotFound(start))
    }
}
