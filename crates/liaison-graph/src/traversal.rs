//! Bounded breadth-first traversal

use std::collections::{HashSet, VecDeque};
use std::fmt::Display;

use liaison_domain::traits::EdgeStore;
use liaison_domain::{Direction, DossierId, DossierRef};

use crate::{GraphEngine, GraphError};

/// Options for [`GraphEngine::traverse`]
#[derive(Debug, Clone, Default)]
pub struct TraversalOptions {
    /// Maximum hop distance; defaults to [`crate::GraphLimits::default_depth`]
    pub max_depth: Option<u32>,

    /// Restrict the walk to these relationship kinds
    pub kinds: Option<Vec<String>>,

    /// Which edge orientations to follow (default both)
    pub direction: Direction,

    /// Follow historical/terminated edges too
    pub include_inactive: bool,
}

/// A node discovered during traversal
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// The dossier projection
    pub dossier: DossierRef,

    /// Hop distance from the start node (BFS-minimal)
    pub depth: u32,

    /// Node-id sequence from the start to this node (inclusive)
    pub path: Vec<DossierId>,
}

/// An edge encountered during traversal, direction-normalized
///
/// `source_id` is the node from which the edge was first encountered;
/// recorded once per (source, target, kind) triple, with the reverse
/// orientation treated as the same edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Near endpoint
    pub source_id: DossierId,

    /// Far endpoint
    pub target_id: DossierId,

    /// Relationship kind
    pub kind: String,
}

/// Traversal accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalStats {
    /// Number of nodes collected
    pub total_nodes: usize,

    /// Number of distinct edges collected
    pub total_edges: usize,

    /// Deepest hop distance reached
    pub max_depth_reached: u32,

    /// The complexity budget stopped expansion; the result is partial
    pub budget_exhausted: bool,
}

/// Result of a traversal
#[derive(Debug, Clone)]
pub struct GraphData {
    /// Discovered nodes, in discovery order (start node first)
    pub nodes: Vec<GraphNode>,

    /// Discovered edges
    pub edges: Vec<GraphEdge>,

    /// Accounting
    pub stats: TraversalStats,
}

impl<'a, S: EdgeStore> GraphEngine<'a, S>
where
    S::Error: Display,
{
    /// Breadth-first traversal from `start`
    ///
    /// Each node is enqueued at most once, at its first-discovered (hence
    /// minimal) depth, and records the full path from the start. Expansion
    /// stops once the processed-node budget is exhausted; whatever has been
    /// collected so far is returned with `stats.budget_exhausted` set.
    ///
    /// Fails with [`GraphError::DepthExceeded`] when the requested depth is
    /// above the ceiling, and [`GraphError::StartNotFound`] when `start`
    /// does not resolve; both before any walking happens.
    pub fn traverse(
        &self,
        start: DossierId,
        options: &TraversalOptions,
    ) -> Result<GraphData, GraphError> {
        let max_depth = options.max_depth.unwrap_or(self.limits().default_depth);
        self.check_depth(max_depth)?;

        let start_dossier = self.require_start(start)?;

        let mut nodes: Vec<GraphNode> = Vec::new();
        let mut edges: Vec<GraphEdge> = Vec::new();
        let mut seen_edges: HashSet<(DossierId, DossierId, String)> = HashSet::new();
        let mut visited: HashSet<DossierId> = HashSet::new();
        let mut queue: VecDeque<(DossierId, u32, Vec<DossierId>)> = VecDeque::new();

        nodes.push(GraphNode {
            dossier: start_dossier,
            depth: 0,
            path: vec![start],
        });
        visited.insert(start);
        queue.push_back((start, 0, vec![start]));

        let budget = self.limits().complexity_budget;
        let mut processed = 0usize;
        let mut budget_exhausted = false;

        while let Some((current, depth, path)) = queue.pop_front() {
            if processed >= budget {
                budget_exhausted = true;
                tracing::warn!(
                    "Traversal budget of {} nodes exhausted at depth {}; returning partial result",
                    budget,
                    depth
                );
                break;
            }

            if depth >= max_depth {
                continue;
            }
            processed += 1;

            let adjacent = self.relations().adjacent(
                current,
                options.direction,
                options.kinds.as_deref(),
                options.include_inactive,
            )?;

            for entry in adjacent {
                // The reverse orientation is the same underlying edge seen
                // from the other endpoint
                let key = (entry.source_id, entry.target_id, entry.kind.clone());
                let reversed = (entry.target_id, entry.source_id, entry.kind.clone());
                if !seen_edges.contains(&reversed) && seen_edges.insert(key) {
                    edges.push(GraphEdge {
                        source_id: entry.source_id,
                        target_id: entry.target_id,
                        kind: entry.kind,
                    });
                }

                if visited.contains(&entry.target_id) {
                    continue;
                }

                // Dangling edges (target projection missing) are skipped, not fatal
                let Some(dossier) = self.relations().dossier(entry.target_id)? else {
                    continue;
                };

                let mut new_path = path.clone();
                new_path.push(entry.target_id);
                visited.insert(entry.target_id);
                nodes.push(GraphNode {
                    dossier,
                    depth: depth + 1,
                    path: new_path.clone(),
                });
                queue.push_back((entry.target_id, depth + 1, new_path));
            }
        }

        let max_depth_reached = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let stats = TraversalStats {
            total_nodes: nodes.len(),
            total_edges: edges.len(),
            max_depth_reached,
            budget_exhausted,
        };
        tracing::debug!(
            "Traversal from {} collected {} nodes / {} edges (depth {})",
            start,
            stats.total_nodes,
            stats.total_edges,
            stats.max_depth_reached
        );

        Ok(GraphData {
            nodes,
            edges,
            stats,
        })
    }
}
