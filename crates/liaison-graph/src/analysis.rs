//! Neighborhood analysis: common connections, complexity pre-flight, network stats

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use liaison_domain::traits::EdgeStore;
use liaison_domain::{Direction, DossierId, DossierRef, DossierType};

use crate::{GraphEngine, GraphError, TraversalOptions};

/// Pre-flight cost estimate for a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityEstimate {
    /// Projected node count (`degree ^ max_depth`, saturating)
    pub estimated_nodes: u64,

    /// Whether the projection fits the complexity budget
    pub within_budget: bool,
}

/// Network shape around one dossier
#[derive(Debug, Clone)]
pub struct NetworkStats {
    /// Direct (depth-1) connections
    pub degree_centrality: usize,

    /// Reachable nodes excluding the start
    pub network_size: usize,

    /// Edges in the explored neighborhood
    pub total_connections: usize,

    /// Edge count per relationship kind
    pub kind_distribution: HashMap<String, usize>,

    /// Node count per dossier type
    pub type_distribution: HashMap<DossierType, usize>,

    /// Deepest hop distance explored
    pub max_depth_explored: u32,
}

impl<'a, S: EdgeStore> GraphEngine<'a, S>
where
    S::Error: Display,
{
    /// Dossiers connected to both `a` and `b` (either direction, active edges)
    ///
    /// Adjacency set intersection resolved back to dossier projections;
    /// empty when the two share no neighbor.
    pub fn common_connections(
        &self,
        a: DossierId,
        b: DossierId,
    ) -> Result<Vec<DossierRef>, GraphError> {
        let neighbors_a = self.relations().adjacent(a, Direction::Both, None, false)?;
        let neighbors_b = self.relations().adjacent(b, Direction::Both, None, false)?;

        let set_b: HashSet<DossierId> = neighbors_b.iter().map(|e| e.target_id).collect();

        let mut seen: HashSet<DossierId> = HashSet::new();
        let mut common = Vec::new();
        for entry in &neighbors_a {
            let id = entry.target_id;
            if set_b.contains(&id) && seen.insert(id) {
                if let Some(dossier) = self.relations().dossier(id)? {
                    common.push(dossier);
                }
            }
        }
        Ok(common)
    }

    /// Estimate traversal cost before issuing it
    ///
    /// Samples the start node's degree and projects `degree ^ max_depth`
    /// against the complexity budget. A rough heuristic for warning users
    /// ahead of an expensive traversal, not an exact bound.
    pub fn estimate_complexity(
        &self,
        start: DossierId,
        max_depth: u32,
    ) -> Result<ComplexityEstimate, GraphError> {
        let degree = self
            .relations()
            .adjacent(start, Direction::Both, None, false)?
            .len() as u64;

        let estimated_nodes = degree.saturating_pow(max_depth);
        Ok(ComplexityEstimate {
            estimated_nodes,
            within_budget: estimated_nodes <= self.limits().complexity_budget as u64,
        })
    }

    /// Network statistics for a dossier's neighborhood
    ///
    /// Runs a bidirectional traversal (default depth 2) and summarizes
    /// degree centrality, reach, and kind/type distributions.
    pub fn network_stats(
        &self,
        dossier_id: DossierId,
        max_depth: Option<u32>,
    ) -> Result<NetworkStats, GraphError> {
        let graph = self.traverse(
            dossier_id,
            &TraversalOptions {
                max_depth: Some(max_depth.unwrap_or(2)),
                ..Default::default()
            },
        )?;

        let degree_centrality = graph.nodes.iter().filter(|n| n.depth == 1).count();

        let mut kind_distribution: HashMap<String, usize> = HashMap::new();
        for edge in &graph.edges {
            *kind_distribution.entry(edge.kind.clone()).or_insert(0) += 1;
        }

        let mut type_distribution: HashMap<DossierType, usize> = HashMap::new();
        for node in &graph.nodes {
            *type_distribution
                .entry(node.dossier.dossier_type)
                .or_insert(0) += 1;
        }

        Ok(NetworkStats {
            degree_centrality,
            network_size: graph.nodes.len().saturating_sub(1),
            total_connections: graph.edges.len(),
            kind_distribution,
            type_distribution,
            max_depth_explored: graph.stats.max_depth_reached,
        })
    }
}
