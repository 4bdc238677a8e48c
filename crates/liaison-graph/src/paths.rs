//! Shortest-path search

use std::collections::{HashSet, VecDeque};
use std::fmt::Display;

use liaison_domain::traits::EdgeStore;
use liaison_domain::{Direction, DossierId};

use crate::{GraphEngine, GraphError};

impl<'a, S: EdgeStore> GraphEngine<'a, S>
where
    S::Error: Display,
{
    /// Shortest path (in hop count) from `start` to `target` over active
    /// edges, both directions
    ///
    /// Returns `Some([start])` when the endpoints coincide, `None` when no
    /// path exists within `max_depth` hops (default
    /// [`crate::GraphLimits::default_depth`]). BFS guarantees the first path
    /// found is hop-minimal.
    pub fn shortest_path(
        &self,
        start: DossierId,
        target: DossierId,
        max_depth: Option<u32>,
    ) -> Result<Option<Vec<DossierId>>, GraphError> {
        let max_depth = max_depth.unwrap_or(self.limits().default_depth);
        self.check_depth(max_depth)?;

        if start == target {
            return Ok(Some(vec![start]));
        }

        let mut visited: HashSet<DossierId> = HashSet::new();
        let mut queue: VecDeque<(DossierId, Vec<DossierId>, u32)> = VecDeque::new();

        visited.insert(start);
        queue.push_back((start, vec![start], 0));

        while let Some((current, path, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }

            let adjacent = self
                .relations()
                .adjacent(current, Direction::Both, None, false)?;

            for entry in adjacent {
                let next = entry.target_id;

                if next == target {
                    let mut found = path.clone();
                    found.push(next);
                    return Ok(Some(found));
                }

                if visited.insert(next) {
                    let mut new_path = path.clone();
                    new_path.push(next);
                    queue.push_back((next, new_path, depth + 1));
                }
            }
        }

        Ok(None)
    }
}
