//! Cycle detection

use std::collections::HashSet;
use std::fmt::Display;

use liaison_domain::traits::EdgeStore;
use liaison_domain::{Direction, DossierId};

use crate::{GraphEngine, GraphError};

enum Frame {
    Enter(DossierId),
    Exit(DossierId),
}

impl<'a, S: EdgeStore> GraphEngine<'a, S>
where
    S::Error: Display,
{
    /// Find cycles reachable from `start` over outgoing active edges
    ///
    /// Depth-first search with an explicit recursion stack: whenever a node
    /// already on the stack is re-encountered, the sub-path from its first
    /// occurrence to the current node, plus the repeated node, is recorded as
    /// one cycle.
    ///
    /// There is no depth ceiling (cycles can be long), but the walk is
    /// bounded by the same processed-node budget as traversal: on a dense
    /// graph it stops expanding once the budget is spent and returns the
    /// cycles found so far. Callers analyzing dense data should pre-filter
    /// the reachable set (e.g. by relationship kind) before invoking this.
    pub fn detect_cycles(&self, start: DossierId) -> Result<Vec<Vec<DossierId>>, GraphError> {
        let mut cycles: Vec<Vec<DossierId>> = Vec::new();
        let mut visited: HashSet<DossierId> = HashSet::new();
        let mut on_stack: HashSet<DossierId> = HashSet::new();
        let mut path: Vec<DossierId> = Vec::new();
        let mut stack: Vec<Frame> = vec![Frame::Enter(start)];

        let budget = self.limits().complexity_budget;
        let mut processed = 0usize;

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(current) => {
                    if visited.contains(&current) {
                        continue;
                    }
                    if processed >= budget {
                        tracing::warn!(
                            "Cycle walk budget of {} nodes exhausted; returning {} cycles found so far",
                            budget,
                            cycles.len()
                        );
                        break;
                    }
                    processed += 1;

                    visited.insert(current);
                    on_stack.insert(current);
                    path.push(current);
                    stack.push(Frame::Exit(current));

                    let adjacent =
                        self.relations()
                            .adjacent(current, Direction::Outgoing, None, false)?;

                    for entry in adjacent {
                        let next = entry.target_id;
                        if !visited.contains(&next) {
                            stack.push(Frame::Enter(next));
                        } else if on_stack.contains(&next) {
                            if let Some(pos) = path.iter().position(|id| *id == next) {
                                let mut cycle = path[pos..].to_vec();
                                cycle.push(next);
                                cycles.push(cycle);
                            }
                        }
                    }
                }
                Frame::Exit(current) => {
                    on_stack.remove(&current);
                    path.pop();
                }
            }
        }

        Ok(cycles)
    }
}
