//! Traversal direction parameters and result annotations

/// Which edges to follow from a node during queries and traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Follow edges where the node is the source
    Outgoing,

    /// Follow edges where the node is the target
    Incoming,

    /// Follow edges in both orientations
    #[default]
    Both,
}

/// Orientation of a stored edge relative to a queried node
///
/// Annotated on bidirectional query results: `Outgoing` when the queried node
/// is the stored source, `Incoming` when it is the stored target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// The queried node is the edge's source
    Outgoing,

    /// The queried node is the edge's target
    Incoming,
}

impl EdgeDirection {
    /// Get the direction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeDirection::Outgoing => "outgoing",
            EdgeDirection::Incoming => "incoming",
        }
    }
}
