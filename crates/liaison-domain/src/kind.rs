//! Relationship vocabulary
//!
//! Relationship kinds are an open string vocabulary, but creation and update
//! validate against this curated list so that typos do not silently fork the
//! vocabulary. Hierarchy kinds get special treatment: they are the only edges
//! subject to the acyclicity invariant.

/// `parent_of` - source is the hierarchical parent of target
pub const PARENT_OF: &str = "parent_of";

/// `subsidiary_of` - source is a subsidiary of target
pub const SUBSIDIARY_OF: &str = "subsidiary_of";

/// Curated relationship kinds accepted at creation time
pub const KNOWN_KINDS: &[&str] = &[
    "member_of",
    "participates_in",
    "cooperates_with",
    "bilateral_relation",
    "partnership",
    PARENT_OF,
    SUBSIDIARY_OF,
    "related_to",
    "represents",
    "hosted_by",
    "sponsored_by",
    "involves",
    "discusses",
    "participant_in",
    "observer_of",
    "affiliate_of",
    "successor_of",
    "predecessor_of",
];

/// Whether `kind` is in the curated vocabulary
pub fn is_known(kind: &str) -> bool {
    KNOWN_KINDS.contains(&kind)
}

/// Whether `kind` is a hierarchy kind (`parent_of` / `subsidiary_of`)
///
/// Hierarchy edges must never form a cycle; ordinary edges may.
pub fn is_hierarchy(kind: &str) -> bool {
    kind == PARENT_OF || kind == SUBSIDIARY_OF
}
