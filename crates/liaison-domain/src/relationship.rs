//! Relationship module - the typed, directional, temporally-scoped edge

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dossier::DossierId;

/// Free-form key/value metadata carried on a relationship
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Unique identifier for a relationship, based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(uuid::Uuid);

impl RelationshipId {
    /// Generate a new UUIDv7-based RelationshipId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Wrap an existing UUID (storage layer deserialization)
    pub fn from_uuid(value: uuid::Uuid) -> Self {
        Self(value)
    }

    /// Parse a RelationshipId from its canonical string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid relationship id: {}", e))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for RelationshipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Relationship lifecycle status
///
/// Termination is soft: edges are retired by status transition, never
/// hard-deleted by normal flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    /// Currently in effect; the only status traversed by default
    Active,

    /// No longer current but kept for the record
    Historical,

    /// Explicitly ended
    Terminated,
}

impl RelationshipStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Active => "active",
            RelationshipStatus::Historical => "historical",
            RelationshipStatus::Terminated => "terminated",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(RelationshipStatus::Active),
            "historical" => Some(RelationshipStatus::Historical),
            "terminated" => Some(RelationshipStatus::Terminated),
            _ => None,
        }
    }
}

impl std::str::FromStr for RelationshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relationship status: {}", s))
    }
}

/// A typed edge between two dossiers
///
/// Edges are created and mutated only through the relationship manager, which
/// enforces the invariants: `source_id != target_id`, and when both temporal
/// bounds are present, `effective_to >= effective_from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Edge identifier
    pub id: RelationshipId,

    /// Source dossier
    pub source_id: DossierId,

    /// Target dossier
    pub target_id: DossierId,

    /// Relationship kind (open vocabulary, e.g. `bilateral_relation`)
    pub kind: String,

    /// Lifecycle status
    pub status: RelationshipStatus,

    /// Free-form metadata
    pub metadata: Metadata,

    /// English notes
    pub notes_en: Option<String>,

    /// Arabic notes
    pub notes_ar: Option<String>,

    /// When the relationship became effective (epoch millis)
    pub effective_from: Option<u64>,

    /// When the relationship ceased to be effective (epoch millis)
    pub effective_to: Option<u64>,

    /// Creation timestamp (epoch millis)
    pub created_at: u64,

    /// Last update timestamp (epoch millis)
    pub updated_at: u64,
}

impl Relationship {
    /// Whether the temporal bounds are consistent
    ///
    /// Holds vacuously when either bound is absent.
    pub fn temporal_range_valid(&self) -> bool {
        match (self.effective_from, self.effective_to) {
            (Some(from), Some(to)) => to >= from,
            _ => true,
        }
    }

    /// Whether this edge is subject to the hierarchy-acyclicity invariant
    pub fn is_hierarchy(&self) -> bool {
        crate::kind::is_hierarchy(&self.kind)
    }
}
