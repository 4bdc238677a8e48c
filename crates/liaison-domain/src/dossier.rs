//! Dossier module - node identity and the minimal projection read by the graph core

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a dossier, based on UUIDv7
///
/// UUIDv7 provides chronological sortability, 128-bit uniqueness, and
/// coordination-free generation. The string form is used as the storage key,
/// so identifiers survive round-trips through TEXT columns unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DossierId(uuid::Uuid);

impl DossierId {
    /// Generate a new UUIDv7-based DossierId
    ///
    /// # Examples
    ///
    /// ```
    /// use liaison_domain::DossierId;
    ///
    /// let id = DossierId::new();
    /// assert_ne!(id, DossierId::new());
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Wrap an existing UUID
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_uuid(value: uuid::Uuid) -> Self {
        Self(value)
    }

    /// Parse a DossierId from its canonical string form
    ///
    /// # Examples
    ///
    /// ```
    /// use liaison_domain::DossierId;
    ///
    /// let id = DossierId::new();
    /// let parsed = DossierId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid dossier id: {}", e))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for DossierId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DossierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dossier entity type (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DossierType {
    /// A country dossier
    Country,

    /// An organization dossier
    Organization,

    /// A multilateral forum
    Forum,

    /// A tracked engagement
    Engagement,

    /// A thematic dossier
    Theme,

    /// A working group
    WorkingGroup,

    /// A person dossier
    Person,
}

impl DossierType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DossierType::Country => "country",
            DossierType::Organization => "organization",
            DossierType::Forum => "forum",
            DossierType::Engagement => "engagement",
            DossierType::Theme => "theme",
            DossierType::WorkingGroup => "working_group",
            DossierType::Person => "person",
        }
    }

    /// Parse a type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "country" => Some(DossierType::Country),
            "organization" => Some(DossierType::Organization),
            "forum" => Some(DossierType::Forum),
            "engagement" => Some(DossierType::Engagement),
            "theme" => Some(DossierType::Theme),
            "working_group" => Some(DossierType::WorkingGroup),
            "person" => Some(DossierType::Person),
            _ => None,
        }
    }
}

impl std::str::FromStr for DossierType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid dossier type: {}", s))
    }
}

/// Dossier lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DossierStatus {
    /// In active use
    Active,

    /// No longer active but still visible
    Inactive,

    /// Archived
    Archived,

    /// Soft-deleted
    Deleted,
}

impl DossierStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DossierStatus::Active => "active",
            DossierStatus::Inactive => "inactive",
            DossierStatus::Archived => "archived",
            DossierStatus::Deleted => "deleted",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(DossierStatus::Active),
            "inactive" => Some(DossierStatus::Inactive),
            "archived" => Some(DossierStatus::Archived),
            "deleted" => Some(DossierStatus::Deleted),
            _ => None,
        }
    }
}

/// Minimal dossier projection read by the graph core
///
/// Dossiers are owned outside this core; traversal results carry only the
/// fields needed for display and downstream filtering. `sensitivity_level`
/// is consumed by the authorization layer, never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DossierRef {
    /// Dossier identifier
    pub id: DossierId,

    /// Entity type
    pub dossier_type: DossierType,

    /// English display name
    pub name_en: String,

    /// Arabic display name
    pub name_ar: String,

    /// Lifecycle status
    pub status: DossierStatus,

    /// Sensitivity classification (opaque to the engine)
    pub sensitivity_level: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_round_trip() {
        for ty in [
            DossierType::Country,
            DossierType::Organization,
            DossierType::Forum,
            DossierType::Engagement,
            DossierType::Theme,
            DossierType::WorkingGroup,
            DossierType::Person,
        ] {
            assert_eq!(DossierType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(DossierType::parse("embassy"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for st in [
            DossierStatus::Active,
            DossierStatus::Inactive,
            DossierStatus::Archived,
            DossierStatus::Deleted,
        ] {
            assert_eq!(DossierStatus::parse(st.as_str()), Some(st));
        }
    }

    #[test]
    fn test_serde_wire_format() {
        // Serde form matches the storage vocabulary strings
        assert_eq!(
            serde_json::to_value(DossierType::WorkingGroup).unwrap(),
            serde_json::Value::String("working_group".to_string())
        );
        assert_eq!(
            serde_json::to_value(DossierStatus::Archived).unwrap(),
            serde_json::Value::String("archived".to_string())
        );

        let d = DossierRef {
            id: DossierId::new(),
            dossier_type: DossierType::Forum,
            name_en: "Regional Forum".to_string(),
            name_ar: String::new(),
            status: DossierStatus::Active,
            sensitivity_level: 2,
        };
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains(&d.id.to_string()));
        let back: DossierRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_id_display_parse() {
        let id = DossierId::new();
        assert_eq!(DossierId::from_string(&id.to_string()), Ok(id));
        assert!(DossierId::from_string("not-a-uuid").is_err());
    }
}
