//! Liaison Storage Layer
//!
//! SQLite-backed implementation of the [`EdgeStore`] trait: dossier
//! projections and the relational edge table the graph core reads through.
//! Also implements the optional [`GraphAccelerator`] seam with `WITH
//! RECURSIVE` queries (see [`accel`]).
//!
//! # Thread Safety
//!
//! SQLite connections are not thread-safe. Each thread should have its own
//! `SqliteStore` instance.
//!
//! # Examples
//!
//! ```no_run
//! use liaison_store::SqliteStore;
//!
//! let store = SqliteStore::open_in_memory().unwrap();
//! // Store is now ready for dossier and relationship operations
//! ```

#![warn(missing_docs)]

pub mod accel;

use liaison_domain::traits::{EdgeQuery, EdgeStore};
use liaison_domain::{
    DossierId, DossierRef, DossierStatus, DossierType, Metadata, Relationship, RelationshipId,
    RelationshipStatus,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format in a stored row
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of the edge store
///
/// Provides persistent storage for dossier projections and relationships,
/// with indexed lookups by source, target, kind, and status.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory store (useful for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Apply the schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Insert a dossier projection row
    ///
    /// Dossier lifecycle is owned outside this core; this exists so the
    /// graph engine has node projections to resolve against.
    pub fn insert_dossier(&mut self, dossier: &DossierRef) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO dossiers (id, dossier_type, name_en, name_ar, status, sensitivity_level)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                dossier.id.to_string(),
                dossier.dossier_type.as_str(),
                dossier.name_en,
                dossier.name_ar,
                dossier.status.as_str(),
                dossier.sensitivity_level,
            ],
        )?;
        Ok(())
    }

    fn map_edge_row(row: &Row<'_>) -> rusqlite::Result<Relationship> {
        let id: String = row.get(0)?;
        let source: String = row.get(1)?;
        let target: String = row.get(2)?;
        let status: String = row.get(4)?;
        let metadata: String = row.get(5)?;
        let effective_from: Option<i64> = row.get(8)?;
        let effective_to: Option<i64> = row.get(9)?;

        Ok(Relationship {
            id: parse_relationship_id(&id, 0)?,
            source_id: parse_dossier_id(&source, 1)?,
            target_id: parse_dossier_id(&target, 2)?,
            kind: row.get(3)?,
            status: parse_status(&status, 4)?,
            metadata: parse_metadata(&metadata, 5)?,
            notes_en: row.get(6)?,
            notes_ar: row.get(7)?,
            effective_from: effective_from.map(|v| v as u64),
            effective_to: effective_to.map(|v| v as u64),
            created_at: row.get::<_, i64>(10)? as u64,
            updated_at: row.get::<_, i64>(11)? as u64,
        })
    }
}

const EDGE_COLUMNS: &str = "id, source_dossier_id, target_dossier_id, relationship_type, status, \
                            relationship_metadata, notes_en, notes_ar, effective_from, \
                            effective_to, created_at, updated_at";

fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        rusqlite::types::Type::Text,
        Box::new(StoreError::InvalidData(message)),
    )
}

fn parse_dossier_id(s: &str, index: usize) -> rusqlite::Result<DossierId> {
    DossierId::from_string(s).map_err(|e| conversion_error(index, e))
}

fn parse_relationship_id(s: &str, index: usize) -> rusqlite::Result<RelationshipId> {
    RelationshipId::from_string(s).map_err(|e| conversion_error(index, e))
}

fn parse_status(s: &str, index: usize) -> rusqlite::Result<RelationshipStatus> {
    RelationshipStatus::parse(s)
        .ok_or_else(|| conversion_error(index, format!("Unknown relationship status: {}", s)))
}

fn parse_metadata(s: &str, index: usize) -> rusqlite::Result<Metadata> {
    let value: serde_json::Value = serde_json::from_str(s)
        .map_err(|e| conversion_error(index, format!("Bad metadata JSON: {}", e)))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(conversion_error(
            index,
            format!("Metadata is not a JSON object: {}", other),
        )),
    }
}

impl EdgeStore for SqliteStore {
    type Error = StoreError;

    fn insert_edge(&mut self, edge: Relationship) -> Result<RelationshipId, Self::Error> {
        let metadata = serde_json::Value::Object(edge.metadata.clone()).to_string();

        self.conn.execute(
            "INSERT INTO dossier_relationships
             (id, source_dossier_id, target_dossier_id, relationship_type, status,
              relationship_metadata, notes_en, notes_ar, effective_from, effective_to,
              created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                edge.id.to_string(),
                edge.source_id.to_string(),
                edge.target_id.to_string(),
                edge.kind,
                edge.status.as_str(),
                metadata,
                edge.notes_en,
                edge.notes_ar,
                edge.effective_from.map(|v| v as i64),
                edge.effective_to.map(|v| v as i64),
                edge.created_at as i64,
                edge.updated_at as i64,
            ],
        )?;

        Ok(edge.id)
    }

    fn update_edge(&mut self, edge: &Relationship) -> Result<(), Self::Error> {
        let metadata = serde_json::Value::Object(edge.metadata.clone()).to_string();

        let changed = self.conn.execute(
            "UPDATE dossier_relationships
             SET relationship_type = ?2, status = ?3, relationship_metadata = ?4,
                 notes_en = ?5, notes_ar = ?6, effective_from = ?7, effective_to = ?8,
                 updated_at = ?9
             WHERE id = ?1",
            params![
                edge.id.to_string(),
                edge.kind,
                edge.status.as_str(),
                metadata,
                edge.notes_en,
                edge.notes_ar,
                edge.effective_from.map(|v| v as i64),
                edge.effective_to.map(|v| v as i64),
                edge.updated_at as i64,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(edge.id.to_string()));
        }
        Ok(())
    }

    fn get_edge(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM dossier_relationships WHERE id = ?1",
            EDGE_COLUMNS
        );
        let edge = self
            .conn
            .query_row(&sql, params![id.to_string()], Self::map_edge_row)
            .optional()?;
        Ok(edge)
    }

    fn delete_edge(&mut self, id: RelationshipId) -> Result<bool, Self::Error> {
        let changed = self.conn.execute(
            "DELETE FROM dossier_relationships WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }

    fn query_edges(&self, query: &EdgeQuery) -> Result<Vec<Relationship>, Self::Error> {
        let mut sql = format!(
            "SELECT {} FROM dossier_relationships WHERE 1=1",
            EDGE_COLUMNS
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(source) = query.source {
            sql.push_str(" AND source_dossier_id = ?");
            params.push(Box::new(source.to_string()));
        }

        if let Some(target) = query.target {
            sql.push_str(" AND target_dossier_id = ?");
            params.push(Box::new(target.to_string()));
        }

        if let Some(either) = query.either {
            sql.push_str(" AND (source_dossier_id = ? OR target_dossier_id = ?)");
            params.push(Box::new(either.to_string()));
            params.push(Box::new(either.to_string()));
        }

        if let Some(kinds) = &query.kinds {
            if !kinds.is_empty() {
                let placeholders = vec!["?"; kinds.len()].join(", ");
                sql.push_str(&format!(" AND relationship_type IN ({})", placeholders));
                for kind in kinds {
                    params.push(Box::new(kind.clone()));
                }
            }
        }

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            params.push(Box::new(status.as_str().to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        } else if query.offset.is_some() {
            // SQLite needs a LIMIT clause before OFFSET; -1 means unbounded
            sql.push_str(" LIMIT -1");
        }

        if let Some(offset) = query.offset {
            sql.push_str(" OFFSET ?");
            params.push(Box::new(offset as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let edges = stmt
            .query_map(&param_refs[..], Self::map_edge_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(edges)
    }

    fn get_dossier(&self, id: DossierId) -> Result<Option<DossierRef>, Self::Error> {
        let dossier = self
            .conn
            .query_row(
                "SELECT id, dossier_type, name_en, name_ar, status, sensitivity_level
                 FROM dossiers WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    let id: String = row.get(0)?;
                    let ty: String = row.get(1)?;
                    let status: String = row.get(4)?;

                    Ok(DossierRef {
                        id: parse_dossier_id(&id, 0)?,
                        dossier_type: DossierType::parse(&ty).ok_or_else(|| {
                            conversion_error(1, format!("Unknown dossier type: {}", ty))
                        })?,
                        name_en: row.get(2)?,
                        name_ar: row.get(3)?,
                        status: DossierStatus::parse(&status).ok_or_else(|| {
                            conversion_error(4, format!("Unknown dossier status: {}", status))
                        })?,
                        sensitivity_level: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(dossier)
    }
}
