//! Recursive-query accelerator
//!
//! Implements [`GraphAccelerator`] for [`SqliteStore`] using `WITH RECURSIVE`
//! common table expressions. The walk follows active edges in both
//! orientations, carrying the visited path as a comma-joined id list so a
//! branch never revisits its own ancestry. Rows are returned raw; the graph
//! engine reshapes them (minimum-degree dedup, edge extraction from paths).

use liaison_domain::traits::{GraphAccelerator, PathRow, TraversalRow};
use liaison_domain::DossierId;
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

// Each recursion step extends the frontier over one active edge, stepping to
// the far endpoint regardless of stored orientation. The instr() guard keeps
// every branch a simple path.
const RECURSIVE_WALK: &str = "
WITH RECURSIVE walk(dossier_id, degree, path, kind_path) AS (
    SELECT ?1, 0, ?1, ''
    UNION ALL
    SELECT
        CASE WHEN r.source_dossier_id = w.dossier_id
             THEN r.target_dossier_id ELSE r.source_dossier_id END,
        w.degree + 1,
        w.path || ',' ||
            CASE WHEN r.source_dossier_id = w.dossier_id
                 THEN r.target_dossier_id ELSE r.source_dossier_id END,
        CASE WHEN w.kind_path = '' THEN r.relationship_type
             ELSE w.kind_path || ',' || r.relationship_type END
    FROM dossier_relationships r
    JOIN walk w
      ON r.source_dossier_id = w.dossier_id
      OR r.target_dossier_id = w.dossier_id
    WHERE w.degree < ?2
      AND r.status = 'active'
      AND (?3 IS NULL OR r.relationship_type = ?3)
      AND instr(
            ',' || w.path || ',',
            ',' || CASE WHEN r.source_dossier_id = w.dossier_id
                        THEN r.target_dossier_id ELSE r.source_dossier_id END || ','
          ) = 0
)";

fn parse_id_list(joined: &str) -> Result<Vec<DossierId>, StoreError> {
    joined
        .split(',')
        .map(|s| DossierId::from_string(s).map_err(StoreError::InvalidData))
        .collect()
}

fn parse_kind_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        Vec::new()
    } else {
        joined.split(',').map(str::to_string).collect()
    }
}

impl GraphAccelerator for SqliteStore {
    type Error = StoreError;

    fn recursive_traverse(
        &self,
        start: DossierId,
        max_depth: u32,
        kind_filter: Option<&str>,
    ) -> Result<Vec<TraversalRow>, Self::Error> {
        let sql = format!(
            "{} SELECT dossier_id, degree, path, kind_path FROM walk WHERE degree > 0",
            RECURSIVE_WALK
        );

        let mut stmt = self.connection().prepare(&sql)?;
        let raw = stmt
            .query_map(
                params![start.to_string(), max_depth, kind_filter],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::with_capacity(raw.len());
        for (id, degree, path, kind_path) in raw {
            rows.push(TraversalRow {
                dossier_id: DossierId::from_string(&id).map_err(StoreError::InvalidData)?,
                degree,
                path: parse_id_list(&path)?,
                kind_path: parse_kind_list(&kind_path),
            });
        }
        Ok(rows)
    }

    fn recursive_shortest_path(
        &self,
        source: DossierId,
        target: DossierId,
        max_depth: u32,
    ) -> Result<Option<PathRow>, Self::Error> {
        let sql = format!(
            "{} SELECT degree, path, kind_path FROM walk
             WHERE dossier_id = ?4 ORDER BY degree LIMIT 1",
            RECURSIVE_WALK
        );

        let row: Option<(u32, String, String)> = self
            .connection()
            .query_row(
                &sql,
                params![
                    source.to_string(),
                    max_depth,
                    Option::<String>::None,
                    target.to_string()
                ],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((degree, path, kind_path)) => Ok(Some(PathRow {
                path: parse_id_list(&path)?,
                kind_path: parse_kind_list(&kind_path),
                length: degree,
            })),
        }
    }
}
