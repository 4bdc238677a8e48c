//! Liaison Domain Layer
//!
//! Core domain model for the Liaison relationship graph: dossiers (countries,
//! organizations, forums, people, ...) are nodes, and typed, directional,
//! temporally-scoped relationships between them are edges.
//!
//! ## Key Concepts
//!
//! - **Dossier**: an entity participating in relationships. Owned and
//!   lifecycle-managed outside this core; only a minimal projection
//!   ([`DossierRef`]) is read here.
//! - **Relationship**: a typed edge between two dossiers with a status
//!   lifecycle (active -> historical/terminated) and optional effective dates.
//! - **Hierarchy edge**: a `parent_of`/`subsidiary_of` edge, subject to the
//!   acyclicity invariant enforced by the relationship manager.
//!
//! ## Architecture
//!
//! This crate carries only value types, vocabularies, and the trait seams
//! ([`traits::EdgeStore`], [`traits::GraphAccelerator`]) that infrastructure
//! crates implement. Business rules live in `liaison-relations`; the graph
//! algorithms in `liaison-graph`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod direction;
pub mod dossier;
pub mod kind;
pub mod relationship;
pub mod time;
pub mod traits;

// Re-exports for convenience
pub use direction::{Direction, EdgeDirection};
pub use dossier::{DossierId, DossierRef, DossierStatus, DossierType};
pub use relationship::{Metadata, Relationship, RelationshipId, RelationshipStatus};
pub use time::current_timestamp_millis;
