//! Integration tests for the relationship manager over the SQLite store

use liaison_domain::{
    Direction, DossierId, DossierRef, DossierStatus, DossierType, EdgeDirection,
    RelationshipStatus,
};
use liaison_relations::{
    NewRelationship, RelationError, RelationshipFilter, RelationshipManager, RelationshipPatch,
};
use liaison_store::SqliteStore;

fn manager_with_dossiers(names: &[&str]) -> (RelationshipManager<SqliteStore>, Vec<DossierId>) {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut ids = Vec::new();
    for name in names {
        let d = DossierRef {
            id: DossierId::new(),
            dossier_type: DossierType::Organization,
            name_en: name.to_string(),
            name_ar: String::new(),
            status: DossierStatus::Active,
            sensitivity_level: 1,
        };
        store.insert_dossier(&d).unwrap();
        ids.push(d.id);
    }
    (RelationshipManager::new(store), ids)
}

#[test]
fn test_create_defaults() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let edge = mgr
        .create(NewRelationship::new(ids[0], ids[1], "bilateral_relation"))
        .unwrap();

    assert_eq!(edge.status, RelationshipStatus::Active);
    assert!(edge.effective_from.is_some());
    assert!(edge.effective_to.is_none());
    assert_ne!(edge.source_id, edge.target_id);
    assert_eq!(mgr.get(edge.id).unwrap().unwrap(), edge);
}

#[test]
fn test_create_rejects_self_loop() {
    let (mut mgr, ids) = manager_with_dossiers(&["A"]);
    let result = mgr.create(NewRelationship::new(ids[0], ids[0], "related_to"));
    assert!(matches!(result, Err(RelationError::InvalidReference)));
}

#[test]
fn test_create_rejects_unknown_kind() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let result = mgr.create(NewRelationship::new(ids[0], ids[1], "friends_with"));
    assert!(matches!(result, Err(RelationError::UnknownKind(_))));
}

#[test]
fn test_create_rejects_bad_temporal_range() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let mut request = NewRelationship::new(ids[0], ids[1], "partnership");
    request.effective_from = Some(2000);
    request.effective_to = Some(1000);
    let result = mgr.create(request);
    assert!(matches!(result, Err(RelationError::InvalidTemporalRange)));
}

#[test]
fn test_create_rejects_unknown_dossier() {
    let (mut mgr, ids) = manager_with_dossiers(&["A"]);
    let ghost = DossierId::new();
    let result = mgr.create(NewRelationship::new(ids[0], ghost, "related_to"));
    assert!(matches!(result, Err(RelationError::UnknownDossier(id)) if id == ghost));
}

#[test]
fn test_create_rejects_active_duplicate() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    mgr.create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();

    let result = mgr.create(NewRelationship::new(ids[0], ids[1], "member_of"));
    assert!(matches!(result, Err(RelationError::Duplicate { .. })));

    // A different kind between the same pair is fine
    assert!(mgr
        .create(NewRelationship::new(ids[0], ids[1], "partnership"))
        .is_ok());
}

#[test]
fn test_terminated_edge_does_not_block_recreation() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let edge = mgr
        .create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();
    mgr.terminate(edge.id).unwrap();

    assert!(mgr
        .create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .is_ok());
}

#[test]
fn test_update_patch() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let edge = mgr
        .create(NewRelationship::new(ids[0], ids[1], "cooperates_with"))
        .unwrap();

    let updated = mgr
        .update(
            edge.id,
            RelationshipPatch {
                kind: Some("partnership".to_string()),
                notes_en: Some("upgraded".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.kind, "partnership");
    assert_eq!(updated.notes_en.as_deref(), Some("upgraded"));
    // Endpoints are untouched
    assert_eq!(updated.source_id, edge.source_id);
    assert_eq!(updated.target_id, edge.target_id);
}

#[test]
fn test_metadata_round_trip() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);

    let mut metadata = liaison_domain::Metadata::new();
    metadata.insert("treaty".to_string(), serde_json::json!("Vienna Convention"));
    metadata.insert("since".to_string(), serde_json::json!(1961));

    let mut request = NewRelationship::new(ids[0], ids[1], "bilateral_relation");
    request.metadata = Some(metadata.clone());
    let edge = mgr.create(request).unwrap();
    assert_eq!(edge.metadata, metadata);

    // A patch replaces the map wholesale
    let mut replacement = liaison_domain::Metadata::new();
    replacement.insert("status".to_string(), serde_json::json!("ratified"));
    let updated = mgr
        .update(
            edge.id,
            RelationshipPatch {
                metadata: Some(replacement.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.metadata, replacement);
}

#[test]
fn test_update_rejects_empty_patch() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let edge = mgr
        .create(NewRelationship::new(ids[0], ids[1], "partnership"))
        .unwrap();
    let result = mgr.update(edge.id, RelationshipPatch::default());
    assert!(matches!(result, Err(RelationError::NoFieldsToUpdate)));
}

#[test]
fn test_update_revalidates_merged_temporal_range() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let mut request = NewRelationship::new(ids[0], ids[1], "partnership");
    request.effective_from = Some(5000);
    let edge = mgr.create(request).unwrap();

    // effective_to earlier than the stored effective_from
    let result = mgr.update(
        edge.id,
        RelationshipPatch {
            effective_to: Some(4000),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(RelationError::InvalidTemporalRange)));
}

#[test]
fn test_update_missing_edge() {
    let (mut mgr, _) = manager_with_dossiers(&["A"]);
    let result = mgr.update(
        liaison_domain::RelationshipId::new(),
        RelationshipPatch {
            notes_en: Some("x".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(RelationError::NotFound(_))));
}

#[test]
fn test_terminate_is_idempotent() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let edge = mgr
        .create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();

    let first = mgr.terminate(edge.id).unwrap();
    assert_eq!(first.status, RelationshipStatus::Terminated);
    let stamped = first.effective_to.expect("effective_to stamped");

    let second = mgr.terminate(edge.id).unwrap();
    assert_eq!(second.status, RelationshipStatus::Terminated);
    assert_eq!(second.effective_to, Some(stamped));
}

#[test]
fn test_purge_removes_row() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let edge = mgr
        .create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();

    assert!(mgr.purge(edge.id).unwrap());
    assert!(!mgr.purge(edge.id).unwrap());
    assert!(mgr.get(edge.id).unwrap().is_none());
}

#[test]
fn test_relationships_for_annotates_direction() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B", "C"]);
    mgr.create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();
    mgr.create(NewRelationship::new(ids[2], ids[0], "sponsored_by"))
        .unwrap();

    let results = mgr
        .relationships_for(ids[0], &RelationshipFilter::default())
        .unwrap();
    assert_eq!(results.len(), 2);

    for annotated in &results {
        match annotated.relationship.kind.as_str() {
            "member_of" => assert_eq!(annotated.direction, EdgeDirection::Outgoing),
            "sponsored_by" => assert_eq!(annotated.direction, EdgeDirection::Incoming),
            other => panic!("unexpected kind {}", other),
        }
    }
}

#[test]
fn test_relationships_for_status_filtering() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B", "C"]);
    let edge = mgr
        .create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();
    mgr.terminate(edge.id).unwrap();
    mgr.create(NewRelationship::new(ids[0], ids[2], "member_of"))
        .unwrap();

    // Default: active only
    let active = mgr
        .relationships_for(ids[0], &RelationshipFilter::default())
        .unwrap();
    assert_eq!(active.len(), 1);

    // Opt into historical/terminated
    let all = mgr
        .relationships_for(
            ids[0],
            &RelationshipFilter {
                include_historical: true,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(all.len(), 2);

    // Explicit status filter
    let terminated = mgr
        .relationships_for(
            ids[0],
            &RelationshipFilter {
                status: Some(RelationshipStatus::Terminated),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(terminated.len(), 1);
}

#[test]
fn test_adjacent_normalizes_far_endpoint() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B", "C"]);
    mgr.create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();
    mgr.create(NewRelationship::new(ids[2], ids[0], "hosted_by"))
        .unwrap();

    let adjacent = mgr.adjacent(ids[0], Direction::Both, None, false).unwrap();
    assert_eq!(adjacent.len(), 2);

    for entry in &adjacent {
        assert_eq!(entry.source_id, ids[0]);
        assert_ne!(entry.target_id, ids[0]);
    }

    let incoming = adjacent
        .iter()
        .find(|e| e.kind == "hosted_by")
        .expect("incoming edge present");
    assert_eq!(incoming.direction, EdgeDirection::Incoming);
    assert_eq!(incoming.target_id, ids[2]);
}

#[test]
fn test_adjacent_direction_filters() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B", "C"]);
    mgr.create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();
    mgr.create(NewRelationship::new(ids[2], ids[0], "member_of"))
        .unwrap();

    let outgoing = mgr
        .adjacent(ids[0], Direction::Outgoing, None, false)
        .unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].target_id, ids[1]);

    let incoming = mgr
        .adjacent(ids[0], Direction::Incoming, None, false)
        .unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].target_id, ids[2]);
}

#[test]
fn test_stats() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B", "C"]);
    mgr.create(NewRelationship::new(ids[0], ids[1], "member_of"))
        .unwrap();
    mgr.create(NewRelationship::new(ids[0], ids[2], "partnership"))
        .unwrap();
    mgr.create(NewRelationship::new(ids[1], ids[0], "member_of"))
        .unwrap();

    let stats = mgr.stats(ids[0]).unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.outgoing, 2);
    assert_eq!(stats.incoming, 1);
    assert_eq!(stats.by_kind.get("member_of"), Some(&2));
    assert_eq!(stats.by_kind.get("partnership"), Some(&1));
}

#[test]
fn test_validate_hierarchy_accepts_acyclic() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B", "C"]);
    mgr.create(NewRelationship::new(ids[0], ids[1], "parent_of"))
        .unwrap();

    // B -> C extends the chain downward, no cycle
    assert!(mgr.validate_hierarchy(ids[1], ids[2]).is_ok());
}

#[test]
fn test_validate_hierarchy_rejects_direct_cycle() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    mgr.create(NewRelationship::new(ids[0], ids[1], "parent_of"))
        .unwrap();

    // Making A a child of B would close A -> B -> A
    let result = mgr.validate_hierarchy(ids[1], ids[0]);
    assert!(matches!(
        result,
        Err(RelationError::CircularHierarchy { .. })
    ));
}

#[test]
fn test_validate_hierarchy_rejects_transitive_cycle() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B", "C"]);
    mgr.create(NewRelationship::new(ids[0], ids[1], "parent_of"))
        .unwrap();
    mgr.create(NewRelationship::new(ids[1], ids[2], "parent_of"))
        .unwrap();

    // A sits two levels above C
    let result = mgr.validate_hierarchy(ids[2], ids[0]);
    assert!(matches!(
        result,
        Err(RelationError::CircularHierarchy { .. })
    ));
}

#[test]
fn test_validate_hierarchy_rejects_self() {
    let (mgr, ids) = manager_with_dossiers(&["A"]);
    let result = mgr.validate_hierarchy(ids[0], ids[0]);
    assert!(matches!(
        result,
        Err(RelationError::CircularHierarchy { .. })
    ));
}

#[test]
fn test_validate_hierarchy_ignores_terminated_edges() {
    let (mut mgr, ids) = manager_with_dossiers(&["A", "B"]);
    let edge = mgr
        .create(NewRelationship::new(ids[0], ids[1], "parent_of"))
        .unwrap();
    mgr.terminate(edge.id).unwrap();

    // The terminated edge no longer anchors an ancestor chain
    assert!(mgr.validate_hierarchy(ids[1], ids[0]).is_ok());
}
