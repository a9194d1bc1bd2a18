use super::*;
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = SplitId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = ParticipantId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_ids_are_unique() {
    let ids: HashSet<ParticipantId> = (0..1_000).map(|_| ParticipantId::new()).collect();
    assert_eq!(ids.len(), 1_000);
}

#[test]
fn test_typed_id_display_round_trips_through_from_str() {
    let id = SplitId::new();
    let parsed = SplitId::from_str(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_typed_id_from_str_trims_whitespace() {
    let uuid = Uuid::new_v4();
    let id = SplitId::from_str(&format!("  {uuid} ")).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(SplitId::from_str("invalid").is_err());
    assert!(ParticipantId::from_str("").is_err());
}

#[test]
fn test_typed_id_serializes_as_plain_string() {
    let uuid = Uuid::new_v4();
    let json = serde_json::to_string(&SplitId::from_uuid(uuid)).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}
