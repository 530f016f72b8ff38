mod common;

use chrono::Duration;
use common::fixtures::{IssueBuilder, base_time, fifty_issues, search_fixture};
use common::{ids, test_log, test_storage};
use issue_desk::storage::{demo_issues, read_jsonl, write_jsonl};
use issue_desk::util::IdConfig;
use issue_desk::{
    DeskError, IssueUpdate, MemoryStorage, NewIssue, Priority, QueryEngine, QueryRequest, Status,
};
use std::fs::{self, File};
use std::io::BufWriter;
use tempfile::TempDir;

#[test]
fn create_assigns_id_and_timestamps() {
    let _log = test_log("create_assigns_id_and_timestamps");
    let mut storage = MemoryStorage::new();
    let now = base_time();

    let mut new_issue = NewIssue::new("Printer on fire");
    new_issue.priority = Priority::Critical;
    new_issue.tags = vec![" hardware ".to_string(), "hardware".to_string()];
    let issue = storage.create_at(new_issue, now).unwrap();

    assert!(issue.id.starts_with("iss-"));
    assert_eq!(issue.created_date, now);
    assert_eq!(issue.updated_date, now);
    assert_eq!(issue.tags, vec!["hardware"]);
    assert_eq!(storage.get(&issue.id), Some(&issue));
    assert_eq!(storage.len(), 1);
}

#[test]
fn created_ids_are_unique_and_use_configured_prefix() {
    let _log = test_log("created_ids_are_unique_and_use_configured_prefix");
    let mut storage = MemoryStorage::with_id_config(IdConfig::with_prefix("ops"));
    let now = base_time();

    let mut seen = std::collections::HashSet::new();
    for _ in 0..25 {
        // Same title and clock every time: uniqueness comes from the retry loop.
        let issue = storage.create_at(NewIssue::new("Duplicate"), now).unwrap();
        assert!(issue.id.starts_with("ops-"));
        assert!(seen.insert(issue.id));
    }
    assert_eq!(storage.len(), 25);
}

#[test]
fn create_rejects_blank_title() {
    let _log = test_log("create_rejects_blank_title");
    let mut storage = MemoryStorage::new();
    let err = storage.create(NewIssue::new("   ")).unwrap_err();
    assert!(err.is_user_recoverable());
    assert!(storage.is_empty());
}

#[test]
fn update_merges_fields_and_refreshes_updated_date() {
    let _log = test_log("update_merges_fields_and_refreshes_updated_date");
    let mut storage = test_storage(search_fixture());
    let original = storage.get("1").unwrap().clone();
    let later = original.created_date + Duration::days(3);

    let update = IssueUpdate {
        status: Some(Status::Resolved),
        assigned_to: Some(None),
        ..IssueUpdate::default()
    };
    let updated = storage.update_at("1", &update, later).unwrap();

    assert_eq!(updated.status, Status::Resolved);
    assert_eq!(updated.assigned_to, None);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.created_date, original.created_date);
    assert_eq!(updated.updated_date, later);
    assert_eq!(storage.get("1"), Some(&updated));
}

#[test]
fn update_never_moves_updated_date_before_creation() {
    let _log = test_log("update_never_moves_updated_date_before_creation");
    let mut storage = test_storage(search_fixture());
    let created = storage.get("2").unwrap().created_date;

    let update = IssueUpdate {
        title: Some("Renamed".to_string()),
        ..IssueUpdate::default()
    };
    let updated = storage
        .update_at("2", &update, created - Duration::days(10))
        .unwrap();
    assert_eq!(updated.updated_date, created);
}

#[test]
fn failed_update_leaves_store_untouched() {
    let _log = test_log("failed_update_leaves_store_untouched");
    let mut storage = test_storage(search_fixture());
    let before = storage.list_all();

    let update = IssueUpdate {
        title: Some(String::new()),
        ..IssueUpdate::default()
    };
    assert!(storage.update("3", &update).is_err());
    assert_eq!(storage.list_all(), before);
}

#[test]
fn missing_ids_report_not_found() {
    let _log = test_log("missing_ids_report_not_found");
    let mut storage = test_storage(search_fixture());

    assert!(storage.get("99").is_none());
    assert!(matches!(
        storage.get_required("99"),
        Err(DeskError::IssueNotFound { ref id }) if id == "99"
    ));
    assert!(matches!(
        storage.update("99", &IssueUpdate::default()),
        Err(DeskError::IssueNotFound { .. })
    ));
    assert!(matches!(
        storage.delete("99"),
        Err(DeskError::IssueNotFound { .. })
    ));
    assert_eq!(storage.len(), 4);
}

#[test]
fn delete_keeps_remaining_order_and_lookups() {
    let _log = test_log("delete_keeps_remaining_order_and_lookups");
    let mut storage = test_storage(search_fixture());

    let removed = storage.delete("2").unwrap();
    assert_eq!(removed.id, "2");
    assert_eq!(ids(storage.issues()), vec!["1", "3", "4"]);
    assert_eq!(storage.get("4").unwrap().title, "API returns 500");
    assert!(!storage.contains("2"));
}

#[test]
fn duplicate_ids_are_rejected_on_load() {
    let _log = test_log("duplicate_ids_are_rejected_on_load");
    let issues = vec![
        IssueBuilder::new("7").build(),
        IssueBuilder::new("7").title("Other").build(),
    ];
    assert!(matches!(
        MemoryStorage::from_issues(issues),
        Err(DeskError::IdCollision { ref id }) if id == "7"
    ));
}

#[test]
fn list_all_feeds_the_query_engine() {
    let _log = test_log("list_all_feeds_the_query_engine");
    let storage = test_storage(fifty_issues());

    let snapshot = storage.list_all();
    let page = QueryEngine::default()
        .query(&snapshot, &QueryRequest::page(1, 10).with_status(Status::Resolved))
        .unwrap();
    assert_eq!(page.total_items, 12);
}

#[test]
fn jsonl_snapshot_survives_a_file_round_trip() {
    let _log = test_log("jsonl_snapshot_survives_a_file_round_trip");
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("issues.jsonl");
    let issues = search_fixture();

    let mut writer = BufWriter::new(File::create(&path).unwrap());
    assert_eq!(write_jsonl(&mut writer, &issues).unwrap(), 4);
    drop(writer);

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 4);
    assert!(contents.contains("\"status\":\"In Progress\""));

    let loaded = read_jsonl(&path).unwrap();
    assert_eq!(loaded, issues);
}

#[test]
fn jsonl_errors_carry_line_numbers() {
    let _log = test_log("jsonl_errors_carry_line_numbers");
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.jsonl");

    let mut buffer = Vec::new();
    write_jsonl(&mut buffer, &search_fixture()[..1]).unwrap();
    buffer.extend_from_slice(b"\n{\"id\": \"2\", \"title\": \n");
    fs::write(&path, buffer).unwrap();

    assert!(matches!(
        read_jsonl(&path),
        Err(DeskError::JsonlParse { line: 3, .. })
    ));
}

#[test]
fn missing_snapshot_is_an_io_error() {
    let _log = test_log("missing_snapshot_is_an_io_error");
    let temp = TempDir::new().unwrap();
    assert!(matches!(
        read_jsonl(&temp.path().join("absent.jsonl")),
        Err(DeskError::Io(_))
    ));
}

#[test]
fn demo_dataset_loads_into_store() {
    let _log = test_log("demo_dataset_loads_into_store");
    let issues = demo_issues(50, 42, base_time());
    let storage = test_storage(issues);
    assert_eq!(storage.len(), 50);
    assert_eq!(storage.ids().first().map(String::as_str), Some("1"));
    assert_eq!(storage.ids().last().map(String::as_str), Some("50"));
}
