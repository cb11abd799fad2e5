//! Integration tests for loading policy files and querying the database.

use camino::Utf8PathBuf;
use license_policy::policy::{ConflictSeverity, PolicyCell, PolicyConfig, PolicyDatabase, PolicyEntry, UsagePolicy};
use std::fs;
use std::sync::Arc;

fn entry(id: &str, family: &str, usage_policy: &str) -> PolicyEntry {
    PolicyEntry {
        id: id.to_string(),
        family: family.to_string(),
        usage_policy: usage_policy.to_string(),
        ..PolicyEntry::default()
    }
}

#[test]
fn test_family_conflict_is_reported_not_fatal() {
    let entries = [entry("A-1.0", "Shared", "allow"), entry("A-2.0", "Shared", "deny")];
    let db = PolicyDatabase::build(&entries);

    assert!(db.has_conflicts());
    assert_eq!(db.conflicts().len(), 1);
    assert_eq!(db.conflicts()[0].family, "Shared");
    assert_eq!(db.find_by_id("A-1.0").0, UsagePolicy::Allow);
    assert_eq!(db.find_by_id("A-2.0").0, UsagePolicy::Deny);

    let _ = PolicyDatabase::build_with_severity(&entries, ConflictSeverity::Error).unwrap_err();
}

#[test]
fn test_invalid_records_are_skipped() {
    let entries = [
        entry("MIT", "MIT", "allow"),
        entry("MIT", "MIT", "sometimes"),
        entry("MIT License", "MIT", "allow"),
        entry("Other", "Unknown-Family", "allow"),
    ];
    let db = PolicyDatabase::build(&entries);

    assert_eq!(db.len(), 1);
    assert_eq!(db.skipped().len(), 3);
    assert_eq!(db.find_by_id("MIT").0, UsagePolicy::Allow);
    assert_eq!(db.find_by_id("Other").0, UsagePolicy::Undefined);
}

#[test]
fn test_children_inherit_family_policy() {
    let db = PolicyDatabase::build(&[PolicyEntry {
        children: vec!["GPL-2.0+".to_string(), "GPL-3.0+".to_string()],
        notes: vec!["family note".to_string()],
        ..entry("", "GPL", "deny")
    }]);

    let (policy, record) = db.find_by_id("GPL-3.0+");
    let record = record.unwrap();
    assert_eq!(policy, UsagePolicy::Deny);
    assert_eq!(record.family(), "GPL");
    assert!(record.notes().is_empty());
    assert_eq!(db.find_by_id("").0, UsagePolicy::Undefined);
}

#[test]
fn test_family_lookup_on_default_policies() {
    let config = PolicyConfig::embedded().unwrap();
    let db = PolicyDatabase::from_config(&config, ConflictSeverity::Error).unwrap();

    assert_eq!(db.find_by_family("GPL-2.0-only").0, UsagePolicy::Deny);
    assert_eq!(db.find_by_family("LGPL-2.1-only").0, UsagePolicy::NeedsReview);
    assert_eq!(db.find_by_family("AGPL-3.0-only").0, UsagePolicy::Deny);
    assert_eq!(db.find_by_family("MIT OR Apache-2.0"), (UsagePolicy::Undefined, None));
    assert_eq!(db.find_by_family("MIT OR(Apache-2.0)"), (UsagePolicy::Undefined, None));
    assert_eq!(db.find_by_family("(GPL-2.0-only)AND MIT"), (UsagePolicy::Undefined, None));
    assert_eq!(db.find_by_family("GPL-2.0-only WITH(Classpath-exception-2.0)"), (UsagePolicy::Undefined, None));
    assert_eq!(db.find_by_family("Proprietary").0, UsagePolicy::Undefined);
}

#[test]
fn test_alias_and_annotation_lookup() {
    let config = PolicyConfig::embedded().unwrap();
    let db = PolicyDatabase::from_config(&config, ConflictSeverity::Warn).unwrap();

    let (policy, record) = db.find_by_alias("Expat");
    assert_eq!(policy, UsagePolicy::Allow);
    assert_eq!(record.unwrap().id(), "MIT");

    let (_, record) = db.find_by_id("GPL-3.0-only");
    let annotation = record.unwrap().annotation_refs()[0].clone();
    assert!(db.annotation(&annotation).is_some());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_cell_loads_file_once() {
    let tmp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::try_from(tmp.path().join("policies.json")).unwrap();
    fs::write(
        &path,
        r#"{"policies": [{"id": "Good", "family": "Good", "usagePolicy": "allow"}], "annotations": {}}"#,
    )
    .unwrap();

    let cell = PolicyCell::new(Some(path));
    assert!(!cell.is_initialized());

    let first = cell.database();
    let second = cell.database();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.find_by_id("Good").0, UsagePolicy::Allow);
    assert!(cell.load_error().is_none());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_cell_fails_open() {
    let tmp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::try_from(tmp.path().join("missing.json")).unwrap();

    let cell = PolicyCell::new(Some(path));
    let db = cell.database();

    assert!(db.is_empty());
    assert_eq!(db.find_by_id("MIT").0, UsagePolicy::Undefined);
    assert!(cell.load_error().is_some());
}
