//! User Store Invariant Tests
//!
//! Tests for:
//! - Unique, non-empty ids on create
//! - Round trip of create/update through get
//! - NotFound after delete and for unknown ids, with no side effects
//! - Rejected candidates never reach storage
//! - Cold start reads as empty without creating the data file
//! - Failed writes leave the previous data file intact

use std::collections::HashSet;
use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;
use userdb::schema::validate;
use userdb::storage::{StoreError, User, UserStore};

// =============================================================================
// Test Utilities
// =============================================================================

fn create_store() -> (TempDir, UserStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = UserStore::open(temp_dir.path().join("users.json"));
    (temp_dir, store)
}

fn ada() -> Value {
    json!({
        "firstName": "Ada",
        "secondName": "Lovelace",
        "age": 36,
        "city": "London"
    })
}

fn create(store: &UserStore, candidate: &Value) -> User {
    store.create(validate(candidate).unwrap()).unwrap()
}

/// Validate-then-create, the way a request handler drives the store
fn create_checked(store: &UserStore, candidate: &Value) -> Result<User, StoreError> {
    let draft = validate(candidate)?;
    store.create(draft)
}

fn update_checked(store: &UserStore, id: &str, candidate: &Value) -> Result<User, StoreError> {
    let draft = validate(candidate)?;
    store.update_by_id(id, draft)
}

fn invalid_candidates() -> Vec<Value> {
    let mut missing_first_name = ada();
    missing_first_name
        .as_object_mut()
        .unwrap()
        .remove("firstName");

    let mut negative_age = ada();
    negative_age["age"] = json!(-1);

    let mut too_old = ada();
    too_old["age"] = json!(151);

    let mut empty_second_name = ada();
    empty_second_name["secondName"] = json!("");

    vec![missing_first_name, negative_age, too_old, empty_second_name]
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_created_ids_are_unique_and_non_empty() {
    let (_temp, store) = create_store();
    let mut seen = HashSet::new();

    for age in 0..50 {
        let user = create(
            &store,
            &json!({ "firstName": "User", "secondName": "Number", "age": age }),
        );
        assert!(!user.id.is_empty());
        assert!(seen.insert(user.id), "duplicate id issued");
    }

    assert_eq!(store.list_all().len(), 50);
}

#[test]
fn test_client_id_ignored_on_create() {
    let (_temp, store) = create_store();
    let mut candidate = ada();
    candidate["id"] = json!("chosen-by-client");

    let user = create(&store, &candidate);
    assert_ne!(user.id, "chosen-by-client");
    assert!(store.get_by_id("chosen-by-client").is_err());
}

#[test]
fn test_client_id_ignored_on_update() {
    let (_temp, store) = create_store();
    let user = create(&store, &ada());

    let mut candidate = ada();
    candidate["id"] = json!("other-id");
    candidate["age"] = json!(37);

    let updated = update_checked(&store, &user.id, &candidate).unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.age, 37);
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_ada_lifecycle() {
    let (_temp, store) = create_store();

    let created = create(&store, &ada());
    assert!(!created.id.is_empty());
    assert_eq!(created.first_name, "Ada");
    assert_eq!(created.second_name, "Lovelace");
    assert_eq!(created.age, 36);
    assert_eq!(created.city.as_deref(), Some("London"));

    assert_eq!(store.get_by_id(&created.id).unwrap(), created);

    store.delete_by_id(&created.id).unwrap();
    assert!(matches!(
        store.get_by_id(&created.id),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn test_update_round_trip() {
    let (_temp, store) = create_store();
    let user = create(&store, &ada());

    let updated = update_checked(
        &store,
        &user.id,
        &json!({ "firstName": "Augusta Ada", "secondName": "King", "age": 36 }),
    )
    .unwrap();

    assert_eq!(store.get_by_id(&user.id).unwrap(), updated);
    assert_eq!(updated.city, None);
}

#[test]
fn test_extra_fields_round_trip() {
    let (_temp, store) = create_store();
    let mut candidate = ada();
    candidate["email"] = json!("ada@example.com");

    let user = create(&store, &candidate);
    let fetched = store.get_by_id(&user.id).unwrap();
    assert_eq!(fetched.extra["email"], "ada@example.com");
}

#[test]
fn test_reopened_store_sees_same_records() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("users.json");

    let user = {
        let store = UserStore::open(&path);
        create(&store, &ada())
    };

    let reopened = UserStore::open(&path);
    assert_eq!(reopened.get_by_id(&user.id).unwrap(), user);
}

// =============================================================================
// NotFound
// =============================================================================

#[test]
fn test_unknown_id_has_no_side_effects() {
    let (_temp, store) = create_store();
    create(&store, &ada());
    let before = store.list_all();
    let file_before = fs::read(store.path()).unwrap();

    assert!(matches!(
        update_checked(&store, "never-created", &ada()),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_by_id("never-created"),
        Err(StoreError::NotFound(_))
    ));

    assert_eq!(store.list_all(), before);
    assert_eq!(fs::read(store.path()).unwrap(), file_before);
}

#[test]
fn test_double_delete() {
    let (_temp, store) = create_store();
    let user = create(&store, &ada());

    store.delete_by_id(&user.id).unwrap();
    assert!(matches!(
        store.delete_by_id(&user.id),
        Err(StoreError::NotFound(_))
    ));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_invalid_candidates_never_persist() {
    let (_temp, store) = create_store();
    let existing = create(&store, &ada());
    let file_before = fs::read(store.path()).unwrap();

    for candidate in invalid_candidates() {
        assert!(
            matches!(
                create_checked(&store, &candidate),
                Err(StoreError::Validation(_))
            ),
            "create accepted {}",
            candidate
        );
        assert!(
            matches!(
                update_checked(&store, &existing.id, &candidate),
                Err(StoreError::Validation(_))
            ),
            "update accepted {}",
            candidate
        );
    }

    assert_eq!(fs::read(store.path()).unwrap(), file_before);
    assert_eq!(store.list_all(), vec![existing]);
}

// =============================================================================
// Cold start and durability
// =============================================================================

#[test]
fn test_cold_start_is_empty() {
    let (_temp, store) = create_store();

    assert!(store.list_all().is_empty());
    assert!(!store.path().exists(), "reading must not create the data file");
}

#[test]
fn test_persisted_layout() {
    let (_temp, store) = create_store();
    let user = create(&store, &ada());

    let text = fs::read_to_string(store.path()).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        json!([{
            "id": user.id,
            "firstName": "Ada",
            "secondName": "Lovelace",
            "age": 36,
            "city": "London"
        }])
    );
    assert!(text.contains("\n  {\n"), "collection is pretty-printed");
}

#[test]
fn test_failed_write_keeps_previous_state() {
    let (temp, store) = create_store();
    let user = create(&store, &ada());
    let file_before = fs::read(store.path()).unwrap();

    // Block the temp path so the next write cannot complete
    fs::create_dir(temp.path().join("users.json.tmp")).unwrap();

    let result = create_checked(
        &store,
        &json!({ "firstName": "Alan", "secondName": "Turing", "age": 41 }),
    );
    assert!(matches!(result, Err(StoreError::Storage { .. })));
    assert!(matches!(
        store.delete_by_id(&user.id),
        Err(StoreError::Storage { .. })
    ));

    assert_eq!(fs::read(store.path()).unwrap(), file_before);
    assert_eq!(store.list_all(), vec![user]);
}

#[test]
fn test_unwritable_directory_reports_storage_error() {
    let temp = TempDir::new().unwrap();
    // A regular file where the data directory should be
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let store = UserStore::open(blocker.join("users.json"));
    assert!(store.list_all().is_empty());
    assert!(matches!(
        create_checked(&store, &ada()),
        Err(StoreError::Storage { .. })
    ));
}
