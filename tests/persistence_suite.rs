mod common;

use std::fs;

use common::{file_store, open_store, record, KEY};
use laundry_core::{
    record::RecordField,
    seed,
    session::EditTarget,
    storage::{BlobStorage, JsonFileStorage},
};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn persisted_log_reloads_equal_by_value() {
    let (temp, mut store) = file_store();
    store
        .upsert(
            record(4, 5, 22, &[(RecordField::Coin, "50"), (RecordField::DropOffCode, "17")]),
            EditTarget::New,
        )
        .unwrap();
    store
        .upsert(record(4, 5, 9, &[(RecordField::Soap, "3.5")]), EditTarget::New)
        .unwrap();
    store
        .upsert(record(3, 30, 14, &[(RecordField::Hopper, "12")]), EditTarget::New)
        .unwrap();
    store.persist().unwrap();

    let reloaded = open_store(&temp);
    assert_eq!(reloaded.len(), 3);
    for (before, after) in store.all().iter().zip(reloaded.all()) {
        assert!(before.same_entry(after), "{before:?} != {after:?}");
    }
}

#[test]
fn stored_rows_use_the_eight_column_layout() {
    let (temp, mut store) = file_store();
    store
        .upsert(record(4, 5, 22, &[(RecordField::Coin, "50")]), EditTarget::New)
        .unwrap();
    store.persist().unwrap();

    let path = temp.path().join("data").join(format!("{KEY}.json"));
    let json: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let row = json.as_array().unwrap()[0].as_object().unwrap();

    let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "Coin",
            "Date",
            "Drop Off Amount 1",
            "Drop Off Amount 2",
            "Drop Off Code",
            "Hopper",
            "Soap",
            "Vending",
        ]
    );
    assert_eq!(row["Date"], "4/5/2025 10:00 PM");
    assert_eq!(row["Coin"], "50");
    assert_eq!(row["Soap"], "");
}

#[test]
fn legacy_rows_without_time_load_after_timed_rows() {
    let temp = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(temp.path().join("data")).unwrap();
    storage
        .write(
            KEY,
            r#"[
                {"Date":"4/3/2025","Coin":"1"},
                {"Date":"4/3/2025 8:00 AM","Coin":"2"},
                {"Date":"4/4/2025 9:15 PM","Coin":"3"}
            ]"#,
        )
        .unwrap();

    let store = open_store(&temp);
    let coins: Vec<_> = store
        .all()
        .iter()
        .map(|r| r.values.get(RecordField::Coin).unwrap_or_default())
        .collect();
    assert_eq!(coins, vec!["3", "2", "1"]);
}

#[test]
fn corrupt_file_starts_an_empty_log_and_can_be_overwritten() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join(format!("{KEY}.json")), "[{\"Date\": ").unwrap();

    let mut store = open_store(&temp);
    assert!(store.is_empty());

    let report = store.load();
    assert!(report.recovered);
    assert!(report.nothing_stored());
    assert_eq!(
        fs::read_to_string(data.join(format!("{KEY}_unreadable.json"))).unwrap(),
        "[{\"Date\": "
    );

    store
        .upsert(record(4, 1, 9, &[(RecordField::Coin, "4")]), EditTarget::New)
        .unwrap();
    store.persist().unwrap();
    assert_eq!(open_store(&temp).len(), 1);
}

#[test]
fn numeric_cells_from_hand_edited_files_are_kept() {
    let temp = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(temp.path().join("data")).unwrap();
    storage
        .write(
            KEY,
            r#"[
                {"Date":"4/2/2025 09:00 AM","Coin":"5"},
                {"Date":"4/3/2025 10:00 AM","Coin":50},
                {"Date":"4/4/2025 10:00 AM","Soap":null}
            ]"#,
        )
        .unwrap();

    let mut store = open_store(&temp);
    assert_eq!(store.len(), 3);
    assert!(!store
        .seed_if_empty(seed::sample_records(common::date(4, 1), common::date(4, 4)))
        .unwrap());

    store.persist().unwrap();
    let reloaded = open_store(&temp);
    let coins: Vec<_> = reloaded
        .all()
        .iter()
        .map(|r| r.values.get(RecordField::Coin).unwrap_or_default())
        .collect();
    assert_eq!(coins, vec!["", "50", "5"]);
}

#[test]
fn writes_leave_no_temporary_file_behind() {
    let (temp, mut store) = file_store();
    store
        .upsert(record(4, 1, 9, &[(RecordField::Coin, "4")]), EditTarget::New)
        .unwrap();
    store.persist().unwrap();

    let names: Vec<String> = fs::read_dir(temp.path().join("data"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![format!("{KEY}.json")]);
}

#[test]
fn seeded_log_survives_a_reload() {
    let (temp, mut store) = file_store();
    let samples = seed::sample_records(common::date(3, 30), common::date(4, 2));
    let count = samples.len();
    assert!(store.seed_if_empty(samples).unwrap());

    let reloaded = open_store(&temp);
    assert_eq!(reloaded.len(), count);
    assert!(!reloaded.is_empty());
}
