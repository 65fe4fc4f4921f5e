//! Persistence tests
//!
//! Save/load through the flat-file store and the in-memory double.

mod fixtures;

use std::fs;

use lot_manager::allocation::ReservePolicy;
use lot_manager::billing::Tariff;
use lot_manager::capacity::LotLayout;
use lot_manager::error::StoreError;
use lot_manager::registry::Registry;
use lot_manager::report;
use lot_manager::store::FileStore;
use lot_manager::traits::VehicleStore;
use lot_manager::types::{CustomerType, ParkedVehicle, VehicleType};

use fixtures::{MemoryStore, T0, admit_many, fill_cell, hours};

fn busy_registry() -> Registry {
    let mut registry = Registry::default();
    registry.admit("AB-123", VehicleType::Motorcycle, CustomerType::Guest, T0).expect("admit");
    registry.admit("KL-9", VehicleType::Car, CustomerType::Vip, T0 + 60).expect("admit");
    fill_cell(&mut registry, VehicleType::Bus, CustomerType::Guest);
    // Spills into the bus disabled cell.
    registry.admit("SPILL", VehicleType::Bus, CustomerType::Guest, T0 + 120).expect("admit");
    registry.admit("zz-1", VehicleType::Van, CustomerType::Registered, T0 + 180).expect("admit");
    registry
}

// ============================================================================
// File Store Tests
// ============================================================================

#[test]
fn test_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::at(dir.path().join("parking_data.txt"));

    assert!(store.load().unwrap().is_none());

    let registry = Registry::open(
        LotLayout::default(),
        Tariff::default(),
        ReservePolicy::default(),
        &store,
    )
    .unwrap();
    assert!(registry.is_empty());
    assert_eq!(registry.grid().total_allocated(), 0);
}

#[test]
fn test_file_round_trip_reproduces_registry() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::at(dir.path().join("parking_data.txt"));
    let original = busy_registry();

    original.save_to(&store).unwrap();

    let mut restored = Registry::default();
    let count = restored.load_from(&store).unwrap();

    assert_eq!(count, original.len());
    assert_eq!(restored.vehicles(), original.vehicles());
    assert_eq!(restored.grid(), original.grid());
    assert!(restored.check_invariants());
    assert_eq!(
        restored.find("SPILL").map(|v| v.customer_type),
        Some(CustomerType::Disabled),
        "stored class is replayed, not re-allocated"
    );
}

#[test]
fn test_saved_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parking_data.txt");
    let store = FileStore::at(&path);

    let mut registry = Registry::default();
    registry.admit("AB-123", VehicleType::Motorcycle, CustomerType::Guest, T0).expect("admit");
    registry.admit("CD-456", VehicleType::Car, CustomerType::Staff, T0 + 30).expect("admit");
    registry.save_to(&store).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "2\nAB-123 0 4 1700000000\nCD-456 2 2 1700000030\n");
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "only the data file remains");
}

#[test]
fn test_failed_save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    // A non-empty directory in place of the data file makes the final rename fail.
    let path = dir.path().join("parking_data.txt");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), "x").unwrap();

    let err = busy_registry().save_to(&FileStore::at(&path)).unwrap_err();

    assert!(matches!(err, StoreError::Io(_)), "got {err:?}");
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("parking_data.txt")]);
}

#[test]
fn test_target_with_tmp_extension_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::at(dir.path().join("parking.tmp"));
    let original = busy_registry();

    original.save_to(&store).unwrap();
    original.save_to(&store).unwrap();

    let mut restored = Registry::default();
    restored.load_from(&store).unwrap();
    assert_eq!(restored.vehicles(), original.vehicles());
    assert!(!dir.path().join("parking.tmp.tmp").exists());
}

#[test]
fn test_save_overwrites_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parking_data.txt");
    let store = FileStore::at(&path);

    let mut registry = busy_registry();
    registry.save_to(&store).unwrap();
    for id in ["AB-123", "KL-9", "SPILL"] {
        registry.release(id, T0 + hours(4)).expect("release");
    }
    registry.save_to(&store).unwrap();

    let saved = store.load().unwrap().unwrap();
    assert_eq!(saved.len(), registry.len());
    assert!(saved.iter().all(|v| v.vehicle_number != "SPILL"));
}

#[test]
fn test_load_reads_hand_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parking_data.txt");
    fs::write(&path, "3\nB-2 4 4 1700000500\nA-1 1 0 1700000100\nC-3 1 0 1700000900\n\n").unwrap();

    let mut registry = Registry::default();
    registry.load_from(&FileStore::at(&path)).unwrap();

    let ids: Vec<_> = registry.vehicles().iter().map(|v| v.vehicle_number.as_str()).collect();
    assert_eq!(ids, vec!["B-2", "A-1", "C-3"]);
    assert_eq!(registry.grid().allocated(VehicleType::ThreeWheeler, CustomerType::Disabled), 2);
    assert_eq!(registry.grid().free(VehicleType::ThreeWheeler, CustomerType::Disabled), 9);

    let bill = registry.release("A-1", 1_700_000_100 + hours(2)).unwrap();
    assert_eq!(bill.vehicle_type, VehicleType::ThreeWheeler);
    assert_eq!(bill.fee, 70);
}

#[test]
fn test_malformed_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parking_data.txt");
    fs::write(&path, "1\nAB-123 7 0 1700000000\n").unwrap();

    let mut registry = Registry::default();
    let err = registry.load_from(&FileStore::at(&path)).unwrap_err();

    assert!(matches!(err, StoreError::Malformed { line: 2, .. }), "got {err:?}");
    assert!(registry.is_empty());
}

// ============================================================================
// Replay Validation Tests
// ============================================================================

#[test]
fn test_overfull_cell_fails_load_without_partial_state() {
    // Bus VIP holds 3 slots.
    let vehicles = (0..4)
        .map(|i| ParkedVehicle::new(format!("B{i}"), VehicleType::Bus, CustomerType::Vip, T0))
        .collect();
    let store = MemoryStore::with(vehicles);

    let mut registry = Registry::default();
    registry.admit("KEEP", VehicleType::Car, CustomerType::Guest, T0).expect("admit");
    let err = registry.load_from(&store).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Overfull {
            vehicle_type: VehicleType::Bus,
            customer_type: CustomerType::Vip,
        }
    ));
    assert_eq!(registry.len(), 1);
    assert!(registry.find("KEEP").is_some());
    assert!(registry.check_invariants());
}

#[test]
fn test_duplicate_identifier_fails_load() {
    let store = MemoryStore::with(vec![
        ParkedVehicle::new("DUP", VehicleType::Car, CustomerType::Guest, T0),
        ParkedVehicle::new("DUP", VehicleType::Van, CustomerType::Guest, T0),
    ]);

    let err = Registry::default().load_from(&store).unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(ref id) if id == "DUP"));
}

#[test]
fn test_load_replaces_existing_state() {
    let store = MemoryStore::with(vec![ParkedVehicle::new(
        "ONLY",
        VehicleType::Car,
        CustomerType::Staff,
        T0,
    )]);

    let mut registry = Registry::default();
    admit_many(&mut registry, "old", VehicleType::Car, CustomerType::Guest, 5);
    registry.load_from(&store).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.grid().allocated(VehicleType::Car, CustomerType::Guest), 0);
    assert_eq!(registry.grid().allocated(VehicleType::Car, CustomerType::Staff), 1);
}

#[test]
fn test_memory_store_round_trip() {
    let store = MemoryStore::default();
    let original = busy_registry();
    original.save_to(&store).unwrap();

    assert_eq!(store.saved().as_deref(), Some(original.vehicles()));

    let mut restored = Registry::default();
    restored.load_from(&store).unwrap();
    assert_eq!(restored.grid(), original.grid());
}

// ============================================================================
// Snapshot Serialization
// ============================================================================

#[test]
fn test_snapshots_serialize_to_json() {
    let registry = busy_registry();

    let stats = serde_json::to_value(report::statistics(&registry)).unwrap();
    assert_eq!(stats.as_array().map(|rows| rows.len()), Some(25));
    assert_eq!(stats[0]["vehicle_type"], "MOTORCYCLE");
    assert_eq!(stats[0]["customer_type"], "DISABLED");

    let vehicle = serde_json::to_value(&registry.vehicles()[0]).unwrap();
    assert_eq!(vehicle["vehicle_number"], "AB-123");
    assert_eq!(vehicle["customer_type"], "GUEST");

    let space = serde_json::to_value(report::parking_space(&registry)).unwrap();
    assert_eq!(space[4]["vehicle_type"], "BUS");
    assert_eq!(space[4]["segments"][0], "DFFF");
}
