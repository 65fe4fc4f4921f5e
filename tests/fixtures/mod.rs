//! Test fixtures for lot-manager.
//!
//! Provides an in-memory store double and helpers for driving a registry
//! into specific occupancy states.

#![allow(dead_code)]

use std::cell::RefCell;

use lot_manager::error::StoreError;
use lot_manager::registry::Registry;
use lot_manager::traits::VehicleStore;
use lot_manager::types::{CustomerType, ParkedVehicle, Timestamp, VehicleType};

pub const T0: Timestamp = 1_700_000_000;

pub fn minutes(m: i64) -> i64 {
    m * 60
}

pub fn hours(h: i64) -> i64 {
    h * 3600
}

/// In-memory [`VehicleStore`]; `None` means nothing has been saved yet.
#[derive(Default)]
pub struct MemoryStore {
    saved: RefCell<Option<Vec<ParkedVehicle>>>,
}

impl MemoryStore {
    pub fn with(vehicles: Vec<ParkedVehicle>) -> Self {
        Self {
            saved: RefCell::new(Some(vehicles)),
        }
    }

    pub fn saved(&self) -> Option<Vec<ParkedVehicle>> {
        self.saved.borrow().clone()
    }
}

impl VehicleStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<ParkedVehicle>>, StoreError> {
        Ok(self.saved.borrow().clone())
    }

    fn persist(&self, vehicles: &[ParkedVehicle]) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(vehicles.to_vec());
        Ok(())
    }
}

/// Admit `count` vehicles of one type requesting `class`, with identifiers
/// derived from `prefix`. Returns the granted classes in order.
pub fn admit_many(
    registry: &mut Registry,
    prefix: &str,
    vehicle_type: VehicleType,
    class: CustomerType,
    count: u32,
) -> Vec<CustomerType> {
    (0..count)
        .map(|i| {
            registry
                .admit(&format!("{prefix}-{i}"), vehicle_type, class, T0)
                .expect("admit")
        })
        .collect()
}

/// Fill one cell to capacity with vehicles requesting that cell's class.
pub fn fill_cell(registry: &mut Registry, vehicle_type: VehicleType, class: CustomerType) {
    let free = registry.grid().free(vehicle_type, class);
    let prefix = format!("{}-{}", vehicle_type.ordinal(), class.ordinal());
    let granted = admit_many(registry, &prefix, vehicle_type, class, free);
    assert!(granted.iter().all(|c| *c == class));
}

/// Fill every cell of the lot.
pub fn fill_lot(registry: &mut Registry) {
    for vehicle_type in VehicleType::ALL {
        for class in CustomerType::BY_PRIORITY {
            fill_cell(registry, vehicle_type, class);
        }
    }
}
