use std::io;

use thiserror::Error;

use crate::types::{CustomerType, VehicleType};

/// Why a vehicle was turned away at the gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmitError {
    /// Every slot in the lot is taken.
    #[error("parking is full, cannot accept more vehicles")]
    CapacityExceeded,

    /// Neither the requested cell nor any eligible senior cell has room.
    #[error("no suitable {vehicle_type} slot available for a {requested} customer")]
    NoSlot {
        vehicle_type: VehicleType,
        requested: CustomerType,
    },

    #[error("vehicle {0} is already parked")]
    AlreadyParked(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseError {
    #[error("vehicle {0} not found in the parking system")]
    NotFound(String),
}

/// Failures reading or writing persisted registry state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed parking data at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("parking data declares {declared} vehicles but holds {found}")]
    CountMismatch { declared: usize, found: usize },

    /// A stored vehicle points at a cell that has no room left.
    #[error("parking data overfills the {vehicle_type}/{customer_type} cell")]
    Overfull {
        vehicle_type: VehicleType,
        customer_type: CustomerType,
    },

    #[error("parking data lists vehicle {0} more than once")]
    Duplicate(String),
}
