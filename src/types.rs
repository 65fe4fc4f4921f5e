//! Vehicle and customer classifications.
//!
//! Both enumerations are closed and small, so every per-type table in the
//! crate is a fixed array indexed by `ordinal()`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Absolute point in time as unix epoch seconds.
pub type Timestamp = i64;

/// Kind of vehicle. Each kind has its own physical capacity and fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Motorcycle,
    ThreeWheeler,
    Car,
    Van,
    Bus,
}

impl VehicleType {
    pub const COUNT: usize = 5;

    pub const ALL: [VehicleType; Self::COUNT] = [
        VehicleType::Motorcycle,
        VehicleType::ThreeWheeler,
        VehicleType::Car,
        VehicleType::Van,
        VehicleType::Bus,
    ];

    /// Position in the fixed table order (also the persisted index).
    pub fn ordinal(self) -> usize {
        match self {
            VehicleType::Motorcycle => 0,
            VehicleType::ThreeWheeler => 1,
            VehicleType::Car => 2,
            VehicleType::Van => 3,
            VehicleType::Bus => 4,
        }
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleType::Motorcycle => "MOTORCYCLE",
            VehicleType::ThreeWheeler => "THREE WHEELER",
            VehicleType::Car => "CAR",
            VehicleType::Van => "VAN",
            VehicleType::Bus => "BUS",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Customer class, which also selects the slot partition a vehicle is
/// entitled to.
///
/// Classes are totally ordered by priority: `Disabled` is the most senior,
/// `Guest` the least. The `Ord` impl follows seniority (more senior sorts
/// first) and does not depend on declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Disabled,
    Vip,
    Staff,
    Registered,
    Guest,
}

impl CustomerType {
    pub const COUNT: usize = 5;

    /// All classes, most senior first.
    pub const BY_PRIORITY: [CustomerType; Self::COUNT] = [
        CustomerType::Disabled,
        CustomerType::Vip,
        CustomerType::Staff,
        CustomerType::Registered,
        CustomerType::Guest,
    ];

    /// Priority rank: 0 is the most senior class.
    pub fn rank(self) -> u8 {
        match self {
            CustomerType::Disabled => 0,
            CustomerType::Vip => 1,
            CustomerType::Staff => 2,
            CustomerType::Registered => 3,
            CustomerType::Guest => 4,
        }
    }

    /// Position in the fixed table order (also the persisted index).
    pub fn ordinal(self) -> usize {
        self.rank() as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::BY_PRIORITY.get(ordinal).copied()
    }

    /// True when `self` has strictly higher priority than `other`.
    pub fn outranks(self, other: CustomerType) -> bool {
        self.rank() < other.rank()
    }

    /// Classes strictly more senior than `self`, most senior first.
    pub fn seniors(self) -> impl Iterator<Item = CustomerType> {
        Self::BY_PRIORITY
            .into_iter()
            .take_while(move |candidate| candidate.outranks(self))
    }

    pub fn name(self) -> &'static str {
        match self {
            CustomerType::Disabled => "DISABLED",
            CustomerType::Vip => "VIP",
            CustomerType::Staff => "STAFF",
            CustomerType::Registered => "REGISTERED",
            CustomerType::Guest => "GUEST",
        }
    }

    /// Single-letter occupancy symbol.
    pub fn symbol(self) -> char {
        match self {
            CustomerType::Disabled => 'D',
            CustomerType::Vip => 'V',
            CustomerType::Staff => 'S',
            CustomerType::Registered => 'R',
            CustomerType::Guest => 'G',
        }
    }
}

impl Ord for CustomerType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for CustomerType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A vehicle currently occupying a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkedVehicle {
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    /// Granted class: the partition actually occupied, which may be senior
    /// to the class the customer asked for.
    pub customer_type: CustomerType,
    pub arrival: Timestamp,
}

impl ParkedVehicle {
    pub fn new(
        vehicle_number: impl Into<String>,
        vehicle_type: VehicleType,
        customer_type: CustomerType,
        arrival: Timestamp,
    ) -> Self {
        Self {
            vehicle_number: vehicle_number.into(),
            vehicle_type,
            customer_type,
            arrival,
        }
    }
}
