//! lot-manager core
//!
//! Slot allocation, capacity tracking and billing for a single parking lot
//! partitioned by vehicle type and customer priority class.

pub mod types;
pub mod traits;
pub mod error;
pub mod capacity;
pub mod allocation;
pub mod billing;
pub mod registry;
pub mod report;
pub mod store;
