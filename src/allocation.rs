//! Slot allocation policy.
//!
//! A vehicle is admitted into its own class's cell when that cell has room.
//! Otherwise it may borrow a slot from a more senior class, scanning from the
//! most senior class (`Disabled`) downwards and stopping at the first
//! eligible cell. Protected classes only lend while they keep a reserve:
//! `Disabled` must have more than 60% of its cell free, `Vip` more than 50%.
//! Other senior classes lend any free slot.

use crate::capacity::{CapacityGrid, SlotPool};
use crate::types::{CustomerType, VehicleType};

/// Minimum free share (whole percent, exclusive) a protected class must
/// retain before lending a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservePolicy {
    pub disabled_min_free_percent: u32,
    pub vip_min_free_percent: u32,
}

impl Default for ReservePolicy {
    fn default() -> Self {
        Self {
            disabled_min_free_percent: 60,
            vip_min_free_percent: 50,
        }
    }
}

impl ReservePolicy {
    /// Reserve applying to `class` when it lends to a junior class, if any.
    pub fn reserve_for(&self, class: CustomerType) -> Option<u32> {
        match class {
            CustomerType::Disabled => Some(self.disabled_min_free_percent),
            CustomerType::Vip => Some(self.vip_min_free_percent),
            CustomerType::Staff | CustomerType::Registered | CustomerType::Guest => None,
        }
    }

    /// Whether `lender`'s cell may take a vehicle from a junior class.
    pub fn can_lend(&self, lender: CustomerType, pool: &SlotPool) -> bool {
        if pool.is_full() {
            return false;
        }
        match self.reserve_for(lender) {
            Some(percent) => pool.free_ratio_exceeds(percent),
            None => true,
        }
    }
}

/// Outcome of a successful allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    pub requested: CustomerType,
    pub granted: CustomerType,
}

impl Grant {
    /// True when the vehicle was placed in a senior class's cell.
    pub fn is_spill(&self) -> bool {
        self.granted != self.requested
    }
}

/// Pick the cell a vehicle should occupy without touching the grid.
///
/// Returns `None` when the own cell is full and no senior cell is eligible.
pub fn select(
    grid: &CapacityGrid,
    policy: &ReservePolicy,
    vehicle_type: VehicleType,
    requested: CustomerType,
) -> Option<Grant> {
    if !grid.cell(vehicle_type, requested).is_full() {
        return Some(Grant {
            requested,
            granted: requested,
        });
    }

    requested
        .seniors()
        .find(|candidate| policy.can_lend(*candidate, grid.cell(vehicle_type, *candidate)))
        .map(|granted| Grant { requested, granted })
}

/// Select a cell and occupy it. On `None` the grid is unchanged.
pub fn allocate(
    grid: &mut CapacityGrid,
    policy: &ReservePolicy,
    vehicle_type: VehicleType,
    requested: CustomerType,
) -> Option<Grant> {
    let grant = select(grid, policy, vehicle_type, requested)?;
    if grid.occupy(vehicle_type, grant.granted) {
        Some(grant)
    } else {
        None
    }
}
