//! Partitioned slot pools.
//!
//! The lot is a dense 5×5 grid of [`SlotPool`] cells indexed by
//! `[vehicle_type][customer_type]`. Cell totals are carved once from the
//! [`LotLayout`] and never change afterwards.

use serde::{Deserialize, Serialize};

use crate::types::{CustomerType, VehicleType};

/// Physical capacity per vehicle type and the share of it reserved for each
/// customer class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotLayout {
    /// Total physical slots, indexed by `VehicleType::ordinal()`.
    pub vehicle_capacity: [u32; VehicleType::COUNT],
    /// Share of each vehicle type's capacity, in whole percent, indexed by
    /// `CustomerType::ordinal()`.
    pub customer_share_percent: [u32; CustomerType::COUNT],
}

impl Default for LotLayout {
    fn default() -> Self {
        Self {
            vehicle_capacity: [100, 75, 100, 50, 30],
            customer_share_percent: [15, 10, 15, 25, 35],
        }
    }
}

impl LotLayout {
    /// `floor(capacity × share)`. Truncation is not redistributed, so a row
    /// may sum to less than the physical capacity.
    pub fn cell_total(&self, vehicle_type: VehicleType, customer_type: CustomerType) -> u32 {
        let capacity = self.vehicle_capacity[vehicle_type.ordinal()];
        let share = self.customer_share_percent[customer_type.ordinal()];
        capacity * share / 100
    }
}

/// One (vehicle type, customer type) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotPool {
    pub total: u32,
    pub allocated: u32,
    pub free: u32,
}

impl SlotPool {
    fn with_total(total: u32) -> Self {
        Self {
            total,
            allocated: 0,
            free: total,
        }
    }

    pub fn is_full(&self) -> bool {
        self.free == 0
    }

    /// True when `free / total > percent / 100`, evaluated without floating
    /// point so boundary ratios compare exactly.
    pub fn free_ratio_exceeds(&self, percent: u32) -> bool {
        u64::from(self.free) * 100 > u64::from(self.total) * u64::from(percent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityGrid {
    cells: [[SlotPool; CustomerType::COUNT]; VehicleType::COUNT],
}

impl Default for CapacityGrid {
    fn default() -> Self {
        Self::initialize(&LotLayout::default())
    }
}

impl CapacityGrid {
    pub fn initialize(layout: &LotLayout) -> Self {
        let mut cells = [[SlotPool::default(); CustomerType::COUNT]; VehicleType::COUNT];
        for vehicle_type in VehicleType::ALL {
            for customer_type in CustomerType::BY_PRIORITY {
                cells[vehicle_type.ordinal()][customer_type.ordinal()] =
                    SlotPool::with_total(layout.cell_total(vehicle_type, customer_type));
            }
        }
        Self { cells }
    }

    pub fn cell(&self, vehicle_type: VehicleType, customer_type: CustomerType) -> &SlotPool {
        &self.cells[vehicle_type.ordinal()][customer_type.ordinal()]
    }

    pub fn free(&self, vehicle_type: VehicleType, customer_type: CustomerType) -> u32 {
        self.cell(vehicle_type, customer_type).free
    }

    pub fn allocated(&self, vehicle_type: VehicleType, customer_type: CustomerType) -> u32 {
        self.cell(vehicle_type, customer_type).allocated
    }

    /// Take one slot from the cell. Returns false (and changes nothing) when
    /// the cell is full.
    pub fn occupy(&mut self, vehicle_type: VehicleType, customer_type: CustomerType) -> bool {
        let cell = &mut self.cells[vehicle_type.ordinal()][customer_type.ordinal()];
        if cell.is_full() {
            return false;
        }
        cell.allocated += 1;
        cell.free -= 1;
        true
    }

    /// Return one slot to the cell. Returns false (and changes nothing) when
    /// nothing is allocated there.
    pub fn vacate(&mut self, vehicle_type: VehicleType, customer_type: CustomerType) -> bool {
        let cell = &mut self.cells[vehicle_type.ordinal()][customer_type.ordinal()];
        if cell.allocated == 0 {
            return false;
        }
        cell.allocated -= 1;
        cell.free += 1;
        true
    }

    /// Sum of every cell total: the system-wide vehicle ceiling.
    pub fn total_slots(&self) -> u32 {
        self.iter().map(|(_, _, cell)| cell.total).sum()
    }

    pub fn total_allocated(&self) -> u32 {
        self.iter().map(|(_, _, cell)| cell.allocated).sum()
    }

    /// Cells in vehicle-major, customer-minor order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleType, CustomerType, &SlotPool)> + '_ {
        VehicleType::ALL.into_iter().flat_map(move |vehicle_type| {
            CustomerType::BY_PRIORITY
                .into_iter()
                .map(move |customer_type| (vehicle_type, customer_type, self.cell(vehicle_type, customer_type)))
        })
    }

    pub fn is_consistent(&self) -> bool {
        self.iter()
            .all(|(_, _, cell)| cell.allocated + cell.free == cell.total)
    }
}
