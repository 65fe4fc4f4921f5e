//! Read-only snapshots of the lot for a presentation layer.

use std::fmt;

use serde::Serialize;

use crate::registry::Registry;
use crate::types::{CustomerType, VehicleType};

/// Symbol used for a free slot in the parking-space view.
pub const FREE_SYMBOL: char = 'F';

/// Default bar width of the statistics graph.
pub const DEFAULT_BAR_WIDTH: u32 = 20;

/// Counts for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellReport {
    pub vehicle_type: VehicleType,
    pub customer_type: CustomerType,
    pub total: u32,
    pub allocated: u32,
    pub free: u32,
}

/// One vehicle type's row of the parking-space view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceRow {
    pub vehicle_type: VehicleType,
    /// Per customer class: the class symbol once per allocated slot, then
    /// [`FREE_SYMBOL`] once per free slot.
    pub segments: Vec<String>,
}

impl fmt::Display for SpaceRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<15}: {{ {} }}", self.vehicle_type.name(), self.segments.join(" | "))
    }
}

/// Bar lengths for one cell of the statistics graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphBar {
    pub vehicle_type: VehicleType,
    pub customer_type: CustomerType,
    /// Slots represented by one bar character.
    pub scale: u32,
    pub allocated_bars: u32,
    pub free_bars: u32,
}

impl GraphBar {
    pub fn render(&self) -> String {
        let mut bar = "#".repeat(self.allocated_bars as usize);
        bar.push_str(&"*".repeat(self.free_bars as usize));
        bar
    }
}

/// Allocated and free counts per cell, vehicle-major.
pub fn statistics(registry: &Registry) -> Vec<CellReport> {
    registry
        .grid()
        .iter()
        .map(|(vehicle_type, customer_type, cell)| CellReport {
            vehicle_type,
            customer_type,
            total: cell.total,
            allocated: cell.allocated,
            free: cell.free,
        })
        .collect()
}

/// Free slots in one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub vehicle_type: VehicleType,
    pub customer_type: CustomerType,
    pub free: u32,
}

/// Free count per cell, vehicle-major.
pub fn availability(registry: &Registry) -> Vec<Availability> {
    registry
        .grid()
        .iter()
        .map(|(vehicle_type, customer_type, cell)| Availability {
            vehicle_type,
            customer_type,
            free: cell.free,
        })
        .collect()
}

pub fn parking_space(registry: &Registry) -> Vec<SpaceRow> {
    let grid = registry.grid();
    VehicleType::ALL
        .into_iter()
        .map(|vehicle_type| SpaceRow {
            vehicle_type,
            segments: CustomerType::BY_PRIORITY
                .into_iter()
                .map(|customer_type| {
                    let cell = grid.cell(vehicle_type, customer_type);
                    let mut segment: String =
                        std::iter::repeat_n(customer_type.symbol(), cell.allocated as usize).collect();
                    segment.extend(std::iter::repeat_n(FREE_SYMBOL, cell.free as usize));
                    segment
                })
                .collect(),
        })
        .collect()
}

/// Bars scaled so each cell fits roughly within `bar_width` characters.
pub fn statistics_graph(registry: &Registry, bar_width: u32) -> Vec<GraphBar> {
    let bar_width = bar_width.max(1);
    registry
        .grid()
        .iter()
        .map(|(vehicle_type, customer_type, cell)| {
            let slots = cell.allocated + cell.free;
            let scale = if slots > bar_width { slots / bar_width + 1 } else { 1 };
            GraphBar {
                vehicle_type,
                customer_type,
                scale,
                allocated_bars: cell.allocated / scale,
                free_bars: cell.free / scale,
            }
        })
        .collect()
}
