//! Parking registry: the set of parked vehicles plus the capacity grid.
//!
//! Every admit/release either completes fully or leaves the registry
//! unchanged. Timestamps are supplied by the caller.

use tracing::{debug, info, warn};

use crate::allocation::{self, Grant, ReservePolicy};
use crate::billing::{self, Bill, Tariff};
use crate::capacity::{CapacityGrid, LotLayout};
use crate::error::{AdmitError, ReleaseError, StoreError};
use crate::traits::VehicleStore;
use crate::types::{CustomerType, ParkedVehicle, Timestamp, VehicleType};

#[derive(Debug, Clone)]
pub struct Registry {
    layout: LotLayout,
    tariff: Tariff,
    policy: ReservePolicy,
    grid: CapacityGrid,
    vehicles: Vec<ParkedVehicle>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(LotLayout::default(), Tariff::default(), ReservePolicy::default())
    }
}

impl Registry {
    pub fn new(layout: LotLayout, tariff: Tariff, policy: ReservePolicy) -> Self {
        let grid = CapacityGrid::initialize(&layout);
        Self {
            layout,
            tariff,
            policy,
            grid,
            vehicles: Vec::new(),
        }
    }

    /// Build a registry and restore any state saved in `store`.
    pub fn open<S: VehicleStore>(
        layout: LotLayout,
        tariff: Tariff,
        policy: ReservePolicy,
        store: &S,
    ) -> Result<Self, StoreError> {
        let mut registry = Self::new(layout, tariff, policy);
        registry.load_from(store)?;
        Ok(registry)
    }

    pub fn grid(&self) -> &CapacityGrid {
        &self.grid
    }

    /// Parked vehicles in admission order.
    pub fn vehicles(&self) -> &[ParkedVehicle] {
        &self.vehicles
    }

    pub fn find(&self, vehicle_number: &str) -> Option<&ParkedVehicle> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.vehicle_number == vehicle_number)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// System-wide vehicle ceiling (sum of all cell totals).
    pub fn capacity_ceiling(&self) -> usize {
        self.grid.total_slots() as usize
    }

    /// Admit a vehicle, returning the class whose cell it now occupies.
    pub fn admit(
        &mut self,
        vehicle_number: &str,
        vehicle_type: VehicleType,
        requested: CustomerType,
        now: Timestamp,
    ) -> Result<CustomerType, AdmitError> {
        if self.vehicles.len() >= self.capacity_ceiling() {
            warn!(vehicle = vehicle_number, "parking is full");
            return Err(AdmitError::CapacityExceeded);
        }

        if self.find(vehicle_number).is_some() {
            warn!(vehicle = vehicle_number, "vehicle is already parked");
            return Err(AdmitError::AlreadyParked(vehicle_number.to_string()));
        }

        let grant = allocation::allocate(&mut self.grid, &self.policy, vehicle_type, requested);
        let Some(grant) = grant else {
            info!(
                vehicle = vehicle_number,
                %vehicle_type,
                %requested,
                "no slot available under priority rules"
            );
            return Err(AdmitError::NoSlot {
                vehicle_type,
                requested,
            });
        };

        self.log_grant(vehicle_number, vehicle_type, grant);
        self.vehicles.push(ParkedVehicle::new(
            vehicle_number,
            vehicle_type,
            grant.granted,
            now,
        ));
        Ok(grant.granted)
    }

    fn log_grant(&self, vehicle_number: &str, vehicle_type: VehicleType, grant: Grant) {
        if grant.is_spill() {
            info!(
                vehicle = vehicle_number,
                %vehicle_type,
                requested = %grant.requested,
                granted = %grant.granted,
                "vehicle parked in senior class slot"
            );
        } else {
            info!(
                vehicle = vehicle_number,
                %vehicle_type,
                granted = %grant.granted,
                "vehicle parked"
            );
        }
    }

    /// Release a vehicle and bill it from its arrival until `now`.
    pub fn release(&mut self, vehicle_number: &str, now: Timestamp) -> Result<Bill, ReleaseError> {
        let Some(index) = self
            .vehicles
            .iter()
            .position(|vehicle| vehicle.vehicle_number == vehicle_number)
        else {
            info!(vehicle = vehicle_number, "vehicle not found");
            return Err(ReleaseError::NotFound(vehicle_number.to_string()));
        };

        let vehicle = self.vehicles.remove(index);
        // Every registered vehicle holds one slot in its granted cell.
        let vacated = self.grid.vacate(vehicle.vehicle_type, vehicle.customer_type);
        debug_assert!(vacated, "registry and grid out of sync");

        let bill = billing::bill_for(&self.tariff, &vehicle, now);
        info!(
            vehicle = vehicle_number,
            billable_hours = bill.billable_hours,
            total_payable = bill.total_payable,
            "vehicle exited"
        );
        Ok(bill)
    }

    /// Replace the current state with the vehicles saved in `store`.
    ///
    /// Stored classes are replayed as-is without re-running allocation. On
    /// error the registry is left unchanged.
    pub fn load_from<S: VehicleStore>(&mut self, store: &S) -> Result<usize, StoreError> {
        let Some(saved) = store.load()? else {
            debug!("starting with an empty registry");
            return Ok(0);
        };

        let mut grid = CapacityGrid::initialize(&self.layout);
        let mut vehicles: Vec<ParkedVehicle> = Vec::with_capacity(saved.len());
        for vehicle in saved {
            if vehicles
                .iter()
                .any(|parked| parked.vehicle_number == vehicle.vehicle_number)
            {
                return Err(StoreError::Duplicate(vehicle.vehicle_number));
            }
            if !grid.occupy(vehicle.vehicle_type, vehicle.customer_type) {
                return Err(StoreError::Overfull {
                    vehicle_type: vehicle.vehicle_type,
                    customer_type: vehicle.customer_type,
                });
            }
            vehicles.push(vehicle);
        }

        self.grid = grid;
        self.vehicles = vehicles;
        info!(vehicles = self.vehicles.len(), "restored parking data");
        Ok(self.vehicles.len())
    }

    /// Persist the current vehicle list in registry order.
    pub fn save_to<S: VehicleStore>(&self, store: &S) -> Result<(), StoreError> {
        store.persist(&self.vehicles)?;
        info!(vehicles = self.vehicles.len(), "saved parking data");
        Ok(())
    }

    /// True when every cell balances and the grid matches the vehicle list.
    pub fn check_invariants(&self) -> bool {
        if !self.grid.is_consistent() {
            return false;
        }
        if self.grid.total_allocated() as usize != self.vehicles.len() {
            return false;
        }
        self.grid.iter().all(|(vehicle_type, customer_type, cell)| {
            let parked = self
                .vehicles
                .iter()
                .filter(|v| v.vehicle_type == vehicle_type && v.customer_type == customer_type)
                .count();
            parked == cell.allocated as usize
        })
    }
}
