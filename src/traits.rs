//! Collaborator seams.
//!
//! The registry itself performs no I/O. Persisting the parked-vehicle list is
//! delegated to a [`VehicleStore`], so callers can plug in the flat-file
//! format from [`crate::store`] or an in-memory double in tests.

use crate::error::StoreError;
use crate::types::ParkedVehicle;

/// Loads and persists the list of currently parked vehicles.
pub trait VehicleStore {
    /// Saved vehicles in their stored order, or `None` when nothing has been
    /// saved yet.
    fn load(&self) -> Result<Option<Vec<ParkedVehicle>>, StoreError>;

    /// Replace the saved state with `vehicles`, preserving their order.
    fn persist(&self, vehicles: &[ParkedVehicle]) -> Result<(), StoreError>;
}
