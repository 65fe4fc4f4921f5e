//! Parking fee calculation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CustomerType, ParkedVehicle, Timestamp, VehicleType};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Fee schedule and per-class discounts.
#[derive(Debug, Clone, PartialEq)]
pub struct Tariff {
    /// Charge for the first (or only) billable hour, indexed by vehicle type.
    pub first_hour_fee: [u32; VehicleType::COUNT],
    /// Charge for every billable hour after the first, indexed by vehicle type.
    pub additional_hour_fee: [u32; VehicleType::COUNT],
    /// Fraction of the fee waived, indexed by customer type.
    pub discount: [f64; CustomerType::COUNT],
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            first_hour_fee: [20, 30, 40, 50, 80],
            additional_hour_fee: [30, 40, 50, 60, 100],
            discount: [0.6, 0.5, 0.8, 0.3, 0.0],
        }
    }
}

impl Tariff {
    pub fn first_hour_fee(&self, vehicle_type: VehicleType) -> u32 {
        self.first_hour_fee[vehicle_type.ordinal()]
    }

    pub fn additional_hour_fee(&self, vehicle_type: VehicleType) -> u32 {
        self.additional_hour_fee[vehicle_type.ordinal()]
    }

    pub fn discount(&self, customer_type: CustomerType) -> f64 {
        self.discount[customer_type.ordinal()]
    }
}

/// Itemised charge for one parking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    /// The class the vehicle was billed under (its granted class).
    pub customer_type: CustomerType,
    pub arrival: Timestamp,
    pub exit: Timestamp,
    /// Informational duration, truncated to whole minutes.
    pub display_hours: i64,
    pub display_minutes: i64,
    pub billable_hours: u32,
    pub fee: u32,
    pub discount: f64,
    pub total_payable: f64,
}

/// Rounds the stay up to whole hours, never below one. Saturates at
/// `u32::MAX`.
pub fn billable_hours(duration_seconds: i64) -> u32 {
    let seconds = u64::try_from(duration_seconds).unwrap_or(0);
    let hours = seconds.div_ceil(SECONDS_PER_HOUR).max(1);
    u32::try_from(hours).unwrap_or(u32::MAX)
}

/// Pure fee computation. `exit < arrival` is billed as a single hour; the
/// duration and fee saturate instead of overflowing.
pub fn compute_bill(
    tariff: &Tariff,
    vehicle_number: &str,
    vehicle_type: VehicleType,
    customer_type: CustomerType,
    arrival: Timestamp,
    exit: Timestamp,
) -> Bill {
    let duration_seconds = exit.saturating_sub(arrival);

    // Truncating division, matching whole elapsed minutes.
    let total_minutes = duration_seconds / SECONDS_PER_MINUTE;
    let display_hours = total_minutes / 60;
    let display_minutes = total_minutes % 60;

    let billable_hours = billable_hours(duration_seconds);
    let fee = tariff.first_hour_fee(vehicle_type).saturating_add(
        (billable_hours - 1).saturating_mul(tariff.additional_hour_fee(vehicle_type)),
    );

    let discount = f64::from(fee) * tariff.discount(customer_type);
    let total_payable = f64::from(fee) - discount;

    Bill {
        vehicle_number: vehicle_number.to_string(),
        vehicle_type,
        customer_type,
        arrival,
        exit,
        display_hours,
        display_minutes,
        billable_hours,
        fee,
        discount,
        total_payable,
    }
}

/// Bill for a parked vehicle leaving at `exit`, using its granted class.
pub fn bill_for(tariff: &Tariff, vehicle: &ParkedVehicle, exit: Timestamp) -> Bill {
    compute_bill(
        tariff,
        &vehicle.vehicle_number,
        vehicle.vehicle_type,
        vehicle.customer_type,
        vehicle.arrival,
        exit,
    )
}

fn format_time(timestamp: Timestamp) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(time) => time.format("%a %b %e %H:%M:%S %Y").to_string(),
        None => timestamp.to_string(),
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+=================== Parking Bill ===================+")?;
        writeln!(f, "| {:<20} : {}", "Vehicle Number", self.vehicle_number)?;
        writeln!(f, "| {:<20} : {}", "Vehicle Type", self.vehicle_type)?;
        writeln!(f, "| {:<20} : {}", "Customer Type", self.customer_type)?;
        writeln!(f, "| {:<20} : {}", "Entered Time", format_time(self.arrival))?;
        writeln!(f, "| {:<20} : {}", "Exit Time", format_time(self.exit))?;
        writeln!(
            f,
            "| {:<20} : {} hours {} minutes",
            "Parking Duration", self.display_hours, self.display_minutes
        )?;
        writeln!(f, "| {:<20} : Rs {}.00", "Total Charge", self.fee)?;
        writeln!(f, "| {:<20} : Rs {:.2}", "Discount", self.discount)?;
        writeln!(f, "| {:<20} : Rs {:.2}", "Total Payable", self.total_payable)?;
        write!(f, "+====================================================+")
    }
}
