//! Flat-file persistence of the parked-vehicle list.
//!
//! The first line holds the vehicle count, followed by one line per vehicle:
//!
//! ```text
//! <vehicle_number> <vehicle_type_index> <customer_type_index> <arrival_epoch_seconds>
//! ```

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::traits::VehicleStore;
use crate::types::{CustomerType, ParkedVehicle, Timestamp, VehicleType};

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("parking_data.txt"),
        }
    }
}

/// [`VehicleStore`] backed by a single text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig { path: path.into() })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Sibling the next save is written to before it replaces the target.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.config.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl VehicleStore for FileStore {
    fn load(&self) -> Result<Option<Vec<ParkedVehicle>>, StoreError> {
        let contents = match fs::read_to_string(&self.config.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.config.path.display(), "no saved parking data");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        parse(&contents).map(Some)
    }

    fn persist(&self, vehicles: &[ParkedVehicle]) -> Result<(), StoreError> {
        let tmp_path = self.tmp_path();
        let written = write_file(&tmp_path, &render(vehicles))
            .and_then(|()| fs::rename(&tmp_path, &self.config.path));
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                debug!(path = %tmp_path.display(), error = %cleanup, "failed to remove temp file");
            }
            return Err(err.into());
        }
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}

/// Render vehicles in the persisted text format.
pub fn render(vehicles: &[ParkedVehicle]) -> String {
    let mut out = format!("{}\n", vehicles.len());
    for vehicle in vehicles {
        out.push_str(&format!(
            "{} {} {} {}\n",
            vehicle.vehicle_number,
            vehicle.vehicle_type.ordinal(),
            vehicle.customer_type.ordinal(),
            vehicle.arrival
        ));
    }
    out
}

/// Parse the persisted text format. Blank trailing lines are ignored; lines
/// beyond the declared count are not read.
pub fn parse(contents: &str) -> Result<Vec<ParkedVehicle>, StoreError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((count_line, count)) = lines.next() else {
        return Ok(Vec::new());
    };
    let declared: usize = count.parse().map_err(|_| StoreError::Malformed {
        line: count_line,
        reason: format!("expected vehicle count, found {count:?}"),
    })?;

    // The declared count is untrusted; grow as lines are read.
    let mut vehicles = Vec::new();
    for (line, text) in lines.take(declared) {
        vehicles.push(parse_vehicle(line, text)?);
    }

    if vehicles.len() != declared {
        return Err(StoreError::CountMismatch {
            declared,
            found: vehicles.len(),
        });
    }
    Ok(vehicles)
}

fn parse_vehicle(line: usize, text: &str) -> Result<ParkedVehicle, StoreError> {
    let malformed = |reason: String| StoreError::Malformed { line, reason };

    let fields: Vec<&str> = text.split_whitespace().collect();
    let [number, vehicle_index, customer_index, arrival] = fields[..] else {
        return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
    };

    let vehicle_type = vehicle_index
        .parse::<usize>()
        .ok()
        .and_then(VehicleType::from_ordinal)
        .ok_or_else(|| malformed(format!("invalid vehicle type index {vehicle_index:?}")))?;
    let customer_type = customer_index
        .parse::<usize>()
        .ok()
        .and_then(CustomerType::from_ordinal)
        .ok_or_else(|| malformed(format!("invalid customer type index {customer_index:?}")))?;
    let arrival = arrival
        .parse::<Timestamp>()
        .map_err(|_| malformed(format!("invalid arrival time {arrival:?}")))?;

    Ok(ParkedVehicle::new(number, vehicle_type, customer_type, arrival))
}
