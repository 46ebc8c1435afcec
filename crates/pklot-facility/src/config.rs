//! # Lot Configuration
//!
//! YAML description of a lot's layout and, optionally, the instant a
//! simulated clock starts at.
//!
//! ```yaml
//! floors:
//!   - floor_number: 1
//!     bike_spots: 2
//!     car_spots: 2
//! clock:
//!   start: "2025-05-17T10:30:00Z"
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use pklot_core::Timestamp;

use crate::error::LotError;
use crate::floor::ParkingFloor;
use crate::lot::ParkingLot;

/// One floor: bike spots are numbered first, car spots after them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    pub floor_number: u32,
    #[serde(default)]
    pub bike_spots: u32,
    #[serde(default)]
    pub car_spots: u32,
}

/// Simulated clock settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// RFC 3339 UTC instant, e.g. `2025-05-17T10:30:00Z`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

/// A whole lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotConfig {
    pub floors: Vec<FloorConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<ClockConfig>,
}

impl Default for LotConfig {
    /// One floor with two bike spots and two car spots.
    fn default() -> Self {
        Self {
            floors: vec![FloorConfig {
                floor_number: 1,
                bike_spots: 2,
                car_spots: 2,
            }],
            clock: None,
        }
    }
}

impl LotConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, LotError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| LotError::Config(format!("failed to parse lot YAML: {e}")))
    }

    pub fn from_path(path: &Path) -> Result<Self, LotError> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| LotError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String, LotError> {
        serde_yaml::to_string(self)
            .map_err(|e| LotError::Config(format!("failed to serialize lot YAML: {e}")))
    }

    /// Validate the layout. Returns a list of problems; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.floors.is_empty() {
            errors.push("at least one floor is required".to_string());
        }
        let mut seen = BTreeSet::new();
        for floor in &self.floors {
            if !seen.insert(floor.floor_number) {
                errors.push(format!("duplicate floor number {}", floor.floor_number));
            }
            if floor.bike_spots.checked_add(floor.car_spots).is_none() {
                errors.push(format!("floor {} has too many spots", floor.floor_number));
            } else if floor.bike_spots + floor.car_spots == 0 {
                errors.push(format!("floor {} has no spots", floor.floor_number));
            }
        }
        if let Err(e) = self.clock_start() {
            errors.push(e.to_string());
        }
        errors
    }

    /// The configured clock start, if any.
    pub fn clock_start(&self) -> Result<Option<Timestamp>, LotError> {
        match self.clock.as_ref().and_then(|c| c.start.as_deref()) {
            Some(start) => Ok(Some(Timestamp::parse(start)?)),
            None => Ok(None),
        }
    }

    /// Validate and build the lot.
    pub fn build_lot(&self) -> Result<ParkingLot, LotError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(LotError::Config(errors.join("; ")));
        }
        let floors = self
            .floors
            .iter()
            .map(|f| ParkingFloor::new(f.floor_number, f.bike_spots, f.car_spots))
            .collect::<Result<Vec<_>, _>>()?;
        let lot = ParkingLot::new(floors)?;
        tracing::debug!(floors = self.floors.len(), "lot built from configuration");
        Ok(lot)
    }
}
