use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{rng::DEFAULT_SEED, GeoPoint};

/// Number of visitors generated when no count is supplied.
const DEFAULT_COUNT: usize = 5_000;
/// Number of hotspots placed when no count is supplied.
const DEFAULT_HOTSPOT_COUNT: usize = 6;
/// Length of the default generation window.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Options recognised by the visitor synthesizer.
///
/// Every field has a default so partial documents (for example a TOML file
/// naming only `seed` and `count`) deserialize into a complete configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed of the deterministic engine.
    pub seed: u32,
    /// Number of visitor events to produce.
    pub count: usize,
    /// Administrative center the hotspots are placed around.
    pub admin_location: GeoPoint,
    /// Earliest instant a visitor event may carry.
    pub start_date: DateTime<Utc>,
    /// Latest instant a visitor event may carry.
    pub end_date: DateTime<Utc>,
    /// Number of hotspots to place around the center.
    pub hotspot_count: usize,
}

impl GeneratorConfig {
    /// Lifts a scenario preset into a full configuration using the default date window.
    #[must_use]
    pub fn from_scenario(scenario: &ScenarioConfig) -> Self {
        Self {
            seed: scenario.seed,
            count: scenario.count,
            admin_location: scenario.admin_location,
            hotspot_count: scenario.hotspot_count,
            ..Self::default()
        }
    }

    /// Rejects configurations that would otherwise produce corrupt output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hotspot_count == 0 {
            return Err(ConfigError::NoHotspots);
        }
        if self.end_date < self.start_date {
            return Err(ConfigError::InvertedDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !self.admin_location.is_valid() {
            return Err(ConfigError::InvalidLocation {
                lat: self.admin_location.lat,
                lng: self.admin_location.lng,
            });
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let start_date = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default();
        Self {
            seed: DEFAULT_SEED,
            count: DEFAULT_COUNT,
            admin_location: GeoPoint::default(),
            start_date,
            end_date: start_date + Duration::days(DEFAULT_WINDOW_DAYS),
            hotspot_count: DEFAULT_HOTSPOT_COUNT,
        }
    }
}

/// Named, immutable preset parameterizing a reproducible demo dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Seed of the deterministic engine.
    pub seed: u32,
    /// Number of visitor events to produce.
    pub count: usize,
    /// Administrative center of the city.
    pub admin_location: GeoPoint,
    /// Display name of the city.
    pub city_name: String,
    /// Number of hotspots to place around the center.
    pub hotspot_count: usize,
}

/// Configuration faults detected before any random draw is made.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// At least one hotspot is required to place visitors.
    #[error("hotspot count must be at least one")]
    NoHotspots,
    /// The generation window ends before it starts.
    #[error("end date {end} precedes start date {start}")]
    InvertedDateRange {
        /// Requested start of the window.
        start: DateTime<Utc>,
        /// Requested end of the window.
        end: DateTime<Utc>,
    },
    /// The administrative center is not a valid coordinate.
    #[error("administrative location ({lat}, {lng}) is not a valid coordinate")]
    InvalidLocation {
        /// Rejected latitude.
        lat: f64,
        /// Rejected longitude.
        lng: f64,
    },
}
