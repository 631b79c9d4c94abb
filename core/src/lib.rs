#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the safety simulation workspace.
//!
//! This crate defines the data surface that connects the pure systems and the
//! adapters. The visitor synthesizer turns a [`GeneratorConfig`] into an
//! ordered sequence of [`VisitorEvent`] values, the proximity detector turns a
//! snapshot of [`TrackedEntity`] values into [`Cluster`] summaries, and the
//! deterministic [`rng::Mulberry32`] engine is the single source of randomness
//! for every system that needs reproducible output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod config;
pub mod rng;

pub use config::{ConfigError, GeneratorConfig, ScenarioConfig};

/// Latitude of the default administrative center (New Delhi).
pub const DEFAULT_CENTER_LAT: f64 = 28.6139;
/// Longitude of the default administrative center (New Delhi).
pub const DEFAULT_CENTER_LNG: f64 = 77.2090;

/// Geographic position expressed in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive toward the north.
    pub lat: f64,
    /// Longitude in degrees, positive toward the east.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Clamps the point into the valid latitude and longitude ranges.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            lat: self.lat.clamp(-90.0, 90.0),
            lng: self.lng.clamp(-180.0, 180.0),
        }
    }

    /// Reports whether both components are finite and inside valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Flat Euclidean distance in degree space.
    ///
    /// This is not a great-circle distance; one degree of longitude is treated
    /// the same as one degree of latitude regardless of where the points lie.
    #[must_use]
    pub fn planar_distance(self, other: GeoPoint) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lng = self.lng - other.lng;
        (d_lat * d_lat + d_lng * d_lng).sqrt()
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG)
    }
}

/// Synthetic point of interest around which visitor positions cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    position: GeoPoint,
    sigma: f64,
    attraction: String,
    weight: f64,
}

impl Hotspot {
    /// Creates a hotspot from its position, spatial spread, label, and draw weight.
    #[must_use]
    pub fn new(position: GeoPoint, sigma: f64, attraction: impl Into<String>, weight: f64) -> Self {
        debug_assert!(sigma > 0.0, "hotspot sigma must be positive");
        debug_assert!(weight > 0.0, "hotspot weight must be positive");
        Self {
            position,
            sigma,
            attraction: attraction.into(),
            weight,
        }
    }

    /// Center of the hotspot.
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        self.position
    }

    /// Standard deviation of visitor positions around the center, in degrees.
    #[must_use]
    pub const fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Attraction label shared by every visitor drawn from this hotspot.
    #[must_use]
    pub fn attraction(&self) -> &str {
        &self.attraction
    }

    /// Relative probability of the hotspot being selected for a visitor.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

/// ISO 3166-1 alpha-2 nationality assigned to a synthetic visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nationality {
    /// India.
    #[serde(rename = "IN")]
    India,
    /// United States.
    #[serde(rename = "US")]
    UnitedStates,
    /// United Kingdom.
    #[serde(rename = "GB")]
    UnitedKingdom,
    /// Germany.
    #[serde(rename = "DE")]
    Germany,
    /// France.
    #[serde(rename = "FR")]
    France,
    /// Japan.
    #[serde(rename = "JP")]
    Japan,
    /// China.
    #[serde(rename = "CN")]
    China,
    /// Australia.
    #[serde(rename = "AU")]
    Australia,
    /// Canada.
    #[serde(rename = "CA")]
    Canada,
    /// Russia.
    #[serde(rename = "RU")]
    Russia,
    /// Bangladesh.
    #[serde(rename = "BD")]
    Bangladesh,
    /// Nepal.
    #[serde(rename = "NP")]
    Nepal,
}

impl Nationality {
    /// Two-letter country code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::India => "IN",
            Self::UnitedStates => "US",
            Self::UnitedKingdom => "GB",
            Self::Germany => "DE",
            Self::France => "FR",
            Self::Japan => "JP",
            Self::China => "CN",
            Self::Australia => "AU",
            Self::Canada => "CA",
            Self::Russia => "RU",
            Self::Bangladesh => "BD",
            Self::Nepal => "NP",
        }
    }
}

impl fmt::Display for Nationality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Age bucket assigned to a synthetic visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeRange {
    /// Visitors aged 18 to 25.
    #[serde(rename = "18-25")]
    From18To25,
    /// Visitors aged 26 to 35.
    #[serde(rename = "26-35")]
    From26To35,
    /// Visitors aged 36 to 45.
    #[serde(rename = "36-45")]
    From36To45,
    /// Visitors aged 46 to 55.
    #[serde(rename = "46-55")]
    From46To55,
    /// Visitors aged 56 to 65.
    #[serde(rename = "56-65")]
    From56To65,
    /// Visitors older than 65.
    #[serde(rename = "65+")]
    Over65,
}

impl AgeRange {
    /// Every bucket in ascending order.
    pub const ALL: [AgeRange; 6] = [
        Self::From18To25,
        Self::From26To35,
        Self::From36To45,
        Self::From46To55,
        Self::From56To65,
        Self::Over65,
    ];

    /// Human-readable bucket label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::From18To25 => "18-25",
            Self::From26To35 => "26-35",
            Self::From36To45 => "36-45",
            Self::From46To55 => "46-55",
            Self::From56To65 => "56-65",
            Self::Over65 => "65+",
        }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single synthetic visitor record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorEvent {
    /// Identifier unique within one generation run.
    pub id: String,
    /// Latitude in `[-90, 90]`.
    pub lat: f64,
    /// Longitude in `[-180, 180]`.
    pub lng: f64,
    /// Instant the visit was recorded.
    pub timestamp: DateTime<Utc>,
    /// Attraction label of the hotspot the visitor was drawn from.
    pub attraction: String,
    /// Visitor nationality.
    pub nationality: Nationality,
    /// Number of people travelling together, at least one.
    pub group_size: u32,
    /// Minutes spent at the location, within `[1, 240]`.
    pub dwell_time_minutes: u32,
    /// Age bucket of the visitor.
    pub age_range: AgeRange,
}

impl VisitorEvent {
    /// Position of the visitor.
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Movement state reported by the telemetry feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    /// The entity is travelling.
    Moving,
    /// The entity is stationary.
    Stationary,
    /// The entity raised an alert.
    Alert,
}

/// Snapshot of a live-tracked entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntity {
    /// Identifier of the entity.
    pub id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Current movement state.
    pub status: EntityStatus,
    /// Reported speed in kilometres per hour.
    pub speed: f64,
    /// Instant of the most recent position report.
    pub last_update: DateTime<Utc>,
}

impl TrackedEntity {
    /// Position of the entity.
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Coarse classification of a cluster used for rendering emphasis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterDensity {
    /// Between three and five members.
    Medium,
    /// More than five members.
    High,
}

impl ClusterDensity {
    /// Classifies a cluster by its member count.
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        if count > 5 {
            Self::High
        } else {
            Self::Medium
        }
    }
}

/// Group of nearby tracked entities computed from a single snapshot.
///
/// Clusters borrow their members from the snapshot they were detected in and
/// carry no identity across detection calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cluster<'a> {
    id: String,
    center: GeoPoint,
    members: Vec<&'a TrackedEntity>,
    count: usize,
    density: ClusterDensity,
}

impl<'a> Cluster<'a> {
    /// Creates a cluster from its members, deriving centroid, count, and density.
    #[must_use]
    pub fn from_members(id: impl Into<String>, members: Vec<&'a TrackedEntity>) -> Self {
        let count = members.len();
        let center = centroid(&members);
        Self {
            id: id.into(),
            center,
            members,
            count,
            density: ClusterDensity::from_count(count),
        }
    }

    /// Identifier of the cluster within its detection call.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Arithmetic mean of member positions.
    #[must_use]
    pub const fn center(&self) -> GeoPoint {
        self.center
    }

    /// Entities belonging to the cluster.
    #[must_use]
    pub fn members(&self) -> &[&'a TrackedEntity] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Density tier derived from the member count.
    #[must_use]
    pub const fn density(&self) -> ClusterDensity {
        self.density
    }
}

fn centroid(members: &[&TrackedEntity]) -> GeoPoint {
    if members.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }

    let (lat_sum, lng_sum) = members
        .iter()
        .fold((0.0, 0.0), |(lat, lng), entity| (lat + entity.lat, lng + entity.lng));
    let n = members.len() as f64;
    GeoPoint::new(lat_sum / n, lng_sum / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, lat: f64, lng: f64) -> TrackedEntity {
        TrackedEntity {
            id: id.to_owned(),
            lat,
            lng,
            status: EntityStatus::Moving,
            speed: 3.0,
            last_update: DateTime::<Utc>::from_timestamp(0, 0).expect("epoch"),
        }
    }

    #[test]
    fn clamped_point_stays_within_bounds() {
        let point = GeoPoint::new(91.5, -181.0).clamped();
        assert_eq!(point, GeoPoint::new(90.0, -180.0));
        assert!(point.is_valid());
    }

    #[test]
    fn planar_distance_ignores_latitude() {
        let a = GeoPoint::new(60.0, 10.0);
        let b = GeoPoint::new(60.0, 10.01);
        assert!((a.planar_distance(b) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn density_boundary_is_exclusive() {
        assert_eq!(ClusterDensity::from_count(3), ClusterDensity::Medium);
        assert_eq!(ClusterDensity::from_count(5), ClusterDensity::Medium);
        assert_eq!(ClusterDensity::from_count(6), ClusterDensity::High);
    }

    #[test]
    fn cluster_center_is_member_mean() {
        let entities = [
            entity("a", 1.0, 2.0),
            entity("b", 3.0, 4.0),
            entity("c", 2.0, 6.0),
        ];
        let cluster = Cluster::from_members("cluster-0", entities.iter().collect());
        assert_eq!(cluster.count(), 3);
        assert!((cluster.center().lat - 2.0).abs() < 1e-12);
        assert!((cluster.center().lng - 4.0).abs() < 1e-12);
    }

    #[test]
    fn visitor_event_uses_camel_case_wire_names() {
        let event = VisitorEvent {
            id: "visitor-1-0".to_owned(),
            lat: 28.6,
            lng: 77.2,
            timestamp: DateTime::<Utc>::from_timestamp(0, 0).expect("epoch"),
            attraction: "Red Fort".to_owned(),
            nationality: Nationality::India,
            group_size: 2,
            dwell_time_minutes: 75,
            age_range: AgeRange::Over65,
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["groupSize"], 2);
        assert_eq!(json["dwellTimeMinutes"], 75);
        assert_eq!(json["nationality"], "IN");
        assert_eq!(json["ageRange"], "65+");
        assert_eq!(json["timestamp"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn tracked_entity_status_is_lowercase() {
        let mut tracked = entity("t", 0.0, 0.0);
        tracked.status = EntityStatus::Alert;
        let json = serde_json::to_value(&tracked).expect("serialize");
        assert_eq!(json["status"], "alert");
        assert!(json.get("lastUpdate").is_some());
    }
}
