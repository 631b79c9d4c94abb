#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulated telemetry feed producing tracked-entity snapshots.
//!
//! The simulator stands in for a live tracker: it scatters entities around a
//! center and then advances them in discrete steps, drifting moving entities
//! and occasionally flipping their status. It is deterministic for a given
//! seed and step sequence, which keeps cluster detection reproducible in demos
//! and tests.

use std::f64::consts::TAU;

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, StandardNormal};
use safety_sim_core::{EntityStatus, GeoPoint, TrackedEntity};
use sha2::{Digest, Sha256};
use thiserror::Error;

const RNG_STREAM_TELEMETRY: &str = "telemetry";
const KM_PER_DEGREE: f64 = 111.0;
const WALKING_SPEED_KMH: f64 = 4.5;
const WALKING_SPEED_DEVIATION_KMH: f64 = 1.0;
const MIN_MOVING_SPEED_KMH: f64 = 0.5;
const INITIAL_MOVING_SHARE: f64 = 0.7;
const STOP_PROBABILITY: f64 = 0.10;
const START_PROBABILITY: f64 = 0.20;
const ALERT_PROBABILITY: f64 = 0.01;
const ALERT_CLEAR_PROBABILITY: f64 = 0.30;

/// Parameters of the simulated feed.
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetryConfig {
    /// Number of tracked entities.
    pub entity_count: usize,
    /// Seed from which the feed's random stream is derived.
    pub seed: u64,
    /// Point the entities are scattered around.
    pub center: GeoPoint,
    /// Standard deviation of the initial scatter, in degrees.
    pub spread_degrees: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            entity_count: 60,
            seed: 0x5eed_cafe,
            center: GeoPoint::default(),
            spread_degrees: 0.02,
        }
    }
}

/// Errors raised while configuring the simulated feed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TelemetryError {
    /// The scatter must be a finite, non-negative number of degrees.
    #[error("spread of {0} degrees is not a finite non-negative value")]
    InvalidSpread(f64),
}

/// Deterministic generator of tracked-entity snapshots.
#[derive(Debug)]
pub struct TelemetrySimulator {
    rng: ChaCha8Rng,
    entities: Vec<TrackedEntity>,
}

impl TelemetrySimulator {
    /// Scatters `config.entity_count` entities around the center, stamped with `now`.
    pub fn new(config: &TelemetryConfig, now: DateTime<Utc>) -> Result<Self, TelemetryError> {
        let spread = config.spread_degrees;
        if !spread.is_finite() || spread < 0.0 {
            return Err(TelemetryError::InvalidSpread(spread));
        }
        let scatter =
            Normal::new(0.0, spread).map_err(|_| TelemetryError::InvalidSpread(spread))?;
        let mut rng =
            ChaCha8Rng::seed_from_u64(derive_labeled_seed(config.seed, RNG_STREAM_TELEMETRY));

        let mut entities = Vec::with_capacity(config.entity_count);
        for index in 0..config.entity_count {
            let position = GeoPoint::new(
                config.center.lat + scatter.sample(&mut rng),
                config.center.lng + scatter.sample(&mut rng),
            )
            .clamped();
            let status = if rng.gen_bool(INITIAL_MOVING_SHARE) {
                EntityStatus::Moving
            } else {
                EntityStatus::Stationary
            };
            let speed = match status {
                EntityStatus::Moving => sample_speed(&mut rng),
                EntityStatus::Stationary | EntityStatus::Alert => 0.0,
            };
            entities.push(TrackedEntity {
                id: format!("tourist-{index}"),
                lat: position.lat,
                lng: position.lng,
                status,
                speed,
                last_update: now,
            });
        }

        tracing::debug!(
            entities = entities.len(),
            seed = config.seed,
            "telemetry feed seeded"
        );
        Ok(Self { rng, entities })
    }

    /// Advances every entity by `dt` and stamps it with `now`.
    pub fn step(&mut self, dt: Duration, now: DateTime<Utc>) {
        let hours = dt.num_milliseconds() as f64 / 3_600_000.0;

        for entity in &mut self.entities {
            entity.status = next_status(entity.status, &mut self.rng);

            if entity.status == EntityStatus::Moving {
                entity.speed = sample_speed(&mut self.rng);
                let heading = self.rng.gen_range(0.0..TAU);
                let distance_degrees = entity.speed * hours / KM_PER_DEGREE;
                let moved = GeoPoint::new(
                    entity.lat + distance_degrees * heading.cos(),
                    entity.lng + distance_degrees * heading.sin(),
                )
                .clamped();
                entity.lat = moved.lat;
                entity.lng = moved.lng;
            } else {
                entity.speed = 0.0;
            }

            entity.last_update = now;
        }
    }

    /// Current snapshot of every tracked entity.
    #[must_use]
    pub fn snapshot(&self) -> &[TrackedEntity] {
        &self.entities
    }
}

fn next_status(status: EntityStatus, rng: &mut ChaCha8Rng) -> EntityStatus {
    match status {
        EntityStatus::Alert => {
            if rng.gen_bool(ALERT_CLEAR_PROBABILITY) {
                EntityStatus::Stationary
            } else {
                EntityStatus::Alert
            }
        }
        EntityStatus::Moving | EntityStatus::Stationary if rng.gen_bool(ALERT_PROBABILITY) => {
            EntityStatus::Alert
        }
        EntityStatus::Moving if rng.gen_bool(STOP_PROBABILITY) => EntityStatus::Stationary,
        EntityStatus::Stationary if rng.gen_bool(START_PROBABILITY) => EntityStatus::Moving,
        unchanged => unchanged,
    }
}

fn sample_speed(rng: &mut ChaCha8Rng) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    (WALKING_SPEED_KMH + z * WALKING_SPEED_DEVIATION_KMH).max(MIN_MOVING_SPEED_KMH)
}

fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(bytes)
}
