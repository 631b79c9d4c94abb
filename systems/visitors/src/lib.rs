#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic synthesis of visitor events clustered around points of interest.
//!
//! A single [`Mulberry32`] engine is seeded from the configuration and threaded
//! through the hotspot builder and then through the per-event sampling loop.
//! Every draw happens in a fixed order, so the produced sequence is a pure
//! function of the configuration.

use safety_sim_core::{
    rng::Mulberry32, ConfigError, GeneratorConfig, GeoPoint, Hotspot, VisitorEvent,
};
use safety_sim_system_hotspots::build_hotspots;

mod attributes;
mod summary;
mod timeline;

pub use attributes::{dwell_time_for, NATIONALITY_WEIGHTS};
pub use summary::{summarize, DatasetSummary};
pub use timeline::{DAY_WINDOW_END_HOUR, DAY_WINDOW_START_HOUR};

/// Generates `config.count` visitor events sorted by timestamp.
///
/// The configuration is validated before any draw is made. Ties between equal
/// timestamps keep generation order.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<VisitorEvent>, ConfigError> {
    config.validate()?;

    let mut rng = Mulberry32::new(config.seed);
    let hotspots = build_hotspots(config.admin_location, config.hotspot_count, &mut rng);
    let weights: Vec<f64> = hotspots.iter().map(Hotspot::weight).collect();

    let mut events = Vec::with_capacity(config.count);
    for index in 0..config.count {
        let hotspot = select_hotspot(&hotspots, &weights, &mut rng);
        events.push(synthesize_event(config, index, hotspot, &mut rng));
    }

    events.sort_by_key(|event| event.timestamp);

    tracing::debug!(
        seed = config.seed,
        count = events.len(),
        hotspots = hotspots.len(),
        "visitor events generated"
    );
    Ok(events)
}

fn select_hotspot<'a>(
    hotspots: &'a [Hotspot],
    weights: &[f64],
    rng: &mut Mulberry32,
) -> &'a Hotspot {
    let index = rng.weighted_index(weights).unwrap_or(0);
    &hotspots[index]
}

fn synthesize_event(
    config: &GeneratorConfig,
    index: usize,
    hotspot: &Hotspot,
    rng: &mut Mulberry32,
) -> VisitorEvent {
    let center = hotspot.position();
    let lat = rng.gaussian(center.lat, hotspot.sigma());
    let lng = rng.gaussian(center.lng, hotspot.sigma());
    let position = GeoPoint::new(lat, lng).clamped();

    let timestamp = timeline::sample_timestamp(rng, config.start_date, config.end_date);
    let group_size = attributes::sample_group_size(rng);
    let dwell_time_minutes = attributes::sample_dwell_time(rng, group_size);
    let nationality = attributes::sample_nationality(rng);
    let age_range = attributes::sample_age_range(rng);

    VisitorEvent {
        id: format!("visitor-{}-{index}", config.seed),
        lat: position.lat,
        lng: position.lng,
        timestamp,
        attraction: hotspot.attraction().to_owned(),
        nationality,
        group_size,
        dwell_time_minutes,
        age_range,
    }
}
