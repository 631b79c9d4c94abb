#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic placement of weighted points of interest around a city center.

use std::f64::consts::TAU;

use safety_sim_core::{rng::Mulberry32, GeoPoint, Hotspot};

/// Base distance of a hotspot from the center, in degrees (roughly 1.5 km).
pub const BASE_RADIUS_DEGREES: f64 = 0.015;

const RADIUS_MIN_FACTOR: f64 = 0.5;
const RADIUS_JITTER_FACTOR: f64 = 1.5;
const SIGMA_MIN: f64 = 0.003;
const SIGMA_MAX: f64 = 0.008;
const WEIGHT_MIN: f64 = 0.1;
const WEIGHT_MAX: f64 = 0.4;

/// Attraction labels assigned to hotspots by index, wrapping after the last entry.
pub const ATTRACTIONS: [&str; 12] = [
    "Red Fort",
    "India Gate",
    "Qutub Minar",
    "Lotus Temple",
    "Humayun's Tomb",
    "Akshardham Temple",
    "Jama Masjid",
    "Chandni Chowk",
    "Connaught Place",
    "Rashtrapati Bhavan",
    "Lodhi Garden",
    "Raj Ghat",
];

/// Builds `count` hotspots evenly spaced by angle around `center`.
///
/// Angular positions are fixed so the field always spreads around the center;
/// only the distance from the center is jittered, uniformly within
/// `[0.5, 2.0]` times [`BASE_RADIUS_DEGREES`]. Each hotspot consumes three
/// draws from `rng` in index order: radius jitter, sigma, then weight.
pub fn build_hotspots(center: GeoPoint, count: usize, rng: &mut Mulberry32) -> Vec<Hotspot> {
    let mut hotspots = Vec::with_capacity(count);

    for index in 0..count {
        let angle = TAU * index as f64 / count as f64;
        let radius = BASE_RADIUS_DEGREES * (RADIUS_MIN_FACTOR + rng.next_unit() * RADIUS_JITTER_FACTOR);
        let sigma = rng.next_range(SIGMA_MIN, SIGMA_MAX);
        let weight = rng.next_range(WEIGHT_MIN, WEIGHT_MAX);

        let position = GeoPoint::new(
            center.lat + radius * angle.cos(),
            center.lng + radius * angle.sin(),
        );
        let attraction = ATTRACTIONS[index % ATTRACTIONS.len()];
        hotspots.push(Hotspot::new(position, sigma, attraction, weight));
    }

    tracing::debug!(
        count,
        center_lat = center.lat,
        center_lng = center.lng,
        "hotspot field built"
    );
    hotspots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_requested_number_of_hotspots() {
        let mut rng = Mulberry32::new(5);
        let hotspots = build_hotspots(GeoPoint::default(), 9, &mut rng);
        assert_eq!(hotspots.len(), 9);
    }

    #[test]
    fn zero_count_yields_empty_field_without_draws() {
        let mut rng = Mulberry32::new(5);
        let hotspots = build_hotspots(GeoPoint::default(), 0, &mut rng);
        assert!(hotspots.is_empty());
        assert_eq!(rng, Mulberry32::new(5));
    }

    #[test]
    fn consumes_three_draws_per_hotspot() {
        let mut built = Mulberry32::new(77);
        let _ = build_hotspots(GeoPoint::default(), 4, &mut built);

        let mut skipped = Mulberry32::new(77);
        for _ in 0..12 {
            let _ = skipped.next_u32();
        }
        assert_eq!(built, skipped);
    }

    #[test]
    fn attributes_stay_within_ranges() {
        let center = GeoPoint::new(10.0, 20.0);
        let mut rng = Mulberry32::new(2_718);
        for hotspot in build_hotspots(center, 50, &mut rng) {
            let distance = hotspot.position().planar_distance(center);
            assert!(distance >= BASE_RADIUS_DEGREES * 0.5 - 1e-12);
            assert!(distance < BASE_RADIUS_DEGREES * 2.0 + 1e-12);
            assert!((SIGMA_MIN..SIGMA_MAX).contains(&hotspot.sigma()));
            assert!((WEIGHT_MIN..WEIGHT_MAX).contains(&hotspot.weight()));
        }
    }

    #[test]
    fn angles_are_evenly_spaced() {
        let center = GeoPoint::new(0.0, 0.0);
        let mut rng = Mulberry32::new(31);
        let hotspots = build_hotspots(center, 4, &mut rng);
        let expected = [0.0, TAU / 4.0, TAU / 2.0, 3.0 * TAU / 4.0];
        for (hotspot, expected_angle) in hotspots.iter().zip(expected) {
            let position = hotspot.position();
            let angle = position.lng.atan2(position.lat).rem_euclid(TAU);
            assert!(
                (angle - expected_angle).abs() < 1e-9,
                "angle {angle} differs from {expected_angle}"
            );
        }
    }

    #[test]
    fn attraction_labels_wrap_after_twelve() {
        let mut rng = Mulberry32::new(8);
        let hotspots = build_hotspots(GeoPoint::default(), 14, &mut rng);
        assert_eq!(hotspots[0].attraction(), "Red Fort");
        assert_eq!(hotspots[11].attraction(), "Raj Ghat");
        assert_eq!(hotspots[12].attraction(), "Red Fort");
        assert_eq!(hotspots[13].attraction(), "India Gate");
    }
}
