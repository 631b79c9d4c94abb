#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Registry of named presets used to produce reproducible demo datasets.

use safety_sim_core::{GeoPoint, ScenarioConfig};

/// Key resolved when a lookup names an unknown scenario.
pub const DEFAULT_SCENARIO: &str = "delhi";

struct ScenarioPreset {
    key: &'static str,
    city_name: &'static str,
    seed: u32,
    count: usize,
    lat: f64,
    lng: f64,
    hotspot_count: usize,
}

static PRESETS: [ScenarioPreset; 5] = [
    ScenarioPreset {
        key: "delhi",
        city_name: "New Delhi",
        seed: 12_345,
        count: 5_000,
        lat: 28.6139,
        lng: 77.2090,
        hotspot_count: 6,
    },
    ScenarioPreset {
        key: "mumbai",
        city_name: "Mumbai",
        seed: 67_890,
        count: 8_000,
        lat: 19.0760,
        lng: 72.8777,
        hotspot_count: 8,
    },
    ScenarioPreset {
        key: "jaipur",
        city_name: "Jaipur",
        seed: 24_680,
        count: 3_000,
        lat: 26.9124,
        lng: 75.7873,
        hotspot_count: 5,
    },
    ScenarioPreset {
        key: "agra",
        city_name: "Agra",
        seed: 13_579,
        count: 4_000,
        lat: 27.1767,
        lng: 78.0081,
        hotspot_count: 4,
    },
    ScenarioPreset {
        key: "goa",
        city_name: "Panaji",
        seed: 11_223,
        count: 2_500,
        lat: 15.4909,
        lng: 73.8278,
        hotspot_count: 7,
    },
];

impl ScenarioPreset {
    fn to_config(&self) -> ScenarioConfig {
        ScenarioConfig {
            seed: self.seed,
            count: self.count,
            admin_location: GeoPoint::new(self.lat, self.lng),
            city_name: self.city_name.to_owned(),
            hotspot_count: self.hotspot_count,
        }
    }
}

/// Returns the preset registered under `key`, falling back to [`DEFAULT_SCENARIO`].
///
/// Keys are matched case-insensitively after trimming whitespace.
#[must_use]
pub fn scenario(key: &str) -> ScenarioConfig {
    find(key)
        .or_else(|| find(DEFAULT_SCENARIO))
        .map(ScenarioPreset::to_config)
        .unwrap_or_else(|| PRESETS[0].to_config())
}

/// Reports whether `key` names a registered preset.
#[must_use]
pub fn contains(key: &str) -> bool {
    find(key).is_some()
}

/// Every registered key paired with its preset, in registration order.
#[must_use]
pub fn scenarios() -> Vec<(&'static str, ScenarioConfig)> {
    PRESETS
        .iter()
        .map(|preset| (preset.key, preset.to_config()))
        .collect()
}

fn find(key: &str) -> Option<&'static ScenarioPreset> {
    let key = key.trim();
    PRESETS
        .iter()
        .find(|preset| preset.key.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_is_registered() {
        assert!(contains(DEFAULT_SCENARIO));
    }

    #[test]
    fn keys_are_unique() {
        let keys: Vec<_> = scenarios().into_iter().map(|(key, _)| key).collect();
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(scenario(" Mumbai "), scenario("mumbai"));
        assert_eq!(scenario("mumbai").city_name, "Mumbai");
    }
}
