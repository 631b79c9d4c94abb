use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use safety_sim_core::{GeneratorConfig, GeoPoint};
use safety_sim_system_scenarios::{scenario, DEFAULT_SCENARIO};
use serde::{de::Error as _, Deserialize, Deserializer};

/// Optional generator settings read from a TOML file.
///
/// Every field is optional so a file only overrides what it names. Dates are
/// RFC 3339 strings, for example `start_date = "2025-01-01T00:00:00Z"`. Seeds
/// accept both signed and unsigned 32-bit values.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsFile {
    pub(crate) scenario: Option<String>,
    #[serde(default, deserialize_with = "deserialize_seed")]
    pub(crate) seed: Option<u32>,
    pub(crate) count: Option<usize>,
    pub(crate) admin_location: Option<GeoPoint>,
    pub(crate) start_date: Option<DateTime<Utc>>,
    pub(crate) end_date: Option<DateTime<Utc>>,
    pub(crate) hotspot_count: Option<usize>,
}

impl SettingsFile {
    /// Reads and parses a settings file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("settings file is not valid toml")
    }
}

/// Values supplied directly on the command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) scenario: Option<String>,
    pub(crate) seed: Option<u32>,
    pub(crate) count: Option<usize>,
    pub(crate) start_date: Option<DateTime<Utc>>,
    pub(crate) end_date: Option<DateTime<Utc>>,
    pub(crate) hotspot_count: Option<usize>,
}

/// Resolves the generator configuration from the scenario preset, then the
/// settings file, then command-line overrides, each layer winning over the last.
pub(crate) fn resolve(file: Option<&SettingsFile>, overrides: &Overrides) -> GeneratorConfig {
    let key = overrides
        .scenario
        .as_deref()
        .or_else(|| file.and_then(|file| file.scenario.as_deref()))
        .unwrap_or(DEFAULT_SCENARIO);
    let mut config = GeneratorConfig::from_scenario(&scenario(key));

    if let Some(file) = file {
        apply(&mut config.seed, file.seed);
        apply(&mut config.count, file.count);
        apply(&mut config.admin_location, file.admin_location);
        apply(&mut config.start_date, file.start_date);
        apply(&mut config.end_date, file.end_date);
        apply(&mut config.hotspot_count, file.hotspot_count);
    }

    apply(&mut config.seed, overrides.seed);
    apply(&mut config.count, overrides.count);
    apply(&mut config.start_date, overrides.start_date);
    apply(&mut config.end_date, overrides.end_date);
    apply(&mut config.hotspot_count, overrides.hotspot_count);
    config
}

/// Reinterprets a signed or unsigned 32-bit seed as the engine's unsigned seed.
///
/// Negative values wrap, so `-1` selects `4294967295`.
pub(crate) fn wrap_seed(value: i64) -> Option<u32> {
    u32::try_from(value)
        .ok()
        .or_else(|| i32::try_from(value).ok().map(|signed| signed as u32))
}

/// Parses a `--seed` flag value.
pub(crate) fn parse_seed(value: &str) -> Result<u32, String> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|err| format!("seed `{value}` is not an integer: {err}"))?;
    wrap_seed(parsed).ok_or_else(|| format!("seed {parsed} does not fit in 32 bits"))
}

fn deserialize_seed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = i64::deserialize(deserializer)?;
    wrap_seed(value)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("seed {value} does not fit in 32 bits")))
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
