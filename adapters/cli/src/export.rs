use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use safety_sim_core::VisitorEvent;

/// Prefix of the default export filename.
const EXPORT_PREFIX: &str = "visitor-data";

/// Layout of an exported visitor dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    /// A single JSON array holding one object per visitor.
    #[default]
    Json,
    /// One JSON object per line.
    Jsonl,
}

impl ExportFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Jsonl => "jsonl",
        }
    }
}

/// Default export filename embedding the given date, e.g. `visitor-data-2025-01-31.json`.
pub(crate) fn default_export_path(date: NaiveDate, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!(
        "{EXPORT_PREFIX}-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    ))
}

/// Serializes `events` into `writer` using the requested layout.
pub(crate) fn write_events<W: Write>(
    mut writer: W,
    events: &[VisitorEvent],
    format: ExportFormat,
) -> Result<()> {
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, events)
                .context("failed to serialize visitor events")?;
            writeln!(writer)?;
        }
        ExportFormat::Jsonl => {
            for event in events {
                serde_json::to_writer(&mut writer, event)
                    .with_context(|| format!("failed to serialize visitor {}", event.id))?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush().context("failed to flush visitor export")
}

/// Writes `events` to a newly created file at `path`.
pub(crate) fn export_to_file(path: &Path, events: &[VisitorEvent], format: ExportFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create export file {}", path.display()))?;
    write_events(BufWriter::new(file), events, format)
        .with_context(|| format!("failed to write export file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use safety_sim_core::{AgeRange, Nationality};

    fn sample_events() -> Vec<VisitorEvent> {
        (0..3)
            .map(|index| VisitorEvent {
                id: format!("visitor-7-{index}"),
                lat: 28.6 + f64::from(index) * 0.001,
                lng: 77.2,
                timestamp: DateTime::<Utc>::from_timestamp(1_735_722_000 + i64::from(index), 0)
                    .expect("valid instant"),
                attraction: "India Gate".to_owned(),
                nationality: Nationality::India,
                group_size: 1,
                dwell_time_minutes: 45,
                age_range: AgeRange::From18To25,
            })
            .collect()
    }

    #[test]
    fn default_path_embeds_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date");
        assert_eq!(
            default_export_path(date, ExportFormat::Json),
            PathBuf::from("visitor-data-2025-01-31.json")
        );
        assert_eq!(
            default_export_path(date, ExportFormat::Jsonl),
            PathBuf::from("visitor-data-2025-01-31.jsonl")
        );
    }

    #[test]
    fn json_export_is_an_array_of_records() {
        let events = sample_events();
        let mut buffer = Vec::new();
        write_events(&mut buffer, &events, ExportFormat::Json).expect("export succeeds");

        let parsed: Vec<VisitorEvent> = serde_json::from_slice(&buffer).expect("valid json");
        assert_eq!(parsed, events);
    }

    #[test]
    fn jsonl_export_writes_one_record_per_line() {
        let events = sample_events();
        let mut buffer = Vec::new();
        write_events(&mut buffer, &events, ExportFormat::Jsonl).expect("export succeeds");

        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let first: serde_json::Value = serde_json::from_str(lines[0]).expect("valid json");
        assert_eq!(first["id"], "visitor-7-0");
        assert_eq!(first["dwellTimeMinutes"], 45);
    }

    #[test]
    fn file_export_creates_the_file() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("export.json");
        export_to_file(&path, &sample_events(), ExportFormat::Json).expect("export succeeds");
        let contents = std::fs::read_to_string(&path).expect("file exists");
        assert!(contents.trim_start().starts_with('['));
    }
}
