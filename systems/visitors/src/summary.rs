use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use safety_sim_core::{AgeRange, Nationality, VisitorEvent};
use serde::Serialize;

/// Aggregate view of a generated visitor dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Number of events summarized.
    pub total: usize,
    /// Visitor count per attraction label.
    pub by_attraction: BTreeMap<String, usize>,
    /// Visitor count per nationality.
    pub by_nationality: BTreeMap<Nationality, usize>,
    /// Visitor count per age bucket.
    pub by_age_range: BTreeMap<AgeRange, usize>,
    /// Mean group size, zero for an empty dataset.
    pub mean_group_size: f64,
    /// Mean dwell time in minutes, zero for an empty dataset.
    pub mean_dwell_minutes: f64,
    /// Earliest timestamp in the dataset.
    pub first_timestamp: Option<DateTime<Utc>>,
    /// Latest timestamp in the dataset.
    pub last_timestamp: Option<DateTime<Utc>>,
}

impl DatasetSummary {
    /// Share of visitors with the given nationality.
    #[must_use]
    pub fn nationality_share(&self, nationality: Nationality) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = self.by_nationality.get(&nationality).copied().unwrap_or(0);
        count as f64 / self.total as f64
    }
}

/// Summarizes a visitor dataset in a single pass.
#[must_use]
pub fn summarize(events: &[VisitorEvent]) -> DatasetSummary {
    let mut summary = DatasetSummary {
        total: events.len(),
        ..DatasetSummary::default()
    };
    if events.is_empty() {
        return summary;
    }

    let mut group_total = 0u64;
    let mut dwell_total = 0u64;
    for event in events {
        *summary
            .by_attraction
            .entry(event.attraction.clone())
            .or_insert(0) += 1;
        *summary.by_nationality.entry(event.nationality).or_insert(0) += 1;
        *summary.by_age_range.entry(event.age_range).or_insert(0) += 1;
        group_total += u64::from(event.group_size);
        dwell_total += u64::from(event.dwell_time_minutes);

        summary.first_timestamp = Some(match summary.first_timestamp {
            Some(first) => first.min(event.timestamp),
            None => event.timestamp,
        });
        summary.last_timestamp = Some(match summary.last_timestamp {
            Some(last) => last.max(event.timestamp),
            None => event.timestamp,
        });
    }

    let total = events.len() as f64;
    summary.mean_group_size = group_total as f64 / total;
    summary.mean_dwell_minutes = dwell_total as f64 / total;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(id: &str, attraction: &str, nationality: Nationality, minutes: i64) -> VisitorEvent {
        VisitorEvent {
            id: id.to_owned(),
            lat: 0.0,
            lng: 0.0,
            timestamp: DateTime::<Utc>::from_timestamp(0, 0).expect("epoch")
                + Duration::minutes(minutes),
            attraction: attraction.to_owned(),
            nationality,
            group_size: 2,
            dwell_time_minutes: 60,
            age_range: AgeRange::From26To35,
        }
    }

    #[test]
    fn empty_dataset_has_zero_means() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_group_size, 0.0);
        assert!(summary.first_timestamp.is_none());
        assert_eq!(summary.nationality_share(Nationality::India), 0.0);
    }

    #[test]
    fn counts_and_bounds_are_tracked() {
        let events = [
            event("a", "Red Fort", Nationality::India, 30),
            event("b", "Red Fort", Nationality::Japan, 10),
            event("c", "Raj Ghat", Nationality::India, 50),
        ];
        let summary = summarize(&events);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_attraction["Red Fort"], 2);
        assert_eq!(summary.by_nationality[&Nationality::India], 2);
        assert_eq!(summary.by_age_range[&AgeRange::From26To35], 3);
        assert!((summary.mean_group_size - 2.0).abs() < 1e-12);
        assert_eq!(summary.first_timestamp, Some(events[1].timestamp));
        assert_eq!(summary.last_timestamp, Some(events[2].timestamp));
        assert!((summary.nationality_share(Nationality::India) - 2.0 / 3.0).abs() < 1e-12);
    }
}
