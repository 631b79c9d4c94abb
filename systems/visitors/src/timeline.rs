use chrono::{DateTime, Utc};
use safety_sim_core::rng::Mulberry32;

/// First hour of the daily visiting window, in UTC.
pub const DAY_WINDOW_START_HOUR: i64 = 8;
/// Last hour of the daily visiting window, in UTC.
pub const DAY_WINDOW_END_HOUR: i64 = 22;

const HOUR_MS: i64 = 60 * 60 * 1_000;
const DAY_MS: i64 = 24 * HOUR_MS;
const WINDOW_MS: i64 = (DAY_WINDOW_END_HOUR - DAY_WINDOW_START_HOUR) * HOUR_MS;

/// Day-part bands as `(cumulative probability, window fraction low, window fraction high)`.
///
/// Shapes clock time into a morning rush, a midday lull, an afternoon peak and
/// a long evening tail.
const DAY_PART_BANDS: [(f64, f64, f64); 3] = [
    (0.10, 0.20, 0.40),
    (0.30, 0.40, 0.55),
    (0.60, 0.55, 0.75),
];
const EVENING_BAND: (f64, f64) = (0.75, 1.00);

/// Draws a fraction of the daily window; consumes two draws.
fn sample_hour_bias(rng: &mut Mulberry32) -> f64 {
    let day_progress = rng.next_unit();
    let (low, high) = DAY_PART_BANDS
        .iter()
        .find(|(threshold, _, _)| day_progress < *threshold)
        .map_or(EVENING_BAND, |(_, low, high)| (*low, *high));
    low + rng.next_unit() * (high - low)
}

/// Draws a timestamp whose date is uniform over `[start, end]` and whose clock
/// time falls within the daily window, reshaped by the day-part bias.
///
/// Consumes three draws. Arithmetic is carried out in whole milliseconds with
/// fractions truncated. When the drawn day's window only partly overlaps
/// `[start, end]` the bias is scaled into the overlap; a day whose window lies
/// entirely outside the range defers to the neighbouring day. Only a range that
/// misses every window is snapped onto its bounds.
pub(crate) fn sample_timestamp(
    rng: &mut Mulberry32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let hour_bias = sample_hour_bias(rng);

    let start_ms = start.timestamp_millis();
    let end_ms = end.timestamp_millis();
    let span_ms = (end_ms - start_ms) as f64;
    let instant_ms = start_ms + (rng.next_unit() * span_ms) as i64;

    let day_ms = instant_ms.div_euclid(DAY_MS) * DAY_MS;
    let timestamp_ms = [day_ms, day_ms - DAY_MS, day_ms + DAY_MS]
        .into_iter()
        .find_map(|day| window_overlap(day, start_ms, end_ms))
        .map_or(instant_ms, |(low, high)| {
            low + (hour_bias * (high - low) as f64) as i64
        });

    DateTime::from_timestamp_millis(timestamp_ms.clamp(start_ms, end_ms)).unwrap_or(start)
}

/// Part of the visiting window of the day starting at `day_ms` that lies in `[start_ms, end_ms]`.
fn window_overlap(day_ms: i64, start_ms: i64, end_ms: i64) -> Option<(i64, i64)> {
    let window_start = day_ms + DAY_WINDOW_START_HOUR * HOUR_MS;
    let low = window_start.max(start_ms);
    let high = (window_start + WINDOW_MS).min(end_ms);
    (low <= high).then_some((low, high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Timelike};

    fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("valid date")
    }

    #[test]
    fn hour_bias_stays_within_unit_interval() {
        let mut rng = Mulberry32::new(21);
        for _ in 0..10_000 {
            let bias = sample_hour_bias(&mut rng);
            assert!((0.20..1.0).contains(&bias), "bias {bias}");
        }
    }

    #[test]
    fn evening_band_is_most_common() {
        let mut rng = Mulberry32::new(8);
        let evening = (0..10_000)
            .filter(|_| sample_hour_bias(&mut rng) >= 0.75)
            .count();
        assert!((3_700..4_300).contains(&evening), "evening count {evening}");
    }

    #[test]
    fn timestamps_fall_inside_daily_window() {
        let start = day(2025, 3, 1);
        let end = start + Duration::days(7);
        let mut rng = Mulberry32::new(1_234);
        for _ in 0..5_000 {
            let timestamp = sample_timestamp(&mut rng, start, end);
            assert!(timestamp >= start && timestamp <= end);
            let hour = timestamp.hour();
            assert!(
                (8..22).contains(&hour) || (hour == 22 && timestamp.minute() == 0),
                "hour {hour} outside window"
            );
        }
    }

    #[test]
    fn range_ending_before_dawn_keeps_daily_window() {
        let start = day(2025, 1, 1);
        let end = start + Duration::hours(29);
        let mut rng = Mulberry32::new(77);
        let mut at_end = 0;
        for _ in 0..2_000 {
            let timestamp = sample_timestamp(&mut rng, start, end);
            assert!(timestamp >= start && timestamp <= end);
            assert!(
                (8..22).contains(&timestamp.hour()),
                "{timestamp} outside window"
            );
            if timestamp == end {
                at_end += 1;
            }
        }
        assert_eq!(at_end, 0);
    }

    #[test]
    fn partial_first_day_scales_into_remaining_window() {
        let start = day(2025, 4, 10) + Duration::hours(20);
        let end = start + Duration::hours(1);
        let mut rng = Mulberry32::new(3);
        for _ in 0..1_000 {
            let timestamp = sample_timestamp(&mut rng, start, end);
            assert!(timestamp >= start && timestamp < end, "{timestamp}");
        }
    }

    #[test]
    fn window_overlap_trims_to_range() {
        let day_ms = day(2025, 1, 1).timestamp_millis();
        let full = window_overlap(day_ms, day_ms, day_ms + DAY_MS);
        assert_eq!(
            full,
            Some((day_ms + 8 * HOUR_MS, day_ms + 22 * HOUR_MS))
        );
        let trimmed = window_overlap(day_ms, day_ms + 12 * HOUR_MS, day_ms + DAY_MS);
        assert_eq!(
            trimmed,
            Some((day_ms + 12 * HOUR_MS, day_ms + 22 * HOUR_MS))
        );
        assert_eq!(window_overlap(day_ms, day_ms, day_ms + 5 * HOUR_MS), None);
    }

    #[test]
    fn degenerate_window_collapses_to_start() {
        let start = day(2025, 6, 15) + Duration::hours(3);
        let mut rng = Mulberry32::new(5);
        assert_eq!(sample_timestamp(&mut rng, start, start), start);
    }

    #[test]
    fn consumes_three_draws() {
        let start = day(2025, 1, 1);
        let mut sampled = Mulberry32::new(64);
        let _ = sample_timestamp(&mut sampled, start, start + Duration::days(1));
        let mut skipped = Mulberry32::new(64);
        for _ in 0..3 {
            let _ = skipped.next_u32();
        }
        assert_eq!(sampled, skipped);
    }
}
