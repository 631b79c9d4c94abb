use safety_sim_core::{rng::Mulberry32, AgeRange, Nationality};

/// Draw weights of every nationality; the weights sum to one.
pub const NATIONALITY_WEIGHTS: [(Nationality, f64); 12] = [
    (Nationality::India, 0.60),
    (Nationality::UnitedStates, 0.08),
    (Nationality::UnitedKingdom, 0.06),
    (Nationality::Germany, 0.04),
    (Nationality::France, 0.04),
    (Nationality::Japan, 0.03),
    (Nationality::China, 0.03),
    (Nationality::Australia, 0.03),
    (Nationality::Canada, 0.03),
    (Nationality::Russia, 0.02),
    (Nationality::Bangladesh, 0.02),
    (Nationality::Nepal, 0.02),
];

/// Cumulative thresholds for solo travellers and groups of two, three and four.
const GROUP_SIZE_THRESHOLDS: [(f64, u32); 4] = [(0.40, 1), (0.70, 2), (0.85, 3), (0.95, 4)];
const LARGE_GROUP_MIN: f64 = 5.0;
const LARGE_GROUP_SPAN: f64 = 2.0;

const DWELL_BASE_MINUTES: f64 = 30.0;
const DWELL_SPAN_MINUTES: f64 = 90.0;
const DWELL_PER_MEMBER_MINUTES: f64 = 10.0;
const DWELL_MIN_MINUTES: f64 = 1.0;
const DWELL_MAX_MINUTES: f64 = 240.0;

/// Draws a group size; the large-group tail consumes a second draw.
pub(crate) fn sample_group_size(rng: &mut Mulberry32) -> u32 {
    let roll = rng.next_unit();
    for (threshold, size) in GROUP_SIZE_THRESHOLDS {
        if roll < threshold {
            return size;
        }
    }
    (LARGE_GROUP_MIN + rng.next_unit() * LARGE_GROUP_SPAN).floor() as u32
}

pub(crate) fn sample_dwell_time(rng: &mut Mulberry32, group_size: u32) -> u32 {
    dwell_time_for(rng.next_unit(), group_size)
}

/// Maps a uniform draw and a group size to a dwell time in minutes.
///
/// Larger groups linger longer. The result is rounded and clamped to `[1, 240]`.
#[must_use]
pub fn dwell_time_for(draw: f64, group_size: u32) -> u32 {
    let minutes = DWELL_BASE_MINUTES
        + draw * DWELL_SPAN_MINUTES
        + f64::from(group_size) * DWELL_PER_MEMBER_MINUTES;
    minutes.round().clamp(DWELL_MIN_MINUTES, DWELL_MAX_MINUTES) as u32
}

pub(crate) fn sample_nationality(rng: &mut Mulberry32) -> Nationality {
    let weights = NATIONALITY_WEIGHTS.map(|(_, weight)| weight);
    let index = rng.weighted_index(&weights).unwrap_or(0);
    NATIONALITY_WEIGHTS[index].0
}

pub(crate) fn sample_age_range(rng: &mut Mulberry32) -> AgeRange {
    let index = rng.uniform_index(AgeRange::ALL.len()).unwrap_or(0);
    AgeRange::ALL[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nationality_weights_sum_to_one() {
        let total: f64 = NATIONALITY_WEIGHTS.iter().map(|(_, weight)| weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");
    }

    #[test]
    fn group_sizes_cover_one_through_six() {
        let mut rng = Mulberry32::new(123);
        let mut seen = [false; 7];
        for _ in 0..20_000 {
            let size = sample_group_size(&mut rng);
            assert!((1..=6).contains(&size), "unexpected group size {size}");
            seen[size as usize] = true;
        }
        assert!(seen[1..].iter().all(|hit| *hit), "missing sizes: {seen:?}");
    }

    #[test]
    fn solo_travellers_dominate() {
        let mut rng = Mulberry32::new(55);
        let solo = (0..10_000)
            .filter(|_| sample_group_size(&mut rng) == 1)
            .count();
        assert!((3_700..4_300).contains(&solo), "solo count {solo}");
    }

    #[test]
    fn dwell_time_grows_with_group_size() {
        assert_eq!(dwell_time_for(0.0, 1), 40);
        assert_eq!(dwell_time_for(0.0, 6), 90);
        assert_eq!(dwell_time_for(0.5, 2), 95);
        assert!(dwell_time_for(0.999, 6) <= 240);
    }

    #[test]
    fn dwell_time_is_clamped_to_upper_bound() {
        assert_eq!(dwell_time_for(0.99, 50), 240);
    }

    #[test]
    fn age_ranges_are_roughly_uniform() {
        let mut rng = Mulberry32::new(4);
        let mut counts = [0usize; 6];
        for _ in 0..60_000 {
            let bucket = sample_age_range(&mut rng);
            let index = AgeRange::ALL
                .iter()
                .position(|candidate| *candidate == bucket)
                .expect("known bucket");
            counts[index] += 1;
        }
        for count in counts {
            assert!((9_400..10_600).contains(&count), "bucket count {count}");
        }
    }
}
