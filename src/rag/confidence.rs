//! Mapping from retrieval distance to a user-facing confidence percentage

/// Raw score bands over cosine distance, before the mid-range boost
///
/// | distance    | raw score |
/// |-------------|-----------|
/// | 0.0 - 0.5   | 100 - 85  |
/// | 0.5 - 1.0   | 85 - 70   |
/// | 1.0 - 1.5   | 70 - 50   |
/// | above 1.5   | 50 - 0    |
#[must_use]
pub fn raw_confidence(distance: f32) -> f32 {
    if distance <= 0.5 {
        (0.5 - distance).mul_add(30.0, 85.0)
    } else if distance <= 1.0 {
        (1.0 - distance).mul_add(30.0, 70.0)
    } else if distance <= 1.5 {
        (1.5 - distance).mul_add(40.0, 50.0)
    } else {
        (distance - 1.5).mul_add(-100.0, 50.0).max(0.0)
    }
}

/// Lift raw scores in `[50, 70]` onto `[60, 70]`
///
/// Fair matches read as 60-70% instead of 50-60%. The lift is continuous at
/// 70, so the overall mapping stays non-increasing in distance.
#[must_use]
fn boost(raw: f32) -> f32 {
    if (50.0..=70.0).contains(&raw) {
        (raw - 50.0).mul_add(0.5, 60.0)
    } else {
        raw
    }
}

/// Confidence percentage (0-100) for a cosine distance
#[must_use]
pub fn confidence_from_distance(distance: f32) -> u8 {
    if !distance.is_finite() {
        return 0;
    }
    boost(raw_confidence(distance)).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_endpoints() {
        assert_eq!(confidence_from_distance(0.0), 100);
        assert_eq!(confidence_from_distance(0.5), 85);
        assert_eq!(confidence_from_distance(1.0), 70);
        assert_eq!(confidence_from_distance(2.0), 0);
    }

    #[test]
    fn test_fair_band_is_boosted() {
        // raw 50 and raw 60
        assert_eq!(confidence_from_distance(1.5), 60);
        assert_eq!(confidence_from_distance(1.25), 65);
    }

    #[test]
    fn test_poor_band_is_not_boosted() {
        // raw 40
        assert_eq!(confidence_from_distance(1.6), 40);
        assert_eq!(confidence_from_distance(5.0), 0);
    }

    #[test]
    fn test_monotonic_non_increasing() {
        let mut previous = u8::MAX;
        for step in 0..=2000 {
            let distance = step as f32 / 1000.0;
            let score = confidence_from_distance(distance);
            assert!(
                score <= previous,
                "confidence rose from {previous} to {score} at distance {distance}"
            );
            previous = score;
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(confidence_from_distance(-0.1), 100);
        assert_eq!(confidence_from_distance(f32::NAN), 0);
        assert_eq!(confidence_from_distance(f32::INFINITY), 0);
    }

    #[test]
    fn test_raw_is_continuous_at_band_edges() {
        for edge in [0.5_f32, 1.0, 1.5] {
            let below = raw_confidence(edge - 1e-4);
            let above = raw_confidence(edge + 1e-4);
            assert!((below - above).abs() < 0.05);
        }
    }
}
