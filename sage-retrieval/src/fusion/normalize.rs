//! Per-engine min-max score normalization.

use sage_core::constants::FLAT_NORMALIZED_SCORE;

/// Min-max scale `scores` into [0, 1]: `(s - min) / (max - min)`.
///
/// When every score is equal (including a single score) each one maps to
/// [`FLAT_NORMALIZED_SCORE`]. Inputs must be finite.
pub fn min_max_normalize(scores: &[f64]) -> Vec<f64> {
    let Some((min, max)) = bounds(scores) else {
        return Vec::new();
    };

    if max == min {
        return vec![FLAT_NORMALIZED_SCORE; scores.len()];
    }

    let range = max - min;
    if range.is_finite() {
        scores
            .iter()
            .map(|s| ((s - min) / range).clamp(0.0, 1.0))
            .collect()
    } else {
        // Range overflowed f64; halving keeps every difference finite.
        let half_range = max / 2.0 - min / 2.0;
        scores
            .iter()
            .map(|s| ((s / 2.0 - min / 2.0) / half_range).clamp(0.0, 1.0))
            .collect()
    }
}

fn bounds(scores: &[f64]) -> Option<(f64, f64)> {
    let first = *scores.first()?;
    Some(
        scores
            .iter()
            .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s))),
    )
}
