use std::collections::BTreeSet;

use crate::models::{Dimension, DimensionBalance, Team};

/// Variance around the even 0.25 split when one dimension holds everyone.
const MAX_VARIANCE: f64 = 0.1875;

pub fn dimension_counts(team: &Team) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for member in &team.members {
        counts[member.personality_type.dimension().index()] += 1;
    }
    counts
}

pub fn dimension_balance(team: &Team) -> DimensionBalance {
    if team.is_empty() {
        return DimensionBalance::default();
    }

    let total = team.len() as f64;
    let counts = dimension_counts(team);
    DimensionBalance::from_fractions(counts.map(|count| count as f64 / total))
}

/// Dimensions with no members at all. Every dimension is missing for an empty team.
pub fn missing_dimensions(team: &Team) -> BTreeSet<Dimension> {
    let counts = dimension_counts(team);
    Dimension::ALL
        .into_iter()
        .filter(|dimension| counts[dimension.index()] == 0)
        .collect()
}

/// Dimensions whose share falls below `threshold`.
pub fn underrepresented_dimensions(team: &Team, threshold: f64) -> Vec<Dimension> {
    dimension_balance(team)
        .iter()
        .filter(|(_, share)| *share < threshold)
        .map(|(dimension, _)| dimension)
        .collect()
}

/// How evenly the four dimensions are represented, in [0, 1].
///
/// `1 - stddev / max_stddev` where stddev is measured against an even 0.25
/// split. Teams with fewer than two members score 0.
pub fn synergy_score(team: &Team) -> f64 {
    let size = team.len();
    if size < 2 {
        return 0.0;
    }

    // (share - 1/4)^2 == (4 * count - size)^2 / (16 * size^2); summing in
    // integers keeps the result independent of dimension order.
    let squared: u64 = dimension_counts(team)
        .iter()
        .map(|count| (4 * *count as i64 - size as i64).unsigned_abs().pow(2))
        .sum();
    let variance = squared as f64 / (64 * size * size) as f64;

    (1.0 - variance.sqrt() / MAX_VARIANCE.sqrt()).clamp(0.0, 1.0)
}
