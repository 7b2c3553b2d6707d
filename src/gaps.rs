use std::cmp::Reverse;

use tracing::debug;

use crate::composition::dimension_balance;
use crate::models::{Dimension, Gap, GapKind, Severity, Team};

/// Below this share a dimension counts as under-represented.
pub const UNDERREPRESENTED_SHARE: f64 = 0.15;
/// Below this share a dimension is flagged with low severity.
pub const WATCH_SHARE: f64 = 0.20;
/// Smallest team for which a missing dimension is a high-severity gap.
pub const HIGH_SEVERITY_MIN_SIZE: usize = 3;

/// Lists dimension gaps, most severe first. Never fails; an empty team yields a
/// single informational gap.
pub fn analyze(team: &Team) -> Vec<Gap> {
    if team.is_empty() {
        return vec![Gap {
            kind: GapKind::InsufficientData,
            dimension: None,
            severity: Severity::Low,
            impact: "The team has no members yet, so its composition cannot be assessed".to_string(),
            recommendation: "Add members with completed assessments to analyze gaps".to_string(),
        }];
    }

    let balance = dimension_balance(team);
    let mut gaps: Vec<Gap> = balance
        .iter()
        .filter_map(|(dimension, share)| dimension_gap(dimension, share, team.len()))
        .collect();

    // Stable: within a severity the canonical dimension order survives.
    gaps.sort_by_key(|gap| Reverse(gap.severity));

    debug!(team = %team.name, gaps = gaps.len(), "analyzed team gaps");
    gaps
}

fn dimension_gap(dimension: Dimension, share: f64, team_size: usize) -> Option<Gap> {
    let severity = if share == 0.0 {
        if team_size >= HIGH_SEVERITY_MIN_SIZE {
            Severity::High
        } else {
            Severity::Medium
        }
    } else if share < UNDERREPRESENTED_SHARE {
        Severity::Medium
    } else if share < WATCH_SHARE {
        Severity::Low
    } else {
        return None;
    };

    let (kind, impact) = if share == 0.0 {
        (
            GapKind::MissingDimension,
            format!("Team lacks a {dimension}-oriented perspective"),
        )
    } else {
        (
            GapKind::Underrepresented,
            format!(
                "{dimension} is thinly represented ({:.0}% of the team)",
                share * 100.0
            ),
        )
    };

    Some(Gap {
        kind,
        dimension: Some(dimension),
        severity,
        impact,
        recommendation: format!("Add a {dimension}-focused member to strengthen the {dimension} dimension"),
    })
}
