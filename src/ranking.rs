//! Candidate ranking against a team and a project goal.
//!
//! Ranking order uses the project-weighted improvement; the reported
//! `synergy_score` is always the unweighted predicted synergy so it agrees with
//! the current/predicted numbers shown alongside it.

use std::collections::HashSet;

use tracing::debug;

use crate::composition::{dimension_balance, synergy_score};
use crate::gaps::UNDERREPRESENTED_SHARE;
use crate::insights::candidate_compatibility;
use crate::models::{
    CandidateProfile, Dimension, ImpactAnalysis, ProjectType, Recommendation, Team,
};

const SIGNIFICANT_IMPROVEMENT: f64 = 0.1;
const EXCELLENT_COMPATIBILITY: f64 = 0.85;
const CROWDED_SHARE: f64 = 0.4;

/// Scales an improvement by the project's preference for `dimension`.
/// Gains grow and losses shrink for preferred dimensions, and vice versa.
pub fn weighted_improvement(improvement: f64, dimension: Dimension, project_type: ProjectType) -> f64 {
    let multiplier = project_type.multiplier(dimension);
    if improvement >= 0.0 {
        improvement * multiplier
    } else {
        improvement / multiplier
    }
}

struct Scored<'a> {
    candidate: &'a CandidateProfile,
    impact: ImpactAnalysis,
    weighted: f64,
}

pub fn rank(
    team: &Team,
    candidates: &[CandidateProfile],
    project_type: ProjectType,
    top_n: i64,
) -> Vec<Recommendation> {
    if top_n <= 0 || candidates.is_empty() {
        return Vec::new();
    }

    let current_synergy = synergy_score(team);
    // A repeated id keeps its first entry.
    let mut seen: HashSet<&str> = HashSet::new();
    let mut scored: Vec<Scored<'_>> = candidates
        .iter()
        .filter(|&candidate| !team.contains(&candidate.id) && seen.insert(candidate.id.as_str()))
        .map(|candidate| {
            let hypothetical = team.with_member(candidate.as_member());
            let predicted_synergy = synergy_score(&hypothetical);
            let improvement = predicted_synergy - current_synergy;
            Scored {
                candidate,
                weighted: weighted_improvement(
                    improvement,
                    candidate.personality_type.dimension(),
                    project_type,
                ),
                impact: ImpactAnalysis {
                    current_synergy,
                    predicted_synergy,
                    improvement,
                },
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.weighted
            .total_cmp(&a.weighted)
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });

    let eligible = scored.len();
    let limit = usize::try_from(top_n).unwrap_or(usize::MAX);
    scored.truncate(limit);

    debug!(
        team = %team.name,
        %project_type,
        eligible,
        returned = scored.len(),
        "ranked candidates"
    );

    scored
        .into_iter()
        .map(|entry| recommend(team, entry))
        .collect()
}

fn recommend(team: &Team, entry: Scored<'_>) -> Recommendation {
    let dimension = entry.candidate.personality_type.dimension();
    let balance = dimension_balance(team);
    let share = balance.get(dimension);
    let fills_gap = team.is_empty() || share < UNDERREPRESENTED_SHARE;
    let crowded = !team.is_empty() && share >= CROWDED_SHARE;
    let compatibility = candidate_compatibility(team, entry.candidate.personality_type);

    let mut reasons = Vec::new();
    if fills_gap {
        reasons.push(format!("Brings needed {dimension} dimension to the team"));
    }
    let improvement = entry.impact.improvement;
    if improvement > SIGNIFICANT_IMPROVEMENT {
        reasons.push(format!(
            "Significantly improves team synergy by {:.0}%",
            improvement * 100.0
        ));
    } else if improvement > 0.0 {
        reasons.push(format!("Improves team synergy by {:.0}%", improvement * 100.0));
    } else if improvement < 0.0 {
        reasons.push(format!(
            "Lowers dimension balance by {:.0}%",
            -improvement * 100.0
        ));
    }
    if !team.is_empty() && compatibility > EXCELLENT_COMPATIBILITY {
        reasons.push("Excellent compatibility with existing team members".to_string());
    }
    if reasons.is_empty() {
        reasons.push("Good fit for team composition".to_string());
    }

    let mut strengths: Vec<String> = dimension_strengths(dimension)
        .iter()
        .map(|s| s.to_string())
        .collect();
    if fills_gap && !team.is_empty() {
        strengths.push(format!("Fills the team's {dimension} gap"));
    }

    let mut challenges: Vec<String> = dimension_challenges(dimension)
        .iter()
        .map(|s| s.to_string())
        .collect();
    if crowded {
        challenges.push(format!("Adds to an already strong {dimension} presence"));
    }

    Recommendation {
        candidate: entry.candidate.clone(),
        synergy_score: entry.impact.predicted_synergy,
        reasoning: format!("{}.", reasons.join(". ")),
        impact_analysis: entry.impact,
        strengths,
        challenges,
    }
}

fn dimension_strengths(dimension: Dimension) -> [&'static str; 2] {
    match dimension {
        Dimension::Vision => ["Strategic thinking", "Long-term planning"],
        Dimension::Innovation => ["Creative problem-solving", "New ideas"],
        Dimension::Expertise => ["Technical expertise", "Quality focus"],
        Dimension::Connection => ["Team collaboration", "Relationship building"],
    }
}

fn dimension_challenges(dimension: Dimension) -> [&'static str; 2] {
    match dimension {
        Dimension::Vision => ["May focus too much on big picture", "Could overlook details"],
        Dimension::Innovation => [
            "Might prioritize novelty over practicality",
            "Could be impatient with routine",
        ],
        Dimension::Expertise => ["May be overly perfectionistic", "Could resist change"],
        Dimension::Connection => [
            "Might avoid necessary conflicts",
            "Could be too consensus-oriented",
        ],
    }
}
