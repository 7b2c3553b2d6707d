//! Broader team scoring: pairwise type compatibility, project fit, size,
//! cultural fit, and the strengths/weaknesses summary shown next to the gap list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::composition::{
    dimension_balance, dimension_counts, missing_dimensions, synergy_score,
    underrepresented_dimensions,
};
use crate::gaps::UNDERREPRESENTED_SHARE;
use crate::models::{Dimension, DimensionBalance, ProjectType, Team, TypeCode};

/// Pairwise compatibility, indexed by canonical type order on both axes.
#[rustfmt::skip]
const COMPATIBILITY: [[f64; 12]; 12] = [
    //  V1    V2    V3    I1    I2    I3    E1    E2    E3    C1    C2    C3
    [0.80, 0.85, 0.75, 0.90, 0.95, 0.85, 0.70, 0.75, 0.80, 0.85, 0.90, 0.85], // V1
    [0.85, 0.75, 0.70, 0.95, 0.90, 0.85, 0.65, 0.70, 0.75, 0.80, 0.85, 0.80], // V2
    [0.75, 0.70, 0.65, 0.85, 0.90, 0.80, 0.75, 0.80, 0.85, 0.70, 0.75, 0.70], // V3
    [0.90, 0.95, 0.85, 0.85, 0.90, 0.80, 0.75, 0.80, 0.70, 0.90, 0.95, 0.90], // I1
    [0.95, 0.90, 0.90, 0.90, 0.85, 0.80, 0.70, 0.75, 0.80, 0.85, 0.90, 0.85], // I2
    [0.85, 0.85, 0.80, 0.80, 0.80, 0.75, 0.80, 0.85, 0.90, 0.75, 0.80, 0.75], // I3
    [0.70, 0.65, 0.75, 0.75, 0.70, 0.80, 0.85, 0.90, 0.85, 0.80, 0.85, 0.90], // E1
    [0.75, 0.70, 0.80, 0.80, 0.75, 0.85, 0.90, 0.85, 0.90, 0.75, 0.80, 0.85], // E2
    [0.80, 0.75, 0.85, 0.70, 0.80, 0.90, 0.85, 0.90, 0.80, 0.70, 0.75, 0.80], // E3
    [0.85, 0.80, 0.70, 0.90, 0.85, 0.75, 0.80, 0.75, 0.70, 0.90, 0.95, 0.90], // C1
    [0.90, 0.85, 0.75, 0.95, 0.90, 0.80, 0.85, 0.80, 0.75, 0.95, 0.90, 0.95], // C2
    [0.85, 0.80, 0.70, 0.90, 0.85, 0.75, 0.90, 0.85, 0.80, 0.90, 0.95, 0.85], // C3
];

const OPTIMAL_SIZE_MIN: usize = 3;
const OPTIMAL_SIZE_MAX: usize = 8;

const WEIGHT_BALANCE: f64 = 0.25;
const WEIGHT_COMPATIBILITY: f64 = 0.25;
const WEIGHT_PROJECT_FIT: f64 = 0.20;
const WEIGHT_SIZE: f64 = 0.10;
const WEIGHT_CULTURE: f64 = 0.10;
const WEIGHT_HISTORY: f64 = 0.10;

/// Used when fewer than two members have a cultural profile.
pub const NEUTRAL_CULTURAL_FIT: f64 = 0.8;
/// No outcome history is tracked, so every team gets the midpoint.
pub const HISTORICAL_SUCCESS: f64 = 0.5;
/// Largest per-axis variance on a 0-10 scale.
const MAX_CULTURAL_VARIANCE: f64 = 25.0;

const DOMINANT_SHARE: f64 = 0.6;

pub fn compatibility(a: TypeCode, b: TypeCode) -> f64 {
    COMPATIBILITY[a.index()][b.index()]
}

/// Mean compatibility over every unordered member pair; 1.0 below two members.
pub fn type_compatibility(team: &Team) -> f64 {
    let members = &team.members;
    if members.len() < 2 {
        return 1.0;
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for (idx, first) in members.iter().enumerate() {
        for second in &members[idx + 1..] {
            total += compatibility(first.personality_type, second.personality_type);
            pairs += 1;
        }
    }
    total / pairs as f64
}

/// Mean compatibility of `code` with each current member; 1.0 for an empty team.
pub fn candidate_compatibility(team: &Team, code: TypeCode) -> f64 {
    if team.is_empty() {
        return 1.0;
    }
    let total: f64 = team
        .members
        .iter()
        .map(|member| compatibility(code, member.personality_type))
        .sum();
    total / team.len() as f64
}

/// Cosine similarity between the team's dimension shares and the project's ideal profile.
pub fn project_fit(team: &Team, project_type: ProjectType) -> f64 {
    if team.is_empty() {
        return 0.0;
    }

    let ideal = project_type.ideal_profile();
    let actual = dimension_balance(team).as_array();

    let dot: f64 = ideal.iter().zip(actual.iter()).map(|(i, a)| i * a).sum();
    let ideal_norm = ideal.iter().map(|v| v * v).sum::<f64>().sqrt();
    let actual_norm = actual.iter().map(|v| v * v).sum::<f64>().sqrt();

    if ideal_norm == 0.0 || actual_norm == 0.0 {
        return 0.0;
    }
    (dot / (ideal_norm * actual_norm)).clamp(0.0, 1.0)
}

pub fn size_score(team_size: usize) -> f64 {
    if (OPTIMAL_SIZE_MIN..=OPTIMAL_SIZE_MAX).contains(&team_size) {
        1.0
    } else if team_size < OPTIMAL_SIZE_MIN {
        team_size as f64 / OPTIMAL_SIZE_MIN as f64
    } else {
        let excess = (team_size - OPTIMAL_SIZE_MAX) as f64 / OPTIMAL_SIZE_MAX as f64;
        (1.0 - excess.powf(1.5)).max(0.0)
    }
}

/// One minus the mean per-axis population variance of the members' Culture Map
/// positions, scaled against the largest possible variance.
pub fn cultural_fit(team: &Team) -> f64 {
    let profiles: Vec<[f64; 7]> = team
        .members
        .iter()
        .filter_map(|member| member.cultural_profile.as_ref())
        .map(|profile| profile.as_array())
        .collect();
    if profiles.len() < 2 {
        return NEUTRAL_CULTURAL_FIT;
    }

    let count = profiles.len() as f64;
    let mut variance_sum = 0.0;
    for axis in 0..7 {
        let mean = profiles.iter().map(|values| values[axis]).sum::<f64>() / count;
        variance_sum += profiles
            .iter()
            .map(|values| (values[axis] - mean).powi(2))
            .sum::<f64>()
            / count;
    }
    let average = variance_sum / 7.0;

    1.0 - (average / MAX_CULTURAL_VARIANCE).min(1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScores {
    pub dimension_balance: f64,
    pub type_compatibility: f64,
    pub project_fit: f64,
    pub team_size: f64,
    pub cultural_fit: f64,
    pub historical_success: f64,
    pub total: f64,
}

pub fn team_scores(team: &Team, project_type: ProjectType) -> TeamScores {
    let dimension_balance = synergy_score(team);
    let type_compatibility = type_compatibility(team);
    let project_fit = project_fit(team, project_type);
    let team_size = size_score(team.len());
    let cultural_fit = cultural_fit(team);
    let historical_success = HISTORICAL_SUCCESS;

    TeamScores {
        dimension_balance,
        type_compatibility,
        project_fit,
        team_size,
        cultural_fit,
        historical_success,
        total: dimension_balance * WEIGHT_BALANCE
            + type_compatibility * WEIGHT_COMPATIBILITY
            + project_fit * WEIGHT_PROJECT_FIT
            + team_size * WEIGHT_SIZE
            + cultural_fit * WEIGHT_CULTURE
            + historical_success * WEIGHT_HISTORY,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInsights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    /// Composition warnings: dominant dimension, size, and absent Vision or Connection.
    pub composition_advice: Vec<String>,
    pub communication_tips: Vec<String>,
    pub distribution: DimensionBalance,
    pub type_distribution: BTreeMap<TypeCode, usize>,
    pub missing_dimensions: Vec<Dimension>,
}

pub fn team_insights(team: &Team, scores: &TeamScores) -> TeamInsights {
    let distribution = dimension_balance(team);
    let missing = underrepresented_dimensions(team, UNDERREPRESENTED_SHARE);

    let mut strengths = Vec::new();
    if scores.dimension_balance > 0.8 {
        strengths.push("Excellent dimension balance".to_string());
    }
    if scores.type_compatibility > 0.85 {
        strengths.push("High team compatibility".to_string());
    }
    if scores.cultural_fit > 0.8 {
        strengths.push("Strong cultural alignment".to_string());
    }
    // First dimension wins when two share the top spot.
    let dominant = distribution
        .iter()
        .fold(None, |best: Option<(Dimension, f64)>, (dimension, share)| match best {
            Some((_, top)) if top >= share => best,
            _ => Some((dimension, share)),
        });
    if let Some((dimension, share)) = dominant {
        if share > 0.4 {
            strengths.push(format!("Strong {dimension} focus"));
        }
    }

    let mut weaknesses = Vec::new();
    if scores.dimension_balance < 0.6 {
        weaknesses.push("Unbalanced dimension distribution".to_string());
    }
    if scores.type_compatibility < 0.7 {
        weaknesses.push("Potential compatibility issues".to_string());
    }
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|dimension| dimension.name()).collect();
        weaknesses.push(format!("Missing dimensions: {}", names.join(", ")));
    }

    let mut recommendations: Vec<String> = missing
        .iter()
        .map(|dimension| format!("Consider adding a {dimension}-oriented member"))
        .collect();
    if scores.team_size < 0.7 {
        if team.len() < OPTIMAL_SIZE_MIN {
            recommendations.push("Team might be too small for complex projects".to_string());
        } else {
            recommendations.push("Team might be too large, consider splitting".to_string());
        }
    }

    if strengths.is_empty() {
        strengths.push("Team has potential for improvement".to_string());
    }
    if weaknesses.is_empty() {
        weaknesses.push("No major weaknesses identified".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("Team composition is solid".to_string());
    }

    TeamInsights {
        strengths,
        weaknesses,
        recommendations,
        composition_advice: composition_advice(team),
        communication_tips: communication_tips(team),
        distribution,
        type_distribution: type_distribution(team),
        missing_dimensions: missing,
    }
}

/// Member count per type code; codes nobody holds are left out.
pub fn type_distribution(team: &Team) -> BTreeMap<TypeCode, usize> {
    let mut distribution = BTreeMap::new();
    for member in team.members.iter() {
        *distribution.entry(member.personality_type).or_insert(0) += 1;
    }
    distribution
}

pub fn composition_advice(team: &Team) -> Vec<String> {
    if team.is_empty() {
        return Vec::new();
    }

    let counts = dimension_counts(team);
    let absent = missing_dimensions(team);
    let mut advice = Vec::new();

    if absent.len() > 1 && team.len() >= 4 {
        let names: Vec<&str> = absent.iter().map(|dimension| dimension.name()).collect();
        advice.push(format!(
            "Consider adding members with {} strengths for better balance",
            names.join(", ")
        ));
    }

    for dimension in Dimension::ALL {
        let share = counts[dimension.index()] as f64 / team.len() as f64;
        if share > DOMINANT_SHARE {
            advice.push(format!(
                "Team is heavily weighted towards {dimension}, consider diversifying"
            ));
        }
    }

    if team.len() < OPTIMAL_SIZE_MIN {
        advice.push("Small team size may limit diverse perspectives".to_string());
    } else if team.len() > OPTIMAL_SIZE_MAX {
        advice.push("Large team size may require additional coordination efforts".to_string());
    }

    if absent.contains(&Dimension::Vision) {
        advice.push(
            "Team lacks strategic direction, consider adding a Vision-oriented member".to_string(),
        );
    }
    if absent.contains(&Dimension::Connection) {
        advice.push(
            "Team may struggle with collaboration, consider adding a Connection-oriented member"
                .to_string(),
        );
    }

    advice
}

pub fn communication_tips(team: &Team) -> Vec<String> {
    let absent = missing_dimensions(team);
    let present = |dimension: Dimension| !absent.contains(&dimension);
    let mut tips = Vec::new();

    if present(Dimension::Vision) && present(Dimension::Innovation) {
        tips.push(
            "Balance strategic planning with creative exploration: set aside time for both \
             structured planning and brainstorming"
                .to_string(),
        );
    }
    if present(Dimension::Expertise) && present(Dimension::Innovation) {
        tips.push(
            "Combine proven methods with new ideas: run pilot programs to test innovations safely"
                .to_string(),
        );
    }
    if present(Dimension::Connection) {
        tips.push(
            "Lean on the team's relationship strengths: build consensus and make sure everyone \
             feels heard"
                .to_string(),
        );
    }
    if Dimension::ALL.iter().filter(|dimension| present(**dimension)).count() >= 3 {
        tips.push(
            "Your diverse team brings multiple perspectives: create structured ways to hear \
             from all viewpoints"
                .to_string(),
        );
    }
    tips.push("Regular team check-ins help surface communication problems early".to_string());

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CulturalProfile;
    use crate::test_support::team_of;

    fn with_profiles(mut team: Team, profiles: &[Option<CulturalProfile>]) -> Team {
        for (member, profile) in team.members.iter_mut().zip(profiles) {
            member.cultural_profile = *profile;
        }
        team
    }

    #[test]
    fn compatibility_matrix_is_bounded() {
        for a in TypeCode::ALL {
            for b in TypeCode::ALL {
                let value = compatibility(a, b);
                assert!((0.0..=1.0).contains(&value), "{a}-{b}");
            }
        }
        assert_eq!(compatibility(TypeCode::V1, TypeCode::I2), 0.95);
        assert_eq!(compatibility(TypeCode::E1, TypeCode::V2), 0.65);
    }

    #[test]
    fn pairwise_compatibility_averages_pairs() {
        assert_eq!(type_compatibility(&team_of(&[TypeCode::V1])), 1.0);
        let team = team_of(&[TypeCode::V1, TypeCode::V2, TypeCode::I1]);
        // V1-V2 0.85, V1-I1 0.90, V2-I1 0.95
        assert!((type_compatibility(&team) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn candidate_compatibility_against_members() {
        let team = team_of(&[TypeCode::E1, TypeCode::E2]);
        // C3-E1 0.90, C3-E2 0.85
        assert!((candidate_compatibility(&team, TypeCode::C3) - 0.875).abs() < 1e-9);
        assert_eq!(candidate_compatibility(&team_of(&[]), TypeCode::C3), 1.0);
    }

    #[test]
    fn project_fit_prefers_matching_profiles() {
        let even = team_of(&[TypeCode::V1, TypeCode::I1, TypeCode::E1, TypeCode::C1]);
        assert!((project_fit(&even, ProjectType::Balanced) - 1.0).abs() < 1e-9);

        let experts = team_of(&[TypeCode::E1, TypeCode::E2, TypeCode::E3]);
        assert!(
            project_fit(&experts, ProjectType::Execution)
                > project_fit(&experts, ProjectType::Strategic)
        );
        assert_eq!(project_fit(&team_of(&[]), ProjectType::Research), 0.0);
    }

    #[test]
    fn size_score_penalizes_both_ends() {
        assert_eq!(size_score(5), 1.0);
        assert!((size_score(2) - 2.0 / 3.0).abs() < 1e-9);
        assert!((size_score(16) - 0.0).abs() < 1e-9);
        assert!(size_score(10) < 1.0 && size_score(10) > 0.0);
    }

    #[test]
    fn insights_for_single_dimension_team() {
        let team = team_of(&[TypeCode::V1, TypeCode::V1, TypeCode::V1]);
        let scores = team_scores(&team, ProjectType::Balanced);
        let insights = team_insights(&team, &scores);

        assert_eq!(insights.strengths, vec!["Strong Vision focus".to_string()]);
        assert!(insights
            .weaknesses
            .contains(&"Unbalanced dimension distribution".to_string()));
        assert_eq!(
            insights.missing_dimensions,
            vec![Dimension::Innovation, Dimension::Expertise, Dimension::Connection]
        );
        assert_eq!(insights.recommendations.len(), 3);
    }

    #[test]
    fn insights_fall_back_for_a_solid_team() {
        let team = team_of(&[
            TypeCode::V1,
            TypeCode::I2,
            TypeCode::E3,
            TypeCode::C2,
        ]);
        let scores = team_scores(&team, ProjectType::Balanced);
        let insights = team_insights(&team, &scores);
        assert!(insights.strengths.contains(&"Excellent dimension balance".to_string()));
        assert_eq!(insights.weaknesses, vec!["No major weaknesses identified".to_string()]);
        assert_eq!(insights.recommendations, vec!["Team composition is solid".to_string()]);
    }

    #[test]
    fn total_is_weighted_sum() {
        let team = team_of(&[TypeCode::V1, TypeCode::I1, TypeCode::E1, TypeCode::C1]);
        let scores = team_scores(&team, ProjectType::Balanced);
        assert_eq!(scores.cultural_fit, NEUTRAL_CULTURAL_FIT);
        assert_eq!(scores.historical_success, 0.5);
        let expected = scores.dimension_balance * 0.25
            + scores.type_compatibility * 0.25
            + scores.project_fit * 0.20
            + scores.team_size * 0.10
            + scores.cultural_fit * 0.10
            + scores.historical_success * 0.10;
        assert!((scores.total - expected).abs() < 1e-12);
    }

    #[test]
    fn single_member_counts_as_compatible() {
        let team = team_of(&[TypeCode::V1]);
        let scores = team_scores(&team, ProjectType::Balanced);
        let insights = team_insights(&team, &scores);
        assert!(insights.strengths.contains(&"High team compatibility".to_string()));
    }

    #[test]
    fn cultural_fit_needs_two_profiles() {
        let team = team_of(&[TypeCode::V1, TypeCode::C1, TypeCode::E2]);
        assert_eq!(cultural_fit(&team), 0.8);

        let one = with_profiles(team.clone(), &[Some(CulturalProfile::default())]);
        assert_eq!(cultural_fit(&one), 0.8);

        let two = with_profiles(
            team,
            &[Some(CulturalProfile::default()), None, Some(CulturalProfile::default())],
        );
        assert_eq!(cultural_fit(&two), 1.0);
    }

    #[test]
    fn cultural_fit_drops_with_spread() {
        let low = CulturalProfile {
            feedback: 2.0,
            ..CulturalProfile::default()
        };
        let high = CulturalProfile {
            feedback: 8.0,
            ..CulturalProfile::default()
        };
        let team = with_profiles(
            team_of(&[TypeCode::V1, TypeCode::I1]),
            &[Some(low), Some(high)],
        );
        // feedback variance 9, other axes 0
        assert!((cultural_fit(&team) - (1.0 - 9.0 / 7.0 / 25.0)).abs() < 1e-12);

        let zeros = CulturalProfile {
            communication: 0.0,
            feedback: 0.0,
            leading: 0.0,
            deciding: 0.0,
            trusting: 0.0,
            disagreeing: 0.0,
            scheduling: 0.0,
        };
        let tens = CulturalProfile {
            communication: 10.0,
            feedback: 10.0,
            leading: 10.0,
            deciding: 10.0,
            trusting: 10.0,
            disagreeing: 10.0,
            scheduling: 10.0,
        };
        let split = with_profiles(
            team_of(&[TypeCode::V1, TypeCode::I1]),
            &[Some(zeros), Some(tens)],
        );
        assert_eq!(cultural_fit(&split), 0.0);
    }

    #[test]
    fn aligned_profiles_are_a_strength() {
        let team = with_profiles(
            team_of(&[TypeCode::V1, TypeCode::E1, TypeCode::C1]),
            &[Some(CulturalProfile::default()); 3],
        );
        let scores = team_scores(&team, ProjectType::Balanced);
        let insights = team_insights(&team, &scores);
        assert!(insights.strengths.contains(&"Strong cultural alignment".to_string()));
    }

    #[test]
    fn composition_advice_flags_dominance_and_absences() {
        let visionaries = team_of(&[TypeCode::V1, TypeCode::V1, TypeCode::V1]);
        assert_eq!(
            composition_advice(&visionaries),
            vec![
                "Team is heavily weighted towards Vision, consider diversifying".to_string(),
                "Team may struggle with collaboration, consider adding a Connection-oriented member"
                    .to_string(),
            ]
        );

        let builders = team_of(&[TypeCode::I1, TypeCode::I2, TypeCode::E1, TypeCode::E1]);
        let advice = composition_advice(&builders);
        assert_eq!(
            advice[0],
            "Consider adding members with Vision, Connection strengths for better balance"
        );
        assert!(advice.contains(
            &"Team lacks strategic direction, consider adding a Vision-oriented member".to_string()
        ));
        assert_eq!(advice.len(), 4);

        let pair = team_of(&[TypeCode::V2, TypeCode::C3]);
        assert_eq!(
            composition_advice(&pair),
            vec!["Small team size may limit diverse perspectives".to_string()]
        );
        assert!(composition_advice(&team_of(&[])).is_empty());
    }

    #[test]
    fn communication_tips_follow_present_dimensions() {
        let tips = communication_tips(&team_of(&[TypeCode::V1, TypeCode::I1, TypeCode::E1]));
        assert_eq!(tips.len(), 4);
        assert!(tips[0].starts_with("Balance strategic planning with creative exploration"));
        assert!(tips[1].starts_with("Combine proven methods with new ideas"));
        assert!(tips[2].starts_with("Your diverse team brings multiple perspectives"));
        assert!(tips[3].starts_with("Regular team check-ins"));

        let connectors = communication_tips(&team_of(&[TypeCode::C1]));
        assert_eq!(connectors.len(), 2);
        assert!(connectors[0].starts_with("Lean on the team's relationship strengths"));

        assert_eq!(communication_tips(&team_of(&[])).len(), 1);
    }

    #[test]
    fn type_distribution_counts_held_codes() {
        let team = team_of(&[TypeCode::V1, TypeCode::C2, TypeCode::V1]);
        let scores = team_scores(&team, ProjectType::Balanced);
        let insights = team_insights(&team, &scores);
        let expected: BTreeMap<TypeCode, usize> =
            [(TypeCode::V1, 2), (TypeCode::C2, 1)].into_iter().collect();
        assert_eq!(insights.type_distribution, expected);
    }
}
