use std::fmt::Write;

use chrono::NaiveDate;

use crate::composition::{dimension_balance, dimension_counts};
use crate::gaps;
use crate::insights::{team_insights, team_scores};
use crate::models::{CandidateProfile, Dimension, ProjectType, Team};
use crate::ranking;

pub fn build_report(
    team: &Team,
    candidates: &[CandidateProfile],
    project_type: ProjectType,
    top_n: i64,
    generated_on: NaiveDate,
) -> String {
    let balance = dimension_balance(team);
    let counts = dimension_counts(team);
    let gaps = gaps::analyze(team);
    let scores = team_scores(team, project_type);
    let insights = team_insights(team, &scores);
    let recommendations = ranking::rank(team, candidates, project_type, top_n);

    let mut output = String::new();

    let _ = writeln!(output, "# Team Synergy Report: {}", team.name);
    let _ = writeln!(
        output,
        "Generated {} for a {} project ({} members)",
        generated_on,
        project_type,
        team.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Dimension Balance");

    if team.is_empty() {
        let _ = writeln!(output, "No members recorded for this team.");
    } else {
        for dimension in Dimension::ALL {
            let _ = writeln!(
                output,
                "- {}: {} members ({:.0}%)",
                dimension,
                counts[dimension.index()],
                balance.get(dimension) * 100.0
            );
        }
        let types: Vec<String> = insights
            .type_distribution
            .iter()
            .map(|(code, count)| format!("{code} x{count}"))
            .collect();
        let _ = writeln!(output, "- Types: {}", types.join(", "));
        let _ = writeln!(
            output,
            "- Synergy {:.2}, compatibility {:.2}, project fit {:.2}, cultural fit {:.2}, overall {:.2}",
            scores.dimension_balance,
            scores.type_compatibility,
            scores.project_fit,
            scores.cultural_fit,
            scores.total
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Gaps");

    if gaps.is_empty() {
        let _ = writeln!(output, "No dimension gaps found.");
    } else {
        for gap in gaps.iter() {
            let _ = writeln!(
                output,
                "- [{}] {}. {}.",
                gap.severity.as_str(),
                gap.impact,
                gap.recommendation
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Insights");
    for strength in insights.strengths.iter() {
        let _ = writeln!(output, "- Strength: {strength}");
    }
    for weakness in insights.weaknesses.iter() {
        let _ = writeln!(output, "- Weakness: {weakness}");
    }
    for recommendation in insights.recommendations.iter() {
        let _ = writeln!(output, "- Next step: {recommendation}");
    }
    for advice in insights.composition_advice.iter() {
        let _ = writeln!(output, "- Composition: {advice}");
    }
    for tip in insights.communication_tips.iter() {
        let _ = writeln!(output, "- Communication: {tip}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommended Additions");

    if recommendations.is_empty() {
        let _ = writeln!(output, "No eligible candidates for this team.");
    } else {
        for recommendation in recommendations.iter() {
            let impact = &recommendation.impact_analysis;
            let _ = writeln!(
                output,
                "- {} ({}) synergy {:.2} -> {:.2} ({:+.2}): {}",
                recommendation.candidate.name,
                recommendation.candidate.personality_type,
                impact.current_synergy,
                impact.predicted_synergy,
                impact.improvement,
                recommendation.reasoning
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TypeCode;
    use crate::test_support::{candidate, team_of};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn report_lists_gaps_and_recommendations() {
        let team = team_of(&[TypeCode::V1, TypeCode::I1, TypeCode::E1]);
        let candidates = vec![candidate("c1", TypeCode::C2), candidate("v1", TypeCode::V3)];
        let report = build_report(&team, &candidates, ProjectType::Balanced, 5, date());

        assert!(report.starts_with("# Team Synergy Report: Sample"));
        assert!(report.contains("Generated 2026-03-02 for a balanced project (3 members)"));
        assert!(report.contains("- Connection: 0 members (0%)"));
        assert!(report.contains("- [high] Team lacks a Connection-oriented perspective."));
        assert!(report.contains("- Types: V1 x1, I1 x1, E1 x1"));
        assert!(report.contains("cultural fit 0.80"));
        assert!(report.contains(
            "- Composition: Team may struggle with collaboration, consider adding a Connection-oriented member"
        ));
        assert!(report.contains("- Communication: Your diverse team brings multiple perspectives"));
        assert!(report.contains("- Communication: Regular team check-ins"));
        assert!(report.contains("Candidate c1 (C2) synergy 0.67 -> 1.00 (+0.33)"));
        let c1 = report.find("Candidate c1").unwrap();
        let v1 = report.find("Candidate v1").unwrap();
        assert!(c1 < v1);
    }

    #[test]
    fn report_degrades_for_empty_inputs() {
        let team = team_of(&[]);
        let report = build_report(&team, &[], ProjectType::Innovation, 3, date());
        assert!(report.contains("No members recorded for this team."));
        assert!(!report.contains("- Composition:"));
        assert!(report.contains("- Communication: Regular team check-ins"));
        assert!(report.contains("[low] The team has no members yet"));
        assert!(report.contains("No eligible candidates for this team."));
    }
}
