//! Keyword-signal classification of free-text assessment answers.
//!
//! Every scoring field has a fixed list of rules. A rule fires when the
//! lower-cased answer contains any of its trigger substrings and then adds its
//! weights to the score vector. Rules fire at most once, but any number of rules
//! in the same field may fire for one answer.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{HugoError, Result};
use crate::models::{ClassificationResult, Response, ScoreVector, TypeCode};

/// The six answer fields that contribute to scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringField {
    WorkApproach,
    DecisionMaking,
    TeamRole,
    ProblemSolving,
    CommunicationStyle,
    MotivationSource,
}

impl ScoringField {
    pub const ALL: [ScoringField; 6] = [
        ScoringField::WorkApproach,
        ScoringField::DecisionMaking,
        ScoringField::TeamRole,
        ScoringField::ProblemSolving,
        ScoringField::CommunicationStyle,
        ScoringField::MotivationSource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringField::WorkApproach => "work_approach",
            ScoringField::DecisionMaking => "decision_making",
            ScoringField::TeamRole => "team_role",
            ScoringField::ProblemSolving => "problem_solving",
            ScoringField::CommunicationStyle => "communication_style",
            ScoringField::MotivationSource => "motivation_source",
        }
    }
}

impl fmt::Display for ScoringField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct Rule {
    pub field: ScoringField,
    pub triggers: &'static [&'static str],
    pub boosts: &'static [(TypeCode, u32)],
}

const fn rule(
    field: ScoringField,
    triggers: &'static [&'static str],
    boosts: &'static [(TypeCode, u32)],
) -> Rule {
    Rule {
        field,
        triggers,
        boosts,
    }
}

use ScoringField::*;
use TypeCode::*;

/// Authoritative trigger table.
pub static RULES: &[Rule] = &[
    rule(WorkApproach, &["plan", "strateg", "ziel"], &[(V1, 3), (V3, 2)]),
    rule(WorkApproach, &["team", "menschen", "gemeinsam"], &[(V2, 3), (C1, 2)]),
    rule(WorkApproach, &["system", "struktur", "prozess"], &[(V3, 3), (E2, 2)]),
    rule(WorkApproach, &["experiment", "neu", "kreativ"], &[(I1, 3), (I3, 2)]),
    rule(WorkApproach, &["analyse", "gründlich", "forsch"], &[(E1, 3), (E3, 2)]),
    rule(DecisionMaking, &["schnell", "entschlossen", "direkt"], &[(V1, 3), (C3, 2)]),
    rule(DecisionMaking, &["alle", "team", "konsens"], &[(V2, 3), (C1, 3), (C2, 2)]),
    rule(DecisionMaking, &["analyse", "gründlich", "fakten"], &[(E1, 3), (E2, 2)]),
    rule(DecisionMaking, &["vorsichtig", "abwäg", "option"], &[(E3, 2), (C2, 2)]),
    rule(TeamRole, &["führ", "richtung", "leit"], &[(V1, 3), (V2, 2)]),
    rule(TeamRole, &["harmonie", "gehört", "alle"], &[(C1, 3), (V2, 2)]),
    rule(TeamRole, &["idee", "kreativ", "innovation"], &[(I1, 3), (I3, 3)]),
    rule(TeamRole, &["qualität", "durchdacht", "expertise"], &[(E1, 2), (E2, 3)]),
    rule(ProblemSolving, &["experiment", "neu", "ausprobier"], &[(I1, 3), (I2, 2)]),
    rule(ProblemSolving, &["bewährt", "erfahrung", "standard"], &[(E2, 3), (V3, 2)]),
    rule(ProblemSolving, &["expert", "rat", "wissen"], &[(E1, 2), (E3, 3)]),
    rule(ProblemSolving, &["menschen", "gemeinsam", "team"], &[(C1, 2), (C2, 3)]),
    rule(CommunicationStyle, &["strukturiert", "schritt", "system"], &[(V3, 3), (E2, 2)]),
    rule(CommunicationStyle, &["begeistert", "möglichkeit", "energie"], &[(I3, 3), (I1, 2)]),
    rule(CommunicationStyle, &["fakten", "detail", "präzise"], &[(E1, 3), (E2, 2)]),
    rule(CommunicationStyle, &["anpass", "bedürfnis", "person"], &[(V2, 3), (C1, 2)]),
    rule(MotivationSource, &["ziel", "ehrgeiz", "erfolg"], &[(V1, 3), (C3, 2)]),
    rule(MotivationSource, &["menschen", "team", "entwickl"], &[(V2, 3), (C1, 2)]),
    rule(MotivationSource, &["neu", "erschaff", "kreativ"], &[(I1, 3), (I2, 2)]),
    rule(MotivationSource, &["perfekt", "verbess", "qualität"], &[(E2, 3), (E1, 2)]),
    rule(MotivationSource, &["umset", "fertig", "ergebnis"], &[(C3, 3), (V3, 2)]),
];

impl Rule {
    fn matches(&self, answer: &str) -> bool {
        self.triggers.iter().any(|trigger| answer.contains(trigger))
    }
}

/// Scores a response against the trigger table. Total over any input; does not validate.
pub fn classify(response: &Response) -> ClassificationResult {
    let mut scores = ScoreVector::zeroed();

    for field in ScoringField::ALL {
        let Some(answer) = response.get(field.as_str()) else {
            continue;
        };
        let answer = answer.to_lowercase();

        for rule in RULES.iter().filter(|rule| rule.field == field) {
            if rule.matches(&answer) {
                for (code, weight) in rule.boosts {
                    scores.add(*code, *weight);
                }
            }
        }
    }

    let best = scores.max();
    let leaders: Vec<TypeCode> = scores
        .iter()
        .filter(|(_, score)| *score == best)
        .map(|(code, _)| code)
        .collect();
    // ScoreVector iterates canonically, so the first leader wins ties.
    let hugo_type = leaders.first().copied().unwrap_or(TypeCode::V1);
    let is_tie = leaders.len() > 1;

    debug!(%hugo_type, score = best, is_tie, "classified assessment response");

    ClassificationResult {
        hugo_type,
        score_vector: scores,
        is_tie,
    }
}

/// Checks that every scoring field carries a non-blank answer.
pub fn validate_response(response: &Response) -> Result<()> {
    let missing: Vec<String> = ScoringField::ALL
        .iter()
        .filter(|field| {
            response
                .get(field.as_str())
                .map(|answer| answer.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|field| field.as_str().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(HugoError::InvalidResponse { missing })
    }
}

/// Validating entry point used by callers that accept user input.
pub fn classify_response(response: &Response) -> Result<ClassificationResult> {
    validate_response(response)?;
    Ok(classify(response))
}

/// Trigger terms per field that add weight to `code`.
pub fn keyword_signals(code: TypeCode) -> BTreeMap<ScoringField, Vec<&'static str>> {
    let mut signals: BTreeMap<ScoringField, Vec<&'static str>> = BTreeMap::new();
    for rule in RULES {
        if rule.boosts.iter().any(|(boosted, _)| *boosted == code) {
            let terms = signals.entry(rule.field).or_default();
            for trigger in rule.triggers {
                if !terms.contains(trigger) {
                    terms.push(*trigger);
                }
            }
        }
    }
    signals
}
