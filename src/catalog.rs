//! Static registry of the twelve Hugo personality types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{self, ScoringField};
use crate::error::{HugoError, Result};
use crate::models::{Dimension, TypeCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalityType {
    pub code: TypeCode,
    pub dimension: Dimension,
    pub display_name: &'static str,
    pub tagline: &'static str,
    pub strengths: &'static [&'static str],
    pub development: &'static [&'static str],
}

impl PersonalityType {
    /// Answer terms, per field, that push a classification towards this type.
    pub fn keyword_signals(&self) -> BTreeMap<ScoringField, Vec<&'static str>> {
        classify::keyword_signals(self.code)
    }
}

/// Immutable catalog handed to whoever needs type metadata.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: Vec<PersonalityType>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self {
            types: TypeCode::ALL.iter().map(|code| describe(*code)).collect(),
        }
    }

    /// Parses a raw code and returns its entry.
    pub fn lookup(&self, code: &str) -> Result<&PersonalityType> {
        let parsed: TypeCode = code.parse()?;
        self.types
            .get(parsed.index())
            .ok_or_else(|| HugoError::UnknownType(code.to_string()))
    }

    pub fn get(&self, code: TypeCode) -> &PersonalityType {
        &self.types[code.index()]
    }

    /// Canonical order: V1..V3, I1..I3, E1..E3, C1..C3.
    pub fn all_types(&self) -> &[PersonalityType] {
        &self.types
    }

    pub fn by_dimension(&self, dimension: Dimension) -> impl Iterator<Item = &PersonalityType> {
        self.types
            .iter()
            .filter(move |entry| entry.dimension == dimension)
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(code: TypeCode) -> PersonalityType {
    match code {
        TypeCode::V1 => entry(
            code,
            "The Pathfinder",
            "Shows the way to a better future",
            &["Strategic thinking", "Decision-making", "Leadership", "Crisis management"],
            &["Patience with details", "Emotional sensitivity", "Delegation"],
        ),
        TypeCode::V2 => entry(
            code,
            "The Developer",
            "Helps people and teams grow",
            &["People development", "Empathetic leadership", "Team inspiration", "Culture building"],
            &["Self-care", "Difficult decisions", "Setting boundaries"],
        ),
        TypeCode::V3 => entry(
            code,
            "The Organizer",
            "Creates structure and efficiency for lasting success",
            &["Systematic organization", "Efficiency", "Quality assurance", "Reliability"],
            &["Flexibility", "People focus", "Perfectionism"],
        ),
        TypeCode::I1 => entry(
            code,
            "The Pioneer",
            "Explores unknown territory and creates breakthroughs",
            &["Creative problem-solving", "Risk-taking", "Visionary ideas", "Fast adaptation"],
            &["Patience with routine", "Follow-through", "Detail work"],
        ),
        TypeCode::I2 => entry(
            code,
            "The Architect",
            "Designs systematic innovation for the future",
            &["Systematic innovation", "Long-term planning", "Complex systems", "Sustainable solutions"],
            &["Perfectionism", "Fast decisions", "Over-planning"],
        ),
        TypeCode::I3 => entry(
            code,
            "The Inspirator",
            "Gets others excited about new ideas and possibilities",
            &["Enthusiasm", "Creative communication", "Networking", "Optimism"],
            &["Overcommitment", "Critical details", "Handling setbacks"],
        ),
        TypeCode::E1 => entry(
            code,
            "The Researcher",
            "The analytical explorer",
            &["Analytical depth", "Research", "Evidence-based judgement", "Objectivity"],
            &["Speed of decisions", "Communicating simply", "Letting go of analysis"],
        ),
        TypeCode::E2 => entry(
            code,
            "The Master",
            "Perfects craft and quality",
            &["Craftsmanship", "Quality focus", "Precision", "Continuous improvement"],
            &["Good-enough thinking", "Delegation", "Openness to change"],
        ),
        TypeCode::E3 => entry(
            code,
            "The Advisor",
            "Shares knowledge that moves others forward",
            &["Advising", "Knowledge sharing", "Weighing options", "Mentoring"],
            &["Decisiveness", "Owning outcomes", "Saying no"],
        ),
        TypeCode::C1 => entry(
            code,
            "The Harmonizer",
            "Keeps the team together",
            &["Empathy", "Mediation", "Team cohesion", "Listening"],
            &["Addressing conflict", "Own needs", "Tough feedback"],
        ),
        TypeCode::C2 => entry(
            code,
            "The Bridge Builder",
            "Connects people, ideas and teams",
            &["Networking", "Cross-team collaboration", "Diplomacy", "Integration"],
            &["Taking sides", "Focus", "Overextension"],
        ),
        TypeCode::C3 => entry(
            code,
            "The Implementer",
            "Turns plans into results",
            &["Execution", "Reliability", "Pragmatism", "Results orientation"],
            &["Big-picture thinking", "Patience with ideas", "Pausing to reflect"],
        ),
    }
}

fn entry(
    code: TypeCode,
    display_name: &'static str,
    tagline: &'static str,
    strengths: &'static [&'static str],
    development: &'static [&'static str],
) -> PersonalityType {
    PersonalityType {
        code,
        dimension: code.dimension(),
        display_name,
        tagline,
        strengths,
        development,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_in_canonical_order() {
        let catalog = TypeCatalog::new();
        let codes: Vec<TypeCode> = catalog.all_types().iter().map(|entry| entry.code).collect();
        assert_eq!(codes, TypeCode::ALL.to_vec());
    }

    #[test]
    fn lookup_resolves_known_codes() {
        let catalog = TypeCatalog::new();
        let entry = catalog.lookup("c3").unwrap();
        assert_eq!(entry.code, TypeCode::C3);
        assert_eq!(entry.dimension, Dimension::Connection);
        assert_eq!(entry.display_name, "The Implementer");
    }

    #[test]
    fn entries_expose_their_keyword_signals() {
        let catalog = TypeCatalog::new();
        let signals = catalog.get(TypeCode::V1).keyword_signals();
        assert!(!signals.is_empty());
        assert_eq!(signals, classify::keyword_signals(TypeCode::V1));
        for entry in catalog.all_types() {
            assert!(!entry.keyword_signals().is_empty(), "{}", entry.code);
        }
    }

    #[test]
    fn lookup_rejects_unknown_codes() {
        let catalog = TypeCatalog::new();
        assert_eq!(
            catalog.lookup("V4").unwrap_err(),
            HugoError::UnknownType("V4".to_string())
        );
        assert!(catalog.lookup("").is_err());
    }

    #[test]
    fn each_dimension_has_three_types() {
        let catalog = TypeCatalog::new();
        for dimension in Dimension::ALL {
            let codes: Vec<TypeCode> = catalog
                .by_dimension(dimension)
                .map(|entry| entry.code)
                .collect();
            assert_eq!(codes.len(), 3);
            assert!(codes.iter().all(|code| code.dimension() == dimension));
        }
    }
}
