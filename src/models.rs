use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HugoError;

/// Top-level personality grouping. Declaration order is the canonical V, I, E, C order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Vision,
    Innovation,
    Expertise,
    Connection,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Vision,
        Dimension::Innovation,
        Dimension::Expertise,
        Dimension::Connection,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Vision => "Vision",
            Dimension::Innovation => "Innovation",
            Dimension::Expertise => "Expertise",
            Dimension::Connection => "Connection",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Dimension::Vision => 0,
            Dimension::Innovation => 1,
            Dimension::Expertise => 2,
            Dimension::Connection => 3,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the twelve Hugo type codes. Variant order is the canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeCode {
    V1,
    V2,
    V3,
    I1,
    I2,
    I3,
    E1,
    E2,
    E3,
    C1,
    C2,
    C3,
}

impl TypeCode {
    pub const ALL: [TypeCode; 12] = [
        TypeCode::V1,
        TypeCode::V2,
        TypeCode::V3,
        TypeCode::I1,
        TypeCode::I2,
        TypeCode::I3,
        TypeCode::E1,
        TypeCode::E2,
        TypeCode::E3,
        TypeCode::C1,
        TypeCode::C2,
        TypeCode::C3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCode::V1 => "V1",
            TypeCode::V2 => "V2",
            TypeCode::V3 => "V3",
            TypeCode::I1 => "I1",
            TypeCode::I2 => "I2",
            TypeCode::I3 => "I3",
            TypeCode::E1 => "E1",
            TypeCode::E2 => "E2",
            TypeCode::E3 => "E3",
            TypeCode::C1 => "C1",
            TypeCode::C2 => "C2",
            TypeCode::C3 => "C3",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            TypeCode::V1 | TypeCode::V2 | TypeCode::V3 => Dimension::Vision,
            TypeCode::I1 | TypeCode::I2 | TypeCode::I3 => Dimension::Innovation,
            TypeCode::E1 | TypeCode::E2 | TypeCode::E3 => Dimension::Expertise,
            TypeCode::C1 | TypeCode::C2 | TypeCode::C3 => Dimension::Connection,
        }
    }

    /// Position in the canonical order, used to index fixed-size tables.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeCode {
    type Err = HugoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        TypeCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| HugoError::UnknownType(value.to_string()))
    }
}

/// Free-text answers keyed by question field (`work_approach`, `name`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response {
    answers: BTreeMap<String, String>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, replacing any earlier answer for the same field.
    pub fn answer(&mut self, field: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.answers.insert(field.into(), text.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.answers.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Response
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|(field, text)| (field.into(), text.into()))
                .collect(),
        }
    }
}

/// Per-type accumulated score. Always holds all twelve codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreVector {
    scores: BTreeMap<TypeCode, u32>,
}

/// Codes absent from the input stay at zero.
impl<'de> Deserialize<'de> for ScoreVector {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let parsed = BTreeMap::<TypeCode, u32>::deserialize(deserializer)?;
        let mut vector = ScoreVector::zeroed();
        vector.scores.extend(parsed);
        Ok(vector)
    }
}

impl ScoreVector {
    pub fn zeroed() -> Self {
        Self {
            scores: TypeCode::ALL.iter().map(|code| (*code, 0)).collect(),
        }
    }

    pub fn add(&mut self, code: TypeCode, weight: u32) {
        *self.scores.entry(code).or_insert(0) += weight;
    }

    pub fn get(&self, code: TypeCode) -> u32 {
        self.scores.get(&code).copied().unwrap_or(0)
    }

    pub fn max(&self) -> u32 {
        self.scores.values().copied().max().unwrap_or(0)
    }

    /// Iterates in canonical type order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeCode, u32)> + '_ {
        self.scores.iter().map(|(code, score)| (*code, *score))
    }
}

impl Default for ScoreVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub hugo_type: TypeCode,
    pub score_vector: ScoreVector,
    pub is_tie: bool,
}

fn neutral_position() -> f64 {
    5.0
}

/// Culture Map position on a 0-10 scale per axis. Axes left out sit at the midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CulturalProfile {
    #[serde(default = "neutral_position")]
    pub communication: f64,
    #[serde(default = "neutral_position")]
    pub feedback: f64,
    #[serde(default = "neutral_position")]
    pub leading: f64,
    #[serde(default = "neutral_position")]
    pub deciding: f64,
    #[serde(default = "neutral_position")]
    pub trusting: f64,
    #[serde(default = "neutral_position")]
    pub disagreeing: f64,
    #[serde(default = "neutral_position")]
    pub scheduling: f64,
}

impl CulturalProfile {
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.communication,
            self.feedback,
            self.leading,
            self.deciding,
            self.trusting,
            self.disagreeing,
            self.scheduling,
        ]
    }
}

impl Default for CulturalProfile {
    fn default() -> Self {
        Self {
            communication: neutral_position(),
            feedback: neutral_position(),
            leading: neutral_position(),
            deciding: neutral_position(),
            trusting: neutral_position(),
            disagreeing: neutral_position(),
            scheduling: neutral_position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    #[serde(rename = "personalityTypeCode", alias = "personality_type")]
    pub personality_type: TypeCode,
    #[serde(
        default,
        rename = "culturalProfile",
        alias = "cultural_profile",
        skip_serializing_if = "Option::is_none"
    )]
    pub cultural_profile: Option<CulturalProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, member_id: &str) -> bool {
        self.members.iter().any(|member| member.id == member_id)
    }

    /// Copy of this team with one more member appended.
    pub fn with_member(&self, member: TeamMember) -> Team {
        let mut hypothetical = self.clone();
        hypothetical.members.push(member);
        hypothetical
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    #[serde(rename = "personalityTypeCode", alias = "personality_type")]
    pub personality_type: TypeCode,
    #[serde(
        default,
        rename = "culturalProfile",
        alias = "cultural_profile",
        skip_serializing_if = "Option::is_none"
    )]
    pub cultural_profile: Option<CulturalProfile>,
}

impl CandidateProfile {
    pub fn as_member(&self) -> TeamMember {
        TeamMember {
            id: self.id.clone(),
            name: self.name.clone(),
            personality_type: self.personality_type,
            cultural_profile: self.cultural_profile,
        }
    }
}

/// Share of team members per dimension. All zero for an empty team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionBalance {
    pub vision: f64,
    pub innovation: f64,
    pub expertise: f64,
    pub connection: f64,
}

impl DimensionBalance {
    pub fn from_fractions(fractions: [f64; 4]) -> Self {
        Self {
            vision: fractions[0],
            innovation: fractions[1],
            expertise: fractions[2],
            connection: fractions[3],
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.as_array()[dimension.index()]
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.vision, self.innovation, self.expertise, self.connection]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> {
        let values = self.as_array();
        Dimension::ALL.into_iter().zip(values)
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    MissingDimension,
    Underrepresented,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    #[serde(rename = "type")]
    pub kind: GapKind,
    pub dimension: Option<Dimension>,
    pub severity: Severity,
    pub impact: String,
    pub recommendation: String,
}

/// Caller-supplied project goal that biases candidate ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Innovation,
    Execution,
    #[default]
    Balanced,
    ClientFacing,
    Strategic,
    Research,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Innovation => "innovation",
            ProjectType::Execution => "execution",
            ProjectType::Balanced => "balanced",
            ProjectType::ClientFacing => "client_facing",
            ProjectType::Strategic => "strategic",
            ProjectType::Research => "research",
        }
    }

    /// Ideal dimension shares (V, I, E, C) for this kind of project.
    pub fn ideal_profile(&self) -> [f64; 4] {
        match self {
            ProjectType::Innovation => [0.25, 0.40, 0.20, 0.15],
            ProjectType::Execution => [0.15, 0.15, 0.50, 0.20],
            ProjectType::Balanced => [0.25, 0.25, 0.25, 0.25],
            ProjectType::ClientFacing => [0.20, 0.15, 0.25, 0.40],
            ProjectType::Strategic => [0.45, 0.25, 0.20, 0.10],
            ProjectType::Research => [0.20, 0.30, 0.40, 0.10],
        }
    }

    /// Ranking multiplier for candidates of `dimension`: ideal share relative to an even 0.25.
    pub fn multiplier(&self, dimension: Dimension) -> f64 {
        self.ideal_profile()[dimension.index()] / 0.25
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = HugoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "innovation" => Ok(ProjectType::Innovation),
            "execution" => Ok(ProjectType::Execution),
            "balanced" => Ok(ProjectType::Balanced),
            "client_facing" => Ok(ProjectType::ClientFacing),
            "strategic" => Ok(ProjectType::Strategic),
            "research" => Ok(ProjectType::Research),
            _ => Err(HugoError::UnknownProjectType(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    pub current_synergy: f64,
    pub predicted_synergy: f64,
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub candidate: CandidateProfile,
    pub synergy_score: f64,
    pub reasoning: String,
    pub impact_analysis: ImpactAnalysis,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
}
