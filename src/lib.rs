//! Personality-type classification and team-composition scoring for Hugo.
//!
//! Everything outside [`db`] is pure and synchronous: callers pass an
//! immutable snapshot in and get freshly built values back.

pub mod catalog;
pub mod classify;
pub mod composition;
pub mod db;
pub mod error;
pub mod gaps;
pub mod insights;
pub mod models;
pub mod ranking;
pub mod report;

#[cfg(test)]
mod test_support;

pub use catalog::{PersonalityType, TypeCatalog};
pub use classify::{classify, classify_response, validate_response};
pub use error::HugoError;
pub use models::{
    CandidateProfile, ClassificationResult, CulturalProfile, Dimension, DimensionBalance, Gap,
    ProjectType, Recommendation, Response, ScoreVector, Severity, Team, TeamMember, TypeCode,
};
