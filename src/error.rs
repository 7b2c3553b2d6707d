use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HugoError {
    #[error("unknown Hugo type code: {0}")]
    UnknownType(String),

    #[error("assessment response is missing required fields: {}", .missing.join(", "))]
    InvalidResponse { missing: Vec<String> },

    #[error("unknown project type: {0}")]
    UnknownProjectType(String),
}

pub type Result<T> = std::result::Result<T, HugoError>;
