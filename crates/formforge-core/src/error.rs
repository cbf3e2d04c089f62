//! Error types for FormForge

use thiserror::Error;

/// Main error type for FormForge operations
#[derive(Debug, Error)]
pub enum FormForgeError {
    /// Error in run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or missing data in one of the input tables
    #[error("Input error in {path}: {message}")]
    Input { path: String, message: String },

    /// Inconsistent grid, domain map or blueprint
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Reliability statistic undefined for an item set
    #[error("cannot compute reliability: {0}")]
    Reliability(#[from] ReliabilityError),

    /// No item can be removed without breaking the blueprint
    #[error("No legal removal: {0}")]
    Infeasible(String),

    /// Exhaustive search refused because the subset count exceeds its limit
    #[error("Search space too large: {subsets} subsets exceed the limit of {limit}")]
    SearchSpaceTooLarge { subsets: u128, limit: u64 },

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FormForgeError {
    /// Creates an input error for the given table path.
    pub fn input(path: impl Into<String>, message: impl Into<String>) -> Self {
        FormForgeError::Input {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Reasons Cronbach's alpha cannot be computed for an item set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReliabilityError {
    #[error("reliability undefined for empty item set")]
    EmptyItemSet,

    #[error("reliability undefined for single-item set")]
    SingleItem,

    #[error("sample variance requires at least two candidates, found {count}")]
    TooFewCandidates { count: usize },

    #[error("item {item} has no respondents")]
    NoRespondents { item: String },

    #[error("zero-variance candidate scores for current item set")]
    ZeroVariance,
}

/// Result type alias for FormForge operations
pub type Result<T> = std::result::Result<T, FormForgeError>;
