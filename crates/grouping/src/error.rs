use culture_distance::DistanceError;
use thiserror::Error;

/// Result type for partitioning operations
pub type Result<T> = std::result::Result<T, GroupingError>;

/// Errors surfaced to callers of the partitioning engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupingError {
    /// Fewer participants than the smallest allowed group
    #[error("At least 3 participants are required, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown group size '{0}' (expected 3, 4 or flexible)")]
    UnknownGroupSize(String),

    /// Distance matrix could not be built for the requested framework
    #[error("Distance error: {0}")]
    Distance(#[from] DistanceError),
}

/// Failures raised inside the genetic search
///
/// These never reach callers of `Partitioner`; they select the greedy path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchFailure {
    #[error("fitness evaluated to a non-finite value")]
    NonFiniteFitness,

    #[error("population is empty")]
    EmptyPopulation,

    #[error("candidate partition violates invariants: {0}")]
    InvariantViolation(String),
}
