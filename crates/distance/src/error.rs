use crate::framework::Framework;
use thiserror::Error;

/// Result type for distance operations
pub type Result<T> = std::result::Result<T, DistanceError>;

/// Errors raised while computing cultural distances
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistanceError {
    /// One of the two profiles has no vector for the requested framework
    #[error("Missing {framework} data for distance computation")]
    MissingFrameworkData { framework: Framework },

    /// Combined distance requested but the profiles share no framework
    #[error("Profiles share no framework data")]
    NoSharedFrameworkData,

    /// A participant cannot take part in a run over this framework
    #[error("Participant '{participant}' has no {framework} data")]
    IncompleteProfile {
        participant: String,
        framework: Framework,
    },

    /// Distance between two named participants failed
    #[error("Distance between '{first}' and '{second}' failed: {source}")]
    Pair {
        first: String,
        second: String,
        #[source]
        source: Box<DistanceError>,
    },

    /// A participant's profile carries an out-of-range score
    #[error("Participant '{participant}' has invalid scores: {source}")]
    InvalidScores {
        participant: String,
        #[source]
        source: Box<DistanceError>,
    },

    /// Score outside the closed unit interval
    #[error("Score for {dimension} must be within [0, 1], got {value}")]
    ScoreOutOfRange { dimension: &'static str, value: f64 },

    /// Wrong number of coordinates for a framework vector
    #[error("{framework} vector needs {expected} values, got {actual}")]
    WrongArity {
        framework: Framework,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate participant id: {0}")]
    DuplicateParticipant(String),

    #[error("Unknown framework: {0}")]
    UnknownFramework(String),

    #[error("Invalid distance matrix: {0}")]
    InvalidMatrix(String),
}

impl DistanceError {
    /// Attach participant ids to a pairwise failure
    pub fn pair(first: impl Into<String>, second: impl Into<String>, source: Self) -> Self {
        Self::Pair {
            first: first.into(),
            second: second.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid matrix error
    pub fn invalid_matrix(msg: impl Into<String>) -> Self {
        Self::InvalidMatrix(msg.into())
    }
}
