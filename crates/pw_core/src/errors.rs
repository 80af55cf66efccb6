//! Error set shared by every stage of the engine.
//!
//! All of these are fatal to the single aggregation/resolution call that raised
//! them: callers get no partial matrix back, and nothing here is retryable.

use thiserror::Error;

use crate::ids::Candidate;
use crate::numeric::Score;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A ballot carried a negative weight.
    #[error("invalid weight {weight} on ballot #{index}")]
    InvalidWeight { index: usize, weight: Score },

    /// A ballot references a candidate outside its declared universes, or its
    /// tiers are not a partition of the ranked candidates.
    #[error("malformed ballot: {0}")]
    MalformedBallot(String),

    /// The oracle refuses arbitrary choices and one was required.
    #[error("ambiguous tie-break in {context}: {count} contenders")]
    AmbiguousTieBreak { context: String, count: usize },

    /// A pair had an empty denominator and the policy configures no fallback.
    #[error("empty denominator for ({0}, {1}) and no fallback configured")]
    DivisionByZeroUnhandled(Candidate, Candidate),

    #[error("invalid candidate name: {0:?}")]
    InvalidCandidate(String),

    #[error("invalid score literal: {0:?}")]
    InvalidScore(String),

    /// Lookup of a candidate that is not part of a matrix universe.
    #[error("unknown candidate: {0}")]
    UnknownCandidate(Candidate),

    /// An explicit tie order does not cover a contender.
    #[error("tie order does not mention {0}")]
    TieOrderIncomplete(Candidate),

    #[error("empty choice set in {0}")]
    EmptyChoiceSet(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
