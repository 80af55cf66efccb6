//! pw_core — Core types, exact numerics, ballots, scoring policy and tie-break oracle.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! engine (`pw_algo`, `pw_io`):
//!
//! - Candidate names (`Candidate`)
//! - Exact rational scores (`Score`) and literal parsing
//! - Ballot shapes (tiers / explicit levels / single name) and weighted ballots
//! - The 11-category scoring policy and categorical output values
//! - Seedable RNG (ChaCha20) for **ties only**, wrapped by the `TieBreaker` oracle
//! - Engine parameters (`EngineParams`)
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod ballot;
pub mod errors;
pub mod ids;
pub mod numeric;
pub mod policy;
pub mod rng;
pub mod tiebreak;
pub mod variables;

pub use ballot::{Ballot, BallotShape, WeightedBallot};
pub use errors::{EngineError, EngineResult};
pub use ids::Candidate;
pub use numeric::Score;
pub use policy::{CategoricalValues, Category, Coefficient, ScoringPolicy};
pub use tiebreak::{TieBreaker, TiePolicy};
pub use variables::EngineParams;
