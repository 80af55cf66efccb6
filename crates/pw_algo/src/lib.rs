// crates/pw_algo/src/lib.rs
//! Pairwise aggregation and the two matrix resolvers.
//!
//! Flow: weighted ballots → `aggregate` → `PairwiseMatrix` →
//! { `categorical::reduce`, `ranked_pairs::resolve`, `schulze::resolve` }.
//! `Engine::recompute` runs the whole chain and returns an owned `Resolution`.
//!
//! Determinism:
//! - Every loop runs by index over the canonical (sorted) candidate universe.
//! - Scores are exact rationals; no float enters before the reporting boundary.
//! - Randomness only comes from a `TiePolicy::Random` oracle.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod categorical;
pub mod classify;
pub mod engine;
pub mod matrix;
pub mod ranked_pairs;
pub mod schulze;
pub mod weak_order;

pub use aggregate::{aggregate, tally, PairwiseTally};
pub use categorical::reduce;
pub use classify::{classify, Position};
pub use engine::{Engine, Resolution};
pub use matrix::{CategoricalMatrix, PairwiseMatrix, ScoreMatrix, WidestPathMatrix};
pub use ranked_pairs::{ClaimFate, ClaimRecord, LockedRelation, RankedPairsOutcome};
pub use schulze::SchulzeOutcome;
