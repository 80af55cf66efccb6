//! Loader: parameters and profiles from JSON text or values.
//!
//! Inputs are handed in by the caller (no file or network access here).
//! Everything is validated on the way in: parameters via
//! `EngineParams::validate`, ballots via their own invariants, and the
//! universe must not list a candidate twice.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use pw_core::numeric::{int, score_serde};
use pw_core::{Ballot, Candidate, EngineParams, Score, WeightedBallot};

use crate::IoError;

// ----------------------------- Parameters -----------------------------

pub fn params_from_value(v: Value) -> Result<EngineParams, IoError> {
    let params: EngineParams = serde_json::from_value(v)?;
    params.validate()?;
    tracing::debug!(tie_policy = params.tie_policy.code(), "parameters loaded");
    Ok(params)
}

pub fn params_from_json_str(s: &str) -> Result<EngineParams, IoError> {
    params_from_value(serde_json::from_str(s)?)
}

// ----------------------------- Profiles -----------------------------

/// Weighted ballots plus the caller-declared candidate universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub universe: BTreeSet<Candidate>,
    pub ballots: Vec<WeightedBallot>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileWire {
    universe: Vec<Candidate>,
    #[serde(default)]
    ballots: Vec<EntryWire>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryWire {
    ballot: Ballot,
    #[serde(default = "unit_weight", with = "score_serde")]
    weight: Score,
    #[serde(default)]
    voter: Option<String>,
}

fn unit_weight() -> Score {
    int(1)
}

pub fn profile_from_value(v: Value) -> Result<Profile, IoError> {
    let wire: ProfileWire = serde_json::from_value(v)?;

    let mut universe = BTreeSet::new();
    for c in wire.universe {
        if universe.contains(&c) {
            return Err(IoError::Invalid(format!("universe lists {c} more than once")));
        }
        universe.insert(c);
    }

    let ballots: Vec<WeightedBallot> = wire
        .ballots
        .into_iter()
        .map(|e| WeightedBallot { ballot: e.ballot, weight: e.weight, voter: e.voter })
        .collect();

    tracing::debug!(candidates = universe.len(), ballots = ballots.len(), "profile loaded");
    Ok(Profile { universe, ballots })
}

pub fn profile_from_json_str(s: &str) -> Result<Profile, IoError> {
    profile_from_value(serde_json::from_str(s)?)
}
