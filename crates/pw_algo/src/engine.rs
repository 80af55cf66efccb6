//! One-shot orchestration: ballots → tally → matrix → categorical + both resolvers.
//!
//! `recompute` returns a fresh, owned `Resolution` every time. Nothing is
//! cached on the engine, and each call builds its own `TieBreaker`, so two
//! calls with the same inputs (and the same random seed) agree exactly.

use std::collections::BTreeSet;

use pw_core::rng::TieCrumb;
use pw_core::{Candidate, EngineError, EngineParams, TieBreaker, WeightedBallot};

use crate::aggregate::{tally, PairwiseTally};
use crate::categorical;
use crate::matrix::{CategoricalMatrix, PairwiseMatrix};
use crate::ranked_pairs::{self, RankedPairsOutcome};
use crate::schulze::{self, SchulzeOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub tally: PairwiseTally,
    pub matrix: PairwiseMatrix,
    pub categorical: CategoricalMatrix,
    pub ranked_pairs: RankedPairsOutcome,
    pub schulze: SchulzeOutcome,
    /// Random tie picks taken while resolving (empty unless the policy is random).
    pub tie_crumbs: Vec<TieCrumb>,
}

#[derive(Clone, Debug)]
pub struct Engine {
    params: EngineParams,
}

impl Engine {
    pub fn new(params: EngineParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Tie oracle configured like the one `recompute` uses.
    pub fn tie_breaker(&self) -> TieBreaker {
        TieBreaker::new(self.params.tie_policy.clone())
    }

    pub fn recompute(
        &self,
        ballots: &[WeightedBallot],
        universe: &BTreeSet<Candidate>,
    ) -> Result<Resolution, EngineError> {
        let mut tie = self.tie_breaker();

        let tally = tally(ballots, universe, &self.params.scoring)?;
        let matrix = tally.normalize(&self.params.scoring)?;
        tracing::debug!(candidates = matrix.len(), "pairwise matrix built");

        let categorical = categorical::reduce(&matrix, &self.params.categorical);
        let ranked_pairs = ranked_pairs::resolve(&matrix, &mut tie)?;
        let schulze = schulze::resolve(&matrix);

        Ok(Resolution {
            tally,
            matrix,
            categorical,
            ranked_pairs,
            schulze,
            tie_crumbs: tie.into_crumbs(),
        })
    }
}
