//! Pairwise aggregator.
//!
//! `tally` accumulates, for every ordered pair `(c, d)` with `c != d`, the
//! weighted gross score and the weight that counted toward it. A ballot whose
//! category for the pair is `Excluded` adds to neither. `normalize` turns the
//! tally into the comparison matrix:
//!
//! - `m(c,d) = gross / weight` when `weight > 0`, else the policy fallback;
//! - `m(c,c)` = the configured diagonal;
//! - with `antisymmetric`, `m(c,d) - m(d,c)` off the diagonal.

use std::collections::BTreeSet;

use num_traits::Zero;
use pw_core::policy::Coefficient;
use pw_core::{Candidate, EngineError, ScoringPolicy, Score, WeightedBallot};

use crate::classify::{category_of, position, Position};
use crate::matrix::{PairwiseMatrix, ScoreMatrix};

/// Raw `(gross, weight)` accumulators per ordered pair, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairwiseTally {
    universe: Vec<Candidate>,
    gross: Vec<Score>,
    weight: Vec<Score>,
    ballots: usize,
}

impl PairwiseTally {
    pub fn universe(&self) -> &[Candidate] {
        &self.universe
    }

    /// Number of ballots tallied; zero-weight ballots are not counted.
    pub fn ballots(&self) -> usize {
        self.ballots
    }

    fn index_of(&self, c: &Candidate) -> Result<usize, EngineError> {
        self.universe
            .binary_search(c)
            .map_err(|_| EngineError::UnknownCandidate(c.clone()))
    }

    pub fn gross(&self, c: &Candidate, d: &Candidate) -> Result<&Score, EngineError> {
        let n = self.universe.len();
        Ok(&self.gross[self.index_of(c)? * n + self.index_of(d)?])
    }

    /// Total weight of the ballots that counted toward `(c, d)`.
    pub fn weight(&self, c: &Candidate, d: &Candidate) -> Result<&Score, EngineError> {
        let n = self.universe.len();
        Ok(&self.weight[self.index_of(c)? * n + self.index_of(d)?])
    }

    /// Divide, apply the fallback and the diagonal, then the antisymmetric transform.
    pub fn normalize(&self, policy: &ScoringPolicy) -> Result<PairwiseMatrix, EngineError> {
        let n = self.universe.len();
        let mut cells = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let k = i * n + j;
                let v = if i == j {
                    policy.diagonal.clone()
                } else if self.weight[k] > Score::zero() {
                    &self.gross[k] / &self.weight[k]
                } else {
                    match &policy.fallback {
                        Some(f) => {
                            tracing::debug!(c = %self.universe[i], d = %self.universe[j], "empty denominator; using fallback");
                            f.clone()
                        }
                        None => {
                            return Err(EngineError::DivisionByZeroUnhandled(
                                self.universe[i].clone(),
                                self.universe[j].clone(),
                            ))
                        }
                    }
                };
                cells.push(v);
            }
        }

        if policy.antisymmetric {
            let plain = cells.clone();
            for i in 0..n {
                for j in 0..n {
                    if i != j {
                        cells[i * n + j] = &plain[i * n + j] - &plain[j * n + i];
                    }
                }
            }
        }

        Ok(ScoreMatrix::from_parts(self.universe.clone(), cells))
    }
}

/// Accumulate weighted ballots over `universe` under `policy`.
pub fn tally(
    ballots: &[WeightedBallot],
    universe: &BTreeSet<Candidate>,
    policy: &ScoringPolicy,
) -> Result<PairwiseTally, EngineError> {
    let seq: Vec<Candidate> = universe.iter().cloned().collect();
    let n = seq.len();
    let mut gross = vec![Score::zero(); n * n];
    let mut weight = vec![Score::zero(); n * n];
    let mut counted = 0usize;

    for (index, wb) in ballots.iter().enumerate() {
        if wb.weight < Score::zero() {
            return Err(EngineError::InvalidWeight { index, weight: wb.weight.clone() });
        }
        if wb.weight.is_zero() {
            continue;
        }
        counted += 1;
        // Positions once per ballot; the pair loop only compares them.
        let pos: Vec<Position> = seq.iter().map(|c| position(&wb.ballot, c)).collect();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if let Coefficient::Included(coef) = policy.coefficient(category_of(pos[i], pos[j])) {
                    let k = i * n + j;
                    gross[k] += &wb.weight * coef;
                    weight[k] += &wb.weight;
                }
            }
        }
    }

    tracing::debug!(
        candidates = n,
        ballots = counted,
        skipped = ballots.len() - counted,
        "pairwise tally complete"
    );
    Ok(PairwiseTally { universe: seq, gross, weight, ballots: counted })
}

/// `tally` followed by `normalize`: a fresh matrix per call.
pub fn aggregate(
    ballots: &[WeightedBallot],
    universe: &BTreeSet<Candidate>,
    policy: &ScoringPolicy,
) -> Result<PairwiseMatrix, EngineError> {
    tally(ballots, universe, policy)?.normalize(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_core::numeric::{frac, int};
    use pw_core::{Ballot, Category};

    fn c(s: &str) -> Candidate {
        s.parse().unwrap()
    }

    fn universe(names: &[&str]) -> BTreeSet<Candidate> {
        names.iter().map(|n| c(n)).collect()
    }

    fn wb(order: &[&str], w: i64) -> WeightedBallot {
        WeightedBallot::new(Ballot::strict(order.iter().copied()).unwrap(), int(w))
    }

    #[test]
    fn weighted_majority_fractions() {
        let ballots = vec![wb(&["a", "b"], 2), wb(&["b", "a"], 1)];
        let m = aggregate(&ballots, &universe(&["a", "b"]), &ScoringPolicy::default()).unwrap();
        assert_eq!(m.get(&c("a"), &c("b")).unwrap(), &frac(2, 3).unwrap());
        assert_eq!(m.get(&c("b"), &c("a")).unwrap(), &frac(1, 3).unwrap());
        assert_eq!(m.get(&c("a"), &c("a")).unwrap(), &int(0));
    }

    #[test]
    fn negative_weight_rejected_with_index() {
        let ballots = vec![wb(&["a", "b"], 1), wb(&["b", "a"], -1)];
        let err = tally(&ballots, &universe(&["a", "b"]), &ScoringPolicy::default()).unwrap_err();
        assert_eq!(err, EngineError::InvalidWeight { index: 1, weight: int(-1) });
    }

    #[test]
    fn excluded_drops_ballot_from_the_denominator() {
        // Voter 2 never saw `c`: the pair (a,c) only averages voter 1.
        let ballots = vec![wb(&["c", "a"], 1), wb(&["a"], 5)];
        let t = tally(&ballots, &universe(&["a", "c"]), &ScoringPolicy::default()).unwrap();
        assert_eq!(t.weight(&c("a"), &c("c")).unwrap(), &int(1));
        assert_eq!(t.gross(&c("c"), &c("a")).unwrap(), &int(1));
    }

    #[test]
    fn included_zero_still_counts_in_the_denominator() {
        let policy = ScoringPolicy::default().with(Category::RankedVsAbsent, Coefficient::Included(int(0)));
        let ballots = vec![wb(&["a", "c"], 1), wb(&["a"], 1)];
        let m = aggregate(&ballots, &universe(&["a", "c"]), &policy).unwrap();
        assert_eq!(m.get(&c("a"), &c("c")).unwrap(), &frac(1, 2).unwrap());
    }

    #[test]
    fn empty_denominator_uses_fallback_or_fails() {
        let ballots = vec![wb(&["a"], 1)];
        let u = universe(&["a", "b", "c"]);
        let with = ScoringPolicy::default().with_fallback(Some(frac(1, 2).unwrap()));
        let m = aggregate(&ballots, &u, &with).unwrap();
        assert_eq!(m.get(&c("b"), &c("c")).unwrap(), &frac(1, 2).unwrap());

        let without = ScoringPolicy::default().with_fallback(None);
        let err = aggregate(&ballots, &u, &without).unwrap_err();
        assert!(matches!(err, EngineError::DivisionByZeroUnhandled(_, _)));
    }

    #[test]
    fn antisymmetric_keeps_the_diagonal() {
        let policy = ScoringPolicy::default()
            .with_antisymmetric(true)
            .with_diagonal(frac(1, 2).unwrap());
        let ballots = vec![wb(&["a", "b"], 3), wb(&["b", "a"], 1)];
        let m = aggregate(&ballots, &universe(&["a", "b"]), &policy).unwrap();
        assert_eq!(m.get(&c("a"), &c("b")).unwrap(), &frac(1, 2).unwrap());
        assert_eq!(m.get(&c("b"), &c("a")).unwrap(), &frac(-1, 2).unwrap());
        assert_eq!(m.get(&c("a"), &c("a")).unwrap(), &frac(1, 2).unwrap());
    }

    #[test]
    fn zero_weight_ballots_are_not_counted() {
        let ballots = vec![wb(&["a", "b"], 2), wb(&["b", "a"], 0), wb(&["b", "a"], 1)];
        let t = tally(&ballots, &universe(&["a", "b"]), &ScoringPolicy::default()).unwrap();
        assert_eq!(t.ballots(), 2);
        assert_eq!(t.weight(&c("a"), &c("b")).unwrap(), &int(3));
    }

    #[test]
    fn single_name_ballot_leaves_unordered_pairs_to_the_policy() {
        let single = WeightedBallot::new(Ballot::single("a").unwrap().with_known(["b", "c"]).unwrap(), int(1));
        let policy = ScoringPolicy::default()
            .with(Category::RankedVsUnordered, Coefficient::Excluded)
            .with(Category::UnorderedVsRanked, Coefficient::Excluded)
            .with_fallback(None);
        let u = universe(&["a", "b", "c"]);

        let t = tally(std::slice::from_ref(&single), &u, &policy).unwrap();
        assert_eq!(t.weight(&c("a"), &c("b")).unwrap(), &int(0));
        assert_eq!(t.weight(&c("b"), &c("c")).unwrap(), &int(1));

        let err = aggregate(&[single], &u, &policy).unwrap_err();
        assert!(matches!(err, EngineError::DivisionByZeroUnhandled(_, _)));
    }

    #[test]
    fn empty_universe_gives_empty_matrix() {
        let m = aggregate(&[wb(&["a"], 1)], &BTreeSet::new(), &ScoringPolicy::default()).unwrap();
        assert!(m.is_empty());
    }
}
