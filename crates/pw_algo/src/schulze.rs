//! Schulze — widest-path closure and tie classes.
//!
//! Closure (Floyd–Warshall with min/max):
//!   widest[j,l] = max(widest[j,l], min(widest[j,k], widest[k,l]))
//! for every intermediate `k`, over pairs with `j != k`, `l != k`, `j != l`.
//! Loops are strictly `k → j → l` by canonical index and every `k` completes
//! before the next starts.
//!
//! `c` defeats `d` iff `widest(c,d) > widest(d,c)`. Tie classes are the source
//! layers of that relation, best first.

use std::collections::BTreeSet;

use pw_core::{Candidate, EngineError, TieBreaker};

use crate::matrix::{PairwiseMatrix, ScoreMatrix, WidestPathMatrix};
use crate::weak_order::{linearize, peel_layers};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchulzeOutcome {
    pub widest: WidestPathMatrix,
    pub tie_classes: Vec<BTreeSet<Candidate>>,
}

impl SchulzeOutcome {
    pub fn defeats(&self, c: &Candidate, d: &Candidate) -> Result<bool, EngineError> {
        Ok(self.widest.get(c, d)? > self.widest.get(d, c)?)
    }

    /// First tie class (empty for an empty universe).
    pub fn winners(&self) -> BTreeSet<Candidate> {
        self.tie_classes.first().cloned().unwrap_or_default()
    }

    /// Single winner; the oracle picks inside a tied first class.
    pub fn strict_winner(&self, tie: &mut TieBreaker) -> Result<Candidate, EngineError> {
        tie.choice("schulze/winner", &self.winners())
    }

    pub fn strict_order(&self, tie: &mut TieBreaker) -> Result<Vec<Candidate>, EngineError> {
        linearize(&self.tie_classes, tie, "schulze/order")
    }
}

/// Widest-path closure of `matrix`; a new matrix, the input is untouched.
pub fn widest_paths(matrix: &PairwiseMatrix) -> WidestPathMatrix {
    let n = matrix.len();
    let (universe, mut w) = matrix.clone().into_cells();

    for k in 0..n {
        for j in 0..n {
            if j == k {
                continue;
            }
            for l in 0..n {
                if l == k || l == j {
                    continue;
                }
                let via = std::cmp::min(&w[j * n + k], &w[k * n + l]);
                if *via > w[j * n + l] {
                    let via = via.clone();
                    w[j * n + l] = via;
                }
            }
        }
    }

    ScoreMatrix::from_parts(universe, w)
}

pub fn resolve(matrix: &PairwiseMatrix) -> SchulzeOutcome {
    let widest = widest_paths(matrix);
    let tie_classes = peel_layers(widest.universe(), |c, d| widest.at(c, d) > widest.at(d, c));
    tracing::info!(
        candidates = widest.len(),
        classes = tie_classes.len(),
        winners = tie_classes.first().map_or(0, |c| c.len()),
        "schulze resolved"
    );
    SchulzeOutcome { widest, tie_classes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use pw_core::numeric::{frac, int};
    use pw_core::{Ballot, ScoringPolicy, TiePolicy, WeightedBallot};

    fn c(s: &str) -> Candidate {
        s.parse().unwrap()
    }

    fn profile(ballots: &[(&[&str], i64)]) -> PairwiseMatrix {
        let wbs: Vec<WeightedBallot> = ballots
            .iter()
            .map(|(order, w)| WeightedBallot::new(Ballot::strict(order.iter().copied()).unwrap(), int(*w)))
            .collect();
        let universe: BTreeSet<Candidate> = wbs.iter().flat_map(|b| b.ballot.known().clone()).collect();
        aggregate(&wbs, &universe, &ScoringPolicy::default()).unwrap()
    }

    #[test]
    fn cycle_is_broken_by_path_strength() {
        let m = profile(&[(&["a", "b", "c"], 4), (&["b", "c", "a"], 3), (&["c", "a", "b"], 2)]);
        let out = resolve(&m);
        // c→a is 5/9 directly; a→b→c gives a→c min(2/3, 7/9) = 2/3.
        assert_eq!(out.widest.get(&c("a"), &c("c")).unwrap(), &frac(2, 3).unwrap());
        assert_eq!(out.widest.get(&c("c"), &c("a")).unwrap(), &frac(5, 9).unwrap());
        assert!(out.defeats(&c("a"), &c("c")).unwrap());
        let classes: Vec<Vec<&str>> = out
            .tie_classes
            .iter()
            .map(|s| s.iter().map(|x| x.as_str()).collect())
            .collect();
        assert_eq!(classes, vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn input_matrix_is_not_modified() {
        let m = profile(&[(&["a", "b", "c"], 4), (&["b", "c", "a"], 3), (&["c", "a", "b"], 2)]);
        let before = m.clone();
        let _ = resolve(&m);
        assert_eq!(m, before);
    }

    #[test]
    fn tied_first_class_needs_the_oracle() {
        let m = profile(&[(&["a", "b", "c"], 1), (&["b", "a", "c"], 1)]);
        let out = resolve(&m);
        assert_eq!(out.winners(), BTreeSet::from([c("a"), c("b")]));

        let mut lex = TieBreaker::new(TiePolicy::Lexicographic);
        assert_eq!(out.strict_winner(&mut lex).unwrap(), c("a"));
        assert_eq!(out.strict_order(&mut lex).unwrap(), vec![c("a"), c("b"), c("c")]);

        let mut refuse = TieBreaker::new(TiePolicy::Refuse);
        assert!(matches!(out.strict_winner(&mut refuse), Err(EngineError::AmbiguousTieBreak { .. })));
    }

    #[test]
    fn empty_matrix_has_no_winner() {
        let m = aggregate(&[], &BTreeSet::new(), &ScoringPolicy::default()).unwrap();
        let out = resolve(&m);
        assert!(out.tie_classes.is_empty());
        let mut lex = TieBreaker::new(TiePolicy::Lexicographic);
        assert!(matches!(out.strict_winner(&mut lex), Err(EngineError::EmptyChoiceSet(_))));
    }
}
