//! Categorical reducer: each off-diagonal cell becomes `greater`, `lower` or
//! `equal` by comparing `m(c,d)` against `m(d,c)`; the diagonal gets its own value.

use pw_core::CategoricalValues;

use crate::matrix::{CategoricalMatrix, PairwiseMatrix, ScoreMatrix};

pub fn reduce(matrix: &PairwiseMatrix, values: &CategoricalValues) -> CategoricalMatrix {
    ScoreMatrix::from_fn(matrix.universe().to_vec(), |i, j| {
        let v = if i == j {
            &values.diagonal
        } else {
            match matrix.at(i, j).cmp(matrix.at(j, i)) {
                std::cmp::Ordering::Greater => &values.greater,
                std::cmp::Ordering::Less => &values.lower,
                std::cmp::Ordering::Equal => &values.equal,
            }
        };
        v.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use pw_core::numeric::{frac, int};
    use pw_core::{Ballot, Candidate, ScoringPolicy, WeightedBallot};
    use std::collections::BTreeSet;

    fn c(s: &str) -> Candidate {
        s.parse().unwrap()
    }

    #[test]
    fn compares_each_cell_with_its_transpose() {
        let ballots = vec![WeightedBallot::new(Ballot::weak([vec!["a", "b"], vec!["c"]]).unwrap(), int(1))];
        let u: BTreeSet<Candidate> = ["a", "b", "c"].iter().map(|n| c(n)).collect();
        let m = aggregate(&ballots, &u, &ScoringPolicy::default()).unwrap();
        let cat = reduce(&m, &CategoricalValues::default());

        assert_eq!(cat.get(&c("a"), &c("b")).unwrap(), &frac(1, 2).unwrap());
        assert_eq!(cat.get(&c("a"), &c("c")).unwrap(), &int(1));
        assert_eq!(cat.get(&c("c"), &c("b")).unwrap(), &int(0));
        assert_eq!(cat.get(&c("c"), &c("c")).unwrap(), &frac(1, 2).unwrap());
    }

    #[test]
    fn custom_values_are_used_verbatim() {
        let ballots = vec![WeightedBallot::new(Ballot::strict(["x", "y"]).unwrap(), int(1))];
        let u: BTreeSet<Candidate> = [c("x"), c("y")].into_iter().collect();
        let m = aggregate(&ballots, &u, &ScoringPolicy::default()).unwrap();
        let values = CategoricalValues { greater: int(3), lower: int(-3), equal: int(0), diagonal: int(9) };
        let cat = reduce(&m, &values);
        assert_eq!(cat.get(&c("x"), &c("y")).unwrap(), &int(3));
        assert_eq!(cat.get(&c("y"), &c("x")).unwrap(), &int(-3));
        assert_eq!(cat.get(&c("y"), &c("y")).unwrap(), &int(9));
    }
}
