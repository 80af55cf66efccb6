//! Category classifier: where a candidate stands relative to a reference
//! candidate on one ballot.
//!
//! A candidate is *ranked* (in some tier), *unordered* (known to the voter but
//! not placed) or *absent* (unknown to the voter). The category of `(c, d)` is
//! a pure function of the two positions.

use std::collections::BTreeSet;

use pw_core::{Ballot, Candidate, Category, EngineError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Tier index, 0 = best.
    Ranked(usize),
    Unordered,
    Absent,
}

/// Position of `c` on `ballot`.
pub fn position(ballot: &Ballot, c: &Candidate) -> Position {
    match ballot.tier_of(c) {
        Some(t) => Position::Ranked(t),
        None if ballot.knows(c) => Position::Unordered,
        None => Position::Absent,
    }
}

/// Category of a pair of positions, `c` first.
pub fn category_of(pc: Position, pd: Position) -> Category {
    use Position::*;
    match (pc, pd) {
        (Ranked(i), Ranked(j)) if i < j => Category::HigherVsLower,
        (Ranked(i), Ranked(j)) if i > j => Category::LowerVsHigher,
        (Ranked(_), Ranked(_)) => Category::Tied,
        (Ranked(_), Unordered) => Category::RankedVsUnordered,
        (Unordered, Ranked(_)) => Category::UnorderedVsRanked,
        (Unordered, Unordered) => Category::UnorderedVsUnordered,
        (Ranked(_), Absent) => Category::RankedVsAbsent,
        (Absent, Ranked(_)) => Category::AbsentVsRanked,
        (Unordered, Absent) => Category::UnorderedVsAbsent,
        (Absent, Unordered) => Category::AbsentVsUnordered,
        (Absent, Absent) => Category::AbsentVsAbsent,
    }
}

/// Classify `c` relative to reference `d` on `ballot`.
///
/// Fails with `MalformedBallot` when either candidate is neither known to the
/// voter nor part of `universe`.
pub fn classify(
    ballot: &Ballot,
    universe: &BTreeSet<Candidate>,
    c: &Candidate,
    d: &Candidate,
) -> Result<Category, EngineError> {
    for x in [c, d] {
        if !ballot.knows(x) && !universe.contains(x) {
            return Err(EngineError::MalformedBallot(format!(
                "{x} is outside both the ballot's known candidates and the universe"
            )));
        }
    }
    Ok(category_of(position(ballot, c), position(ballot, d)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Candidate {
        s.parse().unwrap()
    }

    fn universe(names: &[&str]) -> BTreeSet<Candidate> {
        names.iter().map(|n| c(n)).collect()
    }

    #[test]
    fn ranked_pairs_compare_by_tier() {
        let b = Ballot::weak([vec!["a"], vec!["b", "c"]]).unwrap();
        let u = universe(&["a", "b", "c"]);
        assert_eq!(classify(&b, &u, &c("a"), &c("b")).unwrap(), Category::HigherVsLower);
        assert_eq!(classify(&b, &u, &c("c"), &c("a")).unwrap(), Category::LowerVsHigher);
        assert_eq!(classify(&b, &u, &c("b"), &c("c")).unwrap(), Category::Tied);
    }

    #[test]
    fn unordered_and_absent_are_distinct() {
        let b = Ballot::strict(["a"]).unwrap().with_known(["b"]).unwrap();
        let u = universe(&["a", "b", "z"]);
        assert_eq!(classify(&b, &u, &c("a"), &c("b")).unwrap(), Category::RankedVsUnordered);
        assert_eq!(classify(&b, &u, &c("b"), &c("a")).unwrap(), Category::UnorderedVsRanked);
        assert_eq!(classify(&b, &u, &c("a"), &c("z")).unwrap(), Category::RankedVsAbsent);
        assert_eq!(classify(&b, &u, &c("z"), &c("b")).unwrap(), Category::AbsentVsUnordered);
        assert_eq!(classify(&b, &u, &c("z"), &c("z")).unwrap(), Category::AbsentVsAbsent);
    }

    #[test]
    fn single_name_ranks_only_the_named_candidate() {
        let b = Ballot::single("a").unwrap().with_known(["b", "c"]).unwrap();
        let u = universe(&["a", "b", "c"]);
        assert_eq!(classify(&b, &u, &c("a"), &c("b")).unwrap(), Category::RankedVsUnordered);
        assert_eq!(classify(&b, &u, &c("c"), &c("a")).unwrap(), Category::UnorderedVsRanked);
        assert_eq!(classify(&b, &u, &c("b"), &c("c")).unwrap(), Category::UnorderedVsUnordered);
    }

    #[test]
    fn swapping_the_pair_mirrors_the_category() {
        let b = Ballot::weak([vec!["a"], vec!["b"]]).unwrap().with_known(["c"]).unwrap();
        let u = universe(&["a", "b", "c", "d"]);
        for x in &u {
            for y in &u {
                let fwd = classify(&b, &u, x, y).unwrap();
                let back = classify(&b, &u, y, x).unwrap();
                assert_eq!(fwd.mirrored(), back, "{x} vs {y}");
            }
        }
    }

    #[test]
    fn outside_every_universe_is_malformed() {
        let b = Ballot::strict(["a"]).unwrap();
        let u = universe(&["a"]);
        let err = classify(&b, &u, &c("a"), &c("q")).unwrap_err();
        assert!(matches!(err, EngineError::MalformedBallot(_)));
    }
}
