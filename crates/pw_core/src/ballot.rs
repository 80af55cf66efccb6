//! Ballots as tagged shapes plus the voter's known universe.
//!
//! A ballot is polymorphic over what the voter expressed: tiers of a weak
//! order, explicit levels (grades), or a single name. Consumers never inspect
//! the shape directly to decide semantics; they ask for `tiers()`, `tier_of()`
//! and `knows()`, which dispatch structurally on the variant.
//!
//! Invariants (checked on construction):
//! - tiers are non-empty and pairwise disjoint;
//! - every mentioned candidate is known to the voter.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::EngineError;
use crate::ids::Candidate;
use crate::numeric::Score;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BallotShape {
    /// Weak order, best tier first. A strict order is a list of singletons.
    Tiers(Vec<BTreeSet<Candidate>>),
    /// Explicit levels; a higher level is preferred.
    Levels(
        #[cfg_attr(feature = "serde", serde(with = "level_serde"))] BTreeMap<Candidate, Score>,
    ),
    /// Single-name ballot: one ranked candidate, the rest of `known` unordered.
    Single(Candidate),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BallotWire", into = "BallotWire")
)]
pub struct Ballot {
    shape: BallotShape,
    known: BTreeSet<Candidate>,
    mentioned: BTreeSet<Candidate>,
    tiers: Vec<BTreeSet<Candidate>>,
}

impl Ballot {
    /// Build a ballot. `known` defaults to exactly the mentioned candidates;
    /// when given it must contain all of them.
    pub fn new(shape: BallotShape, known: Option<BTreeSet<Candidate>>) -> Result<Self, EngineError> {
        let mentioned = mentioned_of(&shape)?;
        let known = match known {
            None => mentioned.clone(),
            Some(k) => {
                if let Some(stray) = mentioned.iter().find(|c| !k.contains(*c)) {
                    return Err(EngineError::MalformedBallot(format!(
                        "{stray} is ranked but not in the voter's known candidates"
                    )));
                }
                k
            }
        };
        let tiers = tiers_of(&shape);
        Ok(Self { shape, known, mentioned, tiers })
    }

    /// Strict order from best to worst.
    pub fn strict<I, C>(order: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut tiers = Vec::new();
        for c in order {
            tiers.push(BTreeSet::from([c.as_ref().parse::<Candidate>()?]));
        }
        Self::new(BallotShape::Tiers(tiers), None)
    }

    /// Weak order from tiers of names, best tier first.
    pub fn weak<T, I, C>(tiers: T) -> Result<Self, EngineError>
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut out = Vec::new();
        for tier in tiers {
            let mut set = BTreeSet::new();
            for c in tier {
                set.insert(c.as_ref().parse::<Candidate>()?);
            }
            out.push(set);
        }
        Self::new(BallotShape::Tiers(out), None)
    }

    pub fn single(name: &str) -> Result<Self, EngineError> {
        Self::new(BallotShape::Single(name.parse()?), None)
    }

    pub fn levels(levels: BTreeMap<Candidate, Score>) -> Result<Self, EngineError> {
        Self::new(BallotShape::Levels(levels), None)
    }

    /// Same ballot, with a wider known universe.
    pub fn with_known<I, C>(self, known: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut set = self.known.clone();
        for c in known {
            set.insert(c.as_ref().parse::<Candidate>()?);
        }
        Self::new(self.shape, Some(set))
    }

    pub fn shape(&self) -> &BallotShape {
        &self.shape
    }

    /// Candidates the voter saw when casting (superset of `mentioned`).
    pub fn known(&self) -> &BTreeSet<Candidate> {
        &self.known
    }

    pub fn knows(&self, c: &Candidate) -> bool {
        self.known.contains(c)
    }

    /// Candidates explicitly placed by the voter.
    pub fn mentioned(&self) -> &BTreeSet<Candidate> {
        &self.mentioned
    }

    /// The weak order this ballot expresses, best tier first.
    pub fn tiers(&self) -> &[BTreeSet<Candidate>] {
        &self.tiers
    }

    /// Index of the tier containing `c`, or `None` when `c` is not ranked.
    pub fn tier_of(&self, c: &Candidate) -> Option<usize> {
        self.tiers.iter().position(|t| t.contains(c))
    }
}

fn mentioned_of(shape: &BallotShape) -> Result<BTreeSet<Candidate>, EngineError> {
    match shape {
        BallotShape::Tiers(tiers) => {
            let mut seen = BTreeSet::new();
            for (i, tier) in tiers.iter().enumerate() {
                if tier.is_empty() {
                    return Err(EngineError::MalformedBallot(format!("tier #{i} is empty")));
                }
                for c in tier {
                    if !seen.insert(c.clone()) {
                        return Err(EngineError::MalformedBallot(format!(
                            "{c} appears in more than one tier"
                        )));
                    }
                }
            }
            Ok(seen)
        }
        BallotShape::Levels(levels) => Ok(levels.keys().cloned().collect()),
        BallotShape::Single(c) => Ok(BTreeSet::from([c.clone()])),
    }
}

fn tiers_of(shape: &BallotShape) -> Vec<BTreeSet<Candidate>> {
    match shape {
        BallotShape::Tiers(tiers) => tiers.clone(),
        BallotShape::Levels(levels) => {
            let mut by_level: BTreeMap<&Score, BTreeSet<Candidate>> = BTreeMap::new();
            for (c, level) in levels {
                by_level.entry(level).or_default().insert(c.clone());
            }
            by_level.into_values().rev().collect()
        }
        BallotShape::Single(c) => vec![BTreeSet::from([c.clone()])],
    }
}

/// Wire form: the shape plus the known universe; tiers are rebuilt and the
/// invariants re-checked on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct BallotWire {
    shape: BallotShape,
    #[serde(default)]
    known: Option<BTreeSet<Candidate>>,
}

#[cfg(feature = "serde")]
impl TryFrom<BallotWire> for Ballot {
    type Error = EngineError;
    fn try_from(w: BallotWire) -> Result<Self, Self::Error> {
        Ballot::new(w.shape, w.known)
    }
}

#[cfg(feature = "serde")]
impl From<Ballot> for BallotWire {
    fn from(b: Ballot) -> Self {
        BallotWire { shape: b.shape, known: Some(b.known) }
    }
}

#[cfg(feature = "serde")]
mod level_serde {
    use std::collections::BTreeMap;

    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::ids::Candidate;
    use crate::numeric::{parse_score, Score};

    pub fn serialize<S: Serializer>(v: &BTreeMap<Candidate, Score>, s: S) -> Result<S::Ok, S::Error> {
        let wire: BTreeMap<&Candidate, String> = v.iter().map(|(c, l)| (c, l.to_string())).collect();
        wire.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<Candidate, Score>, D::Error> {
        let wire = BTreeMap::<Candidate, String>::deserialize(d)?;
        wire.into_iter()
            .map(|(c, l)| parse_score(&l).map(|s| (c, s)).map_err(D::Error::custom))
            .collect()
    }
}

/// A ballot with its weight and an optional voter identity.
///
/// Weights are validated by the aggregator (negative weights are rejected
/// there, with the ballot's position in the profile).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedBallot {
    pub ballot: Ballot,
    pub weight: Score,
    pub voter: Option<String>,
}

impl WeightedBallot {
    pub fn new(ballot: Ballot, weight: Score) -> Self {
        Self { ballot, weight, voter: None }
    }

    pub fn with_voter(mut self, voter: impl Into<String>) -> Self {
        self.voter = Some(voter.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{frac, int};

    fn c(s: &str) -> Candidate {
        s.parse().unwrap()
    }

    #[test]
    fn strict_ballot_has_singleton_tiers() {
        let b = Ballot::strict(["a", "b", "c"]).unwrap();
        assert_eq!(b.tiers().len(), 3);
        assert_eq!(b.tier_of(&c("a")), Some(0));
        assert_eq!(b.tier_of(&c("c")), Some(2));
        assert_eq!(b.known().len(), 3);
    }

    #[test]
    fn weak_ballot_keeps_ties_and_extra_known() {
        let b = Ballot::weak([vec!["a", "b"], vec!["c"]])
            .unwrap()
            .with_known(["d"])
            .unwrap();
        assert_eq!(b.tier_of(&c("a")), b.tier_of(&c("b")));
        assert_eq!(b.tier_of(&c("d")), None);
        assert!(b.knows(&c("d")));
        assert_eq!(b.mentioned().len(), 3);
    }

    #[test]
    fn rejects_duplicates_empty_tiers_and_unknown_ranked() {
        let dup = Ballot::weak([vec!["a"], vec!["a", "b"]]);
        assert!(matches!(dup, Err(EngineError::MalformedBallot(_))));

        let empty = Ballot::new(BallotShape::Tiers(vec![BTreeSet::new()]), None);
        assert!(matches!(empty, Err(EngineError::MalformedBallot(_))));

        let shape = BallotShape::Tiers(vec![BTreeSet::from([c("a")])]);
        let narrow = Ballot::new(shape, Some(BTreeSet::from([c("b")])));
        assert!(matches!(narrow, Err(EngineError::MalformedBallot(_))));
    }

    #[test]
    fn levels_group_into_tiers_highest_first() {
        let levels = BTreeMap::from([
            (c("a"), int(1)),
            (c("b"), int(3)),
            (c("c"), int(1)),
            (c("d"), frac(5, 2).unwrap()),
        ]);
        let b = Ballot::levels(levels).unwrap();
        let tiers: Vec<Vec<&str>> = b
            .tiers()
            .iter()
            .map(|t| t.iter().map(|x| x.as_str()).collect())
            .collect();
        assert_eq!(tiers, vec![vec!["b"], vec!["d"], vec!["a", "c"]]);
    }

    #[test]
    fn single_name_ranks_one_and_leaves_the_rest_unordered() {
        let b = Ballot::single("a").unwrap().with_known(["b", "c"]).unwrap();
        assert_eq!(b.tiers().len(), 1);
        assert_eq!(b.tier_of(&c("a")), Some(0));
        assert_eq!(b.tier_of(&c("b")), None);
        assert!(b.knows(&c("b")));

        assert_eq!(b.mentioned().len(), 1);

        let alone = Ballot::single("a").unwrap();
        assert_eq!(alone.tiers().len(), 1);
    }
}
