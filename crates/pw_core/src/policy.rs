//! Scoring policy: one coefficient per relationship category, plus the
//! diagonal value, the empty-denominator fallback and the antisymmetric switch.
//!
//! `Coefficient::Excluded` removes the ballot from the pair's average
//! altogether (numerator **and** denominator). It is not the same as
//! `Included(0)`, which counts the ballot as a zero score.

use crate::numeric::{int, Score};

/// How candidate `c` stands relative to reference `d` on one ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    HigherVsLower,
    LowerVsHigher,
    Tied,
    RankedVsUnordered,
    UnorderedVsRanked,
    UnorderedVsUnordered,
    RankedVsAbsent,
    AbsentVsRanked,
    UnorderedVsAbsent,
    AbsentVsUnordered,
    AbsentVsAbsent,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::HigherVsLower,
        Category::LowerVsHigher,
        Category::Tied,
        Category::RankedVsUnordered,
        Category::UnorderedVsRanked,
        Category::UnorderedVsUnordered,
        Category::RankedVsAbsent,
        Category::AbsentVsRanked,
        Category::UnorderedVsAbsent,
        Category::AbsentVsUnordered,
        Category::AbsentVsAbsent,
    ];

    /// The category seen from the other side of the pair.
    pub fn mirrored(self) -> Category {
        match self {
            Category::HigherVsLower => Category::LowerVsHigher,
            Category::LowerVsHigher => Category::HigherVsLower,
            Category::Tied => Category::Tied,
            Category::RankedVsUnordered => Category::UnorderedVsRanked,
            Category::UnorderedVsRanked => Category::RankedVsUnordered,
            Category::UnorderedVsUnordered => Category::UnorderedVsUnordered,
            Category::RankedVsAbsent => Category::AbsentVsRanked,
            Category::AbsentVsRanked => Category::RankedVsAbsent,
            Category::UnorderedVsAbsent => Category::AbsentVsUnordered,
            Category::AbsentVsUnordered => Category::UnorderedVsAbsent,
            Category::AbsentVsAbsent => Category::AbsentVsAbsent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coefficient {
    Excluded,
    Included(Score),
}

impl Coefficient {
    pub fn value(&self) -> Option<&Score> {
        match self {
            Coefficient::Excluded => None,
            Coefficient::Included(v) => Some(v),
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Coefficient::Excluded)
    }
}

impl From<Score> for Coefficient {
    fn from(v: Score) -> Self {
        Coefficient::Included(v)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringPolicy {
    pub higher_vs_lower: Coefficient,
    pub lower_vs_higher: Coefficient,
    pub tied: Coefficient,
    pub ranked_vs_unordered: Coefficient,
    pub unordered_vs_ranked: Coefficient,
    pub unordered_vs_unordered: Coefficient,
    pub ranked_vs_absent: Coefficient,
    pub absent_vs_ranked: Coefficient,
    pub unordered_vs_absent: Coefficient,
    pub absent_vs_unordered: Coefficient,
    pub absent_vs_absent: Coefficient,
    /// Value of every `(c, c)` cell.
    #[cfg_attr(feature = "serde", serde(with = "crate::numeric::score_serde"))]
    pub diagonal: Score,
    /// Value of a cell whose denominator stayed at zero; `None` makes that an error.
    #[cfg_attr(feature = "serde", serde(with = "crate::numeric::score_serde::option"))]
    pub fallback: Option<Score>,
    /// Replace `m(c,d)` by `m(c,d) - m(d,c)` off the diagonal.
    pub antisymmetric: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            higher_vs_lower: Coefficient::Included(int(1)),
            lower_vs_higher: Coefficient::Included(int(0)),
            tied: Coefficient::Included(half()),
            ranked_vs_unordered: Coefficient::Included(int(1)),
            unordered_vs_ranked: Coefficient::Included(int(0)),
            unordered_vs_unordered: Coefficient::Included(half()),
            ranked_vs_absent: Coefficient::Excluded,
            absent_vs_ranked: Coefficient::Excluded,
            unordered_vs_absent: Coefficient::Excluded,
            absent_vs_unordered: Coefficient::Excluded,
            absent_vs_absent: Coefficient::Excluded,
            diagonal: int(0),
            fallback: Some(int(0)),
            antisymmetric: false,
        }
    }
}

impl ScoringPolicy {
    pub fn coefficient(&self, cat: Category) -> &Coefficient {
        match cat {
            Category::HigherVsLower => &self.higher_vs_lower,
            Category::LowerVsHigher => &self.lower_vs_higher,
            Category::Tied => &self.tied,
            Category::RankedVsUnordered => &self.ranked_vs_unordered,
            Category::UnorderedVsRanked => &self.unordered_vs_ranked,
            Category::UnorderedVsUnordered => &self.unordered_vs_unordered,
            Category::RankedVsAbsent => &self.ranked_vs_absent,
            Category::AbsentVsRanked => &self.absent_vs_ranked,
            Category::UnorderedVsAbsent => &self.unordered_vs_absent,
            Category::AbsentVsUnordered => &self.absent_vs_unordered,
            Category::AbsentVsAbsent => &self.absent_vs_absent,
        }
    }

    /// Builder-style override of one category.
    pub fn with(mut self, cat: Category, coef: Coefficient) -> Self {
        let slot = match cat {
            Category::HigherVsLower => &mut self.higher_vs_lower,
            Category::LowerVsHigher => &mut self.lower_vs_higher,
            Category::Tied => &mut self.tied,
            Category::RankedVsUnordered => &mut self.ranked_vs_unordered,
            Category::UnorderedVsRanked => &mut self.unordered_vs_ranked,
            Category::UnorderedVsUnordered => &mut self.unordered_vs_unordered,
            Category::RankedVsAbsent => &mut self.ranked_vs_absent,
            Category::AbsentVsRanked => &mut self.absent_vs_ranked,
            Category::UnorderedVsAbsent => &mut self.unordered_vs_absent,
            Category::AbsentVsUnordered => &mut self.absent_vs_unordered,
            Category::AbsentVsAbsent => &mut self.absent_vs_absent,
        };
        *slot = coef;
        self
    }

    pub fn with_diagonal(mut self, v: Score) -> Self {
        self.diagonal = v;
        self
    }

    pub fn with_fallback(mut self, v: Option<Score>) -> Self {
        self.fallback = v;
        self
    }

    pub fn with_antisymmetric(mut self, on: bool) -> Self {
        self.antisymmetric = on;
        self
    }

    /// True when no category is excluded, i.e. every ballot counts in every pair.
    pub fn covers_all_categories(&self) -> bool {
        Category::ALL.iter().all(|c| !self.coefficient(*c).is_excluded())
    }
}

/// Output values of the categorical (greater / lower / equal) reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CategoricalValues {
    #[cfg_attr(feature = "serde", serde(with = "crate::numeric::score_serde"))]
    pub greater: Score,
    #[cfg_attr(feature = "serde", serde(with = "crate::numeric::score_serde"))]
    pub lower: Score,
    #[cfg_attr(feature = "serde", serde(with = "crate::numeric::score_serde"))]
    pub equal: Score,
    #[cfg_attr(feature = "serde", serde(with = "crate::numeric::score_serde"))]
    pub diagonal: Score,
}

impl Default for CategoricalValues {
    fn default() -> Self {
        Self { greater: int(1), lower: int(0), equal: half(), diagonal: half() }
    }
}

fn half() -> Score {
    Score::new(1.into(), 2.into())
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Coefficient;
    use crate::numeric::parse_score;
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const EXCLUDED: &str = "excluded";

    impl Serialize for Coefficient {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            match self {
                Coefficient::Excluded => s.serialize_str(EXCLUDED),
                Coefficient::Included(v) => s.serialize_str(&v.to_string()),
            }
        }
    }

    impl<'de> Deserialize<'de> for Coefficient {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            if raw == EXCLUDED {
                return Ok(Coefficient::Excluded);
            }
            parse_score(&raw).map(Coefficient::Included).map_err(D::Error::custom)
        }
    }
}
