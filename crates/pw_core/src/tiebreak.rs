//! Tie-break oracle.
//!
//! Offers the two operations resolvers need: pick the preferred element of a
//! set (`choice`) and produce a total order of a set (`order`). Orders over
//! candidate *pairs* are derived from the order over single candidates
//! (`order_pairs`): source rank first, target rank second.
//!
//! Policies:
//! - `Lexicographic`: token order of the candidates.
//! - `Explicit`: a caller-supplied ranking; contenders it omits are an error.
//! - `Random`: uniform picks from the seeded ChaCha stream (reproducible per seed).
//! - `Refuse`: any real choice (two or more contenders) is `AmbiguousTieBreak`.
//!
//! A `TieBreaker` is stateful (it owns the RNG stream and the crumb log), so
//! build a fresh one per resolution run.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::EngineError;
use crate::ids::Candidate;
use crate::rng::{TieCrumb, TieRng};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TiePolicy {
    #[default]
    Lexicographic,
    Explicit { order: Vec<Candidate> },
    Random { seed: u64 },
    Refuse,
}

impl TiePolicy {
    /// Stable policy code used in logs and reports.
    pub fn code(&self) -> &'static str {
        match self {
            TiePolicy::Lexicographic => "lexicographic",
            TiePolicy::Explicit { .. } => "explicit",
            TiePolicy::Random { .. } => "random",
            TiePolicy::Refuse => "refuse",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TieBreaker {
    policy: TiePolicy,
    rank: BTreeMap<Candidate, usize>,
    rng: Option<TieRng>,
    crumbs: Vec<TieCrumb>,
}

impl TieBreaker {
    pub fn new(policy: TiePolicy) -> Self {
        let rank = match &policy {
            TiePolicy::Explicit { order } => order
                .iter()
                .enumerate()
                .map(|(i, c)| (c.clone(), i))
                .collect(),
            _ => BTreeMap::new(),
        };
        let rng = match &policy {
            TiePolicy::Random { seed } => Some(TieRng::from_seed_u64(*seed)),
            _ => None,
        };
        Self { policy, rank, rng, crumbs: Vec::new() }
    }

    pub fn policy(&self) -> &TiePolicy {
        &self.policy
    }

    pub fn is_random(&self) -> bool {
        self.rng.is_some()
    }

    /// Random picks taken so far, in order.
    pub fn crumbs(&self) -> &[TieCrumb] {
        &self.crumbs
    }

    pub fn into_crumbs(self) -> Vec<TieCrumb> {
        self.crumbs
    }

    /// Total order of `set`, most preferred first.
    pub fn order(&mut self, ctx: &str, set: &BTreeSet<Candidate>) -> Result<Vec<Candidate>, EngineError> {
        if set.len() <= 1 {
            return Ok(set.iter().cloned().collect());
        }
        match &self.policy {
            TiePolicy::Lexicographic => Ok(set.iter().cloned().collect()),
            TiePolicy::Explicit { .. } => {
                let mut keyed = Vec::with_capacity(set.len());
                for c in set {
                    let r = self
                        .rank
                        .get(c)
                        .ok_or_else(|| EngineError::TieOrderIncomplete(c.clone()))?;
                    keyed.push((*r, c.clone()));
                }
                keyed.sort();
                Ok(keyed.into_iter().map(|(_, c)| c).collect())
            }
            TiePolicy::Random { .. } => self.random_order(ctx, set),
            TiePolicy::Refuse => Err(EngineError::AmbiguousTieBreak {
                context: ctx.to_string(),
                count: set.len(),
            }),
        }
    }

    /// The preferred element of a non-empty `set`.
    pub fn choice(&mut self, ctx: &str, set: &BTreeSet<Candidate>) -> Result<Candidate, EngineError> {
        if set.is_empty() {
            return Err(EngineError::EmptyChoiceSet(ctx.to_string()));
        }
        let ordered = self.order(ctx, set)?;
        ordered
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::EmptyChoiceSet(ctx.to_string()))
    }

    /// Order candidate pairs: by the oracle's rank of the source, then of the target.
    pub fn order_pairs(
        &mut self,
        ctx: &str,
        pairs: &[(Candidate, Candidate)],
    ) -> Result<Vec<(Candidate, Candidate)>, EngineError> {
        if pairs.len() <= 1 {
            return Ok(pairs.to_vec());
        }
        if matches!(self.policy, TiePolicy::Refuse) {
            return Err(EngineError::AmbiguousTieBreak {
                context: ctx.to_string(),
                count: pairs.len(),
            });
        }
        let involved: BTreeSet<Candidate> = pairs
            .iter()
            .flat_map(|(a, b)| [a.clone(), b.clone()])
            .collect();
        let rank: BTreeMap<Candidate, usize> = self
            .order(ctx, &involved)?
            .into_iter()
            .enumerate()
            .map(|(i, c)| (c, i))
            .collect();
        let mut out = pairs.to_vec();
        out.sort_by_key(|(a, b)| (rank.get(a).copied(), rank.get(b).copied()));
        Ok(out)
    }

    // Selection shuffle over the canonical (sorted) set: one logged pick per position.
    fn random_order(&mut self, ctx: &str, set: &BTreeSet<Candidate>) -> Result<Vec<Candidate>, EngineError> {
        let rng = self
            .rng
            .as_mut()
            .ok_or_else(|| EngineError::InvalidParams("random tie policy without RNG".into()))?;
        let mut pool: Vec<Candidate> = set.iter().cloned().collect();
        let mut out = Vec::with_capacity(pool.len());
        while pool.len() > 1 {
            let (idx, crumb) = rng
                .pick_index_with_crumb(ctx, pool.len())
                .ok_or_else(|| EngineError::EmptyChoiceSet(ctx.to_string()))?;
            tracing::debug!(ctx, pick = idx, of = pool.len(), "random tie pick");
            self.crumbs.push(crumb);
            out.push(pool.remove(idx));
        }
        out.extend(pool);
        Ok(out)
    }
}
