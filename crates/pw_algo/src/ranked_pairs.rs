//! Ranked pairs (locked pairs).
//!
//! Claims are the ordered pairs `(c, d)`, `c != d`, with `m(c,d) >= m(d,c)`.
//! They are processed by decreasing strength; a group of equally strong claims
//! is ordered by the tie oracle (source candidate first, then target). Each
//! claim is:
//! - `Discarded` if `d` already beats `c` (locking would close a cycle);
//! - `Implied` if `c` already beats `d` through the closure;
//! - `Locked` otherwise, after which transitive closure is restored.
//!
//! An exact tie `m(c,d) == m(d,c)` yields two claims in the same group; the
//! oracle's order decides which one locks, the other is discarded.

use std::collections::{BTreeMap, BTreeSet};

use pw_core::{Candidate, EngineError, Score, TieBreaker};

use crate::matrix::PairwiseMatrix;
use crate::weak_order::{linearize, peel_layers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimFate {
    Locked,
    Implied,
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimRecord {
    pub source: Candidate,
    pub target: Candidate,
    pub strength: Score,
    pub fate: ClaimFate,
}

/// Irreflexive, transitively closed, acyclic `beats` relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockedRelation {
    universe: Vec<Candidate>,
    adj: Vec<bool>,
}

impl LockedRelation {
    fn empty(universe: Vec<Candidate>) -> Self {
        let n = universe.len();
        Self { universe, adj: vec![false; n * n] }
    }

    #[inline]
    fn has(&self, i: usize, j: usize) -> bool {
        self.adj[i * self.universe.len() + j]
    }

    // Add i→j and every x→y with x ∈ {i} ∪ pred(i), y ∈ {j} ∪ succ(j).
    fn lock(&mut self, i: usize, j: usize) {
        let n = self.universe.len();
        let sources: Vec<usize> = (0..n).filter(|&x| x == i || self.has(x, i)).collect();
        let targets: Vec<usize> = (0..n).filter(|&y| y == j || self.has(j, y)).collect();
        for &x in &sources {
            for &y in &targets {
                self.adj[x * n + y] = true;
            }
        }
    }

    pub fn universe(&self) -> &[Candidate] {
        &self.universe
    }

    fn position(&self, c: &Candidate) -> Option<usize> {
        self.universe.binary_search(c).ok()
    }

    /// `false` for candidates outside the universe.
    pub fn beats(&self, c: &Candidate, d: &Candidate) -> bool {
        match (self.position(c), self.position(d)) {
            (Some(i), Some(j)) => self.has(i, j),
            _ => false,
        }
    }

    /// All locked pairs in canonical order.
    pub fn edges(&self) -> Vec<(Candidate, Candidate)> {
        let n = self.universe.len();
        let mut out = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if self.has(i, j) {
                    out.push((self.universe[i].clone(), self.universe[j].clone()));
                }
            }
        }
        out
    }

    /// Weak order induced by the relation, best class first.
    pub fn tie_classes(&self) -> Vec<BTreeSet<Candidate>> {
        peel_layers(&self.universe, |i, j| self.has(i, j))
    }

    /// Candidates nobody beats.
    pub fn winners(&self) -> BTreeSet<Candidate> {
        self.tie_classes().into_iter().next().unwrap_or_default()
    }

    /// Full ranking; incomparable candidates are ordered by the oracle.
    pub fn strict_order(&self, tie: &mut TieBreaker) -> Result<Vec<Candidate>, EngineError> {
        linearize(&self.tie_classes(), tie, "ranked_pairs/order")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedPairsOutcome {
    pub relation: LockedRelation,
    /// Every claim in processing order with what happened to it.
    pub claims: Vec<ClaimRecord>,
}

/// Lock claims of `matrix` into an acyclic, transitively closed relation.
pub fn resolve(matrix: &PairwiseMatrix, tie: &mut TieBreaker) -> Result<RankedPairsOutcome, EngineError> {
    let n = matrix.len();
    let universe = matrix.universe();

    // strength → claims, canonical order within a group.
    let mut groups: BTreeMap<&Score, Vec<(Candidate, Candidate)>> = BTreeMap::new();
    for i in 0..n {
        for j in 0..n {
            if i != j && matrix.at(i, j) >= matrix.at(j, i) {
                groups
                    .entry(matrix.at(i, j))
                    .or_default()
                    .push((universe[i].clone(), universe[j].clone()));
            }
        }
    }

    let mut relation = LockedRelation::empty(universe.to_vec());
    let mut claims = Vec::new();
    for (g, (strength, group)) in groups.into_iter().rev().enumerate() {
        let ordered = tie.order_pairs(&format!("ranked_pairs/group:{g}"), &group)?;
        for (c, d) in ordered {
            let i = matrix.index_of(&c)?;
            let j = matrix.index_of(&d)?;
            let fate = if relation.has(j, i) {
                ClaimFate::Discarded
            } else if relation.has(i, j) {
                ClaimFate::Implied
            } else {
                relation.lock(i, j);
                ClaimFate::Locked
            };
            tracing::debug!(c = %c, d = %d, strength = %strength, ?fate, "ranked pairs claim");
            claims.push(ClaimRecord { source: c, target: d, strength: strength.clone(), fate });
        }
    }

    tracing::info!(
        candidates = n,
        claims = claims.len(),
        locked = claims.iter().filter(|r| r.fate == ClaimFate::Locked).count(),
        "ranked pairs resolved"
    );
    Ok(RankedPairsOutcome { relation, claims })
}
