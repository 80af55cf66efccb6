//! Square score matrices over a candidate universe.
//!
//! Cells are stored row-major in canonical candidate order. A matrix is built
//! once inside this crate and never mutated afterwards; a new profile means a
//! new matrix.

use std::collections::BTreeMap;

use pw_core::numeric::to_f64;
use pw_core::{Candidate, EngineError, Score};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreMatrix {
    universe: Vec<Candidate>,
    index: BTreeMap<Candidate, usize>,
    cells: Vec<Score>,
}

/// Normalized pairwise comparison matrix.
pub type PairwiseMatrix = ScoreMatrix;
/// Output of the categorical reduction.
pub type CategoricalMatrix = ScoreMatrix;
/// Widest-path (Schulze) closure of a pairwise matrix.
pub type WidestPathMatrix = ScoreMatrix;

impl ScoreMatrix {
    /// Build from a cell function evaluated by index, `f(i, j)`, row by row.
    /// `universe` must already be sorted.
    pub(crate) fn from_fn<F>(universe: Vec<Candidate>, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Score,
    {
        let n = universe.len();
        let mut cells = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                cells.push(f(i, j));
            }
        }
        Self::from_parts(universe, cells)
    }

    /// `universe` must already be sorted and `cells.len() == n * n`.
    pub(crate) fn from_parts(universe: Vec<Candidate>, cells: Vec<Score>) -> Self {
        debug_assert_eq!(cells.len(), universe.len() * universe.len());
        let index = universe
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { universe, index, cells }
    }

    pub(crate) fn into_cells(self) -> (Vec<Candidate>, Vec<Score>) {
        (self.universe, self.cells)
    }

    /// Candidates in canonical order.
    pub fn universe(&self) -> &[Candidate] {
        &self.universe
    }

    pub fn len(&self) -> usize {
        self.universe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }

    pub fn index_of(&self, c: &Candidate) -> Result<usize, EngineError> {
        self.index
            .get(c)
            .copied()
            .ok_or_else(|| EngineError::UnknownCandidate(c.clone()))
    }

    pub fn get(&self, c: &Candidate, d: &Candidate) -> Result<&Score, EngineError> {
        let i = self.index_of(c)?;
        let j = self.index_of(d)?;
        Ok(self.at(i, j))
    }

    /// Cell by canonical indices. Panics when out of range.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> &Score {
        &self.cells[i * self.universe.len() + j]
    }

    /// Rows in canonical order.
    pub fn rows(&self) -> impl Iterator<Item = (&Candidate, &[Score])> + '_ {
        let n = self.universe.len();
        self.universe
            .iter()
            .enumerate()
            .map(move |(i, c)| (c, &self.cells[i * n..(i + 1) * n]))
    }

    /// All ordered pairs `(c, d, value)` including the diagonal, row-major.
    pub fn canonical_pairs(&self) -> impl Iterator<Item = (&Candidate, &Candidate, &Score)> + '_ {
        let n = self.universe.len();
        (0..n * n).map(move |k| (&self.universe[k / n], &self.universe[k % n], &self.cells[k]))
    }

    /// Lossy table for display only.
    pub fn to_f64_table(&self) -> Vec<Vec<f64>> {
        self.rows()
            .map(|(_, row)| row.iter().map(to_f64).collect())
            .collect()
    }
}
