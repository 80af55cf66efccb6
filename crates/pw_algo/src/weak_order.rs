//! Weak orders from a dominance relation, and their linearization.
//!
//! Both resolvers end with the same step: repeatedly take the candidates that
//! nothing remaining beats (a source layer) until the pool is empty. Layers
//! are emitted best first.

use std::collections::BTreeSet;

use pw_core::{Candidate, EngineError, TieBreaker};

/// Peel source layers of `beats` over `universe` (canonical order).
///
/// If a layer comes out empty the relation has a cycle among the remaining
/// candidates; they are returned together as one final class.
pub(crate) fn peel_layers<F>(universe: &[Candidate], beats: F) -> Vec<BTreeSet<Candidate>>
where
    F: Fn(usize, usize) -> bool,
{
    let mut remaining: Vec<usize> = (0..universe.len()).collect();
    let mut classes = Vec::new();
    while !remaining.is_empty() {
        let (layer, rest): (Vec<usize>, Vec<usize>) = remaining
            .iter()
            .copied()
            .partition(|&d| !remaining.iter().any(|&c| c != d && beats(c, d)));
        if layer.is_empty() {
            tracing::warn!(
                remaining = remaining.len(),
                "no undefeated candidate left; closing with a single tie class"
            );
            classes.push(remaining.iter().map(|&i| universe[i].clone()).collect());
            break;
        }
        classes.push(layer.iter().map(|&i| universe[i].clone()).collect());
        remaining = rest;
    }
    classes
}

/// Total order from tie classes: each class ordered by the oracle, classes concatenated.
pub fn linearize(
    classes: &[BTreeSet<Candidate>],
    tie: &mut TieBreaker,
    ctx: &str,
) -> Result<Vec<Candidate>, EngineError> {
    let mut out = Vec::new();
    for (i, class) in classes.iter().enumerate() {
        out.extend(tie.order(&format!("{ctx}/class:{i}"), class)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_core::TiePolicy;

    fn seq(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    #[test]
    fn chain_peels_one_by_one() {
        let u = seq(&["a", "b", "c"]);
        // a > b > c, transitively closed
        let classes = peel_layers(&u, |i, j| i < j);
        assert_eq!(classes.len(), 3);
        assert!(classes[0].contains(&u[0]));
    }

    #[test]
    fn incomparable_candidates_share_a_layer() {
        let u = seq(&["a", "b", "c"]);
        let classes = peel_layers(&u, |i, j| j == 2 && i != 2);
        assert_eq!(classes, vec![u[..2].iter().cloned().collect(), BTreeSet::from([u[2].clone()])]);
    }

    #[test]
    fn cycle_collapses_into_one_class() {
        let u = seq(&["a", "b", "c"]);
        let classes = peel_layers(&u, |i, j| (i + 1) % 3 == j);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].len(), 3);
    }

    #[test]
    fn linearize_uses_the_oracle_within_classes() {
        let u = seq(&["a", "b", "c"]);
        let classes = vec![u[..2].iter().cloned().collect(), BTreeSet::from([u[2].clone()])];
        let mut lex = TieBreaker::new(TiePolicy::Lexicographic);
        assert_eq!(linearize(&classes, &mut lex, "t").unwrap(), u);

        let mut refuse = TieBreaker::new(TiePolicy::Refuse);
        assert!(matches!(
            linearize(&classes, &mut refuse, "t"),
            Err(EngineError::AmbiguousTieBreak { .. })
        ));
    }
}
