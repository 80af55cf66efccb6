//! render_json.rs — report objects for matrices, relations and whole resolutions.
//!
//! Every score is rendered twice: `exact` (a rational string such as `"7/9"`,
//! lossless) and `approx` (an f64 for display). Candidate order is always the
//! matrix's canonical order, so the same resolution renders to the same value.

use std::collections::BTreeSet;

use serde_json::{json, Map as JsonMap, Value};

use pw_algo::{
    ClaimFate, ClaimRecord, LockedRelation, PairwiseTally, RankedPairsOutcome, Resolution,
    SchulzeOutcome, ScoreMatrix,
};
use pw_core::numeric::to_f64;
use pw_core::rng::TieCrumb;
use pw_core::{Candidate, Score};

/// `{"exact": "7/9", "approx": 0.777…}`; `approx` is null if not representable.
pub fn score_json(s: &Score) -> Value {
    let approx = serde_json::Number::from_f64(to_f64(s)).map_or(Value::Null, Value::Number);
    json!({ "exact": s.to_string(), "approx": approx })
}

fn names(cands: &[Candidate]) -> Value {
    Value::Array(cands.iter().map(|c| Value::String(c.to_string())).collect())
}

/// Candidates plus one row of cells per candidate.
pub fn matrix_json(m: &ScoreMatrix) -> Value {
    let rows: Vec<Value> = m
        .rows()
        .map(|(_, row)| Value::Array(row.iter().map(score_json).collect()))
        .collect();
    json!({ "candidates": names(m.universe()), "rows": rows })
}

/// Raw accumulators, off-diagonal pairs only.
pub fn tally_json(t: &PairwiseTally) -> Value {
    let mut pairs = Vec::new();
    for c in t.universe() {
        for d in t.universe() {
            if c == d {
                continue;
            }
            // Both lookups are inside the tally's own universe.
            if let (Ok(gross), Ok(weight)) = (t.gross(c, d), t.weight(c, d)) {
                pairs.push(json!({
                    "c": c.as_str(),
                    "d": d.as_str(),
                    "gross": score_json(gross),
                    "weight": score_json(weight),
                }));
            }
        }
    }
    json!({
        "candidates": names(t.universe()),
        "ballots": t.ballots(),
        "pairs": pairs,
    })
}

pub fn tie_classes_json(classes: &[BTreeSet<Candidate>]) -> Value {
    Value::Array(
        classes
            .iter()
            .map(|class| Value::Array(class.iter().map(|c| Value::String(c.to_string())).collect()))
            .collect(),
    )
}

pub fn relation_json(rel: &LockedRelation) -> Value {
    let edges: Vec<Value> = rel
        .edges()
        .into_iter()
        .map(|(c, d)| json!([c.as_str(), d.as_str()]))
        .collect();
    json!({
        "candidates": names(rel.universe()),
        "edges": edges,
        "tie_classes": tie_classes_json(&rel.tie_classes()),
    })
}

fn fate_code(f: ClaimFate) -> &'static str {
    match f {
        ClaimFate::Locked => "locked",
        ClaimFate::Implied => "implied",
        ClaimFate::Discarded => "discarded",
    }
}

fn claim_json(k: &ClaimRecord) -> Value {
    json!({
        "source": k.source.as_str(),
        "target": k.target.as_str(),
        "strength": score_json(&k.strength),
        "fate": fate_code(k.fate),
    })
}

pub fn ranked_pairs_json(rp: &RankedPairsOutcome) -> Value {
    let mut o = relation_json(&rp.relation);
    if let Value::Object(map) = &mut o {
        map.insert("claims".into(), Value::Array(rp.claims.iter().map(claim_json).collect()));
    }
    o
}

pub fn schulze_json(s: &SchulzeOutcome) -> Value {
    json!({
        "widest": matrix_json(&s.widest),
        "tie_classes": tie_classes_json(&s.tie_classes),
    })
}

fn crumb_json(c: &TieCrumb) -> Value {
    // Word indices beyond u64 only appear on absurdly long streams; keep them exact.
    let word_index = u64::try_from(c.word_index)
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(c.word_index.to_string()));
    json!({
        "ctx": c.ctx.as_str(),
        "pick": c.pick,
        "of": c.of,
        "word_index": word_index,
    })
}

/// Full resolution report.
pub fn render_resolution(r: &Resolution) -> Value {
    let mut root = JsonMap::new();
    root.insert("tally".into(), tally_json(&r.tally));
    root.insert("matrix".into(), matrix_json(&r.matrix));
    root.insert("categorical".into(), matrix_json(&r.categorical));
    root.insert("ranked_pairs".into(), ranked_pairs_json(&r.ranked_pairs));
    root.insert("schulze".into(), schulze_json(&r.schulze));
    root.insert(
        "tie_crumbs".into(),
        Value::Array(r.tie_crumbs.iter().map(crumb_json).collect()),
    );
    Value::Object(root)
}
