//! crates/pw_io/src/hasher.rs
//!
//! Deterministic fingerprints over canonical JSON.
//!
//! - Canonical JSON hashing: sorted object keys, array order preserved, compact.
//! - IDs derive from canonical bytes: `RES:` (resolution report), `PS:` (parameters).
//! - Hex digests are **lowercase**.
//!
//! Use `sha256_canonical(..)` for values/structs and `sha256_hex(..)` for raw bytes.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use pw_algo::Resolution;
use pw_core::EngineParams;

use crate::canonical_json::{canonical_bytes_of, to_canonical_json_bytes};
use crate::render_json::render_resolution;
use crate::IoError;

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    Ok(sha256_hex(&canonical_bytes_of(value)?))
}

/// SHA-256 over an already-built JSON value.
pub fn sha256_canonical_value(v: &Value) -> String {
    sha256_hex(&to_canonical_json_bytes(v))
}

/// `RES:<hex>` over the canonical rendering of a resolution.
pub fn resolution_id(r: &Resolution) -> String {
    format!("RES:{}", sha256_canonical_value(&render_resolution(r)))
}

/// `PS:<hex>` over the canonical parameter set.
pub fn params_id(p: &EngineParams) -> Result<String, IoError> {
    Ok(format!("PS:{}", sha256_canonical(p)?))
}
