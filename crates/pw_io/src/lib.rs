//! crates/pw_io/src/lib.rs
//! JSON boundary of the pairwise engine: canonical bytes, fingerprints,
//! parameter and profile loading, report rendering.
//!
//! - No filesystem or network access; callers hand in strings / values.
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Exact scores leave the engine as strings; floats appear only in reports.

#![forbid(unsafe_code)]

use pw_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// JSON (de)serialization errors with a JSON Pointer-ish location.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Loaded data failed an engine check.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Generic validation / invariants.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; report from the root.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod render_json;

pub use canonical_json::to_canonical_json_bytes;
pub use hasher::{resolution_id, sha256_canonical, sha256_hex};
pub use loader::{params_from_json_str, params_from_value, profile_from_json_str, Profile};
pub use render_json::render_resolution;
