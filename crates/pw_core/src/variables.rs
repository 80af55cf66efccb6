//! Engine parameters: the scoring policy, the categorical output values and
//! the tie policy, bundled as one configuration value.
//!
//! Every field has a safe default, so an empty JSON object is a complete
//! configuration. Call `validate()` after deserializing.

use std::collections::BTreeSet;

use crate::errors::EngineError;
use crate::policy::{CategoricalValues, ScoringPolicy};
use crate::tiebreak::TiePolicy;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineParams {
    pub scoring: ScoringPolicy,
    pub categorical: CategoricalValues,
    pub tie_policy: TiePolicy,
}

impl EngineParams {
    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_categorical(mut self, categorical: CategoricalValues) -> Self {
        self.categorical = categorical;
        self
    }

    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    /// Structural checks that serde cannot express.
    pub fn validate(&self) -> Result<(), EngineError> {
        if let TiePolicy::Explicit { order } = &self.tie_policy {
            let mut seen = BTreeSet::new();
            for c in order {
                if !seen.insert(c) {
                    return Err(EngineError::InvalidParams(format!(
                        "tie_policy.order lists {c} more than once"
                    )));
                }
            }
        }
        if self.scoring.fallback.is_none() {
            tracing::debug!("scoring.fallback disabled; empty denominators will be errors");
        }
        Ok(())
    }
}
