//! Candidate names.
//!
//! A name is opaque: any text of 1..=256 characters is accepted, as long as it
//! has no control characters and no leading or trailing whitespace (so that
//! `"Jean Dupont"` and `"Zoë"` are distinct valid names, `" Zoë"` is rejected).
//!
//! `Ord` exists for canonical storage in BTree collections. It is not a
//! preference: orderings between candidates come from aggregation results or
//! from the tie policy the caller selects.

use core::fmt;
use core::str::FromStr;

use crate::errors::EngineError;

const MAX_CHARS: usize = 256;

fn is_name(s: &str) -> bool {
    let len = s.chars().count();
    (1..=MAX_CHARS).contains(&len)
        && s.trim() == s
        && !s.chars().any(char::is_control)
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(s: &str) -> Result<Self, EngineError> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Candidate {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_name(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(EngineError::InvalidCandidate(s.to_string()))
        }
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{is_name, Candidate};
    use serde::de::{Error as DeError, Unexpected};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Candidate {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.0)
        }
    }

    impl<'de> Deserialize<'de> for Candidate {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let s = String::deserialize(d)?;
            if is_name(&s) {
                Ok(Candidate(s))
            } else {
                Err(D::Error::invalid_value(
                    Unexpected::Str(&s),
                    &"a name of 1..=256 characters, untrimmed, without control characters",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_opaque_names() {
        for ok in ["a", "Alice", "cand-1", "x.y:z_9", "Jean Dupont", "Zoë", "a>b"] {
            assert_eq!(ok.parse::<Candidate>().unwrap().as_str(), ok);
        }
    }

    #[test]
    fn rejects_empty_padded_control_and_long() {
        for bad in ["", " a", "a ", "a\nb", "\t"] {
            assert!(bad.parse::<Candidate>().is_err(), "{bad:?} should not parse");
        }
        assert!("é".repeat(256).parse::<Candidate>().is_ok());
        let long = "x".repeat(257);
        match long.parse::<Candidate>() {
            Err(EngineError::InvalidCandidate(s)) => assert_eq!(s.len(), 257),
            other => panic!("expected InvalidCandidate, got {other:?}"),
        }
    }
}
