//! Exact rational scores.
//!
//! Every coefficient, weight and matrix cell is a `BigRational`, so comparisons
//! made by the resolvers do not depend on the order ballots were summed in.
//! Floats appear only at the reporting boundary (`to_f64`).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use crate::errors::EngineError;

pub type Score = BigRational;

/// Integer score.
#[inline]
pub fn int(n: i64) -> Score {
    Score::from_integer(BigInt::from(n))
}

/// `num / den`, reduced. Fails on a zero denominator.
pub fn frac(num: i64, den: i64) -> Result<Score, EngineError> {
    if den == 0 {
        return Err(EngineError::InvalidScore(format!("{num}/{den}")));
    }
    Ok(Score::new(BigInt::from(num), BigInt::from(den)))
}

/// Parse `"n"`, `"n/d"` or a plain decimal such as `"-0.25"`.
pub fn parse_score(s: &str) -> Result<Score, EngineError> {
    let t = s.trim();
    let bad = || EngineError::InvalidScore(s.to_string());
    if t.is_empty() {
        return Err(bad());
    }

    if let Some((n, d)) = t.split_once('/') {
        let n: BigInt = n.trim().parse().map_err(|_| bad())?;
        let d: BigInt = d.trim().parse().map_err(|_| bad())?;
        if d.is_zero() {
            return Err(bad());
        }
        return Ok(Score::new(n, d));
    }

    if let Some((whole, fraction)) = t.split_once('.') {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        // At most one leading sign.
        let (negative, digits) = match whole.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, whole.strip_prefix('+').unwrap_or(whole)),
        };
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let mantissa: BigInt = format!("{digits}{fraction}").parse().map_err(|_| bad())?;
        let scale = BigInt::from(10u32).pow(fraction.len() as u32);
        let value = Score::new(mantissa, scale);
        return Ok(if negative { -value } else { value });
    }

    let n: BigInt = t.parse().map_err(|_| bad())?;
    Ok(Score::from_integer(n))
}

/// Lossy conversion for display and reports only.
pub fn to_f64(s: &Score) -> f64 {
    s.to_f64().unwrap_or(f64::NAN)
}

/// Serde helpers: scores travel as exact strings (`"7/9"`, `"1"`).
#[cfg(feature = "serde")]
pub mod score_serde {
    use super::{parse_score, Score};
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Score, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Score, D::Error> {
        let raw = String::deserialize(d)?;
        parse_score(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use super::super::{parse_score, Score};
        use serde::de::Error as DeError;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(v: &Option<Score>, s: S) -> Result<S::Ok, S::Error> {
            match v {
                Some(x) => s.serialize_some(&x.to_string()),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Score>, D::Error> {
            let raw = Option::<String>::deserialize(d)?;
            raw.map(|r| parse_score(&r).map_err(D::Error::custom)).transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_fraction_and_decimal() {
        assert_eq!(parse_score("3").unwrap(), int(3));
        assert_eq!(parse_score(" 2/4 ").unwrap(), frac(1, 2).unwrap());
        assert_eq!(parse_score("0.25").unwrap(), frac(1, 4).unwrap());
        assert_eq!(parse_score("-1.5").unwrap(), frac(-3, 2).unwrap());
        assert_eq!(parse_score("-7/9").unwrap(), frac(-7, 9).unwrap());
        assert_eq!(parse_score("+0.5").unwrap(), frac(1, 2).unwrap());
        assert_eq!(parse_score("-.5").unwrap(), frac(-1, 2).unwrap());
    }

    #[test]
    fn rejects_garbage_and_zero_denominator() {
        for bad in ["", "1/0", "abc", "1.", "1.2.3", "--1", "1/x", "+-0.5", "--1.5", "-+1.0", "-+-2.0"] {
            assert!(parse_score(bad).is_err(), "{bad} should not parse");
        }
        assert!(frac(1, 0).is_err());
    }

    #[test]
    fn display_is_exact() {
        assert_eq!(frac(14, 18).unwrap().to_string(), "7/9");
        assert_eq!(int(2).to_string(), "2");
        assert!((to_f64(&frac(1, 4).unwrap()) - 0.25).abs() < 1e-12);
    }
}
