//! Canonical JSON bytes for fingerprints.
//!
//! Object keys are sorted by UTF-8 bytes at every depth; arrays keep the order
//! the renderer gave them. Output is compact with no trailing newline.

use serde::Serialize;
use serde_json::Value;

use crate::IoError;

/// Convert a serde_json `Value` to canonical JSON bytes.
pub fn to_canonical_json_bytes(v: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_canonical_value(v, &mut buf);
    buf
}

/// Canonical bytes of any serializable value (via `serde_json::Value`).
pub fn canonical_bytes_of<T: Serialize>(value: &T) -> Result<Vec<u8>, IoError> {
    let v = serde_json::to_value(value)?;
    Ok(to_canonical_json_bytes(&v))
}

fn write_canonical_value(v: &Value, out: &mut Vec<u8>) {
    match v {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => write_string(s, out),
        Value::Array(arr) => {
            out.push(b'[');
            for (i, elem) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical_value(elem, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            out.push(b'{');
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (i, (k, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_string(k, out);
                out.push(b':');
                write_canonical_value(val, out);
            }
            out.push(b'}');
        }
    }
}

// Display of a string `Value` is its escaped JSON literal.
fn write_string(s: &str, out: &mut Vec<u8>) {
    out.extend_from_slice(Value::String(s.to_owned()).to_string().as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_sorted_at_every_depth_arrays_untouched() {
        let v = json!({
            "schulze": { "tie_classes": [["b", "a"]], "widest": null },
            "matrix": { "rows": [], "candidates": ["b", "a"] }
        });
        let s = String::from_utf8(to_canonical_json_bytes(&v)).unwrap();
        assert_eq!(
            s,
            r#"{"matrix":{"candidates":["b","a"],"rows":[]},"schulze":{"tie_classes":[["b","a"]],"widest":null}}"#
        );
    }

    #[test]
    fn strings_are_escaped_and_no_trailing_newline() {
        let v = json!({"q": "say \"hi\"\n"});
        let bytes = to_canonical_json_bytes(&v);
        assert_eq!(bytes, br#"{"q":"say \"hi\"\n"}"#.to_vec());
        assert!(!bytes.ends_with(b"\n"));
    }
}
