//! Canonical JSON encoding for deterministic hashing.
//!
//! Block data is hashed over a JSON rendering with fixed rules:
//! - Object keys sorted by code point, regardless of insertion order
//! - Separators `", "` between items and `": "` between key and value
//! - Everything outside printable ASCII escaped as `\uXXXX`
//! - Integers in decimal, floats in shortest round-trip form that always
//!   carries a fractional part or an exponent (`20.0`, `1e-05`, `1.5e+20`)
//!
//! Existing ledger files were hashed under exactly these rules, so their
//! digests keep verifying.
//!
//! **This encoding is FROZEN.** Changing a single byte invalidates every
//! persisted block hash.

use serde_json::{Map, Number, Value};

/// Encode a value to canonical bytes.
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    canonical_string(value).into_bytes()
}

/// Encode a value to a canonical string.
pub fn canonical_string(value: &Value) -> String {
    let mut buf = String::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Recursively encode a JSON value.
fn encode_value_to(buf: &mut String, value: &Value) {
    match value {
        Value::Null => buf.push_str("null"),
        Value::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => encode_number(buf, n),
        Value::String(s) => encode_text(buf, s),
        Value::Array(items) => encode_array(buf, items),
        Value::Object(map) => encode_object_canonical(buf, map),
    }
}

/// Encode a number: integers verbatim, floats via [`format_float`].
fn encode_number(buf: &mut String, n: &Number) {
    if let Some(i) = n.as_i64() {
        buf.push_str(&i.to_string());
    } else if let Some(u) = n.as_u64() {
        buf.push_str(&u.to_string());
    } else if let Some(f) = n.as_f64() {
        buf.push_str(&format_float(f));
    } else {
        panic!("unsupported number in canonical encoding: {n}");
    }
}

/// Encode a string with ASCII-only escaping.
fn encode_text(buf: &mut String, s: &str) {
    buf.push('"');
    for ch in s.chars() {
        match ch {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{08}' => buf.push_str("\\b"),
            '\u{0c}' => buf.push_str("\\f"),
            ' '..='~' => buf.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    buf.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    buf.push('"');
}

/// Encode an array.
fn encode_array(buf: &mut String, items: &[Value]) {
    buf.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        encode_value_to(buf, item);
    }
    buf.push(']');
}

/// Encode an object with keys sorted lexicographically.
///
/// The map's own iteration order is never trusted.
fn encode_object_canonical(buf: &mut String, map: &Map<String, Value>) {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    buf.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        encode_text(buf, key);
        buf.push_str(": ");
        encode_value_to(buf, value);
    }
    buf.push('}');
}

/// Render a float in shortest round-trip form.
///
/// Fixed notation for magnitudes in `[1e-4, 1e16)` with a mandatory
/// fractional part, exponent notation with a signed two-digit exponent
/// otherwise.
pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0.0" } else { "0.0" }.into();
    }

    let abs = f.abs();
    if (1e-4..1e16).contains(&abs) {
        let s = f.to_string();
        if s.contains('.') {
            s
        } else {
            format!("{s}.0")
        }
    } else {
        let s = format!("{f:e}");
        match s.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => s,
        }
    }
}
