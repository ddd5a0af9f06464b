//! One-way rendering of values as SNBT, the human-readable text form of
//! NBT. Scalars carry a width suffix (`1b`, `2s`, `3`, `4l`, `1.5f`,
//! `0.25d`), strings are double-quoted with only `"` and `\` escaped,
//! arrays render as `[B;1, 2, 3]`, and compound keys render sorted, so
//! output is deterministic. There is no parser here; the text is for
//! debugging, logs and test fixtures.

use std::fmt;

use crate::Value;

/// Render a value as SNBT text. Equivalent to `value.to_string()`.
///
/// ```
/// use nbtree::{nbt, to_snbt};
///
/// let v = nbt!({"a": 1, "b": "x"});
/// assert_eq!(to_snbt(&v), r#"{a: 1, b: "x"}"#);
/// ```
pub fn to_snbt(value: &Value) -> String {
    value.to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        // Never produced by rendering a well-formed tree, but Debug-style
        // output beats refusing to format.
        Value::End => f.write_str("END"),
        Value::Byte(v) => write_int(f, *v, "b"),
        Value::Short(v) => write_int(f, *v, "s"),
        Value::Int(v) => write_int(f, *v, ""),
        Value::Long(v) => write_int(f, *v, "l"),
        Value::Float(v) => write_float(f, *v, "f"),
        Value::Double(v) => write_float(f, *v, "d"),
        Value::ByteArray(v) => {
            f.write_str("[B;")?;
            for (i, b) in v.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_int(f, *b, "")?;
            }
            f.write_str("]")
        }
        Value::String(v) => write_escaped_str(f, v),
        Value::List(v) => {
            f.write_str("[")?;
            for (i, item) in v.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item)?;
            }
            f.write_str("]")
        }
        Value::Compound(v) => {
            f.write_str("{")?;
            let mut entries: Vec<(&String, &Value)> = v.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(key)?;
                f.write_str(": ")?;
                write_value(f, item)?;
            }
            f.write_str("}")
        }
        Value::IntArray(v) => {
            f.write_str("[I;")?;
            for (i, n) in v.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_int(f, *n, "")?;
            }
            f.write_str("]")
        }
    }
}

fn write_int<I: itoa::Integer>(f: &mut fmt::Formatter<'_>, v: I, suffix: &str) -> fmt::Result {
    let mut buffer = itoa::Buffer::new();
    f.write_str(buffer.format(v))?;
    f.write_str(suffix)
}

fn write_float<F: ryu::Float>(f: &mut fmt::Formatter<'_>, v: F, suffix: &str) -> fmt::Result {
    let mut buffer = ryu::Buffer::new();
    f.write_str(buffer.format(v))?;
    f.write_str(suffix)
}

fn write_escaped_str(f: &mut fmt::Formatter<'_>, v: &str) -> fmt::Result {
    f.write_str("\"")?;
    let bytes = v.as_bytes();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if byte != b'"' && byte != b'\\' {
            continue;
        }
        if start < i {
            f.write_str(&v[start..i])?;
        }
        if byte == b'"' {
            f.write_str("\\\"")?;
        } else {
            f.write_str("\\\\")?;
        }
        start = i + 1;
    }
    if start != bytes.len() {
        f.write_str(&v[start..])?;
    }
    f.write_str("\"")
}
