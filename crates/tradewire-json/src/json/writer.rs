//! [`WireValue`] → compact JSON text.

use crate::WireValue;

/// Serializes a value as compact JSON text.
///
/// Object keys are written in tree order, so decode→encode round-trips
/// reproduce the original key order for untouched objects.
pub fn to_string(value: &WireValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Serializes a value as compact JSON bytes.
pub fn to_vec(value: &WireValue) -> Vec<u8> {
    to_string(value).into_bytes()
}

fn write_value(out: &mut String, value: &WireValue) {
    match value {
        WireValue::Null => out.push_str("null"),
        WireValue::Bool(true) => out.push_str("true"),
        WireValue::Bool(false) => out.push_str("false"),
        WireValue::Int(i) => {
            out.push_str(&i.to_string());
        }
        WireValue::Float(f) => {
            // NaN and infinities have no JSON representation.
            if f.is_finite() {
                out.push_str(&format_f64(*f));
            } else {
                out.push_str("null");
            }
        }
        WireValue::Str(s) => write_string(out, s),
        WireValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        WireValue::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

/// Shortest round-trip formatting; integral floats keep a `.0` marker so the
/// output stays a JSON *number with fraction*, matching what `1.0` parses
/// back to.
fn format_f64(f: f64) -> String {
    let s = format!("{f}");
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{s}.0")
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
