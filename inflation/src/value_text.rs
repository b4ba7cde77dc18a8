//! Human readable rendering of raw storage values.

use thiserror::Error;

pub const PERBILL: &str = "Perbill";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported type {0}")]
    UnsupportedType(String),
    #[error("{type_name} expects {expected} bytes, got {actual}")]
    Length {
        type_name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Rendered value: a list of text fragments, the first carrying the number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub children: Vec<String>,
}

impl DisplayText {
    pub fn first_text(&self) -> Option<&str> {
        self.children.first().map(String::as_str)
    }
}

struct PerThing {
    name: &'static str,
    width: usize,
    one: f64,
}

const PER_THINGS: [PerThing; 4] = [
    PerThing {
        name: "Percent",
        width: 1,
        one: 100.0,
    },
    PerThing {
        name: "Permill",
        width: 4,
        one: 1_000_000.0,
    },
    PerThing {
        name: PERBILL,
        width: 4,
        one: 1_000_000_000.0,
    },
    PerThing {
        name: "Perquintill",
        width: 8,
        one: 1_000_000_000_000_000_000.0,
    },
];

/// Render a SCALE-encoded fixed-point fraction as `"<percent>%"` with two
/// decimals.
pub fn value_to_text(type_name: &str, raw: &[u8]) -> Result<DisplayText, DecodeError> {
    let kind = PER_THINGS
        .iter()
        .find(|kind| kind.name == type_name)
        .ok_or_else(|| DecodeError::UnsupportedType(type_name.to_string()))?;
    if raw.len() != kind.width {
        return Err(DecodeError::Length {
            type_name: kind.name,
            expected: kind.width,
            actual: raw.len(),
        });
    }
    let mut buf = [0u8; 8];
    buf[..kind.width].copy_from_slice(raw);
    let parts = u64::from_le_bytes(buf) as f64;
    let percent = parts * 100.0 / kind.one;
    Ok(DisplayText {
        children: vec![format!("{percent:.2}%")],
    })
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace.
/// Returns NaN when no number is present.
pub fn parse_leading_float(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse().unwrap_or(f64::NAN);
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    text[..end].parse().unwrap_or(f64::NAN)
}
