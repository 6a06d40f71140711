//! Request DTOs for the relay API
//!
//! Defines the query accepted by `GET /api/cat-images`.

use serde::Deserialize;

/// Batch size used when the caller does not ask for one
pub const DEFAULT_COUNT: usize = 3;
/// Smallest batch served
pub const MIN_COUNT: usize = 1;
/// Largest batch served
pub const MAX_COUNT: usize = 5;

/// The `count` parameter, accepted as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CountParam {
    Number(i64),
    Text(String),
}

/// Query string for `GET /api/cat-images`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatImagesQuery {
    #[serde(default)]
    count: Option<CountParam>,
}

impl CatImagesQuery {
    /// Query asking for `count` images.
    pub fn with_count(count: i64) -> Self {
        Self {
            count: Some(CountParam::Number(count)),
        }
    }

    /// Requested batch size: defaults to 3 when missing or without a
    /// leading integer, then clamped to `[1, 5]`.
    pub fn count(&self) -> usize {
        let requested = match &self.count {
            Some(CountParam::Number(n)) => Some(*n),
            Some(CountParam::Text(s)) => leading_integer(s),
            None => None,
        };

        match requested {
            Some(n) => clamp_count(n),
            None => DEFAULT_COUNT,
        }
    }
}

/// Integer prefix of `text` after leading whitespace and an optional sign.
///
/// Trailing garbage is ignored (`"4abc"` and `"4.9"` both give 4); values
/// too large for `i64` saturate.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    match (seen, negative) {
        (false, _) => None,
        (true, true) => Some(-value),
        (true, false) => Some(value),
    }
}

/// Clamps a requested batch size to `[MIN_COUNT, MAX_COUNT]`.
pub fn clamp_count(requested: i64) -> usize {
    requested.clamp(MIN_COUNT as i64, MAX_COUNT as i64) as usize
}
