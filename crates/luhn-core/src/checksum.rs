//! # Luhn Checksum
//!
//! The validator behind the verify endpoint.
//!
//! ```text
//!   raw candidate ──► normalize ──► length gate ──► digit parse ──► luhn_sum % 10
//!   "5333-6195-..."   (drop '-')    13..=19         0-9 only        == 0 → valid
//! ```
//!
//! Every stage can reject, and a rejection is only ever a `false` verdict.
//! `inspect` exposes which stage rejected so callers can log it.

use crate::candidate::{digit_len, normalize};
use std::fmt;
use thiserror::Error;

/// Shortest accepted card number (after separators are removed)
pub const MIN_DIGITS: usize = 13;

/// Longest accepted card number (after separators are removed)
pub const MAX_DIGITS: usize = 19;

/// Why a candidate was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Normalized length outside `MIN_DIGITS..=MAX_DIGITS`
    #[error("expected 13 to 19 digits, got {len}")]
    Length { len: usize },

    /// Character that is neither a decimal digit nor the separator
    #[error("non-digit character {ch:?} at position {position}")]
    NonDigit { ch: char, position: usize },

    /// Digits are well formed but the checksum does not hold
    #[error("checksum mismatch (sum {sum} is not a multiple of 10)")]
    Checksum { sum: u32 },
}

/// A normalized card number that passed every check
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CardNumber(String);

impl CardNumber {
    /// The normalized digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits
    pub fn digit_count(&self) -> usize {
        self.0.len()
    }

    /// The last four digits
    pub fn last_four(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }

    /// All but the last four digits replaced by `*`
    pub fn masked(&self) -> String {
        let hidden = self.0.len() - 4;
        format!("{}{}", "*".repeat(hidden), self.last_four())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Full numbers must not end up in logs, so both formatters mask.
impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

/// Validate a candidate card number.
///
/// Total over all strings: empty input, wrong lengths and stray characters
/// all yield `false`, never a panic.
pub fn is_valid(candidate: &str) -> bool {
    inspect(candidate).is_ok()
}

/// Validate a candidate and report why it was rejected.
///
/// Checks run in order: length, then digit parsing, then the checksum.
/// Any character other than `0`-`9` rejects the whole candidate; it is
/// never read as a zero.
pub fn inspect(candidate: &str) -> Result<CardNumber, Rejection> {
    let len = digit_len(candidate);
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&len) {
        return Err(Rejection::Length { len });
    }

    let normalized = normalize(candidate);

    let digits = parse_digits(&normalized)?;

    let sum = luhn_sum(&digits);
    if sum % 10 != 0 {
        return Err(Rejection::Checksum { sum });
    }

    Ok(CardNumber(normalized))
}

/// Alternating-doubling sum over digit values (each `0..=9`).
///
/// The rightmost digit is taken as is, the one to its left is doubled, and so
/// on. A doubled value above 9 is replaced by `(value % 10) + 1`.
pub fn luhn_sum(digits: &[u8]) -> u32 {
    let mut sum = 0;
    let mut doubling = false;

    for &digit in digits.iter().rev() {
        let mut value = u32::from(digit);
        if doubling {
            value *= 2;
            if value > 9 {
                value = (value % 10) + 1;
            }
        }

        sum += value;
        doubling = !doubling;
    }

    sum
}

/// The digit that makes `payload` followed by it pass the checksum.
///
/// Returns `None` if the payload is empty or holds anything but `0`-`9`.
pub fn check_digit(payload: &str) -> Option<u8> {
    if payload.is_empty() {
        return None;
    }

    let mut digits = parse_digits(payload).ok()?;
    digits.push(0);

    let remainder = luhn_sum(&digits) % 10;
    Some(((10 - remainder) % 10) as u8)
}

fn parse_digits(normalized: &str) -> Result<Vec<u8>, Rejection> {
    normalized
        .chars()
        .enumerate()
        .map(|(position, ch)| match ch.to_digit(10) {
            Some(value) => Ok(value as u8),
            None => Err(Rejection::NonDigit { ch, position }),
        })
        .collect()
}
