//! # luhn-core
//!
//! Core validation logic for the luhn-verify service.
//!
//! This crate provides:
//! - `normalize` for stripping separators from a raw candidate
//! - `is_valid` / `inspect` for the Luhn checksum verdict
//! - `CardNumber` and `Rejection` for typed, log-safe outcomes
//! - `VerifyError` for the HTTP boundary error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use luhn_core::{inspect, is_valid, Rejection};
//!
//! assert!(is_valid("5333-6195-0371-5702"));
//! assert!(!is_valid("5333-6195-0371-5703"));
//!
//! let card = inspect("5333-6195-0371-5702").unwrap();
//! assert_eq!(card.masked(), "************5702");
//!
//! assert!(matches!(inspect("4111"), Err(Rejection::Length { len: 4 })));
//! ```

pub mod candidate;
pub mod checksum;
pub mod error;

// Re-exports for convenience
pub use candidate::{digit_len, normalize, SEPARATOR};
pub use checksum::{
    check_digit, inspect, is_valid, luhn_sum, CardNumber, Rejection, MAX_DIGITS, MIN_DIGITS,
};
pub use error::{VerifyError, VerifyResult};
