//! # Candidate Normalization
//!
//! Raw candidates arrive with hyphens between digit groups
//! (`5333-6195-0371-5702`). Normalization drops the separator and nothing else.

/// Separator character allowed between digit groups
pub const SEPARATOR: char = '-';

/// Remove every separator from a candidate.
///
/// All other characters, digits or not, are kept in their original order.
/// Applying this twice gives the same result as applying it once.
pub fn normalize(candidate: &str) -> String {
    candidate.chars().filter(|&c| c != SEPARATOR).collect()
}

/// Number of characters left in a candidate once separators are removed
pub fn digit_len(candidate: &str) -> usize {
    candidate.chars().filter(|&c| c != SEPARATOR).count()
}
