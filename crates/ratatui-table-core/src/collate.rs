//! Locale-aware string ordering.
//!
//! Approximates the root-locale collation used by browsers' `localeCompare`: letters compare
//! by base letter first, ignoring case and accents; accents break ties next, then case, with
//! lowercase sorting before uppercase.

use std::cmp::Ordering;

/// Compares two strings by base letter, then accent, then case.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_order(a, b))
}

fn primary_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        // Only reached when the lowercased strings are equal, so `ca`/`cb` differ in case.
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => ca.cmp(&cb),
        };
    }
    a.chars().count().cmp(&b.chars().count())
}
