//! Canonical name keys.
//!
//! A key is the lower-cased, suffix-stripped, whitespace-collapsed form of a
//! person's name. Two raw names refer to the same identity for overlap
//! purposes iff their keys are equal.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing generational suffix with any whitespace before it. No word
/// boundary: "Aviv" loses its "iv" just as "Smith IV" does.
static SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:jr\.?|sr\.?|iii|ii|iv)\s*$").expect("suffix pattern is valid")
});

/// Normalize a raw name into its canonical key.
///
/// Never fails: empty or junk input degrades to an empty or partially
/// normalized string.
pub fn normalize_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Repeat until stable so the key is idempotent ("Aviv Jr" -> "Aviv" -> "Av").
    let mut name = raw;
    while let Some(m) = SUFFIX.find(name) {
        name = &name[..m.start()];
    }

    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display rendering of a key: first character of each token upper-cased.
pub fn title_case(key: &str) -> String {
    key.split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
