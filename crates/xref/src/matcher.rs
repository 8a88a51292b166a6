use serde::Serialize;

use crate::normalize::normalize_name;

/// How a lookup resolved against a candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Exact,
    Fuzzy,
    Ambiguous,
    NoMatch,
}

impl MatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Ambiguous => "ambiguous",
            Self::NoMatch => "no_match",
        }
    }
}

/// Candidate keys that plausibly refer to the same person as `name`.
///
/// An exact key match short-circuits and is returned alone. Otherwise a
/// candidate matches when its last token equals the query's surname and its
/// first token starts with the query's given-name initial. Single-token
/// queries never fuzzy-match. All fuzzy candidates are returned, in
/// candidate order; picking one is the caller's decision.
pub fn fuzzy_match<'a, I>(name: &str, candidates: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let norm = normalize_name(name);
    let parts: Vec<&str> = norm.split_whitespace().collect();
    let anchor = if parts.len() >= 2 {
        parts[0].chars().next().map(|initial| (initial, parts[parts.len() - 1]))
    } else {
        None
    };

    let mut fuzzy = Vec::new();
    for candidate in candidates {
        if candidate == norm {
            return vec![candidate];
        }
        let Some((initial, surname)) = anchor else {
            continue;
        };
        let c_parts: Vec<&str> = candidate.split_whitespace().collect();
        if c_parts.len() >= 2
            && c_parts[c_parts.len() - 1] == surname
            && c_parts[0].chars().next() == Some(initial)
        {
            fuzzy.push(candidate);
        }
    }
    fuzzy
}

/// Classify a `fuzzy_match` result for reporting.
pub fn classify(name: &str, matches: &[&str]) -> MatchOutcome {
    match matches {
        [] => MatchOutcome::NoMatch,
        [only] if *only == normalize_name(name) => MatchOutcome::Exact,
        [_] => MatchOutcome::Fuzzy,
        _ => MatchOutcome::Ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn exact_match_short_circuits() {
        let cands = set(&["john smith", "jane smith", "j smith"]);
        let out = fuzzy_match("John Smith Jr.", cands.iter().map(String::as_str));
        assert_eq!(out, vec!["john smith"]);
        assert_eq!(classify("John Smith Jr.", &out), MatchOutcome::Exact);
    }

    #[test]
    fn initial_and_surname_ambiguity_is_surfaced() {
        let cands = set(&["john q smith", "jane q smith"]);
        let out = fuzzy_match("J. Smith", cands.iter().map(String::as_str));
        assert_eq!(out, vec!["jane q smith", "john q smith"]);
        assert_eq!(classify("J. Smith", &out), MatchOutcome::Ambiguous);
    }

    #[test]
    fn single_fuzzy_candidate() {
        let cands = set(&["robert a. lovett", "robert moses"]);
        let out = fuzzy_match("Robert Lovett", cands.iter().map(String::as_str));
        assert_eq!(out, vec!["robert a. lovett"]);
        assert_eq!(classify("Robert Lovett", &out), MatchOutcome::Fuzzy);
    }

    #[test]
    fn single_token_query_never_fuzzy_matches() {
        let cands = set(&["john smith", "jane smith"]);
        let out = fuzzy_match("Smith", cands.iter().map(String::as_str));
        assert!(out.is_empty());
        assert_eq!(classify("Smith", &out), MatchOutcome::NoMatch);
    }

    #[test]
    fn single_token_query_still_matches_exactly() {
        let cands = set(&["cher", "john smith"]);
        let out = fuzzy_match("CHER", cands.iter().map(String::as_str));
        assert_eq!(out, vec!["cher"]);
    }

    #[test]
    fn single_token_candidates_are_ignored() {
        let cands = set(&["smith"]);
        let out = fuzzy_match("John Smith", cands.iter().map(String::as_str));
        assert!(out.is_empty());
    }

    #[test]
    fn different_initial_or_surname_rejected() {
        let cands = set(&["alice lee", "bob lee", "john lees"]);
        let out = fuzzy_match("John Lee", cands.iter().map(String::as_str));
        assert!(out.is_empty());
    }

    #[test]
    fn empty_query() {
        let cands = set(&["john smith"]);
        assert!(fuzzy_match("", cands.iter().map(String::as_str)).is_empty());
    }
}
