// Property-based tests for name normalization.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use rostermatch_xref::normalize_name;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// One name-ish token: a word, an initial, or a suffix in any casing.
fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => r"[A-Za-z'\-]{1,10}",
        1 => r"[A-Z]\.",
        1 => prop::sample::select(vec!["Jr", "Jr.", "jr.", "SR", "Sr.", "II", "iii", "IV", ","])
            .prop_map(String::from),
    ]
}

/// Whitespace run: spaces, tabs, newlines.
fn arb_ws() -> impl Strategy<Value = String> {
    r"[ \t\n]{1,3}"
}

/// Tokens joined by arbitrary whitespace, with optional padding.
fn arb_name() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((arb_token(), arb_ws()), 0..6),
        r"[ \t]{0,2}",
    )
        .prop_map(|(parts, pad)| {
            let mut s = pad;
            for (tok, ws) in parts {
                s.push_str(&tok);
                s.push_str(&ws);
            }
            s
        })
}

fn arb_suffix() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Jr", "Jr.", "Sr", "Sr.", "II", "III", "IV", "jr.", "iv"])
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn idempotent(name in arb_name()) {
        let once = normalize_name(&name);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn idempotent_on_any_string(name in any::<String>()) {
        let once = normalize_name(&name);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn case_insensitive(name in arb_name()) {
        prop_assert_eq!(normalize_name(&name.to_uppercase()), normalize_name(&name.to_lowercase()));
    }

    #[test]
    fn whitespace_insensitive(words in prop::collection::vec(r"[a-z]{1,8}", 1..5), ws in arb_ws()) {
        let spaced = format!("  {}  ", words.join(ws.as_str()));
        prop_assert_eq!(normalize_name(&spaced), normalize_name(&words.join(" ")));
    }

    #[test]
    fn suffix_insensitive(
        given in r"[A-Z][a-z]{2,8}",
        surname in r"[A-Z][a-z]{2,8}",
        suffix in arb_suffix(),
    ) {
        let base = format!("{given} {surname}");
        prop_assert_eq!(normalize_name(&format!("{base} {suffix}")), normalize_name(&base));
    }

    #[test]
    fn output_is_lowercase_and_trimmed(name in arb_name()) {
        let norm = normalize_name(&name);
        prop_assert_eq!(norm.trim(), norm.as_str());
        prop_assert!(!norm.contains("  "));
        prop_assert_eq!(norm.to_lowercase(), norm.clone());
    }
}
