use campaign_config::normalize::{normalize_krhred_tokens, prepare_subject};
use proptest::prelude::*;
use regex::Regex;

/// Loose spellings of a KRHRED token with a one- or two-character unit.
fn arb_loose_token() -> impl Strategy<Value = String> {
    let prefix = prop_oneof![
        Just("krhred_"),
        Just("KRHRED "),
        Just("KRHRED-"),
        Just("krhred_unit_"),
        Just("KRHRED_Unit_"),
        Just("<KRHRED_Unit_"),
        Just("[KRHRED "),
        Just("<%[KRHRED_Unit_"),
    ];
    let suffix = prop_oneof![Just(""), Just("]"), Just(">"), Just("]|%>"), Just("]|>")];
    (prefix, "[0-9oOlI]{1,2}", suffix).prop_map(|(p, unit, s)| format!("{p}{unit}{s}"))
}

/// Plain words that cannot spell the token.
fn arb_word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,8}".prop_filter("no token text", |w| !w.to_lowercase().contains("krhred"))
}

fn arb_subject() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![arb_loose_token(), arb_word()];
    prop::collection::vec(fragment, 0..8).prop_map(|parts| parts.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn normalization_is_idempotent(subject in arb_subject()) {
        let once = normalize_krhred_tokens(&subject);
        let twice = normalize_krhred_tokens(&once.text);
        prop_assert_eq!(&twice.text, &once.text);
        prop_assert!(!twice.missing_detected);
    }

    #[test]
    fn every_token_ends_up_canonical(subject in arb_subject()) {
        let any = Regex::new(r"(?i)krhred").unwrap();
        let canonical = Regex::new(r"<%\[KRHRED_Unit_[0-9]{2}\]\|%>").unwrap();
        let out = normalize_krhred_tokens(&subject);
        prop_assert_eq!(any.find_iter(&out.text).count(), canonical.find_iter(&out.text).count());
    }

    #[test]
    fn token_free_text_is_untouched(text in "[a-zA-Z0-9 ,.!]{0,60}") {
        prop_assume!(!text.to_lowercase().contains("krhred"));
        let out = normalize_krhred_tokens(&text);
        prop_assert_eq!(out.text, text);
        prop_assert!(!out.missing_detected);
    }

    #[test]
    fn prepared_subjects_are_trimmed(subject in arb_subject()) {
        if let Ok(prepared) = prepare_subject(&format!("  {subject}  "), true) {
            prop_assert_eq!(prepared.trim(), prepared.as_str());
            prop_assert!(!prepared.contains("  "));
        }
    }
}
