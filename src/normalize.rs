//! KRHRED placeholder normalization for subject lines.
//!
//! The canonical token is `<%[KRHRED_Unit_NN]|%>`. Marketing copy tends to
//! arrive with the brackets, separators or unit number mangled (often by
//! OCR), so the normalizer accepts loose spellings and rewrites them.
//!
//! This is idempotent: `normalize(normalize(x).text).text == normalize(x).text`.

use crate::error::FieldError;
use crate::primitives::collapse_whitespace;
use crate::types::NormalizedSubject;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static KRHRED_ANY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)krhred").unwrap());

static KRHRED_LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\s*)<?%?\s*\[?\s*KRHRED(?:_Unit)?[_\s-]*([0-9oOlLiI]{1,2})\s*\]?\s*\|?\s*%?>?")
        .unwrap()
});

// ASCII boundaries: a token touching a non-ASCII letter still counts as bare.
static KRHRED_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?-u:\b)KRHRED(?-u:\b)").unwrap());

static UNIT_FOLLOWS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[_\s-]*[0-9oOlLiI]").unwrap());

static ANGLE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*KRHRED_Unit_([0-9]{2})\s*>").unwrap());

static PARTIAL_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<%\s*\[?\s*KRHRED_Unit_([0-9]{2})\]?\s*\|?\s*%?>?").unwrap()
});

const CANONICAL_REPLACEMENT: &str = "<%[KRHRED_Unit_${1}]|%>";

/// Canonical token for a two-digit unit.
pub fn canonical_token(unit: &str) -> String {
    format!("<%[KRHRED_Unit_{}]|%>", unit)
}

/// Rewrite every recognizable KRHRED token in `text` to canonical form.
///
/// `missing_detected` is set when a whole-word `KRHRED` carries no unit
/// number at all; such text must not be committed.
///
/// ```
/// use campaign_config::normalize::normalize_krhred_tokens;
///
/// let out = normalize_krhred_tokens("Hi <krhred_unit_5>");
/// assert_eq!(out.text, "Hi <%[KRHRED_Unit_05]|%>");
/// assert!(!out.missing_detected);
/// ```
pub fn normalize_krhred_tokens(text: &str) -> NormalizedSubject {
    if text.is_empty() || !KRHRED_ANY_RE.is_match(text) {
        return NormalizedSubject {
            text: text.to_string(),
            missing_detected: false,
        };
    }

    let missing_detected = has_bare_token(text);

    let replaced = KRHRED_LOOSE_RE.replace_all(text, |caps: &Captures| {
        format!("{}{}", &caps[1], canonical_token(&repair_unit_digits(&caps[2])))
    });

    let completed = ANGLE_TOKEN_RE.replace_all(&replaced, CANONICAL_REPLACEMENT);
    let completed = PARTIAL_TOKEN_RE.replace_all(&completed, CANONICAL_REPLACEMENT);

    NormalizedSubject {
        text: completed.into_owned(),
        missing_detected,
    }
}

/// True if some whole-word `KRHRED` is not followed by a unit number.
fn has_bare_token(text: &str) -> bool {
    KRHRED_WORD_RE
        .find_iter(text)
        .any(|m| !UNIT_FOLLOWS_RE.is_match(&text[m.end()..]))
}

/// Map OCR look-alikes to digits, keep digits only, pad or cut to two.
fn repair_unit_digits(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .map(|c| match c {
            'o' | 'O' => '0',
            'l' | 'L' | 'i' | 'I' => '1',
            other => other,
        })
        .filter(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return "00".to_string();
    }
    let padded = format!("{:0>2}", digits);
    padded[padded.len() - 2..].to_string()
}

/// Prepare raw subject input for commit.
///
/// Optionally collapses whitespace runs, trims, normalizes tokens and trims
/// again. Fails when a bare token was found or nothing is left.
pub fn prepare_subject(raw: &str, collapse: bool) -> Result<String, FieldError> {
    let cleaned = if collapse {
        collapse_whitespace(raw)
    } else {
        raw.to_string()
    };

    let result = normalize_krhred_tokens(cleaned.trim());
    if result.missing_detected {
        return Err(FieldError::TokenNormalization {
            message: "subject contains a KRHRED token without a unit number".to_string(),
        });
    }

    let normalized = result.text.trim();
    if normalized.is_empty() {
        return Err(FieldError::TokenNormalization {
            message: "subject is empty".to_string(),
        });
    }
    Ok(normalized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_token_is_untouched() {
        let out = normalize_krhred_tokens("  Big   sale today ");
        assert_eq!(out.text, "  Big   sale today ");
        assert!(!out.missing_detected);
    }

    #[test]
    fn loose_spellings_are_canonicalized() {
        let cases = [
            ("krhred_5", "<%[KRHRED_Unit_05]|%>"),
            ("KRHRED_Unit-12", "<%[KRHRED_Unit_12]|%>"),
            ("krhred 1o", "<%[KRHRED_Unit_10]|%>"),
            ("<KRHRED_Unit_39>", "<%[KRHRED_Unit_39]|%>"),
            ("<%[KRHRED_Unit_07]|>", "<%[KRHRED_Unit_07]|%>"),
            ("<%[KRHRED_Unit_07]", "<%[KRHRED_Unit_07]|%>"),
            ("[KRHRED 4]", "<%[KRHRED_Unit_04]|%>"),
            ("<%[KRHRED_Unit_07]|%>", "<%[KRHRED_Unit_07]|%>"),
        ];
        for (input, expected) in cases {
            let out = normalize_krhred_tokens(input);
            assert_eq!(out.text, expected, "input: {input}");
            assert!(!out.missing_detected, "input: {input}");
        }
    }

    #[test]
    fn ocr_confusions_become_digits() {
        assert_eq!(repair_unit_digits("O7"), "07");
        assert_eq!(repair_unit_digits("lO"), "10");
        assert_eq!(repair_unit_digits("I"), "01");
        assert_eq!(repair_unit_digits("Li"), "11");
        assert_eq!(
            normalize_krhred_tokens("krhred_unit_O7").text,
            "<%[KRHRED_Unit_07]|%>"
        );
    }

    #[test]
    fn leading_whitespace_is_preserved() {
        let out = normalize_krhred_tokens("Hello  krhred_3 friend");
        assert_eq!(out.text, "Hello  <%[KRHRED_Unit_03]|%>friend");
    }

    #[test]
    fn bare_token_is_flagged() {
        assert!(normalize_krhred_tokens("Hi KRHRED").missing_detected);
        assert!(normalize_krhred_tokens("Hi krhred, welcome").missing_detected);
        assert!(normalize_krhred_tokens("KRHRED-x and krhred_4").missing_detected);
        assert!(!normalize_krhred_tokens("KRHRED 4").missing_detected);
    }

    #[test]
    fn bare_token_next_to_non_ascii_is_flagged() {
        for input in ["Hi KRHREDé", "éKRHRED hi", "您好KRHRED"] {
            assert!(normalize_krhred_tokens(input).missing_detected, "input: {input}");
            assert!(prepare_subject(input, true).is_err(), "input: {input}");
        }
        assert!(!normalize_krhred_tokens("您好KRHRED_Unit_05").missing_detected);
    }

    #[test]
    fn prepare_subject_collapses_and_trims() {
        assert_eq!(
            prepare_subject("  Hi   krhred_5 ,  deal ", true).unwrap(),
            "Hi <%[KRHRED_Unit_05]|%>, deal"
        );
        assert_eq!(prepare_subject("a  b", false).unwrap(), "a  b");
    }

    #[test]
    fn prepare_subject_rejects_bare_and_empty() {
        assert!(matches!(
            prepare_subject("Hi KRHRED", true),
            Err(FieldError::TokenNormalization { .. })
        ));
        assert!(matches!(
            prepare_subject("   ", true),
            Err(FieldError::TokenNormalization { .. })
        ));
    }
}
