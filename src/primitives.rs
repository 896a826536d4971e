//! Digit extraction primitives shared by the validators and the session.
//!
//! Both extractors are pure: the same input always yields the same output.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static CAMPAIGN_SUFFIX_4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([0-9]{4})$").unwrap());

static CAMPAIGN_SUFFIX_3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([0-9]{3})$").unwrap());

// The trailing class stands in for a "non-word, `_` or `-`" lookahead: the
// capture group is all that is returned, so consuming the boundary is harmless.
static LINK_PREFIX_4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})[^A-Za-z0-9]").unwrap());

static LINK_PREFIX_3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{3})[^A-Za-z0-9]").unwrap());

/// Returns the trailing `_XXXX` group of a campaign id, or the trailing
/// `_XXX` group when there is no four-digit one.
///
/// ```
/// use campaign_config::primitives::extract_digits_from_campaign_id;
///
/// assert_eq!(extract_digits_from_campaign_id("20240101_promo_0042").as_deref(), Some("0042"));
/// assert_eq!(extract_digits_from_campaign_id("20240101_promo_42"), None);
/// ```
pub fn extract_digits_from_campaign_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return None;
    }
    CAMPAIGN_SUFFIX_4_RE
        .captures(id)
        .or_else(|| CAMPAIGN_SUFFIX_3_RE.captures(id))
        .map(|caps| caps[1].to_string())
}

/// Returns the 4- (or else 3-) digit code that opens the last path segment
/// of a link.
///
/// The digits must be followed by a separator; a segment that is only digits
/// yields `None`. Strings that do not parse as absolute URLs are split on `/`
/// as-is.
pub fn extract_digits_from_link(link: &str) -> Option<String> {
    if link.is_empty() {
        return None;
    }
    let last = last_path_segment(link)?;
    LINK_PREFIX_4_RE
        .captures(&last)
        .or_else(|| LINK_PREFIX_3_RE.captures(&last))
        .map(|caps| caps[1].to_string())
}

/// Last non-empty path segment of `link`.
pub(crate) fn last_path_segment(link: &str) -> Option<String> {
    match Url::parse(link) {
        Ok(url) => url
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .next_back()
            .map(str::to_string),
        Err(_) => link
            .split('/')
            .filter(|s| !s.is_empty())
            .next_back()
            .map(str::to_string),
    }
}

/// True if `s` contains any whitespace character.
pub fn contains_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Collapses every run of two or more whitespace characters to one space.
pub fn collapse_whitespace(s: &str) -> String {
    static RUNS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());
    RUNS_RE.replace_all(s, " ").into_owned()
}
