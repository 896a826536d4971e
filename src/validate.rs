//! Field validators for campaign ids, links and the campaign/link pair.
//!
//! All validators are synchronous and side-effect free. They return
//! structured results; turning those into UI state is the caller's job.

use crate::config::EditorConfig;
use crate::error::FieldError;
use crate::primitives::{extract_digits_from_campaign_id, extract_digits_from_link};
use crate::types::*;
use chrono::{Days, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static CAMPAIGN_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}_.+_[0-9]{4}$").unwrap());

static LINK_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(http://|https://).+").unwrap());

pub const FORMAT_ERROR: &str = "Format must be: YYYYMMDD_name_XXXX";
pub const DATE_ERROR: &str = "Invalid date (YYYYMMDD)";
pub const LINK_ERROR: &str = "Please enter a valid link starting with http:// or https://";

const MISSING_EXPECTED: &str = "(3–4 digit)";
const MISSING_FOUND: &str = "(?)";

// ─── Campaign id ────────────────────────────────────────────────────────────

/// Validate a campaign id against today's local date with default ranges.
pub fn validate_campaign_id_format(campaign_id: &str) -> CampaignIdCheck {
    validate_campaign_id_format_at(campaign_id, Local::now().date_naive())
}

/// Validate a campaign id against an explicit "today".
///
/// ```
/// use campaign_config::validate::validate_campaign_id_format_at;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let check = validate_campaign_id_format_at("20240101_x_0001", today);
/// assert!(check.valid);
/// assert_eq!(check.is_past_date, Some(true));
/// ```
pub fn validate_campaign_id_format_at(campaign_id: &str, today: NaiveDate) -> CampaignIdCheck {
    validate_campaign_id_with(campaign_id, today, &EditorConfig::default())
}

/// Validate a campaign id using the year range from `config`.
///
/// The day is only range-checked (1–31); an out-of-month day rolls forward
/// into the next month when the date is materialized.
pub fn validate_campaign_id_with(
    campaign_id: &str,
    today: NaiveDate,
    config: &EditorConfig,
) -> CampaignIdCheck {
    if campaign_id.trim().is_empty() {
        return CampaignIdCheck::rejected("");
    }

    if !CAMPAIGN_ID_RE.is_match(campaign_id) {
        return CampaignIdCheck::rejected(FORMAT_ERROR);
    }

    // The regex guarantees eight leading ASCII digits.
    let year: i32 = campaign_id[0..4].parse().unwrap_or(0);
    let month: u32 = campaign_id[4..6].parse().unwrap_or(0);
    let day: u32 = campaign_id[6..8].parse().unwrap_or(0);

    if year < config.year_min
        || year > config.year_max
        || !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
    {
        return CampaignIdCheck::rejected(DATE_ERROR);
    }

    let Some(campaign_date) = rolled_date(year, month, day) else {
        return CampaignIdCheck::rejected(DATE_ERROR);
    };

    CampaignIdCheck {
        valid: true,
        error: String::new(),
        is_past_date: Some(campaign_date < today),
        campaign_date: Some(campaign_date),
    }
}

/// First of the month plus `day - 1` days, so Feb 30 becomes Mar 1 or 2.
fn rolled_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

/// Full gate applied before a campaign id may be committed: non-empty, no
/// whitespace, well-formed.
pub fn check_campaign_id_commit(
    campaign_id: &str,
    today: NaiveDate,
    config: &EditorConfig,
) -> Result<CampaignIdCheck, FieldError> {
    if campaign_id.is_empty() {
        return Err(FieldError::Format {
            message: "Campaign ID cannot be empty.".to_string(),
        });
    }
    if crate::primitives::contains_whitespace(campaign_id) {
        return Err(FieldError::Format {
            message: "Campaign ID cannot contain spaces.".to_string(),
        });
    }
    let check = validate_campaign_id_with(campaign_id, today, config);
    if !check.valid {
        return Err(FieldError::Format {
            message: check.error,
        });
    }
    Ok(check)
}

// ─── Link ───────────────────────────────────────────────────────────────────

/// Check the link scheme and return the value to commit.
///
/// When `downgrade_https` is set, a leading `https://` is rewritten to
/// `http://`. Only the lowercase prefix is rewritten.
pub fn validate_link(link: &str, downgrade_https: bool) -> Result<String, FieldError> {
    if !LINK_SCHEME_RE.is_match(link) {
        return Err(FieldError::InvalidLink {
            message: LINK_ERROR.to_string(),
        });
    }
    match link.strip_prefix("https://") {
        Some(rest) if downgrade_https => Ok(format!("http://{}", rest)),
        _ => Ok(link.to_string()),
    }
}

// ─── Campaign / link pair ───────────────────────────────────────────────────

/// Cross-check the campaign id suffix against the link's leading code.
///
/// Passes vacuously while either field is empty. Suffixes are compared as
/// strings, so `"003"` and `"3"` differ.
pub fn validate_campaign_link_pair(campaign_id: &str, link: &str) -> PairValidation {
    let cid = extract_digits_from_campaign_id(campaign_id);
    let lnk = extract_digits_from_link(link);

    if campaign_id.is_empty() || link.is_empty() {
        return PairValidation {
            ok: true,
            expected: cid,
            found: lnk,
        };
    }

    match (cid, lnk) {
        (Some(expected), Some(found)) => PairValidation {
            ok: expected == found,
            expected: Some(expected),
            found: Some(found),
        },
        (cid, lnk) => PairValidation {
            ok: false,
            expected: Some(cid.unwrap_or_else(|| MISSING_EXPECTED.to_string())),
            found: Some(lnk.unwrap_or_else(|| MISSING_FOUND.to_string())),
        },
    }
}

impl PairValidation {
    /// The mismatch as a field error, if there is one.
    pub fn to_error(&self) -> Option<FieldError> {
        if self.ok {
            return None;
        }
        Some(FieldError::PairMismatch {
            expected: self.expected.clone().unwrap_or_default(),
            found: self.found.clone().unwrap_or_default(),
        })
    }
}
