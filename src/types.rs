use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::error::{CommitError, Diagnostic};

// ─── Campaign id format ─────────────────────────────────────────────────────

/// Result of checking a campaign id against `YYYYMMDD_name_XXXX`.
///
/// `error` is empty both on success and on silently rejected blank input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignIdCheck {
    pub valid: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_past_date: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_date: Option<NaiveDate>,
}

impl CampaignIdCheck {
    pub(crate) fn rejected(error: impl Into<String>) -> Self {
        CampaignIdCheck {
            valid: false,
            error: error.into(),
            is_past_date: None,
            campaign_date: None,
        }
    }

    /// True when the id is valid and its embedded date lies before today.
    pub fn is_past(&self) -> bool {
        self.valid && self.is_past_date == Some(true)
    }
}

// ─── Campaign / link pair ───────────────────────────────────────────────────

/// Result of cross-checking the campaign id suffix against the link prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairValidation {
    pub ok: bool,
    pub expected: Option<String>,
    pub found: Option<String>,
}

// ─── Subject normalization ──────────────────────────────────────────────────

/// Output of the KRHRED token normalizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSubject {
    pub text: String,
    /// A bare `KRHRED` with no unit number was found; the text must not be
    /// committed.
    pub missing_detected: bool,
}

// ─── Session views ──────────────────────────────────────────────────────────

/// Snapshot of one editable field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub kind: FieldKind,
    pub value: String,
    pub status: FieldStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// How many tracked attributes carry the current campaign id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceIndicator {
    pub count: usize,
    pub expected: usize,
    pub state: IndicatorState,
}

impl std::fmt::Display for ReferenceIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.count, self.expected)
    }
}

/// Result of a successful commit: the value written plus advisories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub field: FieldKind,
    pub value: String,
    pub warnings: Vec<Diagnostic>,
}

/// Per-field results of [`Session::apply_all`](crate::session::Session::apply_all).
#[derive(Debug)]
pub struct ApplyReport {
    pub campaign_id: Result<CommitOutcome, CommitError>,
    pub subject: Result<CommitOutcome, CommitError>,
    pub link: Result<CommitOutcome, CommitError>,
}

impl ApplyReport {
    pub fn all_ok(&self) -> bool {
        self.campaign_id.is_ok() && self.subject.is_ok() && self.link.is_ok()
    }
}

/// Persistable editor state: raw field values plus the serialized document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub campaign_id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub xml_content: String,
}
