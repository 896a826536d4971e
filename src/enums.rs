//! Closed enumerations describing editor fields and their states.

use serde::{Deserialize, Serialize};

/// The three editable field groups of a campaign config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    CampaignId,
    Subject,
    Link,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::CampaignId => "campaign_id",
            FieldKind::Subject => "subject",
            FieldKind::Link => "link",
        }
    }
}

/// Lifecycle of a single field group.
///
/// `Empty → Invalid → Valid → Committed`; any edit after a commit moves the
/// field back to `Invalid` or `Valid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Empty,
    Invalid,
    Valid,
    Committed,
}

/// Colour state of the campaign reference counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    /// Freshly loaded, nothing applied yet.
    #[default]
    Default,
    /// Edits applied to the document but not written out.
    Applied,
    /// Document written to its store.
    Saved,
}
