//! Editing session: field state machines and commits into the document.
//!
//! A [`Session`] owns the loaded [`ConfigDocument`] and the raw values of the
//! three editable fields. Edits only update field state; the document is
//! mutated exclusively by the `commit_*` operations, and only after the value
//! passed validation. A rejected commit leaves the document untouched.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::document::{ConfigDocument, MESSAGE_BODY, MESSAGE_CONTENT};
use crate::enums::*;
use crate::error::*;
use crate::normalize::prepare_subject;
use crate::parse::parse;
use crate::primitives::contains_whitespace;
use crate::serialize::serialize_pretty;
use crate::store::TextStore;
use crate::types::*;
use crate::validate::{
    check_campaign_id_commit, validate_campaign_id_with, validate_campaign_link_pair,
    validate_link,
};

#[derive(Clone, Debug)]
struct FieldState {
    value: String,
    status: FieldStatus,
    error: Option<String>,
}

impl FieldState {
    fn empty() -> Self {
        FieldState {
            value: String::new(),
            status: FieldStatus::Empty,
            error: None,
        }
    }

    fn set(&mut self, status: FieldStatus, error: Option<String>) {
        self.status = status;
        self.error = error;
    }
}

/// One open campaign config plus the editor fields bound to it.
#[derive(Clone, Debug)]
pub struct Session {
    config: EditorConfig,
    document: Option<ConfigDocument>,
    /// Campaign id the document currently carries; the rename source on the
    /// next campaign id commit.
    current_campaign_id: String,
    campaign_id: FieldState,
    subject: FieldState,
    link: FieldState,
    pair: PairValidation,
    indicator: IndicatorState,
    baseline: Option<SessionState>,
    today: Option<NaiveDate>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(EditorConfig::default())
    }
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Session {
            config,
            document: None,
            current_campaign_id: String::new(),
            campaign_id: FieldState::empty(),
            subject: FieldState::empty(),
            link: FieldState::empty(),
            pair: PairValidation {
                ok: true,
                expected: None,
                found: None,
            },
            indicator: IndicatorState::Default,
            baseline: None,
            today: None,
        }
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&ConfigDocument> {
        self.document.as_ref()
    }

    pub fn current_campaign_id(&self) -> &str {
        &self.current_campaign_id
    }

    pub fn indicator_state(&self) -> IndicatorState {
        self.indicator
    }

    // ─── Load / clear ───────────────────────────────────────────────────────

    /// Replace the document with one parsed from `text`.
    ///
    /// Blank text clears the session. On a parse error the session is
    /// cleared as well and the error is returned.
    pub fn load_text(&mut self, text: &str) -> Result<(), ParseError> {
        if text.trim().is_empty() {
            self.clear();
            return Ok(());
        }
        match parse(text) {
            Ok(doc) => {
                self.attach(doc);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "XML parse error on load; session cleared");
                self.clear();
                Err(e)
            }
        }
    }

    /// Bind an already parsed document, filling the fields from it.
    pub fn attach(&mut self, doc: ConfigDocument) {
        let campaign_id = doc.campaign_id();
        let subject = doc.subject();
        let link = doc.link();
        self.document = Some(doc);
        self.current_campaign_id = campaign_id.clone();
        self.indicator = IndicatorState::Default;
        self.edit_campaign_id(&campaign_id);
        self.edit_subject(&subject);
        self.edit_link(&link);
        self.baseline = Some(self.snapshot());
        info!(campaign_id = %self.current_campaign_id, "config loaded");
    }

    /// Read `handle` from `store` and load it.
    pub fn load(&mut self, store: &impl TextStore, handle: &str) -> Result<(), LoadError> {
        let text = store.load_text(handle).map_err(LoadError::Store)?;
        self.load_text(&text).map_err(LoadError::Parse)
    }

    /// Drop the document and reset every field.
    pub fn clear(&mut self) {
        self.document = None;
        self.current_campaign_id.clear();
        self.campaign_id = FieldState::empty();
        self.subject = FieldState::empty();
        self.link = FieldState::empty();
        self.indicator = IndicatorState::Default;
        self.baseline = None;
        self.refresh_pair();
        debug!("session cleared");
    }

    // ─── Edits ──────────────────────────────────────────────────────────────

    /// Record a keystroke in the campaign id field.
    ///
    /// Whitespace anywhere or a failed format check marks the field invalid;
    /// a past date does not.
    pub fn edit_campaign_id(&mut self, value: &str) -> CampaignIdCheck {
        self.campaign_id.value = value.to_string();
        let trimmed = value.trim();
        let check = validate_campaign_id_with(trimmed, self.today(), &self.config);

        if trimmed.is_empty() {
            self.campaign_id.set(FieldStatus::Empty, None);
        } else if contains_whitespace(trimmed) {
            self.campaign_id.set(
                FieldStatus::Invalid,
                Some("Campaign ID cannot contain spaces.".to_string()),
            );
        } else if !check.valid {
            self.campaign_id
                .set(FieldStatus::Invalid, Some(check.error.clone()));
        } else {
            self.campaign_id.set(FieldStatus::Valid, None);
        }
        self.refresh_pair();
        check
    }

    /// Record a keystroke in the subject field. Normalization waits for
    /// [`commit_subject`](Self::commit_subject).
    pub fn edit_subject(&mut self, value: &str) {
        self.subject.value = value.to_string();
        if value.trim().is_empty() {
            self.subject.set(FieldStatus::Empty, None);
        } else {
            self.subject.set(FieldStatus::Valid, None);
        }
    }

    /// Record a keystroke in the link field.
    pub fn edit_link(&mut self, value: &str) -> PairValidation {
        self.link.value = value.to_string();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.link.set(FieldStatus::Empty, None);
        } else {
            match validate_link(trimmed, self.config.downgrade_https) {
                Ok(_) => self.link.set(FieldStatus::Valid, None),
                Err(e) => self.link.set(FieldStatus::Invalid, Some(e.to_string())),
            }
        }
        self.refresh_pair();
        self.pair.clone()
    }

    fn refresh_pair(&mut self) {
        self.pair =
            validate_campaign_link_pair(self.campaign_id.value.trim(), self.link.value.trim());
        if !self.pair.ok {
            debug!(
                expected = ?self.pair.expected,
                found = ?self.pair.found,
                "campaign id / link mismatch"
            );
        }
    }

    // ─── Views ──────────────────────────────────────────────────────────────

    /// Latest campaign/link cross-check.
    pub fn pair(&self) -> &PairValidation {
        &self.pair
    }

    /// The shared mismatch warning, if the pair currently disagrees.
    pub fn mismatch(&self) -> Option<FieldError> {
        self.pair.to_error()
    }

    /// Status of a field ignoring the cross-field check.
    pub fn local_status(&self, kind: FieldKind) -> FieldStatus {
        self.state(kind).status
    }

    /// Field as the UI should show it. While the pair mismatches, both the
    /// campaign id and the link report `Invalid`.
    pub fn field(&self, kind: FieldKind) -> FieldView {
        let state = self.state(kind);
        let paired = matches!(kind, FieldKind::CampaignId | FieldKind::Link);
        match self.mismatch() {
            Some(mismatch) if paired && state.status != FieldStatus::Empty => FieldView {
                kind,
                value: state.value.clone(),
                status: FieldStatus::Invalid,
                error: state.error.clone().or_else(|| Some(mismatch.to_string())),
            },
            _ => FieldView {
                kind,
                value: state.value.clone(),
                status: state.status,
                error: state.error.clone(),
            },
        }
    }

    fn state(&self, kind: FieldKind) -> &FieldState {
        match kind {
            FieldKind::CampaignId => &self.campaign_id,
            FieldKind::Subject => &self.subject,
            FieldKind::Link => &self.link,
        }
    }

    /// Whether the subject commit action should be enabled.
    pub fn can_commit_subject(&self) -> bool {
        self.document.is_some() && !self.subject.value.trim().is_empty()
    }

    /// Tracked attributes carrying the campaign id in the field.
    pub fn reference_indicator(&self) -> ReferenceIndicator {
        let count = self
            .document
            .as_ref()
            .map_or(0, |doc| doc.count_references(self.campaign_id.value.trim()));
        ReferenceIndicator {
            count,
            expected: self.config.expected_references,
            state: self.indicator,
        }
    }

    // ─── Commits ────────────────────────────────────────────────────────────

    /// Write the campaign id into the document.
    ///
    /// Every tracked attribute equal to the previous id is renamed. When the
    /// document had no id yet, the first `AudienceModel` and `Campaign` are
    /// stamped instead.
    pub fn commit_campaign_id(&mut self) -> Result<CommitOutcome, CommitError> {
        if self.document.is_none() {
            return Err(CommitError::NoDocument);
        }
        let new_id = self.campaign_id.value.trim().to_string();
        let check = match check_campaign_id_commit(&new_id, self.today(), &self.config) {
            Ok(check) => check,
            Err(e) => {
                self.campaign_id
                    .set(FieldStatus::Invalid, Some(e.to_string()));
                return Err(e.into());
            }
        };

        let mut warnings = Vec::new();
        if let (true, Some(date)) = (check.is_past(), check.campaign_date) {
            warnings.push(Diagnostic::info(
                "past_date",
                FieldKind::CampaignId.as_str(),
                format!("campaign date ({}) is already in the past", date.format("%d/%m/%Y")),
            ));
        }

        let old_id = self.current_campaign_id.clone();
        let Some(doc) = self.document.as_mut() else {
            return Err(CommitError::NoDocument);
        };
        let written = if old_id.is_empty() {
            doc.seed_campaign_id(&new_id)
        } else {
            doc.rename_references(&old_id, &new_id)
        };
        info!(old = %old_id, new = %new_id, written, "campaign id committed");

        self.current_campaign_id = new_id.clone();
        self.campaign_id.value = new_id.clone();
        self.campaign_id.set(FieldStatus::Committed, None);
        self.indicator = IndicatorState::Applied;
        self.refresh_pair();
        self.push_mismatch_warning(&mut warnings);

        Ok(CommitOutcome {
            field: FieldKind::CampaignId,
            value: new_id,
            warnings,
        })
    }

    /// Normalize the subject and write it to `MessageContent@subject`.
    pub fn commit_subject(&mut self) -> Result<CommitOutcome, CommitError> {
        let Some(doc) = self.document.as_ref() else {
            return Err(CommitError::NoDocument);
        };
        if doc.find(MESSAGE_CONTENT).is_none() {
            return Err(CommitError::MissingElement(MESSAGE_CONTENT.to_string()));
        }

        let subject = match prepare_subject(
            &self.subject.value,
            self.config.collapse_subject_whitespace,
        ) {
            Ok(s) => s,
            Err(e) => {
                self.subject.set(FieldStatus::Invalid, Some(e.to_string()));
                return Err(e.into());
            }
        };

        if let Some(content) = self.document.as_mut().and_then(|d| d.find_mut(MESSAGE_CONTENT)) {
            content.set_attr("subject", subject.as_str());
        }
        info!(subject = %subject, "subject committed");

        self.subject.value = subject.clone();
        self.subject.set(FieldStatus::Committed, None);
        self.indicator = IndicatorState::Applied;

        Ok(CommitOutcome {
            field: FieldKind::Subject,
            value: subject,
            warnings: Vec::new(),
        })
    }

    /// Write the link to `MessageBody@content`, downgrading `https://` when
    /// configured. A pair mismatch is reported as a warning, not a failure.
    pub fn commit_link(&mut self) -> Result<CommitOutcome, CommitError> {
        let Some(doc) = self.document.as_ref() else {
            return Err(CommitError::NoDocument);
        };
        if doc.find(MESSAGE_BODY).is_none() {
            return Err(CommitError::MissingElement(MESSAGE_BODY.to_string()));
        }

        let link = match validate_link(self.link.value.trim(), self.config.downgrade_https) {
            Ok(link) => link,
            Err(e) => {
                self.link.set(FieldStatus::Invalid, Some(e.to_string()));
                return Err(e.into());
            }
        };

        if let Some(body) = self.document.as_mut().and_then(|d| d.find_mut(MESSAGE_BODY)) {
            body.set_attr("content", link.as_str());
        }
        info!(link = %link, "link committed");

        self.link.value = link.clone();
        self.link.set(FieldStatus::Committed, None);
        self.indicator = IndicatorState::Applied;
        self.refresh_pair();

        let mut warnings = Vec::new();
        self.push_mismatch_warning(&mut warnings);
        Ok(CommitOutcome {
            field: FieldKind::Link,
            value: link,
            warnings,
        })
    }

    fn push_mismatch_warning(&self, warnings: &mut Vec<Diagnostic>) {
        if let Some(mismatch) = self.mismatch() {
            warnings.push(Diagnostic::warning(
                "pair_mismatch",
                "campaign_id,link",
                mismatch.to_string(),
            ));
        }
    }

    /// Commit campaign id, subject and link in that order.
    ///
    /// Each commit is independent: a rejected field does not stop the
    /// others.
    pub fn apply_all(&mut self) -> ApplyReport {
        if self.document.is_none() {
            return ApplyReport {
                campaign_id: Err(CommitError::NoDocument),
                subject: Err(CommitError::NoDocument),
                link: Err(CommitError::NoDocument),
            };
        }
        let report = ApplyReport {
            campaign_id: self.commit_campaign_id(),
            subject: self.commit_subject(),
            link: self.commit_link(),
        };
        self.indicator = IndicatorState::Applied;
        report
    }

    // ─── Save / snapshot ────────────────────────────────────────────────────

    /// Pretty-printed document text, or empty when nothing is loaded.
    pub fn xml_text(&self) -> Result<String, SerializeError> {
        match &self.document {
            Some(doc) => serialize_pretty(doc),
            None => Ok(String::new()),
        }
    }

    /// Write the document to `store` under `handle`.
    pub fn save(&mut self, store: &mut impl TextStore, handle: &str) -> Result<(), SaveError> {
        if self.document.is_none() {
            return Err(SaveError::NoDocument);
        }
        let text = self.xml_text().map_err(SaveError::Serialize)?;
        store.save_text(handle, &text).map_err(SaveError::Store)?;
        self.baseline = Some(self.snapshot());
        self.indicator = IndicatorState::Saved;
        info!(handle, bytes = text.len(), "config saved");
        Ok(())
    }

    /// Raw field values and document text.
    pub fn snapshot(&self) -> SessionState {
        SessionState {
            campaign_id: self.campaign_id.value.clone(),
            subject: self.subject.value.clone(),
            link: self.link.value.clone(),
            xml_content: self.xml_text().unwrap_or_default(),
        }
    }

    /// True when fields or document differ from the last load or save.
    pub fn has_unsaved_changes(&self) -> bool {
        match &self.baseline {
            Some(baseline) => *baseline != self.snapshot(),
            None => false,
        }
    }

    /// Reload a snapshot: parse its XML, then overlay the raw field values.
    pub fn restore(&mut self, state: &SessionState) -> Result<(), ParseError> {
        self.load_text(&state.xml_content)?;
        if self.document.is_some() {
            self.edit_campaign_id(&state.campaign_id);
            self.edit_subject(&state.subject);
            self.edit_link(&state.link);
        }
        Ok(())
    }
}

impl SessionState {
    pub fn to_json(&self) -> Result<String, SerializeError> {
        serde_json::to_string(self).map_err(|e| SerializeError {
            message: format!("failed to serialize session state: {}", e),
        })
    }

    pub fn from_json(input: &str) -> Result<SessionState, ParseError> {
        serde_json::from_str(input).map_err(|e| ParseError {
            kind: ParseErrorKind::Syntax,
            message: format!("invalid session state: {}", e),
            line: Some(e.line()),
            column: Some(e.column()),
        })
    }
}
