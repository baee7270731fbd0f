//! Input screen: the create/edit form.

use chrono::{DateTime, Utc};

use super::Notice;
use crate::db::WriteOutcome;
use crate::models::{Location, Record, RecordDraft, RecordId, Timestamp};
use crate::services::RecordStore;
use crate::util::normalize_text_option;

const EDITING_BANNER: &str = "Editing existing record";

/// Field values as the user sees them
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub name: String,
    pub count: i64,
    pub description: String,
    pub image_uri: Option<String>,
    pub location: Option<Location>,
    pub date: DateTime<Utc>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            description: String::new(),
            image_uri: None,
            location: None,
            date: Utc::now(),
        }
    }
}

impl FormState {
    fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone().unwrap_or_default(),
            count: record.count.unwrap_or(0).max(0),
            description: record.description.clone().unwrap_or_default(),
            image_uri: record.image_uri.clone(),
            location: record.location(),
            date: record
                .date
                .as_ref()
                .and_then(Timestamp::to_datetime)
                .unwrap_or_else(Utc::now),
        }
    }

    /// Field set to persist. Blank name and description are stored as NULL;
    /// the image URI is passed through untouched.
    pub fn to_draft(&self) -> RecordDraft {
        let mut draft = RecordDraft {
            name: normalize_text_option(Some(self.name.clone())),
            count: Some(self.count),
            description: normalize_text_option(Some(self.description.clone())),
            image_uri: self.image_uri.clone(),
            date: Some(Timestamp::from_datetime(self.date)),
            ..RecordDraft::default()
        };
        draft.set_location(self.location);
        draft
    }

    /// Stored values with only the fields changed since `baseline.form` applied.
    ///
    /// Untouched fields keep their stored value verbatim: a NULL count stays
    /// NULL, a lone coordinate survives, and the date text is not reformatted.
    fn overlay(&self, baseline: &Baseline) -> RecordDraft {
        let edited = self.to_draft();
        let before = &baseline.form;
        let mut draft = baseline.stored.clone();

        if self.name != before.name {
            draft.name = edited.name;
        }
        if self.count != before.count {
            draft.count = edited.count;
        }
        if self.description != before.description {
            draft.description = edited.description;
        }
        if self.image_uri != before.image_uri {
            draft.image_uri = edited.image_uri;
        }
        if self.location != before.location {
            draft.set_location(self.location);
        }
        if self.date != before.date {
            draft.date = edited.date;
        }
        draft
    }
}

/// The record as prefilled, used to tell edited fields from untouched ones
#[derive(Debug, Clone)]
struct Baseline {
    stored: RecordDraft,
    form: FormState,
}

/// What a save did
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Record),
    Updated(RecordId),
    /// The record being edited was deleted elsewhere; the form is kept
    Missing(RecordId),
    /// The write failed; the form is kept
    Failed,
}

pub struct EditorController {
    store: RecordStore,
    form: FormState,
    editing: Option<RecordId>,
    baseline: Option<Baseline>,
    banner: Option<&'static str>,
    notice: Option<Notice>,
}

impl EditorController {
    /// Blank form dated now
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            form: FormState::default(),
            editing: None,
            baseline: None,
            banner: None,
            notice: None,
        }
    }

    /// Load a record handed over from the table screen for editing
    pub fn prefill(&mut self, record: &Record) {
        tracing::debug!("Prefilling form with record {}", record.id);
        self.form = FormState::from_record(record);
        self.baseline = Some(Baseline {
            stored: record.draft(),
            form: self.form.clone(),
        });
        self.editing = Some(record.id);
        self.banner = Some(EDITING_BANNER);
    }

    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Id of the record being edited, `None` when creating
    pub const fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    pub const fn banner(&self) -> Option<&'static str> {
        self.banner
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    /// Negative values are clamped to zero
    pub fn set_count(&mut self, count: i64) {
        self.form.count = count.max(0);
    }

    pub fn increment_count(&mut self) {
        self.form.count = self.form.count.saturating_add(1);
    }

    pub fn decrement_count(&mut self) {
        self.form.count = (self.form.count - 1).max(0);
    }

    pub fn set_image_uri(&mut self, uri: impl Into<String>) {
        self.form.image_uri = Some(uri.into());
    }

    pub fn set_location(&mut self, location: Location) {
        self.form.location = Some(location);
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.form.date = date;
    }

    pub fn clear_name(&mut self) {
        self.form.name.clear();
    }

    pub fn clear_count(&mut self) {
        self.form.count = 0;
    }

    pub fn clear_description(&mut self) {
        self.form.description.clear();
    }

    pub fn clear_image(&mut self) {
        self.form.image_uri = None;
    }

    pub fn clear_location(&mut self) {
        self.form.location = None;
    }

    /// Move the date to today (UTC), keeping the time of day
    pub fn reset_date_to_today(&mut self) {
        let today = Utc::now().date_naive();
        self.form.date = today.and_time(self.form.date.time()).and_utc();
    }

    /// Move the time of day to now, keeping the date
    pub fn reset_time_to_now(&mut self) {
        let now = Utc::now().time();
        self.form.date = self.form.date.date_naive().and_time(now).and_utc();
    }

    /// Back to a blank create form
    pub fn clear(&mut self) {
        self.form = FormState::default();
        self.editing = None;
        self.baseline = None;
        self.banner = None;
    }

    /// Create or update from the current form.
    ///
    /// An update writes back only the fields changed since `prefill`. On
    /// success the form is cleared. On failure the field values stay so the
    /// user can retry; the outcome is also reported as a notice.
    pub async fn save(&mut self) -> SaveOutcome {
        let draft = match &self.baseline {
            Some(baseline) => self.form.overlay(baseline),
            None => self.form.to_draft(),
        };

        match self.editing {
            Some(id) => match self.store.update(id, &draft).await {
                Ok(WriteOutcome::Applied) => {
                    self.clear();
                    self.notice = Some(Notice::info("Record updated successfully!"));
                    SaveOutcome::Updated(id)
                }
                Ok(WriteOutcome::Missing) => {
                    self.notice = Some(Notice::warning(
                        "That record no longer exists; nothing was updated.",
                    ));
                    SaveOutcome::Missing(id)
                }
                Err(error) => self.save_failed(&error),
            },
            None => match self.store.create(&draft).await {
                Ok(record) => {
                    self.clear();
                    self.notice = Some(Notice::info("Record saved successfully!"));
                    SaveOutcome::Created(record)
                }
                Err(error) => self.save_failed(&error),
            },
        }
    }

    fn save_failed(&mut self, error: &crate::Error) -> SaveOutcome {
        tracing::error!("Error saving record: {error}");
        self.notice = Some(Notice::error("Failed to save the record."));
        SaveOutcome::Failed
    }
}
