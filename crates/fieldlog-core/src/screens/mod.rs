//! Screen controllers
//!
//! Each controller owns one screen's view state (offset, rows, form fields)
//! and talks to the [`RecordStore`](crate::services::RecordStore). They are
//! the boundary where storage errors become [`Notice`]s; nothing past a
//! controller sees an [`Error`](crate::Error) from a read or write.
//!
//! Every call that awaits the store takes `&mut self`, so a screen cannot
//! start a second save or delete while its previous refresh is in flight.
//! A [`FocusHandle`] lets the navigation layer mark a screen as gone; any
//! refresh that resolves afterwards is discarded instead of applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

mod editor;
mod map;
mod paged;
mod settings;
mod table;

pub use editor::{EditorController, FormState, SaveOutcome};
pub use map::{MapController, MapMarker};
pub use settings::{Confirmation, SettingsController};
pub use table::TableController;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user, produced when an action completes or fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self.level, NoticeLevel::Error)
    }
}

/// Shared liveness flag for one screen.
///
/// Clones observe the same flag. A fresh handle starts unfocused; screens
/// become focused through their `on_focus` call.
#[derive(Debug, Clone, Default)]
pub struct FocusHandle(Arc<AtomicBool>);

impl FocusHandle {
    pub fn focus(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Mark the screen as left; in-flight refreshes will be dropped
    pub fn blur(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_focused(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Whether a refresh updated the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// The screen lost focus before the reads resolved
    Discarded,
}
