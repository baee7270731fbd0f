//! View state shared by the table and map screens.

use super::{FocusHandle, Notice, RefreshOutcome};
use crate::db::PageScope;
use crate::models::Record;
use crate::pagination::{offset_after_delete, PageBounds, PageWindow};
use crate::services::RecordStore;

const LOAD_FAILED: &str = "Failed to load records.";

pub(super) struct PagedView {
    pub(super) store: RecordStore,
    scope: PageScope,
    offset: usize,
    limit: usize,
    rows: Vec<Record>,
    total: usize,
    pub(super) notice: Option<Notice>,
    focus: FocusHandle,
}

impl PagedView {
    pub(super) fn new(store: RecordStore, scope: PageScope, limit: usize) -> Self {
        Self {
            store,
            scope,
            offset: 0,
            limit: limit.max(1),
            rows: Vec::new(),
            total: 0,
            notice: None,
            focus: FocusHandle::default(),
        }
    }

    pub(super) fn focus_handle(&self) -> FocusHandle {
        self.focus.clone()
    }

    pub(super) fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    pub(super) fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub(super) const fn total(&self) -> usize {
        self.total
    }

    pub(super) const fn offset(&self) -> usize {
        self.offset
    }

    pub(super) fn window(&self) -> PageWindow {
        PageWindow::new(self.offset, self.limit, self.total)
    }

    pub(super) fn bounds(&self) -> PageBounds {
        self.window().bounds()
    }

    pub(super) async fn on_focus(&mut self) -> RefreshOutcome {
        self.focus.focus();
        self.refresh().await
    }

    /// Focus and load the page starting at `offset`
    pub(super) async fn on_focus_at(&mut self, offset: usize) -> RefreshOutcome {
        self.offset = offset;
        self.on_focus().await
    }

    /// Re-read total and rows at the current offset as one snapshot.
    pub(super) async fn refresh(&mut self) -> RefreshOutcome {
        let result = self
            .store
            .page_with_total(self.scope, self.limit, self.offset)
            .await;

        if !self.is_focused() {
            tracing::warn!("Discarding {:?} refresh for unfocused screen", self.scope);
            return RefreshOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                self.total = page.total;
                self.rows = page.records;
            }
            Err(error) => {
                tracing::error!("Refresh failed: {error}");
                self.show_load_failure();
            }
        }
        RefreshOutcome::Applied
    }

    /// `None` when there is no next page.
    pub(super) async fn next_page(&mut self) -> Option<RefreshOutcome> {
        let next = self.window().next()?;
        self.offset = next;
        Some(self.refresh().await)
    }

    /// `None` when already on the first page.
    pub(super) async fn previous_page(&mut self) -> Option<RefreshOutcome> {
        if !self.bounds().can_go_previous {
            return None;
        }
        self.offset = self.window().previous();
        Some(self.refresh().await)
    }

    /// Re-count after a delete, step back if the page emptied, then re-read.
    pub(super) async fn refresh_after_delete(&mut self) -> RefreshOutcome {
        let total = match self.scope {
            PageScope::All => self.store.count().await,
            PageScope::WithLocation => self.store.count_with_location().await,
        };

        if !self.is_focused() {
            tracing::warn!("Discarding post-delete refresh for unfocused screen");
            return RefreshOutcome::Discarded;
        }

        match total {
            Ok(total) => {
                let corrected = offset_after_delete(self.offset, self.limit, total);
                if corrected != self.offset {
                    tracing::debug!("Offset corrected from {} to {corrected}", self.offset);
                }
                self.offset = corrected;
                self.refresh().await
            }
            Err(error) => {
                tracing::error!("Count after delete failed: {error}");
                self.show_load_failure();
                RefreshOutcome::Applied
            }
        }
    }

    fn show_load_failure(&mut self) {
        self.rows.clear();
        self.total = 0;
        self.notice = Some(Notice::error(LOAD_FAILED));
    }
}
