//! Table screen: paged list of all records with view, edit and delete.

use super::paged::PagedView;
use super::{FocusHandle, Notice, RefreshOutcome};
use crate::db::{PageScope, WriteOutcome};
use crate::models::{Record, RecordId};
use crate::pagination::{PageBounds, DEFAULT_PAGE_SIZE};
use crate::services::RecordStore;

pub struct TableController {
    view: PagedView,
    selected: Option<RecordId>,
}

impl TableController {
    pub fn new(store: RecordStore) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(store: RecordStore, page_size: usize) -> Self {
        Self {
            view: PagedView::new(store, PageScope::All, page_size),
            selected: None,
        }
    }

    /// Handle for the navigation layer to blur this screen
    pub fn focus_handle(&self) -> FocusHandle {
        self.view.focus_handle()
    }

    /// Screen became visible: load the current page
    pub async fn on_focus(&mut self) -> RefreshOutcome {
        self.view.on_focus().await
    }

    /// Become visible on a specific page, as when restoring a saved position
    pub async fn on_focus_at(&mut self, offset: usize) -> RefreshOutcome {
        self.view.on_focus_at(offset).await
    }

    pub async fn refresh(&mut self) -> RefreshOutcome {
        self.view.refresh().await
    }

    pub async fn next_page(&mut self) -> Option<RefreshOutcome> {
        self.view.next_page().await
    }

    pub async fn previous_page(&mut self) -> Option<RefreshOutcome> {
        self.view.previous_page().await
    }

    /// Delete a record and reload, stepping back a page if this one emptied.
    ///
    /// Returns `None` when the delete itself failed; the rows on screen are
    /// left as they were and an error notice is set.
    pub async fn delete(&mut self, id: RecordId) -> Option<RefreshOutcome> {
        match self.view.store.delete(id).await {
            Ok(WriteOutcome::Applied) => {}
            Ok(WriteOutcome::Missing) => {
                self.view.notice = Some(Notice::warning("That record no longer exists."));
            }
            Err(error) => {
                tracing::error!("Failed to delete record {id}: {error}");
                self.view.notice = Some(Notice::error("Failed to delete the record."));
                return None;
            }
        }

        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.view.refresh_after_delete().await)
    }

    /// Open the detail view for a row on the current page
    pub fn select(&mut self, id: RecordId) -> Option<&Record> {
        let record = self.view.rows().iter().find(|record| record.id == id)?;
        self.selected = Some(id);
        Some(record)
    }

    pub fn selected(&self) -> Option<&Record> {
        let id = self.selected?;
        self.view.rows().iter().find(|record| record.id == id)
    }

    pub fn close_selection(&mut self) {
        self.selected = None;
    }

    /// Close the detail view and hand its record to the edit form
    pub fn edit_selected(&mut self) -> Option<Record> {
        let record = self.selected().cloned();
        self.selected = None;
        record
    }

    pub fn rows(&self) -> &[Record] {
        self.view.rows()
    }

    pub const fn total(&self) -> usize {
        self.view.total()
    }

    pub const fn offset(&self) -> usize {
        self.view.offset()
    }

    pub fn bounds(&self) -> PageBounds {
        self.view.bounds()
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.view.notice.as_ref()
    }

    /// Hand the pending notice to the UI, clearing it
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.view.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordDraft, Timestamp};
    use crate::screens::NoticeLevel;
    use pretty_assertions::assert_eq;

    async fn store_with(count: usize) -> RecordStore {
        let store = RecordStore::open_in_memory().unwrap();
        for index in 0..count {
            store
                .create(&RecordDraft {
                    name: Some(format!("record-{index:02}")),
                    count: Some(1),
                    date: Some(Timestamp::from_raw(format!(
                        "2024-01-01T00:{index:02}:00.000Z"
                    ))),
                    ..RecordDraft::default()
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn focus_loads_first_page() {
        let store = store_with(12).await;
        let mut table = TableController::with_page_size(store, 5);

        assert_eq!(table.on_focus().await, RefreshOutcome::Applied);
        assert_eq!(table.rows().len(), 5);
        assert_eq!(table.rows()[0].name.as_deref(), Some("record-11"));
        assert_eq!(table.total(), 12);
        assert_eq!(table.bounds().label(), "Showing 1-5 of 12");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn navigation_respects_bounds() {
        let store = store_with(7).await;
        let mut table = TableController::with_page_size(store, 5);
        table.on_focus().await;

        assert!(table.previous_page().await.is_none());
        assert_eq!(table.next_page().await, Some(RefreshOutcome::Applied));
        assert_eq!(table.offset(), 5);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.bounds().upper, 7);
        assert!(table.next_page().await.is_none());

        assert_eq!(table.previous_page().await, Some(RefreshOutcome::Applied));
        assert_eq!(table.offset(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_only_row_on_last_page_steps_back() {
        let store = store_with(11).await;
        let mut table = TableController::with_page_size(store, 10);
        table.on_focus().await;
        table.next_page().await;
        assert_eq!(table.offset(), 10);
        assert_eq!(table.rows().len(), 1);

        let last = table.rows()[0].id;
        assert_eq!(table.delete(last).await, Some(RefreshOutcome::Applied));

        assert_eq!(table.total(), 10);
        assert_eq!(table.offset(), 0);
        assert_eq!(table.rows().len(), 10);
        assert!(table.notice().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn focus_at_offset_then_delete_last_row() {
        let store = store_with(21).await;
        let mut table = TableController::with_page_size(store, 10);
        assert_eq!(table.on_focus_at(20).await, RefreshOutcome::Applied);
        assert_eq!(table.bounds().label(), "Showing 21-21 of 21");

        let oldest = table.rows()[0].id;
        table.delete(oldest).await;
        assert_eq!(table.offset(), 10);
        assert_eq!(table.bounds().label(), "Showing 11-20 of 20");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_inside_page_keeps_offset() {
        let store = store_with(12).await;
        let mut table = TableController::with_page_size(store, 5);
        table.on_focus().await;
        table.next_page().await;

        let victim = table.rows()[2].id;
        table.delete(victim).await;

        assert_eq!(table.offset(), 5);
        assert_eq!(table.total(), 11);
        assert!(table.rows().iter().all(|record| record.id != victim));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_missing_record_warns() {
        let store = store_with(2).await;
        let mut table = TableController::new(store);
        table.on_focus().await;

        table.delete(RecordId::new(9_999)).await;
        assert_eq!(table.take_notice().unwrap().level, NoticeLevel::Warning);
        assert_eq!(table.rows().len(), 2);
        assert!(table.notice().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_failure_keeps_rows_and_sets_error() {
        let store = store_with(3).await;
        let mut table = TableController::new(store.clone());
        table.on_focus().await;

        store
            .lock_for_test()
            .await
            .connection()
            .execute_batch("DROP TABLE records")
            .unwrap();

        let first = table.rows()[0].id;
        assert!(table.delete(first).await.is_none());
        assert_eq!(table.rows().len(), 3);
        assert!(table.notice().unwrap().is_error());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn read_failure_shows_empty_list_and_notice() {
        let store = store_with(3).await;
        let mut table = TableController::new(store.clone());
        table.on_focus().await;
        assert_eq!(table.rows().len(), 3);

        store
            .lock_for_test()
            .await
            .connection()
            .execute_batch("DROP TABLE records")
            .unwrap();

        assert_eq!(table.refresh().await, RefreshOutcome::Applied);
        assert!(table.rows().is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.notice().unwrap().message, "Failed to load records.");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn blurred_screen_discards_in_flight_refresh() {
        let store = store_with(4).await;
        let mut table = TableController::new(store.clone());
        table.on_focus().await;
        store
            .create(&RecordDraft {
                name: Some("late".to_string()),
                ..RecordDraft::default()
            })
            .await
            .unwrap();

        let focus = table.focus_handle();
        let guard = store.lock_for_test().await;
        let task = tokio::spawn(async move {
            let outcome = table.refresh().await;
            (table, outcome)
        });
        tokio::task::yield_now().await;
        focus.blur();
        drop(guard);

        let (table, outcome) = task.await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Discarded);
        assert_eq!(table.total(), 4);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn select_and_hand_off_to_editor() {
        let store = store_with(3).await;
        let mut table = TableController::new(store);
        table.on_focus().await;

        let id = table.rows()[1].id;
        assert_eq!(table.select(id).map(|record| record.id), Some(id));
        assert_eq!(table.selected().map(|record| record.id), Some(id));

        let handed = table.edit_selected().unwrap();
        assert_eq!(handed.id, id);
        assert!(table.selected().is_none());

        assert!(table.select(RecordId::new(12_345)).is_none());
    }
}
