//! Map screen: paged markers for records that have a location.

use serde::Serialize;

use super::paged::PagedView;
use super::{FocusHandle, Notice, RefreshOutcome};
use crate::db::PageScope;
use crate::models::{Location, Record, RecordId};
use crate::pagination::{PageBounds, DEFAULT_PAGE_SIZE};
use crate::services::RecordStore;

/// One pin on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: RecordId,
    pub location: Location,
    pub title: String,
    pub subtitle: String,
}

impl MapMarker {
    /// `None` for records without both coordinates
    pub fn from_record(record: &Record) -> Option<Self> {
        let location = record.location()?;
        let name = record
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Unnamed Record");
        let count = record
            .count
            .map_or_else(|| "-".to_string(), |count| count.to_string());
        let description = record.description.as_deref().unwrap_or("-");
        let date = record
            .date
            .as_ref()
            .map_or("unknown", |date| date.as_str());

        Some(Self {
            id: record.id,
            location,
            title: format!("{name} - {count} - {description}"),
            subtitle: format!("Date: {date}"),
        })
    }
}

pub struct MapController {
    view: PagedView,
}

impl MapController {
    pub fn new(store: RecordStore) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(store: RecordStore, page_size: usize) -> Self {
        Self {
            view: PagedView::new(store, PageScope::WithLocation, page_size),
        }
    }

    pub fn focus_handle(&self) -> FocusHandle {
        self.view.focus_handle()
    }

    pub async fn on_focus(&mut self) -> RefreshOutcome {
        self.view.on_focus().await
    }

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

    pub fn markers(&self) -> Vec<MapMarker> {
        self.view
            .rows()
            .iter()
            .filter_map(MapMarker::from_record)
            .collect()
    }

    pub fn rows(&self) -> &[Record] {
        self.view.rows()
    }

    /// Number of located records
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

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.view.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordDraft, Timestamp};
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "multi_thread")]
    async fn only_located_records_become_markers() {
        let store = RecordStore::open_in_memory().unwrap();
        store
            .create(&RecordDraft {
                name: Some("half".to_string()),
                lat: Some(12.0),
                date: Some(Timestamp::from_raw("2030-01-01T00:00:00.000Z")),
                ..RecordDraft::default()
            })
            .await
            .unwrap();
        store
            .create(&RecordDraft {
                name: Some("nowhere".to_string()),
                ..RecordDraft::default()
            })
            .await
            .unwrap();
        store.seed_sample_data().await.unwrap();

        let mut map = MapController::with_page_size(store, 4);
        map.on_focus().await;

        assert_eq!(map.total(), 10);
        assert_eq!(map.bounds().label(), "Showing 1-4 of 10");
        let markers = map.markers();
        assert_eq!(markers.len(), 4);
        assert!(markers.iter().all(|marker| !marker.title.starts_with("half")));
        assert_eq!(markers[0].title, "Peach - 6 - Ripe peaches");
        assert_eq!(markers[0].subtitle, "Date: 2023-10-31T14:00:00.000Z");
        assert_eq!(markers[0].location, Location::new(33.749, -84.388));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn map_pages_stop_at_located_total() {
        let store = RecordStore::open_in_memory().unwrap();
        store.seed_sample_data().await.unwrap();
        for _ in 0..5 {
            store.create(&RecordDraft::default()).await.unwrap();
        }

        let mut map = MapController::with_page_size(store, 5);
        map.on_focus().await;
        assert_eq!(map.next_page().await, Some(RefreshOutcome::Applied));
        assert_eq!(map.markers().len(), 5);
        assert!(map.next_page().await.is_none());
        assert_eq!(map.offset(), 5);
    }

    #[test]
    fn marker_defaults_for_missing_fields() {
        let record = Record::from_draft(
            RecordId::new(1),
            RecordDraft {
                lat: Some(1.0),
                lng: Some(2.0),
                ..RecordDraft::default()
            },
        );
        let marker = MapMarker::from_record(&record).unwrap();
        assert_eq!(marker.title, "Unnamed Record - - - -");
        assert_eq!(marker.subtitle, "Date: unknown");
    }
}
