//! Sample records for demos and manual testing

use crate::models::{RecordDraft, Timestamp};

struct SampleRecord {
    name: &'static str,
    count: i64,
    description: &'static str,
    lat: f64,
    lng: f64,
    date: &'static str,
}

const SAMPLE_RECORDS: [SampleRecord; 10] = [
    SampleRecord {
        name: "Apple",
        count: 5,
        description: "Fresh red apples",
        lat: 34.0522,
        lng: -118.2437,
        date: "2023-10-27T10:00:00.000Z",
    },
    SampleRecord {
        name: "Banana",
        count: 10,
        description: "Ripe yellow bananas",
        lat: 36.7783,
        lng: -119.4179,
        date: "2023-10-27T10:05:00.000Z",
    },
    SampleRecord {
        name: "Orange",
        count: 8,
        description: "Juicy oranges",
        lat: 38.5816,
        lng: -121.4944,
        date: "2023-10-27T10:10:00.000Z",
    },
    SampleRecord {
        name: "Grapes",
        count: 25,
        description: "Sweet green grapes",
        lat: 35.3733,
        lng: -119.0187,
        date: "2023-10-28T11:00:00.000Z",
    },
    SampleRecord {
        name: "Strawberry",
        count: 50,
        description: "Organic strawberries",
        lat: 33.6846,
        lng: -117.8265,
        date: "2023-10-28T11:05:00.000Z",
    },
    SampleRecord {
        name: "Blueberry",
        count: 100,
        description: "Fresh blueberries",
        lat: 45.5051,
        lng: -122.675,
        date: "2023-10-29T12:00:00.000Z",
    },
    SampleRecord {
        name: "Mango",
        count: 3,
        description: "Sweet mangoes",
        lat: 25.7617,
        lng: -80.1918,
        date: "2023-10-29T12:05:00.000Z",
    },
    SampleRecord {
        name: "Pineapple",
        count: 2,
        description: "Tropical pineapples",
        lat: 21.3069,
        lng: -157.8583,
        date: "2023-10-30T13:00:00.000Z",
    },
    SampleRecord {
        name: "Watermelon",
        count: 1,
        description: "Large juicy watermelon",
        lat: 32.7157,
        lng: -117.1611,
        date: "2023-10-30T13:05:00.000Z",
    },
    SampleRecord {
        name: "Peach",
        count: 6,
        description: "Ripe peaches",
        lat: 33.749,
        lng: -84.388,
        date: "2023-10-31T14:00:00.000Z",
    },
];

/// The fixed demo set: ten located fruit records dated 2023-10-27 to 2023-10-31, no images
pub fn sample_drafts() -> Vec<RecordDraft> {
    SAMPLE_RECORDS
        .iter()
        .map(|sample| RecordDraft {
            name: Some(sample.name.to_string()),
            count: Some(sample.count),
            description: Some(sample.description.to_string()),
            image_uri: None,
            lat: Some(sample.lat),
            lng: Some(sample.lng),
            date: Some(Timestamp::from_raw(sample.date)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_drafts_are_located_and_dated() {
        let drafts = sample_drafts();
        assert_eq!(drafts.len(), 10);
        assert!(drafts.iter().all(|draft| draft.location().is_some()));
        assert!(drafts
            .iter()
            .all(|draft| draft.date.as_ref().and_then(Timestamp::to_datetime).is_some()));
        assert!(drafts.iter().all(|draft| draft.image_uri.is_none()));
    }
}
