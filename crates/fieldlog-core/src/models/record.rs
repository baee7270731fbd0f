//! Record model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a record (`SQLite` rowid, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value as stored in the `id` column
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// ISO-8601 timestamp text, stored and returned verbatim.
///
/// Values built from a `DateTime` use millisecond precision and a `Z` suffix
/// (`2023-10-27T10:00:00.000Z`), so lexical order matches chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Current time
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    #[must_use]
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Wrap text read from storage without interpreting it
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse for display or form editing. `None` when the stored text is not RFC 3339.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.0)
            .ok()
            .map(|value| value.with_timezone(&Utc))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A coordinate pair; only exists when both latitude and longitude are known
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Combine nullable columns. A lone latitude or longitude is not a location.
    #[must_use]
    pub const fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

/// The mutable field set of a record, used for create and full-replace update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub name: Option<String>,
    pub count: Option<i64>,
    pub description: Option<String>,
    #[serde(rename = "imageUri")]
    pub image_uri: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub date: Option<Timestamp>,
}

impl RecordDraft {
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        Location::from_parts(self.lat, self.lng)
    }

    /// Set or clear both coordinates together
    pub fn set_location(&mut self, location: Option<Location>) {
        self.lat = location.map(|loc| loc.lat);
        self.lng = location.map(|loc| loc.lng);
    }
}

/// A persisted record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: Option<String>,
    pub count: Option<i64>,
    pub description: Option<String>,
    #[serde(rename = "imageUri")]
    pub image_uri: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub date: Option<Timestamp>,
}

impl Record {
    /// Attach a store-assigned id to a field set
    #[must_use]
    pub fn from_draft(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            name: draft.name,
            count: draft.count,
            description: draft.description,
            image_uri: draft.image_uri,
            lat: draft.lat,
            lng: draft.lng,
            date: draft.date,
        }
    }

    /// Copy of the mutable fields
    #[must_use]
    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            name: self.name.clone(),
            count: self.count,
            description: self.description.clone(),
            image_uri: self.image_uri.clone(),
            lat: self.lat,
            lng: self.lng,
            date: self.date.clone(),
        }
    }

    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        Location::from_parts(self.lat, self.lng)
    }

    /// Name for list and marker titles
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Unnamed")
    }
}
