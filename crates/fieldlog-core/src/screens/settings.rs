//! Settings screen: destructive and demo-data actions.

use super::Notice;
use crate::services::RecordStore;

pub const EXPORT_NOT_IMPLEMENTED: &str = "This feature is not yet implemented.";

/// The user's answer to a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Cancelled
        }
    }
}

pub struct SettingsController {
    store: RecordStore,
}

impl SettingsController {
    pub const fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Delete every record. Does nothing unless confirmed.
    pub async fn clear_all(&mut self, confirmation: Confirmation) -> Notice {
        if confirmation != Confirmation::Confirmed {
            return Notice::info("Clear cancelled.");
        }

        match self.store.delete_all().await {
            Ok(removed) => Notice::info(format!("Database cleared ({removed} records removed).")),
            Err(error) => {
                tracing::error!("Failed to clear records: {error}");
                Notice::error("Failed to clear the database.")
            }
        }
    }

    /// Insert the sample data set. Does nothing unless confirmed.
    pub async fn seed(&mut self, confirmation: Confirmation) -> Notice {
        if confirmation != Confirmation::Confirmed {
            return Notice::info("Sample data not inserted.");
        }

        match self.store.seed_sample_data().await {
            Ok(inserted) => Notice::info(format!("Inserted {inserted} sample records.")),
            Err(error) => {
                tracing::error!("Failed to insert sample data: {error}");
                Notice::error("Failed to insert sample data; some records may have been added.")
            }
        }
    }

    pub fn export(&self) -> Notice {
        Notice::info(EXPORT_NOT_IMPLEMENTED)
    }
}
