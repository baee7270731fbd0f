use fieldlog_core::screens::{Confirmation, SettingsController};
use fieldlog_core::RecordStore;

use crate::commands::common::report_notice;
use crate::error::CliError;

pub async fn run_clear(yes: bool, store: &RecordStore) -> Result<(), CliError> {
    if !yes {
        return Err(CliError::ConfirmationRequired("delete every record"));
    }
    let mut settings = SettingsController::new(store.clone());
    report_notice(Some(settings.clear_all(Confirmation::Confirmed).await))
}

pub async fn run_seed(yes: bool, store: &RecordStore) -> Result<(), CliError> {
    if !yes {
        return Err(CliError::ConfirmationRequired("insert sample data"));
    }
    let mut settings = SettingsController::new(store.clone());
    report_notice(Some(settings.seed(Confirmation::Confirmed).await))
}

pub fn run_export(store: &RecordStore) -> Result<(), CliError> {
    let settings = SettingsController::new(store.clone());
    report_notice(Some(settings.export()))
}
