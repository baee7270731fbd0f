use fieldlog_core::screens::{EditorController, SaveOutcome};
use fieldlog_core::{RecordId, RecordStore};

use crate::cli::RecordFields;
use crate::commands::common::{apply_record_fields, report_notice};
use crate::error::CliError;

pub async fn run_add(fields: &RecordFields, store: &RecordStore) -> Result<RecordId, CliError> {
    let mut editor = EditorController::new(store.clone());
    apply_record_fields(&mut editor, fields)?;

    let outcome = editor.save().await;
    report_notice(editor.take_notice())?;

    match outcome {
        SaveOutcome::Created(record) => {
            println!("{}", record.id);
            Ok(record.id)
        }
        _ => Err(CliError::Failed("Failed to save the record.".to_string())),
    }
}
