use fieldlog_core::screens::{EditorController, SaveOutcome};
use fieldlog_core::RecordStore;

use crate::cli::RecordFields;
use crate::commands::common::{apply_record_fields, find_record, parse_record_id, report_notice};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    fields: &RecordFields,
    clear_location: bool,
    clear_image: bool,
    store: &RecordStore,
) -> Result<(), CliError> {
    let id = parse_record_id(id)?;
    let record = find_record(store, id).await?;

    let mut editor = EditorController::new(store.clone());
    editor.prefill(&record);
    if clear_location {
        editor.clear_location();
    }
    if clear_image {
        editor.clear_image();
    }
    apply_record_fields(&mut editor, fields)?;

    let outcome = editor.save().await;
    report_notice(editor.take_notice())?;

    match outcome {
        SaveOutcome::Updated(id) => {
            println!("{id}");
            Ok(())
        }
        SaveOutcome::Missing(id) => Err(fieldlog_core::Error::NotFound(id).into()),
        SaveOutcome::Created(_) | SaveOutcome::Failed => {
            Err(CliError::Failed("Failed to save the record.".to_string()))
        }
    }
}
