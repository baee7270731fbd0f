use fieldlog_core::screens::TableController;
use fieldlog_core::RecordStore;

use crate::commands::common::{find_record, format_page_footer, parse_record_id, report_notice};
use crate::error::CliError;

/// Delete from the page at `offset` and return the offset the page moved to.
pub async fn run_delete(
    id: &str,
    offset: usize,
    limit: usize,
    store: &RecordStore,
) -> Result<usize, CliError> {
    let id = parse_record_id(id)?;
    find_record(store, id).await?;
    let mut table = TableController::with_page_size(store.clone(), limit);
    table.on_focus_at(offset).await;
    report_notice(table.take_notice())?;

    let outcome = table.delete(id).await;
    report_notice(table.take_notice())?;
    if outcome.is_none() {
        return Err(CliError::Failed("Failed to delete the record.".to_string()));
    }

    println!("Deleted {id}");
    println!("{} (offset {})", format_page_footer(&table.bounds()), table.offset());
    Ok(table.offset())
}
