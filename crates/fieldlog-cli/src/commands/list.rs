use fieldlog_core::screens::TableController;
use fieldlog_core::RecordStore;

use crate::commands::common::{
    format_page_footer, format_record_lines, record_to_list_item, report_notice, PageOutput,
};
use crate::error::CliError;

pub async fn run_list(
    offset: usize,
    limit: usize,
    as_json: bool,
    store: &RecordStore,
) -> Result<(), CliError> {
    let mut table = TableController::with_page_size(store.clone(), limit);
    table.on_focus_at(offset).await;
    report_notice(table.take_notice())?;

    if as_json {
        let output = PageOutput {
            items: table.rows().iter().map(record_to_list_item).collect(),
            total: table.total(),
            offset: table.offset(),
            limit,
            label: table.bounds().label(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_record_lines(table.rows()) {
            println!("{line}");
        }
        println!("{}", format_page_footer(&table.bounds()));
    }

    Ok(())
}
