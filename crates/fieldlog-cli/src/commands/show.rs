use fieldlog_core::RecordStore;

use crate::commands::common::{
    find_record, format_record_detail, parse_record_id, record_to_list_item,
};
use crate::error::CliError;

pub async fn run_show(id: &str, as_json: bool, store: &RecordStore) -> Result<(), CliError> {
    let id = parse_record_id(id)?;
    let record = find_record(store, id).await?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record_to_list_item(&record))?
        );
    } else {
        for line in format_record_detail(&record) {
            println!("{line}");
        }
    }
    Ok(())
}
