use fieldlog_core::screens::MapController;
use fieldlog_core::RecordStore;

use crate::commands::common::{format_marker_lines, format_page_footer, report_notice, PageOutput};
use crate::error::CliError;

pub async fn run_map(
    offset: usize,
    limit: usize,
    as_json: bool,
    store: &RecordStore,
) -> Result<(), CliError> {
    let mut map = MapController::with_page_size(store.clone(), limit);
    map.on_focus_at(offset).await;
    report_notice(map.take_notice())?;

    let markers = map.markers();
    if as_json {
        let output = PageOutput {
            items: markers,
            total: map.total(),
            offset: map.offset(),
            limit,
            label: map.bounds().label(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_marker_lines(&markers) {
            println!("{line}");
        }
        println!("{}", format_page_footer(&map.bounds()));
    }

    Ok(())
}
