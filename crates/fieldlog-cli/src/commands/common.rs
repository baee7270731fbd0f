use std::path::{Path, PathBuf};

use fieldlog_core::config::AppConfig;
use fieldlog_core::models::Location;
use fieldlog_core::pagination::PageBounds;
use fieldlog_core::screens::{EditorController, MapMarker, Notice, NoticeLevel};
use fieldlog_core::util::{display_timestamp, parse_date_input, truncate_text};
use fieldlog_core::{Record, RecordId, RecordStore};
use serde::Serialize;

use crate::cli::RecordFields;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct RecordListItem {
    pub id: RecordId,
    pub name: String,
    pub count: Option<i64>,
    pub description: Option<String>,
    #[serde(rename = "imageUri")]
    pub image_uri: Option<String>,
    pub location: Option<Location>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageOutput<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub label: String,
}

pub fn record_to_list_item(record: &Record) -> RecordListItem {
    RecordListItem {
        id: record.id,
        name: record.display_name().to_string(),
        count: record.count,
        description: record.description.clone(),
        image_uri: record.image_uri.clone(),
        location: record.location(),
        date: record.date.as_ref().map(ToString::to_string),
    }
}

pub fn format_record_lines(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            let name = truncate_text(record.display_name(), 24);
            let count = record
                .count
                .map_or_else(|| "-".to_string(), |count| count.to_string());
            let date = record
                .date
                .as_ref()
                .map_or_else(|| "-".to_string(), display_timestamp);
            let description = truncate_text(record.description.as_deref().unwrap_or(""), 40);

            format!(
                "{:>6}  {name:<24}  {count:>6}  {date:<16}  {description}",
                record.id
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

pub fn format_marker_lines(markers: &[MapMarker]) -> Vec<String> {
    markers
        .iter()
        .map(|marker| {
            format!(
                "{:>6}  ({:.4}, {:.4})  {}  [{}]",
                marker.id, marker.location.lat, marker.location.lng, marker.title, marker.subtitle
            )
        })
        .collect()
}

pub fn format_record_detail(record: &Record) -> Vec<String> {
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();
    vec![
        format!("ID:          {}", record.id),
        format!("Name:        {}", record.display_name()),
        format!(
            "Count:       {}",
            or_dash(record.count.map(|count| count.to_string()).as_deref())
        ),
        format!("Description: {}", or_dash(record.description.as_deref())),
        format!("Image:       {}", or_dash(record.image_uri.as_deref())),
        format!(
            "Location:    {}",
            record.location().map_or_else(
                || "-".to_string(),
                |location| format!("{:.6}, {:.6}", location.lat, location.lng)
            )
        ),
        format!(
            "Date:        {}",
            record
                .date
                .as_ref()
                .map_or_else(|| "-".to_string(), display_timestamp)
        ),
    ]
}

pub fn format_page_footer(bounds: &PageBounds) -> String {
    let mut footer = bounds.label();
    if bounds.can_go_previous {
        footer.push_str("  [prev]");
    }
    if bounds.can_go_next {
        footer.push_str("  [next]");
    }
    footer
}

/// Translate `--page` (1-based) or `--offset` into a row offset.
pub fn resolve_offset(
    page: Option<usize>,
    offset: Option<usize>,
    limit: usize,
) -> Result<usize, CliError> {
    match (page, offset) {
        (Some(0), _) => Err(CliError::InvalidPage),
        (Some(page), _) => Ok((page - 1).saturating_mul(limit)),
        (None, offset) => Ok(offset.unwrap_or(0)),
    }
}

pub fn parse_record_id(id: &str) -> Result<RecordId, CliError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::EmptyRecordId);
    }
    id.parse::<RecordId>()
        .map_err(|_| CliError::InvalidRecordId(id.to_string()))
}

pub async fn find_record(store: &RecordStore, id: RecordId) -> Result<Record, CliError> {
    store
        .get(id)
        .await?
        .ok_or(CliError::Core(fieldlog_core::Error::NotFound(id)))
}

/// Copy the provided flags into the form; omitted flags leave fields as they are.
pub fn apply_record_fields(
    editor: &mut EditorController,
    fields: &RecordFields,
) -> Result<(), CliError> {
    if let Some(name) = &fields.name {
        editor.set_name(name.clone());
    }
    if let Some(count) = fields.count {
        editor.set_count(count);
    }
    if let Some(description) = &fields.description {
        editor.set_description(description.clone());
    }
    if let Some(image) = &fields.image {
        editor.set_image_uri(image.clone());
    }
    if let (Some(lat), Some(lng)) = (fields.lat, fields.lng) {
        editor.set_location(Location::new(lat, lng));
    }
    if let Some(date) = &fields.date {
        editor.set_date(parse_date_input(date)?);
    }
    Ok(())
}

/// Print a controller notice; error notices become a failed command.
pub fn report_notice(notice: Option<Notice>) -> Result<(), CliError> {
    let Some(notice) = notice else {
        return Ok(());
    };

    match notice.level {
        NoticeLevel::Info => println!("{}", notice.message),
        NoticeLevel::Warning => eprintln!("Warning: {}", notice.message),
        NoticeLevel::Error => return Err(CliError::Failed(notice.message)),
    }
    Ok(())
}

/// Resolve config from file and environment, with `--db-path` on top.
pub fn load_config(cli_db_path: Option<PathBuf>) -> Result<AppConfig, CliError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = cli_db_path {
        config.db_path = Some(path);
    }
    Ok(config)
}

/// Open the store, creating the file and table on first use.
pub fn open_store(path: &Path) -> Result<RecordStore, CliError> {
    Ok(RecordStore::open_path(path)?)
}
