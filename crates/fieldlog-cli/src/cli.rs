use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fieldlog")]
#[command(about = "Record field observations in a local database")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

/// Field values for `add` and `edit`; omitted flags leave a field untouched
#[derive(Args, Debug, Default, Clone)]
pub struct RecordFields {
    /// Record name
    #[arg(long)]
    pub name: Option<String>,
    /// Observed count (negative values become 0)
    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<i64>,
    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,
    /// Image URI to attach
    #[arg(long, value_name = "URI")]
    pub image: Option<String>,
    /// Latitude (requires --lng)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Observation date: RFC 3339, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new record
    #[command(alias = "new")]
    Add {
        #[command(flatten)]
        fields: RecordFields,
    },
    /// List records newest first, one page at a time
    List {
        /// 1-based page number
        #[arg(long, conflicts_with = "offset")]
        page: Option<usize>,
        /// Number of records to skip
        #[arg(long)]
        offset: Option<usize>,
        /// Page size
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List map markers for records that have a location
    Map {
        /// 1-based page number
        #[arg(long)]
        page: Option<usize>,
        /// Page size
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one record
    Show {
        /// Record ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing record
    Edit {
        /// Record ID
        id: String,
        #[command(flatten)]
        fields: RecordFields,
        /// Remove the stored location
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        clear_location: bool,
        /// Remove the attached image
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },
    /// Delete a record and print the page it leaves you on
    Delete {
        /// Record ID
        id: String,
        /// Offset of the page being viewed
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Page size
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete every record
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Insert the sample data set
    Seed {
        /// Confirm the insert
        #[arg(long)]
        yes: bool,
    },
    /// Export records
    Export,
}
