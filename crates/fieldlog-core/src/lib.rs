//! fieldlog-core - Core library for fieldlog
//!
//! This crate contains the record model, the `SQLite` record store, the
//! pagination rules, and the screen controllers used by the fieldlog
//! interfaces.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod screens;
pub mod services;
pub mod util;

pub use error::{Error, Result};
pub use models::{Record, RecordDraft, RecordId};
pub use services::RecordStore;
