//! Shared services used by screen controllers and front ends.

mod store;

pub use store::RecordStore;
