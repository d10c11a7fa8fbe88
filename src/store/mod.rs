//! Store Module
//!
//! Immutable person-to-handle tables loaded once from the record file.

mod data_store;
mod record;

pub use data_store::{DataStore, NameKey};
pub use record::Record;
