//! Inventory Ingestion Module
//!
//! Normalizes the upstream inventory API's response into chemical records.
//! Accepts native JSON arrays, `{ data: ... }` envelopes, and tabular text
//! embedded in an envelope field.

pub mod parser;

pub use parser::{InventoryRecordParser, ParsedInventory};
