//! # Labstock Domain Models
//!
//! Core domain models for the Labstock chemical stockroom system.
//! All models implement serialization/deserialization with serde and
//! validation with the validator crate.
//!
//! ## Key Models
//!
//! - **ChemicalRecord**: a single stockroom inventory entry as produced by
//!   the inventory parser
//! - **NewChemical**: an admin-submitted entry, validated before it is
//!   forwarded to the upstream inventory API
//! - **GhsPictogram**: the fixed nine-code GHS pictogram enumeration
//! - **HazardSummary**: the normalized output of hazard resolution

pub mod chemical;
pub mod hazard;

pub use chemical::{ChemicalRecord, NewChemical};
pub use hazard::{GhsPictogram, HazardSummary};
