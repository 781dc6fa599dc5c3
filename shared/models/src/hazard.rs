//! GHS hazard classification models.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The nine standard GHS pictogram categories.
///
/// This enumeration is closed: any external code outside GHS01..GHS09 is
/// dropped at the boundary rather than surfaced as a bogus pictogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GhsPictogram {
    #[serde(rename = "GHS01")]
    Ghs01,
    #[serde(rename = "GHS02")]
    Ghs02,
    #[serde(rename = "GHS03")]
    Ghs03,
    #[serde(rename = "GHS04")]
    Ghs04,
    #[serde(rename = "GHS05")]
    Ghs05,
    #[serde(rename = "GHS06")]
    Ghs06,
    #[serde(rename = "GHS07")]
    Ghs07,
    #[serde(rename = "GHS08")]
    Ghs08,
    #[serde(rename = "GHS09")]
    Ghs09,
}

impl GhsPictogram {
    pub const ALL: [GhsPictogram; 9] = [
        Self::Ghs01,
        Self::Ghs02,
        Self::Ghs03,
        Self::Ghs04,
        Self::Ghs05,
        Self::Ghs06,
        Self::Ghs07,
        Self::Ghs08,
        Self::Ghs09,
    ];

    /// Canonical code, e.g. "GHS05".
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ghs01 => "GHS01",
            Self::Ghs02 => "GHS02",
            Self::Ghs03 => "GHS03",
            Self::Ghs04 => "GHS04",
            Self::Ghs05 => "GHS05",
            Self::Ghs06 => "GHS06",
            Self::Ghs07 => "GHS07",
            Self::Ghs08 => "GHS08",
            Self::Ghs09 => "GHS09",
        }
    }

    /// Human-readable pictogram name per the GHS standard.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ghs01 => "Exploding Bomb",
            Self::Ghs02 => "Flame",
            Self::Ghs03 => "Flame Over Circle",
            Self::Ghs04 => "Gas Cylinder",
            Self::Ghs05 => "Corrosion",
            Self::Ghs06 => "Skull and Crossbones",
            Self::Ghs07 => "Exclamation Mark",
            Self::Ghs08 => "Health Hazard",
            Self::Ghs09 => "Environment",
        }
    }

    /// Standard pictogram image, as served by PubChem.
    pub fn image_url(&self) -> String {
        format!("https://pubchem.ncbi.nlm.nih.gov/images/ghs/{}.svg", self.code())
    }

    /// Parse a canonical code such as "GHS05" (case-insensitive). Anything
    /// outside the nine-code enumeration yields `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "GHS01" => Some(Self::Ghs01),
            "GHS02" => Some(Self::Ghs02),
            "GHS03" => Some(Self::Ghs03),
            "GHS04" => Some(Self::Ghs04),
            "GHS05" => Some(Self::Ghs05),
            "GHS06" => Some(Self::Ghs06),
            "GHS07" => Some(Self::Ghs07),
            "GHS08" => Some(Self::Ghs08),
            "GHS09" => Some(Self::Ghs09),
            _ => None,
        }
    }
}

impl fmt::Display for GhsPictogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalized hazard information for one chemical name.
///
/// `resolved` distinguishes "confirmed no hazards" from "lookup found
/// nothing"; both render the same no-data message but are different facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardSummary {
    /// Echo of the name that was resolved.
    pub chemical_name: String,
    /// GHS severity marker, "Danger" or "Warning", when one was found.
    pub signal_word: Option<String>,
    /// De-duplicated hazard statements in first-seen order.
    pub statements: Vec<String>,
    /// Pictogram codes as a set; BTreeSet keeps the materialized order
    /// deterministic across identical resolutions.
    pub pictogram_codes: BTreeSet<GhsPictogram>,
    pub resolved: bool,
}

impl HazardSummary {
    /// Summary for a name that produced no data from any tier.
    pub fn unresolved(chemical_name: impl Into<String>) -> Self {
        Self {
            chemical_name: chemical_name.into(),
            signal_word: None,
            statements: Vec::new(),
            pictogram_codes: BTreeSet::new(),
            resolved: false,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.statements.is_empty() || !self.pictogram_codes.is_empty()
    }
}
