//! Chemical inventory domain models.
//!
//! A `ChemicalRecord` is an immutable value object: one inventory reload
//! produces a fresh ordered sequence of records, and a mutation is always
//! expressed as a write to the upstream API followed by a full re-fetch.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single chemical stockroom entry.
///
/// Quantities are always finite, non-negative numbers by the time a record
/// exists; the inventory parser coerces anything unparsable to zero so that
/// the below-minimum comparison downstream can never see NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ChemicalRecord {
    /// Opaque identifier, unique within a single inventory load.
    pub id: String,
    #[validate(length(min = 1, max = 255, message = "Chemical name is required"))]
    pub name: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub location: String,
    #[validate(range(min = 0.0, message = "Quantity must be non-negative"))]
    pub current_quantity: f64,
    #[validate(range(min = 0.0, message = "Minimum quantity must be non-negative"))]
    pub minimum_quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazard_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sds_url: Option<String>,
}

impl ChemicalRecord {
    /// Numeric restock check. Comparing the raw strings here is wrong
    /// ("9" < "10" is false lexicographically), so quantities are coerced
    /// to numbers at parse time and compared as numbers only.
    pub fn is_below_minimum(&self) -> bool {
        self.current_quantity < self.minimum_quantity
    }

    /// Case-insensitive substring match over name, formula and location,
    /// mirroring the stockroom search box.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.formula.to_lowercase().contains(&term)
            || self.location.to_lowercase().contains(&term)
    }
}

/// Admin-submitted chemical entry, validated before being forwarded to the
/// upstream inventory API. The upstream assigns the identifier.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewChemical {
    #[validate(length(min = 1, max = 255, message = "Chemical name is required"))]
    pub name: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub location: String,
    #[validate(range(min = 0.0, message = "Quantity must be non-negative"))]
    pub current_quantity: f64,
    #[validate(range(min = 0.0, message = "Minimum quantity must be non-negative"))]
    pub minimum_quantity: f64,
    #[validate(length(min = 1, max = 16, message = "Unit is required"))]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazard_level: Option<String>,
    #[validate(url(message = "SDS URL must be a valid URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sds_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(current: f64, minimum: f64) -> ChemicalRecord {
        ChemicalRecord {
            id: "chem-1".to_string(),
            name: "Acetone".to_string(),
            formula: "C3H6O".to_string(),
            location: "Cabinet 4".to_string(),
            current_quantity: current,
            minimum_quantity: minimum,
            unit: "L".to_string(),
            hazard_level: None,
            sds_url: None,
        }
    }

    #[test]
    fn test_below_minimum_is_numeric() {
        // The lexicographic trap: "9" < "10" is false as strings.
        assert!(record(9.0, 10.0).is_below_minimum());
        assert!(!record(10.0, 9.0).is_below_minimum());
        assert!(!record(10.0, 10.0).is_below_minimum());
    }

    #[test]
    fn test_search_matches_name_formula_location() {
        let r = record(5.0, 1.0);
        assert!(r.matches_search("aceton"));
        assert!(r.matches_search("c3h6o"));
        assert!(r.matches_search("cabinet"));
        assert!(!r.matches_search("benzene"));
    }

    #[test]
    fn test_new_chemical_validation() {
        let valid = NewChemical {
            name: "Ethanol".to_string(),
            formula: "C2H6O".to_string(),
            location: "Shelf 2".to_string(),
            current_quantity: 2.5,
            minimum_quantity: 1.0,
            unit: "L".to_string(),
            hazard_level: Some("Medium".to_string()),
            sds_url: Some("https://example.com/sds/ethanol.pdf".to_string()),
        };
        assert!(validator::Validate::validate(&valid).is_ok());

        let mut missing_name = valid.clone();
        missing_name.name = String::new();
        assert!(validator::Validate::validate(&missing_name).is_err());

        let mut negative = valid.clone();
        negative.current_quantity = -1.0;
        assert!(validator::Validate::validate(&negative).is_err());

        let mut bad_url = valid;
        bad_url.sds_url = Some("not a url".to_string());
        assert!(validator::Validate::validate(&bad_url).is_err());
    }

    proptest! {
        /// Below-minimum agrees with the plain numeric ordering for any
        /// pair of non-negative quantities.
        #[test]
        fn prop_below_minimum_matches_ordering(
            current in 0.0f64..1e9,
            minimum in 0.0f64..1e9,
        ) {
            let r = record(current, minimum);
            prop_assert_eq!(r.is_below_minimum(), current < minimum);
        }
    }
}
