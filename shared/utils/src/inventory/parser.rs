//! Inventory Response Parser
//!
//! Turns a raw `GET /inventory` response into an ordered sequence of
//! `ChemicalRecord`s. The upstream has shipped three shapes over time: a
//! plain JSON array, a `{ data: [...] }` envelope, and a `{ data: "..." }`
//! envelope carrying header-plus-rows tabular text with inconsistent line
//! endings. All three are accepted; nothing here ever panics on content.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::error::{ParseFailure, ParseWarning};
use labstock_models::ChemicalRecord;

/// Result of one inventory parse: the records plus per-row diagnostics.
/// Warnings never abort the batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInventory {
    pub records: Vec<ChemicalRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Inventory response parser with column-name aliasing.
pub struct InventoryRecordParser {
    /// Column name candidates for each record field, checked in order.
    id_columns: Vec<String>,
    name_columns: Vec<String>,
    formula_columns: Vec<String>,
    location_columns: Vec<String>,
    current_quantity_columns: Vec<String>,
    minimum_quantity_columns: Vec<String>,
    unit_columns: Vec<String>,
    hazard_level_columns: Vec<String>,
    sds_url_columns: Vec<String>,
}

impl Default for InventoryRecordParser {
    fn default() -> Self {
        Self {
            id_columns: vec!["chemical_id".to_string(), "id".to_string()],
            name_columns: vec!["name".to_string(), "chemical_name".to_string()],
            formula_columns: vec!["formula".to_string(), "chemical_formula".to_string()],
            location_columns: vec!["location".to_string(), "storage_location".to_string()],
            current_quantity_columns: vec![
                "current_quantity".to_string(),
                "quantity".to_string(),
                "qty".to_string(),
            ],
            minimum_quantity_columns: vec![
                "minimum_quantity".to_string(),
                "min_quantity".to_string(),
                "reorder_level".to_string(),
            ],
            unit_columns: vec!["unit".to_string(), "units".to_string(), "uom".to_string()],
            hazard_level_columns: vec!["hazard_level".to_string(), "hazard".to_string()],
            sds_url_columns: vec!["sds_url".to_string(), "sds".to_string()],
        }
    }
}

impl InventoryRecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse any of the upstream response shapes. Returns
    /// `ParseFailure::MissingPayload` when no usable data field exists;
    /// all other irregularities degrade to per-row warnings.
    pub fn parse(&self, raw: &Value) -> Result<ParsedInventory, ParseFailure> {
        match raw {
            Value::Array(items) => Ok(self.parse_objects(items)),
            Value::Object(_) => {
                // Some deployments wrap the whole payload in a `body`
                // field holding the real envelope, either pre-parsed or
                // as a JSON string.
                match raw.get("body") {
                    Some(Value::String(body)) => {
                        let inner: Value = serde_json::from_str(body)
                            .map_err(|_| ParseFailure::MissingPayload)?;
                        return self.parse(&inner);
                    }
                    Some(body @ (Value::Object(_) | Value::Array(_))) => {
                        return self.parse(body);
                    }
                    _ => {}
                }
                match raw.get("data") {
                    Some(Value::Array(items)) => Ok(self.parse_objects(items)),
                    Some(Value::String(text)) => Ok(self.parse_tabular(text)),
                    _ => Err(ParseFailure::MissingPayload),
                }
            }
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(inner) => self.parse(&inner),
                Err(_) => Err(ParseFailure::MissingPayload),
            },
            _ => Err(ParseFailure::MissingPayload),
        }
    }

    /// Shape (a): already-typed JSON objects.
    fn parse_objects(&self, items: &[Value]) -> ParsedInventory {
        let mut records = Vec::new();
        let mut warnings = Vec::new();

        for (idx, item) in items.iter().enumerate() {
            let row = idx + 1;
            let Some(map) = item.as_object() else {
                warnings.push(ParseWarning::MalformedRow {
                    row,
                    message: "entry is not an object, dropped".to_string(),
                });
                continue;
            };

            let fields: HashMap<String, String> = map
                .iter()
                .map(|(k, v)| (k.trim().to_lowercase(), value_to_string(v)))
                .collect();

            if let Some(record) = self.build_record(row, &fields, &mut warnings) {
                records.push(record);
            }
        }

        ParsedInventory { records, warnings }
    }

    /// Shape (b): header-plus-rows tabular text embedded in the envelope.
    fn parse_tabular(&self, text: &str) -> ParsedInventory {
        // The upstream serializes rows with CRLF and sometimes ships the
        // terminators double-escaped; every variant collapses to '\n'.
        let normalized = text
            .replace("\\r\\n", "\n")
            .replace("\r\n", "\n")
            .replace('\r', "\n");

        // Blank and whitespace-only lines are separators, never records.
        let mut lines = normalized
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let Some(header_line) = lines.next() else {
            return ParsedInventory::default();
        };

        // No quoted-field or escaped-comma support: a value containing a
        // literal comma shifts column alignment. The upstream contract has
        // never produced quoted fields, so this matches its behavior
        // rather than guessing at one. Known limitation.
        let headers: Vec<String> = header_line
            .split(',')
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut records = Vec::new();
        let mut warnings = Vec::new();

        for (idx, line) in lines.enumerate() {
            // Header is row 1; data rows are numbered from 2, counting
            // non-blank lines only.
            let row = idx + 2;
            let values: Vec<&str> = line.split(',').collect();

            // Positional zip: short rows pad with empty strings, extra
            // trailing values are ignored.
            let fields: HashMap<String, String> = headers
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let value = values.get(i).map(|v| v.trim().to_string()).unwrap_or_default();
                    (h.clone(), value)
                })
                .collect();

            if let Some(record) = self.build_record(row, &fields, &mut warnings) {
                records.push(record);
            }
        }

        ParsedInventory { records, warnings }
    }

    fn build_record(
        &self,
        row: usize,
        fields: &HashMap<String, String>,
        warnings: &mut Vec<ParseWarning>,
    ) -> Option<ChemicalRecord> {
        let name = self.find_value(&self.name_columns, fields).unwrap_or_default();
        if name.is_empty() {
            warnings.push(ParseWarning::MalformedRow {
                row,
                message: "missing chemical name, row dropped".to_string(),
            });
            return None;
        }

        // Identifiers only need to be unique within one load; a generated
        // one fills in when the upstream did not assign any.
        let id = self
            .find_value(&self.id_columns, fields)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let current_quantity = self.coerce_quantity(
            row,
            "current_quantity",
            self.find_value(&self.current_quantity_columns, fields),
            warnings,
        );
        let minimum_quantity = self.coerce_quantity(
            row,
            "minimum_quantity",
            self.find_value(&self.minimum_quantity_columns, fields),
            warnings,
        );

        Some(ChemicalRecord {
            id,
            name,
            formula: self.find_value(&self.formula_columns, fields).unwrap_or_default(),
            location: self.find_value(&self.location_columns, fields).unwrap_or_default(),
            current_quantity,
            minimum_quantity,
            unit: self.find_value(&self.unit_columns, fields).unwrap_or_default(),
            hazard_level: self.find_value(&self.hazard_level_columns, fields),
            sds_url: self.find_value(&self.sds_url_columns, fields),
        })
    }

    /// Find value by checking multiple possible column names.
    fn find_value(&self, candidates: &[String], data: &HashMap<String, String>) -> Option<String> {
        for candidate in candidates {
            if let Some(value) = data.get(candidate) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// Coerce a quantity field to a finite non-negative number. Unparsable
    /// non-empty values become 0.0 with a warning; NaN never escapes (it
    /// would silently corrupt the below-minimum comparison downstream).
    fn coerce_quantity(
        &self,
        row: usize,
        field: &str,
        raw: Option<String>,
        warnings: &mut Vec<ParseWarning>,
    ) -> f64 {
        let Some(raw) = raw else {
            return 0.0;
        };

        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            Ok(value) => {
                warnings.push(ParseWarning::MalformedRow {
                    row,
                    message: format!("{field} value '{raw}' out of range ({value}), coerced to 0"),
                });
                0.0
            }
            Err(_) => {
                warnings.push(ParseWarning::MalformedRow {
                    row,
                    message: format!("{field} value '{raw}' is not numeric, coerced to 0"),
                });
                0.0
            }
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn parse_tabular(data: &str) -> ParsedInventory {
        let parser = InventoryRecordParser::new();
        parser.parse(&json!({ "data": data })).unwrap()
    }

    #[test]
    fn test_tabular_header_and_row() {
        let parsed =
            parse_tabular("name,current_quantity,minimum_quantity,unit\r\nAcetone,5,10,L");

        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.warnings.is_empty());
        let record = &parsed.records[0];
        assert_eq!(record.name, "Acetone");
        assert_eq!(record.current_quantity, 5.0);
        assert_eq!(record.minimum_quantity, 10.0);
        assert_eq!(record.unit, "L");
        assert!(record.is_below_minimum());
    }

    #[test]
    fn test_non_numeric_quantity_coerces_to_zero_with_warning() {
        let parsed =
            parse_tabular("name,current_quantity,minimum_quantity,unit\nAcetone,abc,10,L");

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].current_quantity, 0.0);
        assert!(parsed.records[0].current_quantity.is_finite());
        assert_eq!(parsed.warnings.len(), 1);
        assert!(matches!(
            parsed.warnings[0],
            ParseWarning::MalformedRow { row: 2, .. }
        ));
    }

    #[test]
    fn test_nan_literal_never_escapes() {
        let parsed =
            parse_tabular("name,current_quantity,minimum_quantity,unit\nAcetone,NaN,-3,L");

        // "NaN" parses as f64 NaN and "-3" is negative; both coerce to 0.
        assert_eq!(parsed.records[0].current_quantity, 0.0);
        assert_eq!(parsed.records[0].minimum_quantity, 0.0);
        assert_eq!(parsed.warnings.len(), 2);
    }

    #[test]
    fn test_blank_lines_are_not_records() {
        let parsed = parse_tabular("name,unit\r\n\r\nAcetone,L\r\n   \r\nEthanol,mL\r\n\r\n");

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].name, "Acetone");
        assert_eq!(parsed.records[1].name, "Ethanol");
    }

    #[test]
    fn test_double_escaped_crlf_matches_plain_lf() {
        let escaped = parse_tabular("name,unit\\r\\nAcetone,L\\r\\nEthanol,mL");
        let plain = parse_tabular("name,unit\nAcetone,L\nEthanol,mL");

        let names = |p: &ParsedInventory| {
            p.records.iter().map(|r| r.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&escaped), names(&plain));
        assert_eq!(names(&plain), vec!["Acetone", "Ethanol"]);
    }

    #[test]
    fn test_short_row_pads_and_long_row_truncates() {
        let parsed = parse_tabular(
            "name,formula,location,unit\nAcetone,C3H6O\nEthanol,C2H6O,Shelf 2,L,extra,ignored",
        );

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].location, "");
        assert_eq!(parsed.records[0].unit, "");
        assert_eq!(parsed.records[1].location, "Shelf 2");
        assert_eq!(parsed.records[1].unit, "L");
    }

    #[test]
    fn test_row_without_name_is_dropped_with_warning() {
        let parsed = parse_tabular("name,unit\n,L\nAcetone,L");

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].name, "Acetone");
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_json_array_shape() {
        let parser = InventoryRecordParser::new();
        let parsed = parser
            .parse(&json!([
                {
                    "chemical_id": "chem-7",
                    "name": "Toluene",
                    "formula": "C7H8",
                    "location": "Flammables cabinet",
                    "current_quantity": 2.5,
                    "minimum_quantity": 1,
                    "unit": "L",
                    "hazard_level": "High",
                    "sds_url": "https://example.com/sds/toluene.pdf"
                }
            ]))
            .unwrap();

        assert_eq!(parsed.records.len(), 1);
        let record = &parsed.records[0];
        assert_eq!(record.id, "chem-7");
        assert_eq!(record.current_quantity, 2.5);
        assert_eq!(record.minimum_quantity, 1.0);
        assert_eq!(record.hazard_level.as_deref(), Some("High"));
        assert!(!record.is_below_minimum());
    }

    #[test]
    fn test_json_object_quantity_string_coercion() {
        let parser = InventoryRecordParser::new();
        let parsed = parser
            .parse(&json!([{ "name": "Acetone", "current_quantity": "not-a-number" }]))
            .unwrap();

        assert_eq!(parsed.records[0].current_quantity, 0.0);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_data_envelope_with_array() {
        let parser = InventoryRecordParser::new();
        let parsed = parser
            .parse(&json!({ "data": [{ "name": "Ethanol", "quantity": 3 }] }))
            .unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].current_quantity, 3.0);
    }

    #[test]
    fn test_stringified_body_envelope() {
        let parser = InventoryRecordParser::new();
        let body = json!({ "data": "name,unit\r\nAcetone,L" }).to_string();
        let parsed = parser.parse(&json!({ "body": body })).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].name, "Acetone");

        // A pre-parsed body object works the same way.
        let pre_parsed = parser
            .parse(&json!({ "body": { "data": [{ "name": "Ethanol" }] } }))
            .unwrap();
        assert_eq!(pre_parsed.records.len(), 1);
        assert_eq!(pre_parsed.records[0].name, "Ethanol");
    }

    #[test]
    fn test_missing_payload_variants() {
        let parser = InventoryRecordParser::new();

        assert_eq!(parser.parse(&json!(null)), Err(ParseFailure::MissingPayload));
        assert_eq!(parser.parse(&json!(42)), Err(ParseFailure::MissingPayload));
        assert_eq!(
            parser.parse(&json!({ "unexpected": true })),
            Err(ParseFailure::MissingPayload)
        );
        assert_eq!(
            parser.parse(&json!({ "body": "not json" })),
            Err(ParseFailure::MissingPayload)
        );
    }

    #[test]
    fn test_empty_array_yields_no_records() {
        let parser = InventoryRecordParser::new();
        let parsed = parser.parse(&json!([])).unwrap();
        assert!(parsed.records.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_missing_id_is_generated_unique() {
        let parsed = parse_tabular("name,unit\nAcetone,L\nEthanol,mL");

        assert_eq!(parsed.records.len(), 2);
        assert!(!parsed.records[0].id.is_empty());
        assert_ne!(parsed.records[0].id, parsed.records[1].id);
    }

    proptest! {
        /// Every non-blank data line with a name becomes exactly one record.
        #[test]
        fn prop_row_count_matches_named_lines(
            names in proptest::collection::vec("[A-Za-z][A-Za-z ]{0,20}", 1..20),
        ) {
            let mut text = String::from("name,current_quantity,minimum_quantity,unit");
            for name in &names {
                text.push_str("\r\n");
                text.push_str(name);
                text.push_str(",1,2,L");
            }

            let parsed = parse_tabular(&text);
            prop_assert_eq!(parsed.records.len(), names.len());
        }

        /// Quantities are finite and non-negative for arbitrary field text.
        #[test]
        fn prop_quantities_always_finite_non_negative(
            raw in "[ -~]{0,12}",
        ) {
            // Commas would shift columns, which is the documented
            // limitation, not the property under test here.
            let raw = raw.replace(',', " ");
            let text = format!("name,current_quantity,minimum_quantity\nAcetone,{},{}", raw, raw);
            let parsed = parse_tabular(&text);

            prop_assert_eq!(parsed.records.len(), 1);
            let record = &parsed.records[0];
            prop_assert!(record.current_quantity.is_finite());
            prop_assert!(record.current_quantity >= 0.0);
            prop_assert!(record.minimum_quantity.is_finite());
            prop_assert!(record.minimum_quantity >= 0.0);
        }
    }
}
