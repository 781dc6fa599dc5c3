//! Hazard Resolver
//!
//! Three-tier resolution of a chemical name to a normalized hazard summary:
//! the bundled local table, then the external database (name to compound
//! identifier, then classification), then keyword inference over statement
//! text when the database exposed phrases but no machine-readable codes.
//! The first tier that produces data wins; tier 3 only augments tier 2.

use std::collections::BTreeSet;

use labstock_models::{GhsPictogram, HazardSummary};
use labstock_utils::HazardError;

use crate::pubchem::{GhsClassification, HazardSource};
use crate::table::LocalHazardTable;

/// Statement lines carrying the signal word instead of a hazard phrase.
const SIGNAL_WORD_MARKER: &str = "Signal Word:";

/// Phrase fragments mapped to the pictogram they imply, scanned against
/// lowercased statement text.
const KEYWORD_PICTOGRAMS: &[(&str, GhsPictogram)] = &[
    ("explosive", GhsPictogram::Ghs01),
    ("flammable", GhsPictogram::Ghs02),
    ("oxidiz", GhsPictogram::Ghs03),
    ("compressed gas", GhsPictogram::Ghs04),
    ("under pressure", GhsPictogram::Ghs04),
    ("corrosive", GhsPictogram::Ghs05),
    ("corrosion", GhsPictogram::Ghs05),
    ("skin burns", GhsPictogram::Ghs05),
    ("toxic", GhsPictogram::Ghs06),
    ("fatal", GhsPictogram::Ghs06),
    ("irritation", GhsPictogram::Ghs07),
    ("irritant", GhsPictogram::Ghs07),
    ("harmful", GhsPictogram::Ghs07),
    ("carcinogen", GhsPictogram::Ghs08),
    ("mutagen", GhsPictogram::Ghs08),
    ("damage to organs", GhsPictogram::Ghs08),
    ("aquatic", GhsPictogram::Ghs09),
];

/// Hazard resolution service over an external `HazardSource`.
pub struct HazardResolver<S> {
    source: S,
    table: LocalHazardTable,
}

impl<S: HazardSource> HazardResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: LocalHazardTable::new(),
        }
    }

    /// Resolve a chemical name. The only error a caller sees is
    /// `ChemicalNotFound`; transport and schema failures degrade to an
    /// unresolved summary so the UI can render its no-data state and retry.
    pub async fn resolve(&self, name: &str) -> Result<HazardSummary, HazardError> {
        // Tier 1: bundled table, no I/O.
        if let Some(summary) = self.table.lookup(name) {
            return Ok(summary);
        }

        // Tier 2: two sequential external calls. No identifier means the
        // name is unknown; the classification fetch is not attempted.
        let classification = match self.source.find_compound_id(name).await {
            Ok(Some(compound_id)) => match self.source.fetch_classification(compound_id).await {
                Ok(classification) => classification,
                Err(err) => {
                    tracing::warn!(chemical = name, error = %err, "classification fetch failed");
                    GhsClassification::default()
                }
            },
            Ok(None) => return Err(HazardError::not_found(name)),
            Err(err) => {
                tracing::warn!(chemical = name, error = %err, "compound lookup failed");
                GhsClassification::default()
            }
        };

        Ok(self.normalize(name, classification))
    }

    /// Normalize tier-2 output: pull signal-word lines out of the
    /// statements, de-duplicate, and run tier-3 keyword inference when no
    /// explicit pictogram codes came back.
    fn normalize(&self, name: &str, classification: GhsClassification) -> HazardSummary {
        let mut signal_word: Option<String> = None;
        let mut statements: Vec<String> = Vec::new();
        let mut pictogram_codes: BTreeSet<GhsPictogram> =
            classification.pictograms.into_iter().collect();

        for statement in classification.statements {
            let trimmed = statement.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(word) = trimmed.strip_prefix(SIGNAL_WORD_MARKER) {
                let word = word.trim();
                if signal_word.is_none() && !word.is_empty() {
                    signal_word = Some(word.to_string());
                }
                continue;
            }

            if !statements.iter().any(|existing| existing == trimmed) {
                statements.push(trimmed.to_string());
            }
        }

        // Tier 3: only when the database exposed phrases but no codes.
        if pictogram_codes.is_empty() && !statements.is_empty() {
            for statement in &statements {
                let lowered = statement.to_lowercase();
                for (phrase, pictogram) in KEYWORD_PICTOGRAMS {
                    if lowered.contains(phrase) {
                        pictogram_codes.insert(*pictogram);
                    }
                }
            }
        }

        let resolved = !statements.is_empty() || !pictogram_codes.is_empty();
        HazardSummary {
            chemical_name: name.to_string(),
            signal_word,
            statements,
            pictogram_codes,
            resolved,
        }
    }
}
