//! Local Hazard Table
//!
//! Bundled GHS data for common lab chemicals. Lookups are exact matches on
//! the trimmed, lowercased name; this tier never performs network I/O and
//! never fails.

use std::collections::{BTreeSet, HashMap};

use labstock_models::{GhsPictogram, HazardSummary};

struct StoredHazard {
    signal_word: &'static str,
    statements: &'static [&'static str],
    pictograms: &'static [GhsPictogram],
}

/// Static name-to-hazard mapping for chemicals the stockroom always carries.
pub struct LocalHazardTable {
    entries: HashMap<String, StoredHazard>,
}

impl LocalHazardTable {
    pub fn new() -> Self {
        use GhsPictogram::*;

        let known: Vec<(&str, StoredHazard)> = vec![
            (
                "hydrochloric acid",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H290 - May be corrosive to metals",
                        "H314 - Causes severe skin burns and eye damage",
                        "H335 - May cause respiratory irritation",
                    ],
                    pictograms: &[Ghs05, Ghs07],
                },
            ),
            (
                "sulfuric acid",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &["H314 - Causes severe skin burns and eye damage"],
                    pictograms: &[Ghs05],
                },
            ),
            (
                "nitric acid",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H272 - May intensify fire; oxidizer",
                        "H314 - Causes severe skin burns and eye damage",
                    ],
                    pictograms: &[Ghs03, Ghs05],
                },
            ),
            (
                "sodium hydroxide",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H290 - May be corrosive to metals",
                        "H314 - Causes severe skin burns and eye damage",
                    ],
                    pictograms: &[Ghs05],
                },
            ),
            (
                "acetone",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H225 - Highly flammable liquid and vapour",
                        "H319 - Causes serious eye irritation",
                        "H336 - May cause drowsiness or dizziness",
                    ],
                    pictograms: &[Ghs02, Ghs07],
                },
            ),
            (
                "ethanol",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H225 - Highly flammable liquid and vapour",
                        "H319 - Causes serious eye irritation",
                    ],
                    pictograms: &[Ghs02, Ghs07],
                },
            ),
            (
                "methanol",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H225 - Highly flammable liquid and vapour",
                        "H301 - Toxic if swallowed",
                        "H370 - Causes damage to organs",
                    ],
                    pictograms: &[Ghs02, Ghs06, Ghs08],
                },
            ),
            (
                "toluene",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H225 - Highly flammable liquid and vapour",
                        "H304 - May be fatal if swallowed and enters airways",
                        "H336 - May cause drowsiness or dizziness",
                    ],
                    pictograms: &[Ghs02, Ghs07, Ghs08],
                },
            ),
            (
                "hydrogen peroxide",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H271 - May cause fire or explosion; strong oxidizer",
                        "H314 - Causes severe skin burns and eye damage",
                    ],
                    pictograms: &[Ghs03, Ghs05],
                },
            ),
            (
                "ammonium hydroxide",
                StoredHazard {
                    signal_word: "Danger",
                    statements: &[
                        "H314 - Causes severe skin burns and eye damage",
                        "H400 - Very toxic to aquatic life",
                    ],
                    pictograms: &[Ghs05, Ghs09],
                },
            ),
        ];

        let mut entries = HashMap::new();
        for (name, hazard) in known {
            entries.insert(name.to_string(), hazard);
        }

        Self { entries }
    }

    /// Case-insensitive, whitespace-trimmed exact match.
    pub fn lookup(&self, name: &str) -> Option<HazardSummary> {
        let key = name.trim().to_lowercase();
        self.entries.get(&key).map(|entry| HazardSummary {
            chemical_name: name.to_string(),
            signal_word: Some(entry.signal_word.to_string()),
            statements: entry.statements.iter().map(|s| s.to_string()).collect(),
            pictogram_codes: entry.pictograms.iter().copied().collect::<BTreeSet<_>>(),
            resolved: true,
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for LocalHazardTable {
    fn default() -> Self {
        Self::new()
    }
}
