//! PubChem Client
//!
//! Client for the PubChem PUG and PUG-View APIs: free-text name to compound
//! identifier, then compound identifier to GHS classification. The PUG-View
//! document is deeply nested and its schema is owned by the third party, so
//! every level deserializes with defaults and extraction tolerates missing
//! or empty sections at any depth.

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use labstock_models::GhsPictogram;
use labstock_utils::{HazardDbConfig, HazardError};

/// Raw GHS data extracted from one external classification record, before
/// the resolver normalizes it into a summary. Signal words travel as
/// `"Signal Word: ..."` statement lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GhsClassification {
    pub statements: Vec<String>,
    pub pictograms: Vec<GhsPictogram>,
}

/// External chemical-hazard database, looked up by name and then by
/// compound identifier. The two calls are sequential; the second is only
/// issued once the first produced an identifier.
#[async_trait]
pub trait HazardSource: Send + Sync {
    /// Resolve a free-text chemical name to a compound identifier.
    /// `Ok(None)` means the database has no compound under that name.
    async fn find_compound_id(&self, name: &str) -> Result<Option<u64>, HazardError>;

    /// Fetch the classification record for a compound and extract its GHS
    /// content.
    async fn fetch_classification(&self, compound_id: u64)
        -> Result<GhsClassification, HazardError>;
}

/// PubChem API client
pub struct PubChemClient {
    client: Client,
    base_url: String,
}

impl PubChemClient {
    pub fn new(config: &HazardDbConfig) -> Self {
        // One timeout budget covers each of the two sequential calls.
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn name_lookup_url(&self, name: &str) -> Result<Url, HazardError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| HazardError::unavailable(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| HazardError::unavailable("hazard database URL cannot take a path"))?
            .extend(["rest", "pug", "compound", "name", name, "cids", "JSON"]);
        Ok(url)
    }
}

#[async_trait]
impl HazardSource for PubChemClient {
    async fn find_compound_id(&self, name: &str) -> Result<Option<u64>, HazardError> {
        let url = self.name_lookup_url(name)?;

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| HazardError::unavailable(e.to_string()))?;

        // PubChem answers an unknown name with 404 plus a Fault document.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(HazardError::unavailable(format!(
                "name lookup returned {}",
                response.status()
            )));
        }

        let data: CidResponse = response
            .json()
            .await
            .map_err(|e| HazardError::unavailable(e.to_string()))?;

        Ok(data.identifier_list.cids.into_iter().next())
    }

    async fn fetch_classification(
        &self,
        compound_id: u64,
    ) -> Result<GhsClassification, HazardError> {
        let url = format!(
            "{}/rest/pug_view/data/compound/{}/JSON",
            self.base_url, compound_id
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| HazardError::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HazardError::unavailable(format!(
                "classification fetch returned {}",
                response.status()
            )));
        }

        let document: PugViewResponse = response
            .json()
            .await
            .map_err(|e| HazardError::unavailable(e.to_string()))?;

        Ok(extract_classification(&document))
    }
}

/// PUG name-search response
#[derive(Debug, Default, Deserialize)]
struct CidResponse {
    #[serde(rename = "IdentifierList", default)]
    identifier_list: IdentifierList,
}

#[derive(Debug, Default, Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID", default)]
    cids: Vec<u64>,
}

/// PUG-View classification document. Only the nodes the extraction walks
/// are modeled; everything is optional because the schema drifts.
#[derive(Debug, Default, Deserialize)]
pub struct PugViewResponse {
    #[serde(rename = "Record", default)]
    pub record: PugRecord,
}

#[derive(Debug, Default, Deserialize)]
pub struct PugRecord {
    #[serde(rename = "Section", default)]
    pub sections: Vec<PugSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PugSection {
    #[serde(rename = "TOCHeading", default)]
    pub heading: String,
    #[serde(rename = "Section", default)]
    pub sections: Vec<PugSection>,
    #[serde(rename = "Information", default)]
    pub information: Vec<PugInformation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PugInformation {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Value", default)]
    pub value: PugValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct PugValue {
    #[serde(rename = "StringWithMarkup", default)]
    pub strings: Vec<PugString>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PugString {
    #[serde(rename = "String", default)]
    pub text: String,
    #[serde(rename = "Markup", default)]
    pub markup: Vec<PugMarkup>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PugMarkup {
    #[serde(rename = "URL", default)]
    pub url: String,
}

/// Walk the document's "Safety and Hazards" branch and pull out pictogram
/// codes, the signal word, and hazard statement text.
pub fn extract_classification(response: &PugViewResponse) -> GhsClassification {
    let mut classification = GhsClassification::default();

    for section in &response.record.sections {
        if section.heading == "Safety and Hazards" {
            collect_ghs(section, &mut classification);
        }
    }

    classification
}

fn collect_ghs(section: &PugSection, out: &mut GhsClassification) {
    for info in &section.information {
        // Some records key the data on Information.Name, others only on
        // the enclosing section heading.
        let key = if info.name.is_empty() {
            section.heading.as_str()
        } else {
            info.name.as_str()
        };

        if key.contains("Pictogram") {
            for string in &info.value.strings {
                out.pictograms.extend(extract_pictogram_codes(&string.text));
                for markup in &string.markup {
                    out.pictograms.extend(extract_pictogram_codes(&markup.url));
                }
            }
        } else if key.contains("Signal") {
            for string in &info.value.strings {
                let word = string.text.trim();
                if !word.is_empty() {
                    out.statements.push(format!("Signal Word: {word}"));
                }
            }
        } else if key.contains("Hazard Statements") {
            for string in &info.value.strings {
                let text = string.text.trim();
                if !text.is_empty() {
                    out.statements.push(text.to_string());
                }
            }
        }
    }

    for sub in &section.sections {
        collect_ghs(sub, out);
    }
}

/// Pictogram references arrive either as explicit codes in text or as bare
/// image URLs such as `.../images/ghs/GHS05.svg`; both carry a GHS + two
/// digit code. Codes outside GHS01..GHS09 are dropped silently.
fn extract_pictogram_codes(text: &str) -> Vec<GhsPictogram> {
    let code_pattern = Regex::new(r"(?i)GHS[0-9]{2}").unwrap();
    code_pattern
        .find_iter(text)
        .filter_map(|m| GhsPictogram::from_code(m.as_str()))
        .collect()
}
