//! Upstream request and response types
//!
//! Field names mirror the third-party payloads exactly. Everything optional
//! upstream is `Option` here so that shape problems surface in the adapters
//! with a useful message instead of a bare decode error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// UCSC genome browser API
// ============================================================================

/// `GET /list/ucscGenomes`
#[derive(Debug, Clone, Deserialize)]
pub struct UcscGenomesResponse {
    #[serde(rename = "ucscGenomes")]
    pub ucsc_genomes: Option<BTreeMap<String, UcscGenomeEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UcscGenomeEntry {
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "sourceName")]
    pub source_name: Option<String>,
    /// `1`/`0` upstream; coerced to a bool during normalization
    #[serde(default)]
    pub active: Value,
}

/// `GET /list/chromosomes?genome=...`
#[derive(Debug, Clone, Deserialize)]
pub struct UcscChromosomesResponse {
    pub chromosomes: Option<BTreeMap<String, u64>>,
}

/// `GET /getData/sequence?genome=...;chrom=...;start=...;end=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UcscSequenceResponse {
    #[serde(default)]
    pub dna: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// NCBI E-utilities
// ============================================================================

/// `GET esummary.fcgi?db=gene`: entries are keyed by gene id next to `uids`
#[derive(Debug, Clone, Deserialize)]
pub struct GeneSummaryResponse {
    pub result: Option<serde_json::Map<String, Value>>,
}

/// `GET esearch.fcgi?db=clinvar`
#[derive(Debug, Clone, Deserialize)]
pub struct ESearchResponse {
    pub esearchresult: Option<ESearchResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ESearchResult {
    #[serde(default)]
    pub idlist: Vec<String>,
}

/// `GET esummary.fcgi?db=clinvar`
#[derive(Debug, Clone, Deserialize)]
pub struct ClinvarSummaryResponse {
    pub result: Option<ClinvarSummaryResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClinvarSummaryResult {
    #[serde(default)]
    pub uids: Vec<String>,
    #[serde(flatten)]
    pub entries: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClinvarSummaryEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub obj_type: Option<String>,
    #[serde(default)]
    pub germline_classification: Option<GermlineClassification>,
    #[serde(default)]
    pub gene_sort: Option<String>,
    #[serde(default)]
    pub location_sort: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GermlineClassification {
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Variant-effect prediction endpoint
// ============================================================================

/// Body of the prediction `POST`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub variant_position: u64,
    pub alternative: String,
    pub genome: String,
    pub chromosome: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_request_wire_names() {
        let request = PredictionRequest {
            variant_position: 43_057_063,
            alternative: "C".into(),
            genome: "hg38".into(),
            chromosome: "chr17".into(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "variant_position": 43057063,
                "alternative": "C",
                "genome": "hg38",
                "chromosome": "chr17"
            })
        );
    }

    #[test]
    fn test_clinvar_summary_keeps_entries_beside_uids() {
        let payload = json!({
            "result": {
                "uids": ["2", "1"],
                "1": { "title": "one" },
                "2": { "title": "two", "obj_type": "single nucleotide variant" }
            }
        });

        let response: ClinvarSummaryResponse = serde_json::from_value(payload).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result.uids, vec!["2", "1"]);
        assert!(result.entries.contains_key("1"));
        assert!(result.entries.contains_key("2"));
    }

    #[test]
    fn test_genome_entry_source_name() {
        let entry: UcscGenomeEntry =
            serde_json::from_value(json!({ "sourceName": "GRCh37", "active": 1 })).unwrap();
        assert_eq!(entry.source_name.as_deref(), Some("GRCh37"));
        assert_eq!(entry.active, json!(1));
        assert!(entry.organism.is_none());
    }
}
