//! Gene search results and gene detail
//!
//! The Clinical Tables search API answers with a positional array:
//!
//! ```text
//! [ total, [codes...], { "GeneID": [...], ... }, [ [chromosome, Symbol, description, ...], ... ] ]
//! ```
//!
//! Display columns follow the `df` order requested by the adapter
//! (`chromosome,Symbol,description,map_location,type_of_gene`).

use crate::models::assembly::with_chr_prefix;
use genoview_common::types::{GeneBounds, SequenceRange, Strand};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on materialized search results, whatever the upstream total.
pub const MAX_SEARCH_RESULTS: usize = 10;

const COL_CHROMOSOME: usize = 0;
const COL_SYMBOL: usize = 1;
const COL_DESCRIPTION: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneSearchResult {
    pub symbol: String,
    pub name: String,
    /// Always `chr`-prefixed (empty when upstream had no chromosome)
    pub chrom: String,
    pub description: String,
    /// NCBI Gene ID, empty when unknown
    pub gene_id: String,
}

impl GeneSearchResult {
    pub fn ncbi_url(&self) -> Option<String> {
        (!self.gene_id.is_empty()).then(|| format!("https://www.ncbi.nlm.nih.gov/gene/{}", self.gene_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneSearchResponse {
    pub query: String,
    pub genome: String,
    pub results: Vec<GeneSearchResult>,
}

/// Parse the positional search payload.
///
/// Returns `Err` with a description when the payload is not the expected
/// array shape at all. Individual malformed rows are skipped.
pub fn parse_search_payload(payload: &Value) -> Result<Vec<GeneSearchResult>, String> {
    let parts = payload
        .as_array()
        .ok_or_else(|| "gene search response is not an array".to_string())?;

    let total = parts.first().and_then(as_count).unwrap_or(0);
    if total == 0 {
        return Ok(Vec::new());
    }

    let gene_ids = parts
        .get(2)
        .and_then(|fields| fields.get("GeneID"))
        .and_then(Value::as_array);

    let rows = parts.get(3).and_then(Value::as_array);
    let Some(rows) = rows else {
        return Ok(Vec::new());
    };

    let limit = MAX_SEARCH_RESULTS.min(usize::try_from(total).unwrap_or(usize::MAX));
    let mut results = Vec::with_capacity(limit);

    for (i, row) in rows.iter().enumerate().take(limit) {
        let Some(columns) = row.as_array() else {
            continue;
        };
        if columns.len() <= COL_DESCRIPTION {
            continue;
        }

        let chrom = text(&columns[COL_CHROMOSOME]);
        let description = text(&columns[COL_DESCRIPTION]);
        let gene_id = gene_ids
            .and_then(|ids| ids.get(i))
            .map(text)
            .unwrap_or_default();

        results.push(GeneSearchResult {
            symbol: text(&columns[COL_SYMBOL]),
            name: description.clone(),
            chrom: if chrom.is_empty() { chrom } else { with_chr_prefix(&chrom) },
            description,
            gene_id,
        });
    }

    Ok(results)
}

fn as_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Stringify a scalar cell; null and containers become empty.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

// ============================================================================
// Gene detail (E-utilities esummary, db=gene)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Organism {
    #[serde(default)]
    pub scientificname: String,
    #[serde(default)]
    pub commonname: String,
    #[serde(default)]
    pub taxid: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomicInfo {
    #[serde(default)]
    pub chrloc: String,
    #[serde(default)]
    pub chraccver: String,
    pub chrstart: u64,
    pub chrstop: u64,
    #[serde(default)]
    pub exoncount: Option<u64>,
    #[serde(default)]
    pub strand: Option<String>,
}

impl GenomicInfo {
    pub fn bounds(&self) -> GeneBounds {
        GeneBounds::from_unordered(self.chrstart, self.chrstop)
    }

    pub fn strand(&self) -> Option<Strand> {
        self.strand.as_deref().and_then(Strand::from_symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDetail {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub maplocation: String,
    #[serde(default)]
    pub organism: Option<Organism>,
    #[serde(default)]
    pub genomicinfo: Vec<GenomicInfo>,
}

/// A gene detail together with the coordinates derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneView {
    pub detail: GeneDetail,
    pub bounds: GeneBounds,
    pub initial_range: SequenceRange,
}

impl GeneView {
    /// Derive bounds and the default window from the first genomic-info record.
    pub fn from_detail(detail: GeneDetail) -> Result<Self, String> {
        let info = detail
            .genomicinfo
            .first()
            .ok_or_else(|| format!("gene {} has no genomic info", detail.uid))?;

        let bounds = info.bounds();
        let initial_range = SequenceRange::initial_window(&bounds);

        Ok(Self {
            detail,
            bounds,
            initial_range,
        })
    }

    pub fn is_reverse_strand(&self) -> bool {
        self.detail
            .genomicinfo
            .first()
            .and_then(GenomicInfo::strand)
            == Some(Strand::Reverse)
    }
}
