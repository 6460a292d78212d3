//! Genome assemblies and chromosomes
//!
//! Normalizes the UCSC catalog listings into the shapes the browser shows:
//! assemblies grouped by organism, and a clean, ordered chromosome list with
//! unplaced and alternate scaffolds removed.

use crate::api::types::UcscGenomeEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Organism label used when UCSC does not report one.
pub const UNKNOWN_ORGANISM: &str = "Other";

/// A reference genome build (e.g. `hg38`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeAssembly {
    pub id: String,
    pub name: String,
    pub source_name: String,
    pub active: bool,
}

/// Assemblies keyed by organism name
pub type AssemblyCatalog = BTreeMap<String, Vec<GenomeAssembly>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    pub name: String,
    pub size: u64,
}

/// Group raw UCSC genome entries by organism.
pub fn group_assemblies<I>(entries: I) -> AssemblyCatalog
where
    I: IntoIterator<Item = (String, UcscGenomeEntry)>,
{
    let mut catalog = AssemblyCatalog::new();

    for (id, entry) in entries {
        let organism = non_empty(entry.organism).unwrap_or_else(|| UNKNOWN_ORGANISM.to_string());
        let assembly = GenomeAssembly {
            name: non_empty(entry.description).unwrap_or_else(|| id.clone()),
            source_name: non_empty(entry.source_name).unwrap_or_else(|| id.clone()),
            active: is_truthy(&entry.active),
            id,
        };

        catalog.entry(organism).or_default().push(assembly);
    }

    catalog
}

/// `true` for names that denote unplaced, unlocalized, or alternate scaffolds
pub fn is_scaffold(name: &str) -> bool {
    name.contains('_') || name.contains("Un") || name.contains("random")
}

/// Drop scaffolds and order the rest: `chr1..chrN` numerically, then the
/// non-numeric names (`chrM`, `chrX`, `chrY`, ...) lexicographically.
pub fn normalize_chromosomes<I>(entries: I) -> Vec<Chromosome>
where
    I: IntoIterator<Item = (String, u64)>,
{
    let mut chromosomes: Vec<Chromosome> = entries
        .into_iter()
        .filter(|(name, _)| !is_scaffold(name))
        .map(|(name, size)| Chromosome { name, size })
        .collect();

    chromosomes.sort_by(|a, b| compare_chromosome_names(&a.name, &b.name));
    chromosomes
}

/// Ordering used for chromosome lists.
pub fn compare_chromosome_names(a: &str, b: &str) -> Ordering {
    let suffix_a = a.strip_prefix("chr").unwrap_or(a);
    let suffix_b = b.strip_prefix("chr").unwrap_or(b);

    match (numeric_suffix(suffix_a), numeric_suffix(suffix_b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => suffix_a.cmp(suffix_b).then_with(|| a.cmp(b)),
    }
}

fn numeric_suffix(suffix: &str) -> Option<u64> {
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Prefix a chromosome name with `chr` unless it already has it (`17` → `chr17`).
pub fn with_chr_prefix(chrom: &str) -> String {
    if chrom.starts_with("chr") {
        chrom.to_string()
    } else {
        format!("chr{}", chrom)
    }
}

/// Strip a leading `chr` in any letter case (`chr17` → `17`), as ClinVar expects.
pub fn strip_chr_prefix(chrom: &str) -> &str {
    match chrom.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &chrom[3..],
        _ => chrom,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Loose truthiness for UCSC's `active` flag, which arrives as `1`/`0`.
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
