//! ClinVar variants and variant-effect predictions

use crate::api::types::ClinvarSummaryEntry;
use genoview_common::types::{format_position, parse_position, Nucleotide};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Label used when ClinVar omits a classification or variant type.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[allow(clippy::expect_used)]
static REF_ALT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)>(\w)").expect("ref/alt pattern is valid"));

/// Reference and alternative bases pulled out of a variant title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefAlt {
    pub reference: char,
    pub alternative: char,
}

impl RefAlt {
    /// The alternative as a base the prediction endpoint accepts
    pub fn alternative_nucleotide(&self) -> Option<Nucleotide> {
        Nucleotide::from_char(self.alternative)
    }
}

/// Find the first `X>Y` token in a free-text title.
///
/// `"NM_007294.4:c.5339T>C"` gives `T`/`C`. Titles without such a token
/// (deletions, duplications, copy-number changes) give `None`.
pub fn extract_ref_alt(title: &str) -> Option<RefAlt> {
    let captures = REF_ALT_PATTERN.captures(title)?;
    let reference = captures.get(1)?.as_str().chars().next()?;
    let alternative = captures.get(2)?.as_str().chars().next()?;

    Some(RefAlt {
        reference,
        alternative,
    })
}

/// Title-case each space-separated word (`"single nucleotide variant"` →
/// `"Single Nucleotide Variant"`).
pub fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Format ClinVar's `location_sort` the way positions are displayed.
///
/// Leading digits are read like an integer parse (`"00043044295"` →
/// `"43,044,295"`); anything without leading digits is "Unknown".
pub fn format_location(location_sort: Option<&str>) -> String {
    let Some(raw) = location_sort else {
        return UNKNOWN_LABEL.to_string();
    };

    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits
        .parse::<u64>()
        .map(format_position)
        .unwrap_or_else(|_| UNKNOWN_LABEL.to_string())
}

// ============================================================================
// Predictions
// ============================================================================

/// Response of the variant-effect prediction endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantPrediction {
    pub position: u64,
    pub reference: String,
    pub alternative: String,
    /// Delta likelihood score; negative values indicate loss of function
    pub delta_score: f64,
    pub prediction: String,
    /// Fraction in `[0, 1]` as reported; see [`Self::confidence_percent`]
    pub classification_confidence: f64,
}

impl VariantPrediction {
    /// Confidence as a whole percentage, clamped to 0..=100
    pub fn confidence_percent(&self) -> u8 {
        confidence_percent(self.classification_confidence)
    }

    pub fn is_pathogenic(&self) -> bool {
        self.prediction.to_lowercase().contains("pathogenic")
    }

    pub fn effect_description(&self) -> &'static str {
        if self.delta_score < 0.0 {
            "Negative score indicates loss of function"
        } else {
            "Positive score indicates gain or neutral function"
        }
    }
}

pub fn confidence_percent(confidence: f64) -> u8 {
    if confidence.is_nan() {
        return 0;
    }
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

// ============================================================================
// ClinVar variants
// ============================================================================

/// Progress of a prediction attached to a ClinVar row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Idle,
    Analyzing,
    Predicted(VariantPrediction),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinvarVariant {
    pub clinvar_id: String,
    pub title: String,
    pub variation_type: String,
    pub classification: String,
    pub gene_sort: String,
    /// Chromosome without the `chr` prefix, as queried
    pub chromosome: String,
    /// Thousands-separated position, or "Unknown"
    pub location: String,
    #[serde(default)]
    pub analysis: AnalysisState,
}

impl ClinvarVariant {
    pub fn from_summary(id: &str, entry: ClinvarSummaryEntry, chromosome: &str) -> Self {
        let obj_type = entry
            .obj_type
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

        let classification = entry
            .germline_classification
            .and_then(|c| c.description)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

        Self {
            clinvar_id: id.to_string(),
            title: entry.title.unwrap_or_default(),
            variation_type: title_case(&obj_type),
            classification,
            gene_sort: entry.gene_sort.unwrap_or_default(),
            chromosome: chromosome.to_string(),
            location: format_location(entry.location_sort.as_deref()),
            analysis: AnalysisState::Idle,
        }
    }

    pub fn is_single_nucleotide(&self) -> bool {
        self.variation_type
            .to_lowercase()
            .contains("single nucleotide")
    }

    pub fn ref_alt(&self) -> Option<RefAlt> {
        extract_ref_alt(&self.title)
    }

    /// Numeric position parsed back from the display location
    pub fn position(&self) -> Option<u64> {
        parse_position(&self.location).ok()
    }

    /// Whether a prediction can be requested for this row: a single-nucleotide
    /// variant with a known position and an `X>Y` token whose alternative is a
    /// plain base.
    pub fn is_analyzable(&self) -> bool {
        self.is_single_nucleotide()
            && self.position().is_some()
            && self
                .ref_alt()
                .and_then(|ra| ra.alternative_nucleotide())
                .is_some()
    }

    pub fn prediction(&self) -> Option<&VariantPrediction> {
        match &self.analysis {
            AnalysisState::Predicted(prediction) => Some(prediction),
            _ => None,
        }
    }

    pub fn clinvar_url(&self) -> String {
        format!(
            "https://www.ncbi.nlm.nih.gov/clinvar/variation/{}",
            self.clinvar_id
        )
    }
}

/// A ClinVar classification set side by side with a model prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantComparison {
    pub variant: ClinvarVariant,
    pub prediction: VariantPrediction,
}

impl VariantComparison {
    /// Only variants that carry a prediction can be compared
    pub fn from_variant(variant: &ClinvarVariant) -> Option<Self> {
        let prediction = variant.prediction()?.clone();
        Some(Self {
            variant: variant.clone(),
            prediction,
        })
    }

    pub fn agrees(&self) -> bool {
        self.variant.classification.to_lowercase() == self.prediction.prediction.to_lowercase()
    }

    pub fn verdict(&self) -> &'static str {
        if self.agrees() {
            "Prediction agrees with ClinVar classification"
        } else {
            "Prediction differs from ClinVar classification"
        }
    }
}
