//! Per-gene session: detail, sequence window, ClinVar variants and analysis
//!
//! Each panel owns its own error slot and request tracker, so a failure in
//! one panel never clears another.

use crate::api::{GenomeClient, PredictionRequest};
use crate::error::Result;
use crate::models::{
    AnalysisState, ClinvarVariant, GeneSearchResult, GeneView, RefAlt, SequenceData,
    VariantComparison, VariantPrediction,
};
use crate::outcome::Outcome;
use crate::view::analysis::VariantAnalysisForm;
use crate::view::request::{Panel, Ticket};
use genoview_common::types::{
    format_position, parse_position, GeneBounds, Nucleotide, SequenceRange, MAX_VIEW_RANGE,
};
use tracing::{debug, instrument, warn};

pub const MISSING_GENE_ID_MESSAGE: &str = "Gene ID is missing, cannot fetch details";
pub const INVALID_RANGE_INPUT_MESSAGE: &str = "Please enter valid start and end positions";
pub const START_NOT_BEFORE_END_MESSAGE: &str = "Start position must be less than end position";
pub const SEQUENCE_FAILED_MESSAGE: &str = "Failed to load sequence data";
pub const CLINVAR_FAILED_MESSAGE: &str = "Failed to fetch ClinVar variants";

/// Check typed range inputs against the gene bounds.
///
/// Bound checks only run when bounds are known. The span check always runs,
/// after them, and replaces their message.
pub fn validate_range(
    start: &str,
    end: &str,
    bounds: Option<&GeneBounds>,
) -> std::result::Result<SequenceRange, String> {
    let (Ok(start), Ok(end)) = (parse_position(start), parse_position(end)) else {
        return Err(INVALID_RANGE_INPUT_MESSAGE.to_string());
    };

    if start >= end {
        return Err(START_NOT_BEFORE_END_MESSAGE.to_string());
    }

    let range = SequenceRange::new(start, end);

    let mut error = None;
    if let Some(bounds) = bounds {
        if start < bounds.min {
            error = Some(format!(
                "Start position ({}) is below the minimum value ({})",
                format_position(start),
                format_position(bounds.min)
            ));
        } else if end > bounds.max {
            error = Some(format!(
                "End position ({}) exceeds the maximum value ({})",
                format_position(end),
                format_position(bounds.max)
            ));
        }
    }

    if range.span() > MAX_VIEW_RANGE {
        error = Some(format!(
            "Selected range exceeds maximum view range of {} bp.",
            format_position(MAX_VIEW_RANGE)
        ));
    }

    match error {
        Some(message) => Err(message),
        None => Ok(range),
    }
}

#[derive(Debug)]
pub struct GeneViewer {
    pub gene: GeneSearchResult,
    pub genome: String,
    pub detail: Panel<Outcome<GeneView>>,
    pub start_input: String,
    pub end_input: String,
    pub sequence: Panel<SequenceData>,
    pub clinvar: Panel<Vec<ClinvarVariant>>,
    pub analysis: VariantAnalysisForm,
    /// Open after a known variant has been analyzed
    pub comparison: Option<VariantComparison>,
}

impl GeneViewer {
    pub fn new(gene: GeneSearchResult, genome: impl Into<String>) -> Self {
        Self {
            gene,
            genome: genome.into(),
            detail: Panel::new("detail"),
            start_input: String::new(),
            end_input: String::new(),
            sequence: Panel::new("sequence"),
            clinvar: Panel::new("clinvar"),
            analysis: VariantAnalysisForm::new(None),
            comparison: None,
        }
    }

    pub fn view(&self) -> Option<&GeneView> {
        self.detail.data.as_ref()?.as_ref().into_option()
    }

    pub fn bounds(&self) -> Option<&GeneBounds> {
        self.view().map(|view| &view.bounds)
    }

    pub fn variants(&self) -> &[ClinvarVariant] {
        self.clinvar.data.as_deref().unwrap_or_default()
    }

    /// Load the detail, seed the range inputs and fetch the initial window
    #[instrument(skip(self, client), fields(gene = %self.gene.symbol))]
    pub async fn initialize(&mut self, client: &GenomeClient) {
        if self.gene.gene_id.is_empty() {
            self.sequence.fail(MISSING_GENE_ID_MESSAGE);
            return;
        }

        let ticket = self.detail.begin();
        let outcome = client.get_gene_detail(&self.gene.gene_id).await;
        if let Some(range) = self.apply_detail(ticket, outcome) {
            self.fetch_sequence(client, range).await;
        }
    }

    /// Store a detail outcome. Returns the initial window when one is known.
    pub fn apply_detail(&mut self, ticket: Ticket, outcome: Outcome<GeneView>) -> Option<SequenceRange> {
        let range = match &outcome {
            Outcome::Loaded(view) => Some(view.initial_range),
            Outcome::Unavailable { .. } => None,
        };

        if !self.detail.finish(ticket, Ok(outcome)) {
            return None;
        }

        if let Some(min) = self.bounds().map(|bounds| bounds.min) {
            self.analysis = VariantAnalysisForm::new(Some(min));
        }

        let range = range?;
        self.start_input = range.start.to_string();
        self.end_input = range.end.to_string();
        Some(range)
    }

    /// Validate the range inputs and fetch that window
    pub async fn load_sequence(&mut self, client: &GenomeClient) {
        match validate_range(&self.start_input, &self.end_input, self.bounds()) {
            Ok(range) => self.fetch_sequence(client, range).await,
            Err(message) => self.sequence.fail(message),
        }
    }

    pub async fn fetch_sequence(&mut self, client: &GenomeClient, range: SequenceRange) {
        let ticket = self.sequence.begin();
        let result = client
            .get_sequence(&self.gene.chrom, range.start, range.end, &self.genome)
            .await;
        self.apply_sequence(ticket, result);
    }

    /// Store a sequence result. An upstream-declared error is shown in the
    /// panel next to the (empty) sequence.
    pub fn apply_sequence(&mut self, ticket: Ticket, result: Result<SequenceData>) -> bool {
        match result {
            Ok(data) => {
                let upstream_error = data.error.clone();
                let applied = self.sequence.finish(ticket, Ok(data));
                if applied {
                    self.sequence.error = upstream_error;
                }
                applied
            }
            Err(e) => {
                warn!(error = %e, "Sequence fetch failed");
                self.sequence
                    .finish(ticket, Err(SEQUENCE_FAILED_MESSAGE.to_string()))
            }
        }
    }

    /// Reload known variants for the gene bounds. Needs a chromosome and bounds.
    pub async fn refresh_variants(&mut self, client: &GenomeClient) {
        let Some(bounds) = self.bounds().copied() else {
            debug!("No gene bounds yet, skipping ClinVar refresh");
            return;
        };
        if self.gene.chrom.is_empty() {
            debug!("No chromosome, skipping ClinVar refresh");
            return;
        }

        let ticket = self.clinvar.begin();
        let result = client
            .get_clinvar_variants(&self.gene.chrom, &bounds, &self.genome)
            .await;
        self.apply_variants(ticket, result);
    }

    /// Store a ClinVar result. A failure empties the list.
    pub fn apply_variants(&mut self, ticket: Ticket, result: Result<Vec<ClinvarVariant>>) -> bool {
        match result {
            Ok(variants) => self.clinvar.finish(ticket, Ok(variants)),
            Err(e) => {
                warn!(error = %e, "ClinVar fetch failed");
                let applied = self
                    .clinvar
                    .finish(ticket, Err(CLINVAR_FAILED_MESSAGE.to_string()));
                if applied {
                    self.clinvar.data = Some(Vec::new());
                }
                applied
            }
        }
    }

    /// Mark a known variant as analyzing and build its request. `None` when
    /// the variant is unknown or cannot be analyzed.
    pub fn begin_known_analysis(&mut self, clinvar_id: &str) -> Option<PredictionRequest> {
        let chromosome = self.gene.chrom.clone();
        let genome = self.genome.clone();
        let variant = self
            .clinvar
            .data
            .as_mut()?
            .iter_mut()
            .find(|v| v.clinvar_id == clinvar_id)?;

        if !variant.is_analyzable() || variant.analysis == AnalysisState::Analyzing {
            debug!(clinvar_id = clinvar_id, "Variant is not analyzable");
            return None;
        }

        let position = variant.position()?;
        let alternative = variant.ref_alt()?.alternative_nucleotide()?;
        variant.analysis = AnalysisState::Analyzing;

        Some(PredictionRequest {
            variant_position: position,
            alternative: alternative.to_string(),
            genome,
            chromosome,
        })
    }

    /// Record the outcome for a known variant. Success opens the comparison.
    pub fn finish_known_analysis(&mut self, clinvar_id: &str, outcome: Result<VariantPrediction>) {
        let Some(variant) = self
            .clinvar
            .data
            .as_mut()
            .and_then(|variants| variants.iter_mut().find(|v| v.clinvar_id == clinvar_id))
        else {
            debug!(clinvar_id = clinvar_id, "Variant list changed, dropping prediction");
            return;
        };

        match outcome {
            Ok(prediction) => {
                variant.analysis = AnalysisState::Predicted(prediction);
                self.comparison = VariantComparison::from_variant(variant);
            }
            Err(e) => {
                warn!(clinvar_id = clinvar_id, error = %e, "Known variant analysis failed");
                variant.analysis = AnalysisState::Failed(e.to_string());
            }
        }
    }

    pub async fn analyze_known_variant(&mut self, client: &GenomeClient, clinvar_id: &str) {
        let Some(request) = self.begin_known_analysis(clinvar_id) else {
            return;
        };
        let outcome = client.analyze_variant(&request).await;
        self.finish_known_analysis(clinvar_id, outcome);
    }

    /// Open the comparison for an already analyzed variant
    pub fn show_comparison(&mut self, clinvar_id: &str) -> Option<&VariantComparison> {
        let variant = self.variants().iter().find(|v| v.clinvar_id == clinvar_id)?;
        let comparison = VariantComparison::from_variant(variant)?;
        self.comparison = Some(comparison);
        self.comparison.as_ref()
    }

    pub fn close_comparison(&mut self) {
        self.comparison = None;
    }

    /// A base was picked in the sequence view
    pub fn select_position(&mut self, position: u64, nucleotide: Nucleotide) {
        self.analysis.seed(position, nucleotide);
    }

    /// Take the alternative of the known variant at the form's position.
    /// Returns the adopted change, if there was one.
    pub fn adopt_known_variant(&mut self) -> Option<RefAlt> {
        let variants = self.clinvar.data.as_deref().unwrap_or_default();
        let known = self.analysis.known_variant_at_position(variants)?;
        self.analysis.use_known_variant(&known);
        Some(known.ref_alt)
    }

    pub async fn submit_analysis(&mut self, client: &GenomeClient) {
        let chromosome = self.gene.chrom.clone();
        let genome = self.genome.clone();
        self.analysis.submit(client, &genome, &chromosome).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::models::GeneDetail;
    use serde_json::json;

    const MIN: u64 = 43_044_295;
    const MAX: u64 = 43_125_483;

    fn gene(gene_id: &str) -> GeneSearchResult {
        GeneSearchResult {
            symbol: "BRCA1".into(),
            name: "BRCA1 DNA repair associated".into(),
            chrom: "chr17".into(),
            description: "BRCA1 DNA repair associated".into(),
            gene_id: gene_id.into(),
        }
    }

    fn gene_view() -> GeneView {
        let detail: GeneDetail = serde_json::from_value(json!({
            "uid": "672",
            "name": "BRCA1",
            "genomicinfo": [{ "chrloc": "17", "chrstart": MAX, "chrstop": MIN }]
        }))
        .unwrap();
        GeneView::from_detail(detail).unwrap()
    }

    fn loaded_viewer() -> GeneViewer {
        let mut viewer = GeneViewer::new(gene("672"), "hg38");
        let ticket = viewer.detail.begin();
        viewer.apply_detail(ticket, Outcome::Loaded(gene_view()));
        viewer
    }

    fn snv(id: &str, title: &str) -> ClinvarVariant {
        ClinvarVariant {
            clinvar_id: id.into(),
            title: title.into(),
            variation_type: "Single Nucleotide Variant".into(),
            classification: "Pathogenic".into(),
            gene_sort: "BRCA1".into(),
            chromosome: "17".into(),
            location: "43,057,063".into(),
            analysis: AnalysisState::Idle,
        }
    }

    fn prediction(label: &str) -> VariantPrediction {
        VariantPrediction {
            position: 43_057_063,
            reference: "T".into(),
            alternative: "C".into(),
            delta_score: -0.0031,
            prediction: label.into(),
            classification_confidence: 0.92,
        }
    }

    #[test]
    fn test_range_validation_messages() {
        let bounds = GeneBounds::from_unordered(MIN, MAX);

        assert_eq!(
            validate_range("abc", "100", Some(&bounds)).unwrap_err(),
            INVALID_RANGE_INPUT_MESSAGE
        );
        assert_eq!(
            validate_range("200", "200", Some(&bounds)).unwrap_err(),
            START_NOT_BEFORE_END_MESSAGE
        );
        assert_eq!(
            validate_range("43044000", "43045000", Some(&bounds)).unwrap_err(),
            "Start position (43,044,000) is below the minimum value (43,044,295)"
        );
        assert_eq!(
            validate_range("43125000", "43126000", Some(&bounds)).unwrap_err(),
            "End position (43,126,000) exceeds the maximum value (43,125,483)"
        );
        assert_eq!(
            validate_range("43044295", "43054296", Some(&bounds)).unwrap_err(),
            "Selected range exceeds maximum view range of 10,000 bp."
        );
    }

    #[test]
    fn test_span_check_overrides_bound_message() {
        let bounds = GeneBounds::from_unordered(MIN, MAX);
        let err = validate_range("43000000", "43100000", Some(&bounds)).unwrap_err();
        assert_eq!(err, "Selected range exceeds maximum view range of 10,000 bp.");
    }

    #[test]
    fn test_range_validation_accepts_valid_window() {
        let bounds = GeneBounds::from_unordered(MIN, MAX);
        let range = validate_range("43,044,295", "43054295", Some(&bounds)).unwrap();
        assert_eq!(range, SequenceRange::new(MIN, MIN + 10_000));

        // Without bounds the span cap still applies
        assert!(validate_range("1", "10001", None).is_ok());
        assert_eq!(
            validate_range("1", "50000", None).unwrap_err(),
            "Selected range exceeds maximum view range of 10,000 bp."
        );
    }

    #[test]
    fn test_detail_seeds_inputs_and_form() {
        let viewer = loaded_viewer();
        assert_eq!(viewer.start_input, MIN.to_string());
        assert_eq!(viewer.end_input, (MIN + 10_000).to_string());
        assert_eq!(viewer.analysis.position, MIN.to_string());
        assert_eq!(viewer.bounds().unwrap().max, MAX);
    }

    #[test]
    fn test_unavailable_detail_leaves_inputs_empty() {
        let mut viewer = GeneViewer::new(gene("672"), "hg38");
        let ticket = viewer.detail.begin();
        let range = viewer.apply_detail(ticket, Outcome::unavailable("no genomic info"));

        assert!(range.is_none());
        assert!(viewer.start_input.is_empty());
        assert!(viewer.bounds().is_none());
        assert!(viewer.sequence.error.is_none());
    }

    #[tokio::test]
    async fn test_oversized_range_rejected_without_bounds() {
        let client = GenomeClient::new(crate::config::Config::with_single_base("http://127.0.0.1:9")).unwrap();
        let mut viewer = GeneViewer::new(gene("672"), "hg38");
        let ticket = viewer.detail.begin();
        viewer.apply_detail(ticket, Outcome::unavailable("esummary returned 500"));

        viewer.start_input = "1".into();
        viewer.end_input = "50001".into();
        viewer.load_sequence(&client).await;

        assert_eq!(
            viewer.sequence.error.as_deref(),
            Some("Selected range exceeds maximum view range of 10,000 bp.")
        );
        assert!(viewer.sequence.data.is_none());
    }

    #[tokio::test]
    async fn test_missing_gene_id_fails_fast() {
        let client = GenomeClient::new(crate::config::Config::with_single_base("http://127.0.0.1:9")).unwrap();
        let mut viewer = GeneViewer::new(gene(""), "hg38");
        viewer.initialize(&client).await;

        assert_eq!(viewer.sequence.error.as_deref(), Some(MISSING_GENE_ID_MESSAGE));
        assert!(viewer.detail.data.is_none());
    }

    #[test]
    fn test_stale_sequence_is_ignored() {
        let mut viewer = loaded_viewer();
        let range = SequenceRange::new(MIN, MIN + 3);
        let old = viewer.sequence.begin();
        let new = viewer.sequence.begin();

        let fresh = SequenceData {
            sequence: "ACGT".into(),
            actual_range: range,
            error: None,
        };
        assert!(viewer.apply_sequence(new, Ok(fresh)));
        assert!(!viewer.apply_sequence(old, Ok(SequenceData::failed(range, "late"))));
        assert_eq!(viewer.sequence.data.as_ref().unwrap().sequence, "ACGT");
        assert!(viewer.sequence.error.is_none());
    }

    #[test]
    fn test_upstream_sequence_error_is_shown() {
        let mut viewer = loaded_viewer();
        let ticket = viewer.sequence.begin();
        let range = SequenceRange::new(1, 10);
        viewer.apply_sequence(ticket, Ok(SequenceData::failed(range, "chrom not found")));

        assert_eq!(viewer.sequence.error.as_deref(), Some("chrom not found"));
        assert!(viewer.sequence.data.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_clinvar_failure_keeps_sequence_panel() {
        let mut viewer = loaded_viewer();
        let ticket = viewer.sequence.begin();
        let range = SequenceRange::new(MIN, MIN + 3);
        viewer.apply_sequence(
            ticket,
            Ok(SequenceData {
                sequence: "ACGT".into(),
                actual_range: range,
                error: None,
            }),
        );

        let ticket = viewer.clinvar.begin();
        viewer.apply_variants(ticket, Err(CliError::upstream("ClinVar search returned 500")));

        assert_eq!(viewer.clinvar.error.as_deref(), Some(CLINVAR_FAILED_MESSAGE));
        assert!(viewer.variants().is_empty());
        assert!(viewer.sequence.error.is_none());
        assert_eq!(viewer.sequence.data.as_ref().unwrap().sequence, "ACGT");
    }

    #[test]
    fn test_range_error_keeps_clinvar_panel() {
        let mut viewer = loaded_viewer();
        let ticket = viewer.clinvar.begin();
        viewer.apply_variants(ticket, Ok(vec![snv("1", "c.5339T>C")]));

        viewer.sequence.fail(START_NOT_BEFORE_END_MESSAGE);
        assert_eq!(viewer.variants().len(), 1);
        assert!(viewer.clinvar.error.is_none());
    }

    #[test]
    fn test_known_variant_analysis_lifecycle() {
        let mut viewer = loaded_viewer();
        let ticket = viewer.clinvar.begin();
        viewer.apply_variants(ticket, Ok(vec![snv("1", "c.5339T>C"), snv("2", "c.68_69del")]));

        assert!(viewer.begin_known_analysis("2").is_none());
        assert!(viewer.begin_known_analysis("missing").is_none());

        let request = viewer.begin_known_analysis("1").unwrap();
        assert_eq!(request.variant_position, 43_057_063);
        assert_eq!(request.alternative, "C");
        assert_eq!(request.chromosome, "chr17");
        assert_eq!(viewer.variants()[0].analysis, AnalysisState::Analyzing);

        // Already in flight
        assert!(viewer.begin_known_analysis("1").is_none());

        viewer.finish_known_analysis("1", Ok(prediction("Pathogenic")));
        assert!(viewer.variants()[0].prediction().is_some());
        assert!(viewer.comparison.as_ref().unwrap().agrees());

        viewer.close_comparison();
        assert!(viewer.show_comparison("1").is_some());
    }

    #[test]
    fn test_adopt_known_variant_fills_alternative() {
        let mut viewer = loaded_viewer();
        let ticket = viewer.clinvar.begin();
        viewer.apply_variants(ticket, Ok(vec![snv("1", "c.5339T>C")]));

        viewer.analysis.set_position("43,057,063");
        let change = viewer.adopt_known_variant().unwrap();
        assert_eq!(change.alternative, 'C');
        assert_eq!(viewer.analysis.alternative, "C");

        let (_, request) = viewer.analysis.prepare("hg38", "chr17").unwrap();
        assert_eq!(request.variant_position, 43_057_063);
        assert_eq!(request.alternative, "C");

        viewer.analysis.set_position("43057064");
        assert!(viewer.adopt_known_variant().is_none());
    }

    #[test]
    fn test_known_variant_failure_is_recorded() {
        let mut viewer = loaded_viewer();
        let ticket = viewer.clinvar.begin();
        viewer.apply_variants(ticket, Ok(vec![snv("1", "c.5339T>C")]));

        viewer.begin_known_analysis("1").unwrap();
        viewer.finish_known_analysis("1", Err(CliError::analysis("model offline")));

        match &viewer.variants()[0].analysis {
            AnalysisState::Failed(msg) => assert!(msg.contains("model offline")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(viewer.comparison.is_none());
    }

    #[test]
    fn test_select_position_seeds_form() {
        let mut viewer = loaded_viewer();
        viewer.select_position(43_050_000, Nucleotide::A);
        assert_eq!(viewer.analysis.position, "43050000");
        assert_eq!(viewer.analysis.reference, Some(Nucleotide::A));
    }
}
