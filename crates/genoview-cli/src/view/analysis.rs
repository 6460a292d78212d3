//! Ad hoc variant analysis form

use crate::api::{GenomeClient, PredictionRequest};
use crate::error::Result;
use crate::models::{ClinvarVariant, RefAlt, VariantPrediction};
use crate::view::request::{RequestTracker, Ticket};
use genoview_common::types::{parse_position, Nucleotide};
use tracing::{debug, warn};

pub const INVALID_POSITION_MESSAGE: &str = "Please enter a valid position number";
pub const INVALID_NUCLEOTIDE_MESSAGE: &str = "Nucleotides must be A, C, G or T";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze variant";

/// A known ClinVar variant found at the form's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownVariantMatch<'a> {
    pub variant: &'a ClinvarVariant,
    pub ref_alt: RefAlt,
    /// Further single-nucleotide variants at the same position
    pub others: usize,
}

impl KnownVariantMatch<'_> {
    pub fn warning(&self) -> Option<String> {
        (self.others > 0).then(|| {
            format!(
                "{} more known variants share this position; showing ClinVar {}",
                self.others, self.variant.clinvar_id
            )
        })
    }
}

#[derive(Debug, Default)]
pub struct VariantAnalysisForm {
    /// Raw position text; commas are accepted
    pub position: String,
    /// Always uppercase
    pub alternative: String,
    /// Reference base picked from the sequence, if any
    pub reference: Option<Nucleotide>,
    pub result: Option<VariantPrediction>,
    pub error: Option<String>,
    pub analyzing: bool,
    tracker: RequestTracker,
}

impl VariantAnalysisForm {
    /// A form whose position starts at `initial_position` (usually the gene start)
    pub fn new(initial_position: Option<u64>) -> Self {
        Self {
            position: initial_position.map(|p| p.to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Typing a new position forgets the reference base
    pub fn set_position(&mut self, text: impl Into<String>) {
        self.position = text.into();
        self.reference = None;
    }

    pub fn set_alternative(&mut self, text: &str) {
        self.alternative = text.trim().to_uppercase();
    }

    /// Fill position and reference from a base picked in the sequence view
    pub fn seed(&mut self, position: u64, reference: Nucleotide) {
        self.position = position.to_string();
        self.reference = Some(reference);
    }

    pub fn parsed_position(&self) -> Option<u64> {
        parse_position(&self.position).ok()
    }

    /// Check the inputs in the order they are shown
    pub fn validate(&self) -> std::result::Result<(u64, Nucleotide), &'static str> {
        let position = self.parsed_position().ok_or(INVALID_POSITION_MESSAGE)?;
        let alternative = self
            .alternative
            .parse::<Nucleotide>()
            .map_err(|_| INVALID_NUCLEOTIDE_MESSAGE)?;
        Ok((position, alternative))
    }

    /// Validate and start a request. On invalid input the error is set and
    /// nothing is returned.
    pub fn prepare(&mut self, genome: &str, chromosome: &str) -> Option<(Ticket, PredictionRequest)> {
        let (position, alternative) = match self.validate() {
            Ok(valid) => valid,
            Err(message) => {
                self.error = Some(message.to_string());
                return None;
            }
        };

        self.analyzing = true;
        self.error = None;

        let request = PredictionRequest {
            variant_position: position,
            alternative: alternative.to_string(),
            genome: genome.to_string(),
            chromosome: chromosome.to_string(),
        };
        Some((self.tracker.begin(), request))
    }

    /// Apply a finished request. Returns `false` when the ticket was stale.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<VariantPrediction>) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!(generation = ticket.generation(), "Dropping superseded prediction");
            return false;
        }

        self.analyzing = false;
        match outcome {
            Ok(prediction) => {
                self.result = Some(prediction);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Variant analysis failed");
                self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    pub async fn submit(&mut self, client: &GenomeClient, genome: &str, chromosome: &str) {
        let Some((ticket, request)) = self.prepare(genome, chromosome) else {
            return;
        };
        let outcome = client.analyze_variant(&request).await;
        self.finish(ticket, outcome);
    }

    /// Single-nucleotide ClinVar variants at the form's position that carry
    /// an `X>Y` token, in ClinVar order.
    pub fn known_variants_at_position<'a>(
        &self,
        variants: &'a [ClinvarVariant],
    ) -> Vec<(&'a ClinvarVariant, RefAlt)> {
        let Some(position) = self.parsed_position() else {
            return Vec::new();
        };

        variants
            .iter()
            .filter(|v| v.is_single_nucleotide() && v.position() == Some(position))
            .filter_map(|v| v.ref_alt().map(|ra| (v, ra)))
            .collect()
    }

    /// The known variant to present for the current position
    pub fn known_variant_at_position<'a>(
        &self,
        variants: &'a [ClinvarVariant],
    ) -> Option<KnownVariantMatch<'a>> {
        let matches = self.known_variants_at_position(variants);
        let (variant, ref_alt) = *matches.first()?;

        if matches.len() > 1 {
            warn!(
                position = %self.position,
                count = matches.len(),
                "Several known variants at one position"
            );
        }

        Some(KnownVariantMatch {
            variant,
            ref_alt,
            others: matches.len() - 1,
        })
    }

    /// Copy a known variant's alternative into the form
    pub fn use_known_variant(&mut self, known: &KnownVariantMatch<'_>) {
        self.alternative = known.ref_alt.alternative.to_ascii_uppercase().to_string();
    }
}
