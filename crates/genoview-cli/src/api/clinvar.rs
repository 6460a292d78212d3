//! Known ClinVar variants inside a gene

use crate::api::client::GenomeClient;
use crate::api::endpoints;
use crate::api::types::{ClinvarSummaryEntry, ClinvarSummaryResponse, ESearchResponse};
use crate::error::{CliError, Result};
use crate::models::assembly::strip_chr_prefix;
use crate::models::ClinvarVariant;
use genoview_common::types::GeneBounds;
use tracing::{debug, instrument, warn};

impl GenomeClient {
    /// Search ClinVar by position, then fetch summaries for up to 20 hits.
    ///
    /// Summaries come back in the order of `result.uids`. Entries that are
    /// missing or cannot be decoded are skipped.
    #[instrument(skip(self))]
    pub async fn get_clinvar_variants(
        &self,
        chromosome: &str,
        bounds: &GeneBounds,
        assembly_id: &str,
    ) -> Result<Vec<ClinvarVariant>> {
        let term = endpoints::clinvar_search_term(chromosome, bounds, assembly_id);
        let url = endpoints::clinvar_search_url(&self.config.eutils_url, &term);
        let search: ESearchResponse = self.get_json(&url, "ClinVar search").await?;

        let ids = search
            .esearchresult
            .map(|result| result.idlist)
            .unwrap_or_default();

        if ids.is_empty() {
            debug!(term = %term, "No ClinVar variants in range");
            return Ok(Vec::new());
        }

        let url = endpoints::clinvar_summary_url(&self.config.eutils_url, &ids);
        let summary: ClinvarSummaryResponse = self.get_json(&url, "ClinVar summary").await?;

        let mut result = summary
            .result
            .ok_or_else(|| CliError::upstream("ClinVar summary is missing 'result'"))?;

        let chrom = strip_chr_prefix(chromosome);
        let mut variants = Vec::with_capacity(result.uids.len());

        for uid in &result.uids {
            let Some(raw) = result.entries.remove(uid) else {
                warn!(uid = %uid, "ClinVar summary has no entry for uid");
                continue;
            };

            match serde_json::from_value::<ClinvarSummaryEntry>(raw) {
                Ok(entry) => variants.push(ClinvarVariant::from_summary(uid, entry, chrom)),
                Err(e) => warn!(uid = %uid, error = %e, "Skipping malformed ClinVar entry"),
            }
        }

        debug!(count = variants.len(), "Loaded ClinVar variants");
        Ok(variants)
    }
}
