//! Gene search and gene detail

use crate::api::client::GenomeClient;
use crate::api::endpoints;
use crate::api::types::GeneSummaryResponse;
use crate::error::{CliError, Result};
use crate::models::assembly::with_chr_prefix;
use crate::models::gene::parse_search_payload;
use crate::models::{GeneDetail, GeneSearchResponse, GeneView};
use crate::outcome::Outcome;
use serde_json::Value;
use tracing::{debug, instrument, warn};

impl GenomeClient {
    /// Search genes by symbol or free text; at most ten results.
    ///
    /// `assembly_id` is echoed in the response but does not narrow the search.
    #[instrument(skip(self))]
    pub async fn search_genes(&self, query: &str, assembly_id: &str) -> Result<GeneSearchResponse> {
        let url = endpoints::gene_search_url(&self.config.clinical_tables_url, query);
        let payload: Value = self.get_json(&url, "Clinical Tables").await?;

        let results = parse_search_payload(&payload).map_err(CliError::upstream)?;
        debug!(count = results.len(), "Gene search complete");

        Ok(GeneSearchResponse {
            query: query.to_string(),
            genome: assembly_id.to_string(),
            results,
        })
    }

    /// Genes located on one chromosome
    #[instrument(skip(self))]
    pub async fn search_genes_on_chromosome(
        &self,
        chrom: &str,
        assembly_id: &str,
    ) -> Result<GeneSearchResponse> {
        let chrom = with_chr_prefix(chrom);
        let mut response = self.search_genes(&chrom, assembly_id).await?;
        response.results.retain(|gene| gene.chrom == chrom);
        Ok(response)
    }

    /// Fetch a gene summary.
    ///
    /// Never fails: every problem ends up in [`Outcome::Unavailable`].
    #[instrument(skip(self))]
    pub async fn get_gene_detail(&self, gene_id: &str) -> Outcome<GeneView> {
        match self.fetch_gene_view(gene_id).await {
            Ok(view) => Outcome::Loaded(view),
            Err(reason) => {
                warn!(gene_id = gene_id, reason = %reason, "Gene detail unavailable");
                Outcome::unavailable(reason)
            }
        }
    }

    async fn fetch_gene_view(&self, gene_id: &str) -> std::result::Result<GeneView, String> {
        let url = endpoints::gene_summary_url(&self.config.eutils_url, gene_id);
        let response: GeneSummaryResponse = self
            .get_json(&url, "E-utilities")
            .await
            .map_err(|e| e.to_string())?;

        let entry = response
            .result
            .and_then(|mut result| result.remove(gene_id))
            .ok_or_else(|| format!("no summary returned for gene {}", gene_id))?;

        let detail: GeneDetail = serde_json::from_value(entry)
            .map_err(|e| format!("unexpected summary shape for gene {}: {}", gene_id, e))?;

        GeneView::from_detail(detail)
    }
}
