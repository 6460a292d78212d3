//! UCSC DNA windows

use crate::api::client::GenomeClient;
use crate::api::endpoints;
use crate::api::types::UcscSequenceResponse;
use crate::error::{CliError, Result};
use crate::models::assembly::with_chr_prefix;
use crate::models::SequenceData;
use genoview_common::types::SequenceRange;
use tracing::{debug, instrument, warn};

impl GenomeClient {
    /// Fetch the 1-based inclusive window `[start, end]`.
    ///
    /// The status code is not inspected: UCSC reports bad chromosomes and
    /// ranges in an `error` field, which lands in [`SequenceData::error`].
    /// Windows over 10,000 bp are rejected before any request. Transport
    /// failures and non-JSON bodies are errors.
    #[instrument(skip(self))]
    pub async fn get_sequence(
        &self,
        chromosome: &str,
        start: u64,
        end: u64,
        assembly_id: &str,
    ) -> Result<SequenceData> {
        let range = SequenceRange::new(start, end);
        range.ensure_within_view_limit()?;
        let chrom = with_chr_prefix(chromosome);
        let url = endpoints::ucsc_sequence_url(&self.config.ucsc_api_url, assembly_id, &chrom, range);
        debug!(url = %url, "GET");

        let body = self.client.get(&url).send().await?.text().await?;
        let response: UcscSequenceResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Undecodable UCSC sequence body");
            CliError::upstream("UCSC returned a non-JSON sequence response")
        })?;
        let data = SequenceData::from_upstream(response, range);

        match &data.error {
            Some(error) => warn!(error = %error, "UCSC reported a sequence error"),
            None => debug!(bases = data.sequence.len(), "Loaded sequence"),
        }

        Ok(data)
    }
}
