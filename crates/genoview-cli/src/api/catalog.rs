//! UCSC assembly and chromosome listings

use crate::api::client::GenomeClient;
use crate::api::endpoints;
use crate::api::types::{UcscChromosomesResponse, UcscGenomesResponse};
use crate::error::{CliError, Result};
use crate::models::assembly::{group_assemblies, normalize_chromosomes};
use crate::models::{AssemblyCatalog, Chromosome};
use tracing::{debug, instrument};

impl GenomeClient {
    /// List every UCSC assembly, grouped by organism
    #[instrument(skip(self))]
    pub async fn list_assemblies(&self) -> Result<AssemblyCatalog> {
        let url = endpoints::ucsc_genomes_url(&self.config.ucsc_api_url);
        let response: UcscGenomesResponse = self.get_json(&url, "UCSC").await?;

        let genomes = response
            .ucsc_genomes
            .ok_or_else(|| CliError::upstream("UCSC genome list is missing 'ucscGenomes'"))?;

        let catalog = group_assemblies(genomes);
        debug!(organisms = catalog.len(), "Loaded assembly catalog");
        Ok(catalog)
    }

    /// List the primary chromosomes of an assembly in display order
    #[instrument(skip(self))]
    pub async fn list_chromosomes(&self, assembly_id: &str) -> Result<Vec<Chromosome>> {
        let url = endpoints::ucsc_chromosomes_url(&self.config.ucsc_api_url, assembly_id);
        let response: UcscChromosomesResponse = self.get_json(&url, "UCSC").await?;

        let chromosomes = response.chromosomes.ok_or_else(|| {
            CliError::upstream(format!(
                "UCSC chromosome list for '{}' is missing 'chromosomes'",
                assembly_id
            ))
        })?;

        let chromosomes = normalize_chromosomes(chromosomes);
        debug!(count = chromosomes.len(), "Loaded chromosomes");
        Ok(chromosomes)
    }
}
