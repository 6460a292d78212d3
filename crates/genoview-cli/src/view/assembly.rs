//! Assembly selection and gene browsing

use crate::api::GenomeClient;
use crate::error::Result;
use crate::models::{AssemblyCatalog, Chromosome, GeneSearchResponse, GeneSearchResult, GenomeAssembly};
use crate::view::request::{Panel, Ticket};
use tracing::{debug, warn};

pub const DEFAULT_ASSEMBLY: &str = "hg38";
pub const DEFAULT_CHROMOSOME: &str = "chr1";
pub const DEFAULT_ORGANISM: &str = "Human";
pub const EXAMPLE_QUERY: &str = "BRCA1";

pub const GENOMES_FAILED_MESSAGE: &str = "Failed to fetch genomes";
pub const CHROMOSOMES_FAILED_MESSAGE: &str = "Failed to fetch chromosomes";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search genes";

/// How genes are found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Free-text symbol or name search
    #[default]
    Search,
    /// Every gene on the selected chromosome
    Chromosome,
}

#[derive(Debug)]
pub struct AssemblyBrowser {
    pub selected_assembly: String,
    pub selected_chromosome: String,
    pub mode: SearchMode,
    pub query: String,
    pub assemblies: Panel<AssemblyCatalog>,
    pub chromosomes: Panel<Vec<Chromosome>>,
    pub results: Panel<Vec<GeneSearchResult>>,
    pub selected_gene: Option<GeneSearchResult>,
}

impl Default for AssemblyBrowser {
    fn default() -> Self {
        Self::new(DEFAULT_ASSEMBLY)
    }
}

impl AssemblyBrowser {
    pub fn new(assembly: impl Into<String>) -> Self {
        Self {
            selected_assembly: assembly.into(),
            selected_chromosome: DEFAULT_CHROMOSOME.to_string(),
            mode: SearchMode::Search,
            query: String::new(),
            assemblies: Panel::new("assemblies"),
            chromosomes: Panel::new("chromosomes"),
            results: Panel::new("results"),
            selected_gene: None,
        }
    }

    /// First error across the browser's panels, most recent concern first
    pub fn error(&self) -> Option<&str> {
        self.results
            .error
            .as_deref()
            .or(self.chromosomes.error.as_deref())
            .or(self.assemblies.error.as_deref())
    }

    pub fn is_loading(&self) -> bool {
        self.assemblies.loading || self.chromosomes.loading || self.results.loading
    }

    /// Assemblies offered for selection (the human builds)
    pub fn offered_assemblies(&self) -> &[GenomeAssembly] {
        self.assemblies
            .data
            .as_ref()
            .and_then(|catalog| catalog.get(DEFAULT_ORGANISM))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn selected_assembly_info(&self) -> Option<&GenomeAssembly> {
        self.assemblies
            .data
            .as_ref()?
            .values()
            .flatten()
            .find(|assembly| assembly.id == self.selected_assembly)
    }

    pub fn chromosome_list(&self) -> &[Chromosome] {
        self.chromosomes.data.as_deref().unwrap_or_default()
    }

    pub fn result_list(&self) -> &[GeneSearchResult] {
        self.results.data.as_deref().unwrap_or_default()
    }

    /// Load the catalog and the chromosomes of the selected assembly
    pub async fn initialize(&mut self, client: &GenomeClient) {
        self.load_assemblies(client).await;
        self.load_chromosomes(client).await;
    }

    pub async fn load_assemblies(&mut self, client: &GenomeClient) {
        let ticket = self.assemblies.begin();
        let result = client.list_assemblies().await;
        self.assemblies.finish(ticket, failed_as(result, GENOMES_FAILED_MESSAGE));
    }

    pub async fn load_chromosomes(&mut self, client: &GenomeClient) {
        let ticket = self.chromosomes.begin();
        let result = client.list_chromosomes(&self.selected_assembly).await;
        self.apply_chromosomes(ticket, result);
    }

    /// Store a chromosome list and select its first entry
    pub fn apply_chromosomes(&mut self, ticket: Ticket, result: Result<Vec<Chromosome>>) -> bool {
        let first = result
            .as_ref()
            .ok()
            .and_then(|list| list.first())
            .map(|chrom| chrom.name.clone());

        let applied = self
            .chromosomes
            .finish(ticket, failed_as(result, CHROMOSOMES_FAILED_MESSAGE));
        if applied {
            if let Some(first) = first {
                self.selected_chromosome = first;
            }
        }
        applied
    }

    /// Switch assembly: chromosomes reload and the chromosome selection resets
    pub async fn select_assembly(&mut self, client: &GenomeClient, assembly: &str) {
        if assembly == self.selected_assembly {
            return;
        }
        debug!(assembly = assembly, "Assembly changed");

        self.selected_assembly = assembly.to_string();
        self.selected_chromosome = DEFAULT_CHROMOSOME.to_string();
        self.chromosomes.reset();
        self.load_chromosomes(client).await;

        if self.mode == SearchMode::Chromosome {
            self.browse_chromosome(client).await;
        }
    }

    /// Only refetches results when already browsing by chromosome
    pub async fn select_chromosome(&mut self, client: &GenomeClient, chromosome: &str) {
        self.selected_chromosome = chromosome.to_string();
        if self.mode == SearchMode::Chromosome {
            self.browse_chromosome(client).await;
        }
    }

    /// Change mode, clearing results, selection and errors
    pub async fn switch_mode(&mut self, client: &GenomeClient, mode: SearchMode) {
        if mode == self.mode {
            return;
        }

        self.results.reset();
        self.selected_gene = None;
        self.mode = mode;

        if mode == SearchMode::Chromosome && !self.selected_chromosome.is_empty() {
            self.browse_chromosome(client).await;
        }
    }

    /// Free-text search; blank queries are ignored
    pub async fn search(&mut self, client: &GenomeClient, query: &str) {
        self.query = query.to_string();
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let ticket = self.results.begin();
        let result = client.search_genes(query, &self.selected_assembly).await;
        self.apply_results(ticket, result);
    }

    /// Genes on the selected chromosome
    pub async fn browse_chromosome(&mut self, client: &GenomeClient) {
        let ticket = self.results.begin();
        let result = client
            .search_genes_on_chromosome(&self.selected_chromosome, &self.selected_assembly)
            .await;
        self.apply_results(ticket, result);
    }

    /// Run the canned example search in search mode
    pub async fn load_example(&mut self, client: &GenomeClient) {
        self.mode = SearchMode::Search;
        self.search(client, EXAMPLE_QUERY).await;
    }

    pub fn apply_results(&mut self, ticket: Ticket, result: Result<GeneSearchResponse>) -> bool {
        let result = result.map(|response| response.results);
        self.results.finish(ticket, failed_as(result, SEARCH_FAILED_MESSAGE))
    }

    pub fn select_gene(&mut self, index: usize) -> Option<&GeneSearchResult> {
        let gene = self.result_list().get(index)?.clone();
        self.selected_gene = Some(gene);
        self.selected_gene.as_ref()
    }

    pub fn clear_gene(&mut self) {
        self.selected_gene = None;
    }
}

/// Log the detailed error and keep only the panel message
fn failed_as<T>(result: Result<T>, message: &str) -> std::result::Result<T, String> {
    result.map_err(|e| {
        warn!(error = %e, "{}", message);
        message.to_string()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn gene(symbol: &str, chrom: &str) -> GeneSearchResult {
        GeneSearchResult {
            symbol: symbol.into(),
            name: String::new(),
            chrom: chrom.into(),
            description: String::new(),
            gene_id: "1".into(),
        }
    }

    fn response(results: Vec<GeneSearchResult>) -> GeneSearchResponse {
        GeneSearchResponse {
            query: "q".into(),
            genome: "hg38".into(),
            results,
        }
    }

    fn offline_client() -> GenomeClient {
        GenomeClient::new(crate::config::Config::with_single_base("http://127.0.0.1:9")).unwrap()
    }

    #[test]
    fn test_defaults() {
        let browser = AssemblyBrowser::default();
        assert_eq!(browser.selected_assembly, "hg38");
        assert_eq!(browser.selected_chromosome, "chr1");
        assert_eq!(browser.mode, SearchMode::Search);
        assert!(browser.error().is_none());
    }

    #[test]
    fn test_chromosome_list_selects_first_entry() {
        let mut browser = AssemblyBrowser::default();
        browser.selected_chromosome = "chrX".into();

        let ticket = browser.chromosomes.begin();
        browser.apply_chromosomes(
            ticket,
            Ok(vec![
                Chromosome { name: "chr1".into(), size: 248_956_422 },
                Chromosome { name: "chr2".into(), size: 242_193_529 },
            ]),
        );
        assert_eq!(browser.selected_chromosome, "chr1");
        assert_eq!(browser.chromosome_list().len(), 2);
    }

    #[test]
    fn test_search_failure_sets_message() {
        let mut browser = AssemblyBrowser::default();
        let ticket = browser.results.begin();
        browser.apply_results(ticket, Err(CliError::upstream("Clinical Tables returned 500")));
        assert_eq!(browser.error(), Some(SEARCH_FAILED_MESSAGE));
        assert!(!browser.is_loading());
    }

    #[test]
    fn test_stale_search_results_are_dropped() {
        let mut browser = AssemblyBrowser::default();
        let first = browser.results.begin();
        let second = browser.results.begin();

        assert!(browser.apply_results(second, Ok(response(vec![gene("TP53", "chr17")]))));
        assert!(!browser.apply_results(first, Ok(response(vec![gene("BRCA2", "chr13")]))));
        assert_eq!(browser.result_list()[0].symbol, "TP53");
    }

    #[tokio::test]
    async fn test_switch_mode_clears_results_and_selection() {
        let client = offline_client();
        let mut browser = AssemblyBrowser::default();
        browser.selected_chromosome = String::new();

        let ticket = browser.results.begin();
        browser.apply_results(ticket, Ok(response(vec![gene("TP53", "chr17")])));
        browser.select_gene(0).unwrap();

        // An empty chromosome selection means no request is made
        browser.switch_mode(&client, SearchMode::Chromosome).await;
        assert_eq!(browser.mode, SearchMode::Chromosome);
        assert!(browser.result_list().is_empty());
        assert!(browser.selected_gene.is_none());
    }

    #[tokio::test]
    async fn test_select_chromosome_in_search_mode_keeps_results() {
        let client = offline_client();
        let mut browser = AssemblyBrowser::default();
        let ticket = browser.results.begin();
        browser.apply_results(ticket, Ok(response(vec![gene("TP53", "chr17")])));

        browser.select_chromosome(&client, "chr13").await;
        assert_eq!(browser.selected_chromosome, "chr13");
        assert_eq!(browser.result_list()[0].symbol, "TP53");
        assert!(browser.error().is_none());
    }

    #[tokio::test]
    async fn test_select_chromosome_in_chromosome_mode_refetches() {
        let client = offline_client();
        let mut browser = AssemblyBrowser::default();
        browser.mode = SearchMode::Chromosome;

        browser.select_chromosome(&client, "chr13").await;
        assert_eq!(browser.selected_chromosome, "chr13");
        assert_eq!(browser.error(), Some(SEARCH_FAILED_MESSAGE));
        assert!(!browser.is_loading());
    }

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        let client = offline_client();
        let mut browser = AssemblyBrowser::default();
        browser.search(&client, "   ").await;

        assert!(browser.results.data.is_none());
        assert!(browser.error().is_none());
    }

    #[test]
    fn test_select_gene_out_of_range() {
        let mut browser = AssemblyBrowser::default();
        assert!(browser.select_gene(3).is_none());
    }
}
