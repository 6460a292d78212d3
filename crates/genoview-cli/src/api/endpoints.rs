//! API endpoint URL builders
//!
//! Paths and parameter names belong to the third-party services and must be
//! reproduced exactly.

use crate::models::assembly::strip_chr_prefix;
use genoview_common::types::{GeneBounds, SequenceRange};
use urlencoding::encode;

/// Fields shown for every gene search hit (`df`)
pub const GENE_SEARCH_DISPLAY_FIELDS: &str =
    "chromosome,Symbol,description,map_location,type_of_gene";

/// Extra fields requested for every gene search hit (`ef`)
pub const GENE_SEARCH_EXTRA_FIELDS: &str =
    "chromosome,Symbol,description,map_location,type_of_gene,GenomicInfo,GeneID";

/// Maximum number of ClinVar ids requested per search
pub const CLINVAR_RETMAX: u32 = 20;

/// Build UCSC assembly list URL
pub fn ucsc_genomes_url(base_url: &str) -> String {
    format!("{}/list/ucscGenomes", base_url)
}

/// Build UCSC chromosome list URL
pub fn ucsc_chromosomes_url(base_url: &str, genome: &str) -> String {
    format!("{}/list/chromosomes?genome={}", base_url, encode(genome))
}

/// Build UCSC sequence URL for a 1-based inclusive window.
///
/// UCSC takes `;`-separated parameters and 0-based half-open coordinates, so
/// `[1000, 2000]` is requested as `start=999;end=2000`.
pub fn ucsc_sequence_url(base_url: &str, genome: &str, chrom: &str, range: SequenceRange) -> String {
    let (start, end) = range.to_upstream();
    format!(
        "{}/getData/sequence?genome={};chrom={};start={};end={}",
        base_url,
        encode(genome),
        encode(chrom),
        start,
        end
    )
}

/// Build Clinical Tables gene search URL
pub fn gene_search_url(base_url: &str, terms: &str) -> String {
    format!(
        "{}/api/ncbi_genes/v3/search?terms={}&df={}&ef={}",
        base_url,
        encode(terms),
        encode(GENE_SEARCH_DISPLAY_FIELDS),
        encode(GENE_SEARCH_EXTRA_FIELDS)
    )
}

/// Build E-utilities gene summary URL
pub fn gene_summary_url(base_url: &str, gene_id: &str) -> String {
    format!(
        "{}/esummary.fcgi?db=gene&id={}&retmode=json",
        base_url,
        encode(gene_id)
    )
}

/// ClinVar position field for an assembly: GRCh37 coordinates for `hg19`,
/// GRCh38 for everything else.
pub fn clinvar_position_field(genome: &str) -> &'static str {
    if genome == "hg19" {
        "chrpos37"
    } else {
        "chrpos38"
    }
}

/// ClinVar search term, e.g. `17[chromosome] AND 43044295:43125483[chrpos38]`
pub fn clinvar_search_term(chrom: &str, bounds: &GeneBounds, genome: &str) -> String {
    format!(
        "{}[chromosome] AND {}:{}[{}]",
        strip_chr_prefix(chrom),
        bounds.min,
        bounds.max,
        clinvar_position_field(genome)
    )
}

/// Build E-utilities ClinVar search URL
pub fn clinvar_search_url(base_url: &str, term: &str) -> String {
    format!(
        "{}/esearch.fcgi?db=clinvar&term={}&retmode=json&retmax={}",
        base_url,
        encode(term),
        CLINVAR_RETMAX
    )
}

/// Build E-utilities ClinVar summary URL
pub fn clinvar_summary_url(base_url: &str, ids: &[String]) -> String {
    format!(
        "{}/esummary.fcgi?db=clinvar&id={}&retmode=json",
        base_url,
        encode(&ids.join(","))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000";

    #[test]
    fn test_ucsc_urls() {
        assert_eq!(ucsc_genomes_url(BASE), "http://localhost:8000/list/ucscGenomes");
        assert_eq!(
            ucsc_chromosomes_url(BASE, "hg38"),
            "http://localhost:8000/list/chromosomes?genome=hg38"
        );
    }

    #[test]
    fn test_sequence_url_converts_coordinates() {
        let url = ucsc_sequence_url(BASE, "hg38", "chr17", SequenceRange::new(1000, 2000));
        assert_eq!(
            url,
            "http://localhost:8000/getData/sequence?genome=hg38;chrom=chr17;start=999;end=2000"
        );
    }

    #[test]
    fn test_gene_search_url() {
        let url = gene_search_url(BASE, "BRCA 1");
        assert!(url.starts_with("http://localhost:8000/api/ncbi_genes/v3/search?terms=BRCA%201&df="));
        assert!(url.contains("ef=chromosome%2CSymbol%2Cdescription%2Cmap_location%2Ctype_of_gene%2CGenomicInfo%2CGeneID"));
    }

    #[test]
    fn test_gene_summary_url() {
        assert_eq!(
            gene_summary_url(BASE, "672"),
            "http://localhost:8000/esummary.fcgi?db=gene&id=672&retmode=json"
        );
    }

    #[test]
    fn test_clinvar_position_field() {
        assert_eq!(clinvar_position_field("hg19"), "chrpos37");
        assert_eq!(clinvar_position_field("hg38"), "chrpos38");
        assert_eq!(clinvar_position_field("mm39"), "chrpos38");
    }

    #[test]
    fn test_clinvar_search_term() {
        let bounds = GeneBounds::from_unordered(43_125_483, 43_044_295);
        assert_eq!(
            clinvar_search_term("chr17", &bounds, "hg38"),
            "17[chromosome] AND 43044295:43125483[chrpos38]"
        );
        assert_eq!(
            clinvar_search_term("17", &bounds, "hg19"),
            "17[chromosome] AND 43044295:43125483[chrpos37]"
        );
    }

    #[test]
    fn test_clinvar_urls() {
        let url = clinvar_search_url(BASE, "17[chromosome]");
        assert_eq!(
            url,
            "http://localhost:8000/esearch.fcgi?db=clinvar&term=17%5Bchromosome%5D&retmode=json&retmax=20"
        );

        let url = clinvar_summary_url(BASE, &["1".to_string(), "2".to_string()]);
        assert_eq!(url, "http://localhost:8000/esummary.fcgi?db=clinvar&id=1%2C2&retmode=json");
    }
}
