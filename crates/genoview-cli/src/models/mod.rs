//! Normalized records
//!
//! The uniform shapes every adapter returns, plus the pure normalization
//! rules (chromosome ordering, search-row parsing, ref/alt extraction, ...)
//! that produce them from upstream payloads.

pub mod assembly;
pub mod gene;
pub mod sequence;
pub mod variant;

pub use assembly::{AssemblyCatalog, Chromosome, GenomeAssembly};
pub use gene::{GeneDetail, GeneSearchResponse, GeneSearchResult, GeneView, GenomicInfo, Organism};
pub use sequence::SequenceData;
pub use variant::{
    extract_ref_alt, AnalysisState, ClinvarVariant, RefAlt, VariantComparison, VariantPrediction,
};
