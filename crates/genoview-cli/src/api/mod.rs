//! Adapters for the upstream genome services
//!
//! Every adapter is an `async` method on [`GenomeClient`], grouped by service:
//!
//! - [`catalog`]: UCSC assembly and chromosome listings
//! - [`genes`]: Clinical Tables gene search and E-utilities gene summary
//! - [`sequence`]: UCSC DNA windows
//! - [`clinvar`]: E-utilities ClinVar search and summary
//! - [`prediction`]: the variant-effect prediction endpoint

pub mod catalog;
pub mod client;
pub mod clinvar;
pub mod endpoints;
pub mod genes;
pub mod prediction;
pub mod sequence;
pub mod types;

pub use client::GenomeClient;
pub use types::PredictionRequest;
