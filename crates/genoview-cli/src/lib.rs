//! Genoview CLI Library
//!
//! Command-line genome browser backed by public genomics services.
//!
//! # Overview
//!
//! - **Assemblies**: list UCSC genome builds and their chromosomes (`genoview genomes`, `genoview chromosomes`)
//! - **Genes**: search NCBI genes and show their coordinates (`genoview search`, `genoview gene`)
//! - **Sequence**: fetch DNA windows of up to 10,000 bp (`genoview sequence`)
//! - **Variants**: list known ClinVar variants in a gene (`genoview variants`)
//! - **Prediction**: score a single-base substitution (`genoview analyze`)
//! - **Interactive**: browse all of the above in one session (`genoview browse`)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod outcome;
pub mod progress;
pub mod render;
pub mod view;

// Re-export commonly used types
pub use api::GenomeClient;
pub use config::Config;
pub use error::{CliError, Result};
pub use outcome::Outcome;

use clap::{Parser, Subcommand};
use render::OutputFormat;

/// Genoview - genome, gene and variant browser
#[derive(Parser, Debug)]
#[command(name = "genoview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Genome assembly
    #[arg(short, long, env = "GENOVIEW_GENOME", default_value = "hg38", global = true)]
    pub genome: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Print the CLI reference as Markdown and exit
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List genome assemblies grouped by organism
    Genomes {
        /// Only this organism (e.g. Human)
        #[arg(long)]
        organism: Option<String>,
    },

    /// List the chromosomes of the selected assembly
    Chromosomes,

    /// Search genes by symbol or name
    Search {
        /// Search terms (e.g. BRCA1)
        #[arg(required_unless_present = "chromosome")]
        query: Vec<String>,

        /// List genes on this chromosome instead
        #[arg(short, long)]
        chromosome: Option<String>,
    },

    /// Show gene information and its initial sequence window
    Gene {
        /// NCBI Gene ID (e.g. 672)
        gene_id: String,

        /// Gene symbol for display
        #[arg(short, long)]
        symbol: Option<String>,

        /// Chromosome the gene lies on (e.g. chr17)
        #[arg(short, long)]
        chrom: Option<String>,
    },

    /// Fetch a DNA window (1-based, inclusive, at most 10,000 bp)
    Sequence {
        /// Chromosome (e.g. chr17)
        chrom: String,

        /// Start position
        start: String,

        /// End position
        end: String,
    },

    /// List known ClinVar variants within a gene
    Variants {
        /// NCBI Gene ID (e.g. 672)
        gene_id: String,

        /// Chromosome (defaults to the one NCBI reports)
        #[arg(short, long)]
        chrom: Option<String>,

        /// Predict the effect of this ClinVar variant and compare
        #[arg(long, value_name = "CLINVAR_ID")]
        analyze: Option<String>,
    },

    /// Predict the effect of a single-base substitution
    Analyze {
        /// Variant position (commas allowed)
        position: String,

        /// Alternative base: A, C, G or T
        alternative: String,

        /// Chromosome (e.g. chr17)
        #[arg(short, long)]
        chrom: String,
    },

    /// Interactive browsing session
    Browse,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}
