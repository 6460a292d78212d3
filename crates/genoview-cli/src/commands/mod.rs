//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function taking the
//! shared [`CommandContext`].

pub mod analyze;
pub mod browse;
pub mod chromosomes;
pub mod config;
pub mod gene;
pub mod genomes;
pub mod search;
pub mod sequence;
pub mod variants;

use crate::api::GenomeClient;
use crate::render::OutputFormat;
use std::io::{self, IsTerminal};

/// Settings every command needs
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub client: GenomeClient,
    /// Assembly id, e.g. `hg38`
    pub genome: String,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn new(client: GenomeClient, genome: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            client,
            genome: genome.into(),
            format,
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Spinners only make sense for table output on a terminal
    pub fn show_progress(&self) -> bool {
        !self.is_json() && io::stderr().is_terminal()
    }
}
