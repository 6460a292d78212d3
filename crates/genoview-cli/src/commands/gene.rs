//! `genoview gene` command implementation
//!
//! Gene facts, coordinates and the initial sequence window.

use crate::commands::CommandContext;
use crate::error::Result;
use crate::models::assembly::with_chr_prefix;
use crate::models::{GeneSearchResult, GeneView, SequenceData};
use crate::outcome::Outcome;
use crate::progress::with_spinner;
use crate::render::{gene_info_table, print_json, sequence_lines, SEQUENCE_LINE_WIDTH};
use crate::view::GeneViewer;
use colored::Colorize;
use genoview_common::types::format_position;
use serde::Serialize;

#[derive(Serialize)]
struct GeneReport<'a> {
    gene: &'a GeneSearchResult,
    genome: &'a str,
    detail: Outcome<&'a GeneView>,
    sequence: Option<&'a SequenceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Build the gene record the viewer works from
pub fn gene_from_args(gene_id: &str, symbol: Option<String>, chrom: Option<String>) -> GeneSearchResult {
    let symbol = symbol.unwrap_or_else(|| gene_id.to_string());
    GeneSearchResult {
        name: symbol.clone(),
        symbol,
        chrom: chrom.map(|c| with_chr_prefix(c.trim())).unwrap_or_default(),
        description: String::new(),
        gene_id: gene_id.trim().to_string(),
    }
}

pub async fn run(
    ctx: &CommandContext,
    gene_id: String,
    symbol: Option<String>,
    chrom: Option<String>,
) -> Result<()> {
    let gene = gene_from_args(&gene_id, symbol, chrom);
    let mut viewer = GeneViewer::new(gene, ctx.genome.clone());

    with_spinner(
        &format!("Loading {}...", viewer.gene.symbol),
        ctx.show_progress(),
        viewer.initialize(&ctx.client),
    )
    .await;

    let detail = match viewer.detail.data.as_ref() {
        Some(outcome) => outcome.as_ref(),
        None => Outcome::unavailable("not loaded"),
    };

    if ctx.is_json() {
        return print_json(&GeneReport {
            gene: &viewer.gene,
            genome: &ctx.genome,
            detail,
            sequence: viewer.sequence.data.as_ref(),
            error: viewer.sequence.error.as_deref(),
        });
    }

    println!();
    println!("{}", viewer.gene.symbol.bold().cyan());
    println!("{}", gene_info_table(&viewer.gene, detail));

    if let Some(data) = viewer.sequence.data.as_ref().filter(|d| !d.is_empty()) {
        println!();
        println!(
            "{} {} ({} bp)",
            "Sequence".bold(),
            data.actual_range,
            format_position(data.sequence.len() as u64)
        );
        for line in sequence_lines(data, SEQUENCE_LINE_WIDTH) {
            println!("{}", line);
        }
    }

    if let Some(error) = &viewer.sequence.error {
        println!();
        println!("{} {}", "Error:".red().bold(), error);
    }

    Ok(())
}
