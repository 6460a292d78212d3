//! `genoview variants` command implementation
//!
//! Known ClinVar variants inside a gene, with optional prediction for one of
//! them side by side with its ClinVar classification.

use crate::commands::gene::gene_from_args;
use crate::commands::CommandContext;
use crate::error::{CliError, Result};
use crate::models::assembly::with_chr_prefix;
use crate::outcome::Outcome;
use crate::progress::with_spinner;
use crate::render::{comparison_table, print_json, variants_table};
use crate::view::GeneViewer;
use colored::Colorize;
use tracing::debug;

pub async fn run(
    ctx: &CommandContext,
    gene_id: String,
    chrom: Option<String>,
    analyze: Option<String>,
) -> Result<()> {
    let mut viewer = GeneViewer::new(gene_from_args(&gene_id, None, chrom), ctx.genome.clone());

    let ticket = viewer.detail.begin();
    let outcome = with_spinner(
        "Loading gene coordinates...",
        ctx.show_progress(),
        ctx.client.get_gene_detail(&gene_id),
    )
    .await;

    if let Outcome::Unavailable { reason } = &outcome {
        return Err(CliError::upstream(format!(
            "Gene {} details are unavailable ({})",
            gene_id, reason
        )));
    }
    viewer.apply_detail(ticket, outcome);

    // Fall back to the chromosome NCBI reports for the gene
    if viewer.gene.chrom.is_empty() {
        if let Some(chrloc) = viewer
            .view()
            .and_then(|view| view.detail.genomicinfo.first())
            .map(|info| info.chrloc.clone())
            .filter(|c| !c.is_empty())
        {
            debug!(chrom = %chrloc, "Using chromosome from gene detail");
            viewer.gene.chrom = with_chr_prefix(&chrloc);
        }
    }
    if viewer.gene.chrom.is_empty() {
        return Err(CliError::validation(
            "Chromosome is unknown for this gene. Pass it with --chrom",
        ));
    }

    with_spinner(
        "Fetching ClinVar variants...",
        ctx.show_progress(),
        viewer.refresh_variants(&ctx.client),
    )
    .await;

    if let Some(error) = viewer.clinvar.error.clone() {
        return Err(CliError::upstream(error));
    }

    if let Some(clinvar_id) = analyze.as_deref() {
        let variant = viewer
            .variants()
            .iter()
            .find(|v| v.clinvar_id == clinvar_id)
            .ok_or_else(|| {
                CliError::validation(format!("ClinVar variant {} is not in this gene", clinvar_id))
            })?;
        if !variant.is_analyzable() {
            return Err(CliError::validation(format!(
                "ClinVar variant {} is not a single nucleotide variant with a known change",
                clinvar_id
            )));
        }

        with_spinner(
            &format!("Analyzing ClinVar {}...", clinvar_id),
            ctx.show_progress(),
            viewer.analyze_known_variant(&ctx.client, clinvar_id),
        )
        .await;
    }

    if ctx.is_json() {
        return print_json(viewer.variants());
    }

    let variants = viewer.variants();
    if variants.is_empty() {
        println!("{}", "No ClinVar variants found in this gene".yellow());
        return Ok(());
    }

    println!();
    println!(
        "{} {} ({})",
        "Known variants in".bold(),
        viewer.gene.symbol.bold().cyan(),
        viewer.bounds().map(|b| b.to_string()).unwrap_or_default()
    );
    println!("{}", variants_table(variants));

    if let Some(comparison) = &viewer.comparison {
        println!();
        println!("{}", "Comparison".bold());
        println!("{}", comparison_table(comparison));
        if comparison.agrees() {
            println!("{} {}", "✓".green(), comparison.verdict());
        } else {
            println!("{} {}", "!".yellow(), comparison.verdict());
        }
    }

    Ok(())
}
