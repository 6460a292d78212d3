//! `genoview search` command implementation
//!
//! Free-text gene search, or every gene on one chromosome.

use crate::commands::CommandContext;
use crate::error::{CliError, Result};
use crate::progress::with_spinner;
use crate::render::{gene_results_table, print_json};
use colored::Colorize;
use tracing::debug;

/// Run the search command
///
/// # Arguments
///
/// * `query` - Search terms, joined with spaces
/// * `chromosome` - Browse this chromosome instead of searching text
pub async fn run(ctx: &CommandContext, query: Vec<String>, chromosome: Option<String>) -> Result<()> {
    let response = match chromosome {
        Some(chrom) => {
            debug!(chromosome = %chrom, "Browsing chromosome");
            with_spinner(
                &format!("Finding genes on {}...", chrom),
                ctx.show_progress(),
                ctx.client.search_genes_on_chromosome(&chrom, &ctx.genome),
            )
            .await?
        }
        None => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                return Err(CliError::validation(
                    "Search query cannot be empty. Pass gene symbols or names, or --chromosome",
                ));
            }
            with_spinner(
                "Searching genes...",
                ctx.show_progress(),
                ctx.client.search_genes(query.trim(), &ctx.genome),
            )
            .await?
        }
    };

    if ctx.is_json() {
        return print_json(&response);
    }

    if response.results.is_empty() {
        println!("{}", "No genes found".bold().red());
        println!("Try a gene symbol such as BRCA1, or a chromosome such as --chromosome chr17");
        return Ok(());
    }

    println!();
    println!("{}", gene_results_table(&response.results));
    println!();
    println!(
        "{} genes for '{}' on {}",
        response.results.len().to_string().bold(),
        response.query,
        response.genome
    );
    println!(
        "Show one with: {}",
        "genoview gene <gene-id> --symbol <symbol> --chrom <chrom>".cyan()
    );
    Ok(())
}
