//! `genoview genomes` command implementation

use crate::commands::CommandContext;
use crate::error::{CliError, Result};
use crate::progress::with_spinner;
use crate::render::{assemblies_table, print_json};
use colored::Colorize;
use tracing::debug;

/// List assemblies grouped by organism, optionally for one organism only
pub async fn run(ctx: &CommandContext, organism: Option<String>) -> Result<()> {
    let catalog = with_spinner(
        "Loading genome assemblies...",
        ctx.show_progress(),
        ctx.client.list_assemblies(),
    )
    .await?;

    let catalog = match organism.as_deref() {
        Some(name) => {
            let filtered: crate::models::AssemblyCatalog = catalog
                .into_iter()
                .filter(|(organism, _)| organism.eq_ignore_ascii_case(name))
                .collect();
            if filtered.is_empty() {
                return Err(CliError::validation(format!(
                    "No assemblies found for organism '{}'",
                    name
                )));
            }
            filtered
        }
        None => catalog,
    };

    debug!(organisms = catalog.len(), "Listing assemblies");

    if ctx.is_json() {
        return print_json(&catalog);
    }

    let count: usize = catalog.values().map(Vec::len).sum();
    println!();
    println!("{}", assemblies_table(&catalog, None));
    println!();
    println!(
        "{} assemblies across {} organisms",
        count.to_string().bold(),
        catalog.len()
    );

    Ok(())
}
