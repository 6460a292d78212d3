//! `genoview chromosomes` command implementation

use crate::commands::CommandContext;
use crate::error::Result;
use crate::progress::with_spinner;
use crate::render::{chromosomes_table, print_json};
use colored::Colorize;

/// List the primary chromosomes of the selected assembly
pub async fn run(ctx: &CommandContext) -> Result<()> {
    let chromosomes = with_spinner(
        &format!("Loading chromosomes for {}...", ctx.genome),
        ctx.show_progress(),
        ctx.client.list_chromosomes(&ctx.genome),
    )
    .await?;

    if ctx.is_json() {
        return print_json(&chromosomes);
    }

    println!();
    println!("{}", format!("Chromosomes of {}", ctx.genome).cyan().bold());
    println!("{}", chromosomes_table(&chromosomes));
    Ok(())
}
