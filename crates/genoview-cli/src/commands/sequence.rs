//! `genoview sequence` command implementation

use crate::commands::CommandContext;
use crate::error::{CliError, Result};
use crate::progress::with_spinner;
use crate::render::{print_json, sequence_lines, SEQUENCE_LINE_WIDTH};
use crate::view::validate_range;
use colored::Colorize;

/// Fetch one window of at most 10,000 bp
pub async fn run(ctx: &CommandContext, chrom: String, start: String, end: String) -> Result<()> {
    let range = validate_range(&start, &end, None).map_err(CliError::validation)?;

    let data = with_spinner(
        "Fetching sequence...",
        ctx.show_progress(),
        ctx.client.get_sequence(&chrom, range.start, range.end, &ctx.genome),
    )
    .await?;

    if ctx.is_json() {
        return print_json(&data);
    }

    if let Some(error) = data.error {
        return Err(CliError::upstream(error));
    }

    println!();
    println!("{} {}:{}", ctx.genome.bold(), chrom, data.actual_range);
    for line in sequence_lines(&data, SEQUENCE_LINE_WIDTH) {
        println!("{}", line);
    }
    Ok(())
}
