//! `genoview analyze` command implementation
//!
//! Prediction for an ad hoc single-base substitution.

use crate::commands::CommandContext;
use crate::error::{CliError, Result};
use crate::models::assembly::with_chr_prefix;
use crate::progress::with_spinner;
use crate::render::{print_json, prediction_table};
use crate::view::VariantAnalysisForm;
use colored::Colorize;

pub async fn run(ctx: &CommandContext, position: String, alternative: String, chrom: String) -> Result<()> {
    let chromosome = with_chr_prefix(chrom.trim());

    let mut form = VariantAnalysisForm::new(None);
    form.set_position(position);
    form.set_alternative(&alternative);

    let Some((_, request)) = form.prepare(&ctx.genome, &chromosome) else {
        return Err(CliError::validation(form.error.unwrap_or_default()));
    };

    let prediction = with_spinner(
        "Analyzing variant...",
        ctx.show_progress(),
        ctx.client.analyze_variant(&request),
    )
    .await?;

    if ctx.is_json() {
        return print_json(&prediction);
    }

    println!();
    println!(
        "{} {}:{} {}",
        "Variant".bold(),
        chromosome,
        request.variant_position,
        request.alternative
    );
    println!("{}", prediction_table(&prediction));
    Ok(())
}
