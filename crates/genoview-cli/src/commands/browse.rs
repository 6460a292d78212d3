//! `genoview browse` command implementation
//!
//! Interactive session: pick an assembly, find a gene, then explore its
//! sequence, known variants and predictions.

use crate::commands::CommandContext;
use crate::error::{CliError, Result};
use crate::models::AnalysisState;
use crate::outcome::Outcome;
use crate::progress::with_spinner;
use crate::render::{
    comparison_table, gene_info_table, gene_results_table, prediction_table, sequence_lines,
    variants_table, SEQUENCE_LINE_WIDTH,
};
use crate::view::{AssemblyBrowser, GeneViewer, SearchMode};
use colored::Colorize;
use genoview_common::types::{parse_position, Nucleotide};
use inquire::{Confirm, InquireError, Select, Text};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowserAction {
    SearchGenes,
    BrowseChromosome,
    Example,
    ChangeAssembly,
    Quit,
}

impl fmt::Display for BrowserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SearchGenes => "Search genes",
            Self::BrowseChromosome => "Browse a chromosome",
            Self::Example => "Try the BRCA1 example",
            Self::ChangeAssembly => "Change assembly",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneAction {
    LoadRange,
    PickBase,
    KnownVariants,
    AnalyzeKnown,
    AnalyzeVariant,
    OpenNcbi,
    Back,
}

impl fmt::Display for GeneAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LoadRange => "Load a sequence range",
            Self::PickBase => "Pick a base from the sequence",
            Self::KnownVariants => "Show known ClinVar variants",
            Self::AnalyzeKnown => "Analyze a known variant",
            Self::AnalyzeVariant => "Analyze a variant",
            Self::OpenNcbi => "Open gene page in NCBI",
            Self::Back => "Back to results",
        };
        f.write_str(label)
    }
}

/// `Ok(None)` when the user cancels the prompt
fn cancellable<T>(result: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(CliError::from(e)),
    }
}

fn print_error(error: Option<&str>) {
    if let Some(error) = error {
        println!("{} {}", "Error:".red().bold(), error);
    }
}

pub async fn run(ctx: &CommandContext) -> Result<()> {
    let mut browser = AssemblyBrowser::new(ctx.genome.clone());
    with_spinner(
        "Loading assemblies...",
        ctx.show_progress(),
        browser.initialize(&ctx.client),
    )
    .await;

    loop {
        println!();
        let assembly = browser
            .selected_assembly_info()
            .map(|a| format!("{} - {}", a.id, a.name))
            .unwrap_or_else(|| browser.selected_assembly.clone());
        println!("{} {}", "Assembly:".bold(), assembly.cyan());
        print_error(browser.error());

        let actions = vec![
            BrowserAction::SearchGenes,
            BrowserAction::BrowseChromosome,
            BrowserAction::Example,
            BrowserAction::ChangeAssembly,
            BrowserAction::Quit,
        ];
        let Some(action) = cancellable(Select::new("What next?", actions).prompt())? else {
            break;
        };

        match action {
            BrowserAction::SearchGenes => {
                browser.switch_mode(&ctx.client, SearchMode::Search).await;
                let Some(query) =
                    cancellable(Text::new("Gene symbol or name:").with_placeholder("BRCA1").prompt())?
                else {
                    continue;
                };
                with_spinner("Searching...", ctx.show_progress(), browser.search(&ctx.client, &query))
                    .await;
            }
            BrowserAction::BrowseChromosome => {
                let names: Vec<String> = browser
                    .chromosome_list()
                    .iter()
                    .map(|c| c.name.clone())
                    .collect();
                if names.is_empty() {
                    println!("{}", "No chromosomes loaded for this assembly".yellow());
                    continue;
                }
                let Some(chrom) = cancellable(
                    Select::new("Chromosome:", names).with_page_size(15).prompt(),
                )?
                else {
                    continue;
                };
                with_spinner(
                    "Finding genes...",
                    ctx.show_progress(),
                    async {
                        browser.select_chromosome(&ctx.client, &chrom).await;
                        browser.switch_mode(&ctx.client, SearchMode::Chromosome).await;
                    },
                )
                .await;
            }
            BrowserAction::Example => {
                with_spinner("Searching...", ctx.show_progress(), browser.load_example(&ctx.client))
                    .await;
            }
            BrowserAction::ChangeAssembly => {
                let options: Vec<String> = browser
                    .offered_assemblies()
                    .iter()
                    .map(|a| format!("{} - {}", a.id, a.name))
                    .collect();
                if options.is_empty() {
                    println!("{}", "No assemblies available".yellow());
                    continue;
                }
                let Some(choice) = cancellable(
                    Select::new("Assembly:", options).with_page_size(15).prompt(),
                )?
                else {
                    continue;
                };
                let id = choice.split(" - ").next().unwrap_or_default().to_string();
                with_spinner(
                    "Loading chromosomes...",
                    ctx.show_progress(),
                    browser.select_assembly(&ctx.client, &id),
                )
                .await;
                continue;
            }
            BrowserAction::Quit => break,
        }

        pick_gene(ctx, &mut browser).await?;
    }

    Ok(())
}

/// Show the current results and let the user open one
async fn pick_gene(ctx: &CommandContext, browser: &mut AssemblyBrowser) -> Result<()> {
    loop {
        print_error(browser.error());
        let results = browser.result_list();
        if results.is_empty() {
            if browser.error().is_none() {
                println!("{}", "No genes found".yellow());
            }
            return Ok(());
        }

        println!();
        match browser.mode {
            SearchMode::Search => println!("{} {} genes", "Search results:".bold(), results.len()),
            SearchMode::Chromosome => println!(
                "{} {}: {} found",
                "Genes on".bold(),
                browser.selected_chromosome,
                results.len()
            ),
        }
        println!("{}", gene_results_table(results));

        let mut options: Vec<String> = results
            .iter()
            .map(|g| format!("{} ({}) {}", g.symbol, g.chrom, g.name))
            .collect();
        options.push("Back".to_string());

        let Some(choice) = cancellable(Select::new("Open a gene:", options.clone()).prompt())? else {
            return Ok(());
        };
        let Some(index) = options.iter().position(|o| o == &choice) else {
            return Ok(());
        };
        let Some(gene) = browser.select_gene(index).cloned() else {
            return Ok(());
        };

        let mut viewer = GeneViewer::new(gene, browser.selected_assembly.clone());
        gene_session(ctx, &mut viewer).await?;
        browser.clear_gene();
    }
}

fn show_gene(viewer: &GeneViewer) {
    let detail = match viewer.detail.data.as_ref() {
        Some(outcome) => outcome.as_ref(),
        None => Outcome::unavailable("not loaded"),
    };

    println!();
    println!("{}", viewer.gene.symbol.bold().cyan());
    println!("{}", gene_info_table(&viewer.gene, detail));
    show_sequence(viewer);
}

fn show_sequence(viewer: &GeneViewer) {
    if let Some(data) = viewer.sequence.data.as_ref().filter(|d| !d.is_empty()) {
        println!();
        println!("{} {}", "Sequence".bold(), data.actual_range);
        for line in sequence_lines(data, SEQUENCE_LINE_WIDTH) {
            println!("{}", line);
        }
    }
    print_error(viewer.sequence.error.as_deref());
}

async fn gene_session(ctx: &CommandContext, viewer: &mut GeneViewer) -> Result<()> {
    with_spinner(
        &format!("Loading {}...", viewer.gene.symbol),
        ctx.show_progress(),
        viewer.initialize(&ctx.client),
    )
    .await;
    show_gene(viewer);

    loop {
        let actions = vec![
            GeneAction::LoadRange,
            GeneAction::PickBase,
            GeneAction::KnownVariants,
            GeneAction::AnalyzeKnown,
            GeneAction::AnalyzeVariant,
            GeneAction::OpenNcbi,
            GeneAction::Back,
        ];
        let Some(action) = cancellable(Select::new("Gene action:", actions).prompt())? else {
            return Ok(());
        };

        match action {
            GeneAction::LoadRange => {
                let Some(start) = cancellable(
                    Text::new("Start position:")
                        .with_initial_value(&viewer.start_input)
                        .prompt(),
                )?
                else {
                    continue;
                };
                let Some(end) = cancellable(
                    Text::new("End position:")
                        .with_initial_value(&viewer.end_input)
                        .prompt(),
                )?
                else {
                    continue;
                };
                viewer.start_input = start;
                viewer.end_input = end;
                with_spinner(
                    "Fetching sequence...",
                    ctx.show_progress(),
                    viewer.load_sequence(&ctx.client),
                )
                .await;
                show_sequence(viewer);
            }
            GeneAction::PickBase => pick_base(viewer)?,
            GeneAction::KnownVariants => {
                with_spinner(
                    "Fetching ClinVar variants...",
                    ctx.show_progress(),
                    viewer.refresh_variants(&ctx.client),
                )
                .await;
                show_variants(viewer);
            }
            GeneAction::AnalyzeKnown => analyze_known(ctx, viewer).await?,
            GeneAction::AnalyzeVariant => analyze_variant(ctx, viewer).await?,
            GeneAction::OpenNcbi => match viewer.gene.ncbi_url() {
                Some(url) => {
                    if let Err(e) = open::that(&url) {
                        warn!(error = %e, url = %url, "Failed to open browser");
                        println!("Open {} in your browser", url.cyan());
                    }
                }
                None => println!("{}", "This gene has no NCBI Gene ID".yellow()),
            },
            GeneAction::Back => return Ok(()),
        }
    }
}

fn show_variants(viewer: &GeneViewer) {
    print_error(viewer.clinvar.error.as_deref());
    let variants = viewer.variants();
    if variants.is_empty() {
        if viewer.clinvar.error.is_none() {
            println!("{}", "No ClinVar variants found".yellow());
        }
        return;
    }
    println!();
    println!("{}", "Known Variants in Gene from ClinVar".bold());
    println!("{}", variants_table(variants));
}

fn pick_base(viewer: &mut GeneViewer) -> Result<()> {
    let Some(text) = cancellable(Text::new("Position in the loaded sequence:").prompt())? else {
        return Ok(());
    };

    match select_base(viewer, &text) {
        Ok((position, nucleotide)) => println!(
            "Selected {} at {}. The analysis form now uses this position.",
            nucleotide.to_string().bold(),
            position
        ),
        Err(message) => print_error(Some(&message)),
    }
    Ok(())
}

/// Seed the analysis form from a typed position. Errors stay in this action.
fn select_base(viewer: &mut GeneViewer, text: &str) -> std::result::Result<(u64, Nucleotide), String> {
    let position = parse_position(text).map_err(|e| e.to_string())?;

    let nucleotide = viewer
        .sequence
        .data
        .as_ref()
        .and_then(|data| data.nucleotide_at(position))
        .ok_or_else(|| "That position is outside the loaded sequence".to_string())?;

    viewer.select_position(position, nucleotide);
    Ok((position, nucleotide))
}

async fn analyze_known(ctx: &CommandContext, viewer: &mut GeneViewer) -> Result<()> {
    if viewer.clinvar.data.is_none() {
        viewer.refresh_variants(&ctx.client).await;
    }

    let options: Vec<String> = viewer
        .variants()
        .iter()
        .filter(|v| v.is_analyzable())
        .map(|v| format!("{} {}", v.clinvar_id, v.title))
        .collect();
    if options.is_empty() {
        print_error(viewer.clinvar.error.as_deref());
        println!("{}", "No single nucleotide variants to analyze".yellow());
        return Ok(());
    }

    let Some(choice) = cancellable(Select::new("Variant:", options).with_page_size(15).prompt())? else {
        return Ok(());
    };
    let clinvar_id = choice.split(' ').next().unwrap_or_default().to_string();
    debug!(clinvar_id = %clinvar_id, "Analyzing known variant");

    with_spinner(
        "Analyzing...",
        ctx.show_progress(),
        viewer.analyze_known_variant(&ctx.client, &clinvar_id),
    )
    .await;

    if let Some(comparison) = &viewer.comparison {
        println!();
        println!("{}", comparison_table(comparison));
        println!("{}", comparison.verdict().bold());
        viewer.close_comparison();
    } else if let Some(AnalysisState::Failed(error)) = viewer
        .variants()
        .iter()
        .find(|v| v.clinvar_id == clinvar_id)
        .map(|v| &v.analysis)
    {
        print_error(Some(error));
    }
    Ok(())
}

async fn analyze_variant(ctx: &CommandContext, viewer: &mut GeneViewer) -> Result<()> {
    let Some(position) = cancellable(
        Text::new("Position:")
            .with_initial_value(&viewer.analysis.position)
            .prompt(),
    )?
    else {
        return Ok(());
    };
    if position != viewer.analysis.position {
        viewer.analysis.set_position(position);
    }

    if let Some(reference) = viewer.analysis.reference {
        println!("Reference base: {}", reference.to_string().bold());
    }

    let mut known_change = None;
    if let Some(known) = viewer.analysis.known_variant_at_position(viewer.variants()) {
        println!();
        println!(
            "{} ClinVar {} {} > {} ({})",
            "Known variant detected:".bold(),
            known.variant.clinvar_id,
            known.ref_alt.reference,
            known.ref_alt.alternative,
            known.variant.classification
        );
        if let Some(warning) = known.warning() {
            println!("{}", warning.yellow());
        }
        known_change = Some(known.ref_alt);
    }

    let use_known = match known_change {
        Some(change) => cancellable(
            Confirm::new(&format!(
                "Use known variant {}>{}?",
                change.reference, change.alternative
            ))
            .with_default(true)
            .prompt(),
        )?
        .unwrap_or(false),
        None => false,
    };

    if use_known {
        viewer.adopt_known_variant();
    } else {
        let Some(alternative) = cancellable(
            Text::new("Alternative (A, C, G or T):")
                .with_placeholder("T")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        viewer.analysis.set_alternative(&alternative);
    }

    with_spinner(
        "Analyzing variant...",
        ctx.show_progress(),
        viewer.submit_analysis(&ctx.client),
    )
    .await;

    print_error(viewer.analysis.error.as_deref());
    if viewer.analysis.error.is_none() {
        if let Some(prediction) = &viewer.analysis.result {
            println!("{}", prediction_table(prediction));
        }
    }
    Ok(())
}
