//! Terminal rendering
//!
//! Tables use comfy-table with the rounded UTF-8 preset. Nucleotides and
//! clinical classifications are coloured the same way everywhere.

use crate::error::Result;
use crate::models::{
    AnalysisState, AssemblyCatalog, Chromosome, ClinvarVariant, GeneSearchResult, GeneView,
    SequenceData, VariantComparison, VariantPrediction,
};
use crate::outcome::Outcome;
use colored::{ColoredString, Colorize};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use genoview_common::types::format_position;
use serde::Serialize;

/// Bases per line in sequence output
pub const SEQUENCE_LINE_WIDTH: usize = 60;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn nucleotide_colored(base: char) -> ColoredString {
    let text = base.to_string();
    match base.to_ascii_uppercase() {
        'A' => text.red(),
        'T' => text.blue(),
        'G' => text.green(),
        'C' => text.yellow(),
        _ => text.dimmed(),
    }
}

pub fn classification_colored(label: &str) -> ColoredString {
    match label.to_lowercase().as_str() {
        "pathogenic" => label.red().bold(),
        "likely pathogenic" => label.truecolor(255, 165, 0),
        "uncertain significance" => label.yellow(),
        "likely benign" => label.bright_green(),
        "benign" => label.green().bold(),
        _ => label.normal(),
    }
}

pub fn assemblies_table(catalog: &AssemblyCatalog, organism: Option<&str>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Organism", "ID", "Name", "Source", "Active"]);

    let wanted = organism.map(str::to_lowercase);
    for (name, assemblies) in catalog {
        if wanted.as_deref().is_some_and(|w| name.to_lowercase() != w) {
            continue;
        }
        for assembly in assemblies {
            table.add_row(vec![
                name.clone(),
                assembly.id.clone(),
                assembly.name.clone(),
                truncate_string(&assembly.source_name, 40),
                if assembly.active { "yes" } else { "no" }.to_string(),
            ]);
        }
    }
    table
}

pub fn chromosomes_table(chromosomes: &[Chromosome]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Chromosome", "Size (bp)"]);
    for chrom in chromosomes {
        table.add_row(vec![chrom.name.clone(), format_position(chrom.size)]);
    }
    table
}

pub fn gene_results_table(results: &[GeneSearchResult]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Symbol", "Chromosome", "Name", "Gene ID"]);
    for (i, gene) in results.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            gene.symbol.clone(),
            gene.chrom.clone(),
            truncate_string(&gene.name, 50),
            if gene.gene_id.is_empty() { "-".to_string() } else { gene.gene_id.clone() },
        ]);
    }
    table
}

/// Gene facts; the detail half collapses to a notice when unavailable
pub fn gene_info_table(gene: &GeneSearchResult, detail: Outcome<&GeneView>) -> Table {
    let mut table = new_table();
    table.add_row(vec!["Symbol".to_string(), gene.symbol.clone()]);
    table.add_row(vec!["Name".to_string(), gene.name.clone()]);
    table.add_row(vec!["Chromosome".to_string(), gene.chrom.clone()]);

    match detail {
        Outcome::Loaded(view) => {
            table.add_row(vec!["Position".to_string(), view.bounds.to_string()]);
            if view.is_reverse_strand() {
                table.add_row(vec!["Strand".to_string(), "reverse (-)".to_string()]);
            }
            if !view.detail.maplocation.is_empty() {
                table.add_row(vec!["Map location".to_string(), view.detail.maplocation.clone()]);
            }
            if let Some(organism) = &view.detail.organism {
                table.add_row(vec![
                    "Organism".to_string(),
                    format!("{} ({})", organism.scientificname, organism.commonname),
                ]);
            }
            if !view.detail.summary.is_empty() {
                table.add_row(vec!["Summary".to_string(), truncate_string(&view.detail.summary, 300)]);
            }
        }
        Outcome::Unavailable { .. } => {
            table.add_row(vec!["Details".to_string(), "No detail available".to_string()]);
        }
    }

    if let Some(url) = gene.ncbi_url() {
        table.add_row(vec!["NCBI".to_string(), url]);
    }
    table
}

/// Sequence as position-prefixed, colour-coded lines
pub fn sequence_lines(data: &SequenceData, width: usize) -> Vec<String> {
    data.lines(width)
        .map(|(start, chunk)| {
            let bases: String = chunk.chars().map(|c| nucleotide_colored(c).to_string()).collect();
            format!("{:>14}  {}", format_position(start), bases)
        })
        .collect()
}

fn analysis_cell(variant: &ClinvarVariant) -> String {
    match &variant.analysis {
        AnalysisState::Idle if variant.is_analyzable() => "available".to_string(),
        AnalysisState::Idle => "-".to_string(),
        AnalysisState::Analyzing => "analyzing...".to_string(),
        AnalysisState::Predicted(p) => format!(
            "{} ({}%)",
            classification_colored(&p.prediction),
            p.confidence_percent()
        ),
        AnalysisState::Failed(e) => format!("failed: {}", truncate_string(e, 30)).red().to_string(),
    }
}

pub fn variants_table(variants: &[ClinvarVariant]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ClinVar ID", "Variant", "Type", "Location", "Clinical Significance", "Prediction"]);
    for variant in variants {
        table.add_row(vec![
            variant.clinvar_id.clone(),
            truncate_string(&variant.title, 50),
            variant.variation_type.clone(),
            variant.location.clone(),
            classification_colored(&variant.classification).to_string(),
            analysis_cell(variant),
        ]);
    }
    table
}

pub fn prediction_table(prediction: &VariantPrediction) -> Table {
    let mut table = new_table();
    table.add_row(vec!["Position".to_string(), format_position(prediction.position)]);
    table.add_row(vec![
        "Change".to_string(),
        format!(
            "{} > {}",
            colored_bases(&prediction.reference),
            colored_bases(&prediction.alternative)
        ),
    ]);
    table.add_row(vec![
        "Prediction".to_string(),
        classification_colored(&prediction.prediction).to_string(),
    ]);
    table.add_row(vec![
        "Confidence".to_string(),
        format!("{}%", prediction.confidence_percent()),
    ]);
    table.add_row(vec![
        "Delta score".to_string(),
        format!("{:.6}", prediction.delta_score),
    ]);
    table.add_row(vec!["Effect".to_string(), prediction.effect_description().to_string()]);
    table
}

pub fn comparison_table(comparison: &VariantComparison) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "ClinVar", "Model"]);
    table.add_row(vec![
        "Classification".to_string(),
        classification_colored(&comparison.variant.classification).to_string(),
        classification_colored(&comparison.prediction.prediction).to_string(),
    ]);
    table.add_row(vec![
        "Confidence".to_string(),
        "-".to_string(),
        format!("{}%", comparison.prediction.confidence_percent()),
    ]);
    table.add_row(vec![
        "Variant".to_string(),
        truncate_string(&comparison.variant.title, 40),
        format!(
            "{} {} > {}",
            format_position(comparison.prediction.position),
            comparison.prediction.reference,
            comparison.prediction.alternative
        ),
    ]);
    table
}

fn colored_bases(bases: &str) -> String {
    bases.chars().map(|c| nucleotide_colored(c).to_string()).collect()
}
