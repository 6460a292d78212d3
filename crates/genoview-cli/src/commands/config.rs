//! `genoview config` command implementation

use crate::config::{
    Config, ENV_ANALYZE_URL, ENV_API_TIMEOUT_SECS, ENV_CLINICAL_TABLES_URL, ENV_EUTILS_URL,
    ENV_UCSC_API_URL,
};
use crate::error::Result;
use crate::render::{print_json, OutputFormat};
use colored::Colorize;

/// Show the effective configuration
pub fn show(config: &Config, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(config);
    }

    let analyze_url = config
        .analyze_url
        .clone()
        .unwrap_or_else(|| "(not set)".dimmed().to_string());

    println!("{}", "Genoview Configuration:".cyan().bold());
    println!();
    println!("{:<20} {}", "ucsc_api_url:", config.ucsc_api_url);
    println!("{:<20} {}", "clinical_tables_url:", config.clinical_tables_url);
    println!("{:<20} {}", "eutils_url:", config.eutils_url);
    println!("{:<20} {}", "analyze_url:", analyze_url);
    println!("{:<20} {}s", "timeout:", config.timeout_secs);
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  {:<34} - Variant prediction endpoint", ENV_ANALYZE_URL);
    println!("  {:<34} - UCSC API base URL", ENV_UCSC_API_URL);
    println!("  {:<34} - Clinical Tables base URL", ENV_CLINICAL_TABLES_URL);
    println!("  {:<34} - E-utilities base URL", ENV_EUTILS_URL);
    println!("  {:<34} - Request timeout in seconds", ENV_API_TIMEOUT_SECS);

    Ok(())
}
