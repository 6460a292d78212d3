//! Configuration management for the Genoview CLI
//!
//! The prediction endpoint URL is the only setting that changes behavior. The
//! other variables point the client at mirrors or test servers and tune the
//! request timeout.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Constants
// ============================================================================

pub const DEFAULT_UCSC_API_URL: &str = "https://api.genome.ucsc.edu";
pub const DEFAULT_CLINICAL_TABLES_URL: &str = "https://clinicaltables.nlm.nih.gov";
pub const DEFAULT_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default timeout for a single HTTP request in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

pub const ENV_ANALYZE_URL: &str = "ANALYZE_SINGLE_VARIANT_BASE_URL";
pub const ENV_UCSC_API_URL: &str = "GENOVIEW_UCSC_API_URL";
pub const ENV_CLINICAL_TABLES_URL: &str = "GENOVIEW_CLINICAL_TABLES_URL";
pub const ENV_EUTILS_URL: &str = "GENOVIEW_EUTILS_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "GENOVIEW_API_TIMEOUT_SECS";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// UCSC genome browser API base URL
    pub ucsc_api_url: String,

    /// NCBI Clinical Tables base URL (gene search)
    pub clinical_tables_url: String,

    /// NCBI E-utilities base URL (gene summary, ClinVar)
    pub eutils_url: String,

    /// Variant-effect prediction endpoint, if configured
    #[serde(default)]
    pub analyze_url: Option<String>,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ucsc_api_url: DEFAULT_UCSC_API_URL.to_string(),
            clinical_tables_url: DEFAULT_CLINICAL_TABLES_URL.to_string(),
            eutils_url: DEFAULT_EUTILS_URL.to_string(),
            analyze_url: None,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from environment variables (after reading `.env` if present)
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Some(url) = non_empty_var(ENV_UCSC_API_URL) {
            config.ucsc_api_url = trim_base(&url);
        }

        if let Some(url) = non_empty_var(ENV_CLINICAL_TABLES_URL) {
            config.clinical_tables_url = trim_base(&url);
        }

        if let Some(url) = non_empty_var(ENV_EUTILS_URL) {
            config.eutils_url = trim_base(&url);
        }

        config.analyze_url = non_empty_var(ENV_ANALYZE_URL);

        if let Some(secs) = non_empty_var(ENV_API_TIMEOUT_SECS) {
            config.timeout_secs = secs.parse().map_err(|_| {
                CliError::config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_API_TIMEOUT_SECS, secs
                ))
            })?;
        }

        Ok(config)
    }

    /// The prediction endpoint, or a configuration error naming the variable to set
    pub fn analyze_url(&self) -> Result<&str> {
        self.analyze_url.as_deref().ok_or_else(|| {
            CliError::config(format!(
                "No prediction endpoint configured. Set {} to the analysis service URL",
                ENV_ANALYZE_URL
            ))
        })
    }

    /// Point every upstream at one base URL (used by tests against a mock server)
    pub fn with_single_base(base: &str) -> Self {
        let base = trim_base(base);
        Self {
            ucsc_api_url: base.clone(),
            clinical_tables_url: base.clone(),
            eutils_url: base.clone(),
            analyze_url: Some(format!("{}/analyze", base)),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
