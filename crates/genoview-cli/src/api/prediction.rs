//! Variant-effect prediction

use crate::api::client::GenomeClient;
use crate::api::types::PredictionRequest;
use crate::error::{CliError, Result};
use crate::models::VariantPrediction;
use tracing::{debug, instrument};

impl GenomeClient {
    /// Request a prediction for a single-base substitution.
    ///
    /// Input is sent as given; callers check the alternative first.
    #[instrument(skip(self), fields(position = request.variant_position, alt = %request.alternative))]
    pub async fn analyze_variant(&self, request: &PredictionRequest) -> Result<VariantPrediction> {
        let url = self.config.analyze_url()?;
        debug!(url = %url, "POST");

        let response = self.client.post(url).json(request).send().await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CliError::analysis(body));
        }

        Ok(response.json().await?)
    }
}
