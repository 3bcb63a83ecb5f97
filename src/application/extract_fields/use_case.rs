use crate::{
    domain::extraction::{
        ExtractionError, ExtractionFields, ExtractionOutcome, ImagePayload,
        LicensePlateExtraction, VisitorIdExtraction,
    },
    infrastructure::inference::traits::{InferenceProvider, InferenceRequest},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Runs one extraction flow against an injected inference provider.
///
/// The use case is stateless: two calls with the same photo against a
/// deterministic provider produce the same result.
#[derive(Clone)]
pub struct ExtractFieldsUseCase {
    provider: Arc<dyn InferenceProvider>,
}

impl ExtractFieldsUseCase {
    pub fn new(provider: Arc<dyn InferenceProvider>) -> Self {
        Self { provider }
    }

    /// Validates the photo, issues exactly one inference call and checks the
    /// response against the flow's output schema.
    ///
    /// # Errors
    /// - `MissingInput` / `InvalidInput` before any network traffic
    /// - `Inference` when the provider fails or its output does not conform
    #[instrument(skip(self, photo), fields(flow = F::FLOW_NAME, photo_len = photo.len()))]
    pub async fn execute<F: ExtractionFields>(&self, photo: &str) -> Result<F, ExtractionError> {
        let image = ImagePayload::parse(photo)?;
        debug!(
            media_type = image.media_type(),
            bytes = image.byte_len(),
            "dispatching extraction"
        );

        let request = InferenceRequest {
            flow: F::FLOW_NAME,
            instruction: F::instruction().to_string(),
            output_schema: F::output_schema(),
            image,
        };

        let raw = self
            .provider
            .generate(request)
            .await
            .map_err(|e| ExtractionError::Inference(format!("{:#}", e)))?;

        let fields: F = serde_json::from_value(raw).map_err(|e| {
            warn!("Model output does not match the {} schema: {}", F::FLOW_NAME, e);
            ExtractionError::Inference(format!("non-conforming output: {}", e))
        })?;

        info!(confidence = fields.confidence(), "extraction succeeded");
        Ok(fields)
    }

    /// Caller-facing variant: logs the failure and returns only a user-safe
    /// message.
    pub async fn outcome<F: ExtractionFields>(&self, photo: &str) -> ExtractionOutcome<F> {
        let result = self.execute::<F>(photo).await;
        match &result {
            Err(ExtractionError::MissingInput) => {
                warn!(flow = F::FLOW_NAME, "extraction requested without image data");
            }
            Err(err) => {
                error!(flow = F::FLOW_NAME, error = %err, "extraction failed");
            }
            Ok(_) => {}
        }
        ExtractionOutcome::from_result(result)
    }
}

pub async fn extract_license_plate(
    use_case: &ExtractFieldsUseCase,
    photo: &str,
) -> ExtractionOutcome<LicensePlateExtraction> {
    use_case.outcome(photo).await
}

pub async fn extract_visitor_info(
    use_case: &ExtractFieldsUseCase,
    photo: &str,
) -> ExtractionOutcome<VisitorIdExtraction> {
    use_case.outcome(photo).await
}
