use crate::{
    application::extract_fields::use_case::ExtractFieldsUseCase,
    domain::{
        capture::{CaptureError, CaptureSession, CaptureState, CompletionDisposition, Prefill, Submission},
        extraction::{ExtractionFields, ExtractionOutcome},
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Anything that can turn a captured photo into extraction fields: the
/// in-process use case or a remote server.
#[async_trait]
pub trait PhotoExtractor<F: ExtractionFields>: Send + Sync {
    async fn extract(&self, photo: &str) -> ExtractionOutcome<F>;
}

#[async_trait]
impl<F: ExtractionFields> PhotoExtractor<F> for ExtractFieldsUseCase {
    async fn extract(&self, photo: &str) -> ExtractionOutcome<F> {
        self.outcome::<F>(photo).await
    }
}

/// Async driver for one [`CaptureSession`].
///
/// The session lock is released while an extractor runs, so the operator can
/// keep editing, recapture, extract from another slot or submit during an
/// extraction. Whatever comes back is then applied only if its request is
/// still the current one for its slot.
pub struct CaptureWorkflow<Form> {
    session: Arc<Mutex<CaptureSession<Form>>>,
}

impl<Form> Clone for CaptureWorkflow<Form> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}

impl<Form> CaptureWorkflow<Form>
where
    Form: Validate + Clone + Send + 'static,
{
    pub fn new(session: CaptureSession<Form>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn state<F: ExtractionFields>(&self) -> CaptureState {
        self.session.lock().await.state::<F>()
    }

    pub async fn form(&self) -> Form {
        self.session.lock().await.form().clone()
    }

    pub async fn confidence<F: ExtractionFields>(&self) -> Option<f64> {
        self.session.lock().await.confidence::<F>()
    }

    pub async fn capture_photo<F>(&self, photo: impl Into<String>) -> Result<(), CaptureError>
    where
        F: ExtractionFields,
        Form: Prefill<F>,
    {
        self.session.lock().await.capture_photo::<F>(photo)
    }

    pub async fn edit_form<R>(
        &self,
        edit: impl FnOnce(&mut Form) -> R,
    ) -> Result<R, CaptureError> {
        self.session.lock().await.edit_form(edit)
    }

    /// Runs one extraction for the current photo of slot `F` and reports what
    /// happened to its result.
    #[instrument(skip(self, extractor), fields(flow = F::FLOW_NAME))]
    pub async fn extract<F>(
        &self,
        extractor: &dyn PhotoExtractor<F>,
    ) -> Result<CompletionDisposition, CaptureError>
    where
        F: ExtractionFields,
        Form: Prefill<F>,
    {
        let ticket = self.session.lock().await.begin_extraction::<F>()?;

        let outcome = extractor.extract(&ticket.photo).await;

        let disposition = self
            .session
            .lock()
            .await
            .complete_extraction(ticket.request_id, outcome);

        match &disposition {
            CompletionDisposition::Applied => info!(request_id = ticket.request_id, "form pre-filled"),
            CompletionDisposition::Failed(message) => {
                warn!(request_id = ticket.request_id, "extraction unavailable: {}", message)
            }
            CompletionDisposition::Stale => {
                info!(request_id = ticket.request_id, "extraction result superseded")
            }
        }
        Ok(disposition)
    }

    pub async fn submit(&self) -> Result<Submission<Form>, CaptureError> {
        self.session.lock().await.submit()
    }
}
