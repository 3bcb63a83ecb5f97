use crate::domain::{
    capture::{errors::CaptureError, form::Prefill},
    extraction::{ExtractionFields, ExtractionOutcome},
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;
use validator::Validate;

/// Where one photo slot of a gate form is in its capture-and-confirm cycle.
///
/// # Transitions
/// - `Idle` → capture → `PhotoReady`
/// - `PhotoReady` / `Extracted` → begin extraction → `Extracting`
/// - `Extracting` → success → `Extracted`, failure → `PhotoReady`
/// - any non-terminal state → submit → `Submitted`
///
/// Capturing a new photo from any non-terminal state lands in `PhotoReady` and
/// invalidates whatever extraction was in flight for that slot. Submitting the
/// form moves every slot to `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaptureState {
    Idle,
    PhotoReady,
    Extracting,
    Extracted,
    Submitted,
}

/// Handed out when an extraction starts. The result must be reported back with
/// the same `request_id`; results for any other id are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionTicket {
    pub request_id: u64,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompletionDisposition {
    /// Fields were pre-filled from the response.
    Applied,
    /// The attempt failed; the form was left untouched.
    Failed(String),
    /// The response belonged to a superseded request and was ignored.
    Stale,
}

/// A photo kept with the submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    pub photo: String,
    /// Confidence of the extraction from this photo that last pre-filled the form.
    pub confidence: Option<f64>,
}

/// A validated form ready for persistence, with its photos keyed by flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<Form> {
    pub form: Form,
    pub photos: BTreeMap<&'static str, CapturedPhoto>,
}

impl<Form> Submission<Form> {
    pub fn photo<F: ExtractionFields>(&self) -> Option<&str> {
        self.photos.get(F::FLOW_NAME).map(|p| p.photo.as_str())
    }

    pub fn confidence<F: ExtractionFields>(&self) -> Option<f64> {
        self.photos.get(F::FLOW_NAME).and_then(|p| p.confidence)
    }
}

#[derive(Debug, Clone)]
struct PhotoSlot {
    state: CaptureState,
    photo: Option<String>,
    confidence: Option<f64>,
    last_error: Option<String>,
    next_request_id: u64,
    in_flight: Option<u64>,
}

impl PhotoSlot {
    fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            photo: None,
            confidence: None,
            last_error: None,
            next_request_id: 1,
            in_flight: None,
        }
    }
}

/// State for one capture-and-confirm dialog.
///
/// A form can have several camera slots, one per extraction flow it accepts
/// (`Form: Prefill<F>`). Each slot owns its photo, request counter and
/// confidence; all of them pre-fill the same form. Extraction only ever
/// pre-fills: every field stays editable, and submission is possible from any
/// non-terminal state regardless of how extraction went.
#[derive(Debug, Clone)]
pub struct CaptureSession<Form> {
    form: Form,
    slots: BTreeMap<&'static str, PhotoSlot>,
    submitted: bool,
}

impl<Form> CaptureSession<Form>
where
    Form: Validate + Clone,
{
    pub fn new() -> Self
    where
        Form: Default,
    {
        Self::with_form(Form::default())
    }

    pub fn with_form(form: Form) -> Self {
        Self {
            form,
            slots: BTreeMap::new(),
            submitted: false,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn state<F: ExtractionFields>(&self) -> CaptureState {
        if self.submitted {
            return CaptureState::Submitted;
        }
        self.slot::<F>()
            .map_or(CaptureState::Idle, |slot| slot.state)
    }

    pub fn photo<F: ExtractionFields>(&self) -> Option<&str> {
        self.slot::<F>().and_then(|slot| slot.photo.as_deref())
    }

    /// Confidence of the extraction from flow `F` currently reflected in the form.
    pub fn confidence<F: ExtractionFields>(&self) -> Option<f64> {
        self.slot::<F>().and_then(|slot| slot.confidence)
    }

    pub fn last_error<F: ExtractionFields>(&self) -> Option<&str> {
        self.slot::<F>().and_then(|slot| slot.last_error.as_deref())
    }

    /// Whether the "extract" control for flow `F` should be enabled.
    pub fn can_extract<F: ExtractionFields>(&self) -> bool {
        matches!(
            self.state::<F>(),
            CaptureState::PhotoReady | CaptureState::Extracted
        )
    }

    pub fn capture_photo<F>(&mut self, photo: impl Into<String>) -> Result<(), CaptureError>
    where
        F: ExtractionFields,
        Form: Prefill<F>,
    {
        self.ensure_open()?;
        let photo = photo.into();
        if photo.trim().is_empty() {
            return Err(CaptureError::EmptyPhoto);
        }

        let slot = self.slot_mut::<F>();
        if let Some(id) = slot.in_flight.take() {
            debug!(flow = F::FLOW_NAME, request_id = id, "photo recaptured, in-flight extraction superseded");
        }
        slot.photo = Some(photo);
        slot.confidence = None;
        slot.last_error = None;
        slot.state = CaptureState::PhotoReady;
        Ok(())
    }

    pub fn begin_extraction<F>(&mut self) -> Result<ExtractionTicket, CaptureError>
    where
        F: ExtractionFields,
        Form: Prefill<F>,
    {
        match self.state::<F>() {
            CaptureState::Submitted => return Err(CaptureError::AlreadySubmitted),
            CaptureState::Extracting => return Err(CaptureError::ExtractionInFlight),
            CaptureState::Idle => return Err(CaptureError::NoPhoto),
            CaptureState::PhotoReady | CaptureState::Extracted => {}
        }

        let slot = self.slot_mut::<F>();
        let photo = slot.photo.clone().ok_or(CaptureError::NoPhoto)?;
        let request_id = slot.next_request_id;
        slot.next_request_id += 1;
        slot.in_flight = Some(request_id);
        slot.last_error = None;
        slot.state = CaptureState::Extracting;

        Ok(ExtractionTicket { request_id, photo })
    }

    pub fn complete_extraction<F>(
        &mut self,
        request_id: u64,
        outcome: ExtractionOutcome<F>,
    ) -> CompletionDisposition
    where
        F: ExtractionFields,
        Form: Prefill<F>,
    {
        let current = !self.submitted
            && self.slot::<F>().is_some_and(|slot| {
                slot.state == CaptureState::Extracting && slot.in_flight == Some(request_id)
            });
        if !current {
            debug!(flow = F::FLOW_NAME, request_id, "discarding stale extraction response");
            return CompletionDisposition::Stale;
        }

        match outcome {
            ExtractionOutcome::Extracted(fields) => {
                self.form.prefill(&fields);
                let slot = self.slot_mut::<F>();
                slot.in_flight = None;
                slot.confidence = Some(fields.confidence());
                slot.state = CaptureState::Extracted;
                CompletionDisposition::Applied
            }
            ExtractionOutcome::Failed { error } => {
                let slot = self.slot_mut::<F>();
                slot.in_flight = None;
                slot.last_error = Some(error.clone());
                slot.state = CaptureState::PhotoReady;
                CompletionDisposition::Failed(error)
            }
        }
    }

    /// Applies a manual edit. Allowed until the form is submitted.
    pub fn edit_form<R>(&mut self, edit: impl FnOnce(&mut Form) -> R) -> Result<R, CaptureError> {
        self.ensure_open()?;
        Ok(edit(&mut self.form))
    }

    /// Validates and closes the session. Extractions still in flight are
    /// abandoned; their responses will be discarded.
    pub fn submit(&mut self) -> Result<Submission<Form>, CaptureError> {
        self.ensure_open()?;
        self.form.validate().map_err(CaptureError::InvalidForm)?;

        self.submitted = true;
        let mut photos = BTreeMap::new();
        for (flow, slot) in self.slots.iter_mut() {
            slot.in_flight = None;
            slot.state = CaptureState::Submitted;
            if let Some(photo) = &slot.photo {
                photos.insert(
                    *flow,
                    CapturedPhoto {
                        photo: photo.clone(),
                        confidence: slot.confidence,
                    },
                );
            }
        }

        Ok(Submission {
            form: self.form.clone(),
            photos,
        })
    }

    fn slot<F: ExtractionFields>(&self) -> Option<&PhotoSlot> {
        self.slots.get(F::FLOW_NAME)
    }

    fn slot_mut<F: ExtractionFields>(&mut self) -> &mut PhotoSlot {
        self.slots.entry(F::FLOW_NAME).or_insert_with(PhotoSlot::new)
    }

    fn ensure_open(&self) -> Result<(), CaptureError> {
        if self.submitted {
            Err(CaptureError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }
}

impl<Form> Default for CaptureSession<Form>
where
    Form: Validate + Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
