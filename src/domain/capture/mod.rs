pub mod errors;
pub mod form;
pub mod session;

pub use errors::CaptureError;
pub use form::{PedestrianEntryForm, Prefill, VehicleEntryForm};
pub use session::{
    CaptureSession, CaptureState, CapturedPhoto, CompletionDisposition, ExtractionTicket, Submission,
};
