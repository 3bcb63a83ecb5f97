pub mod entity;
pub mod errors;
pub mod outcome;
pub mod value_objects;

pub use entity::{ExtractionFields, LicensePlateExtraction, VisitorIdExtraction};
pub use errors::ExtractionError;
pub use outcome::{ExtractionOutcome, MISSING_IMAGE_MESSAGE};
pub use value_objects::ImagePayload;
