use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use ts_rs::TS;

/// Output contract of one extraction flow.
///
/// Implementors are flat records deserialized straight from the model's JSON
/// response. Every field is required, so a response that omits a field or
/// carries the wrong type fails deserialization instead of producing a partial
/// record. Unknown keys are dropped.
pub trait ExtractionFields:
    Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static
{
    /// Stable name used in logs and provider requests.
    const FLOW_NAME: &'static str;

    /// Route segment under `/api/v1/extractions/`.
    const SLUG: &'static str;

    /// What the caller sees when the attempt fails for any reason other than a
    /// missing photo.
    const FAILURE_MESSAGE: &'static str;

    /// Fixed natural-language task description sent with the image.
    fn instruction() -> &'static str;

    /// JSON schema of the expected response object.
    fn output_schema() -> Value;

    fn confidence(&self) -> f64;
}

/// Result of reading a vehicle license plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LicensePlateExtraction {
    /// Plate number as read from the image
    pub license_plate: String,

    /// Model-reported confidence, conventionally within 0..=1
    pub confidence: f64,
}

impl ExtractionFields for LicensePlateExtraction {
    const FLOW_NAME: &'static str = "ocrLicensePlate";
    const SLUG: &'static str = "license-plate";
    const FAILURE_MESSAGE: &'static str = "Failed to extract license plate.";

    fn instruction() -> &'static str {
        "You are an expert OCR reader that extracts data from images of vehicle license plates.\n\n\
         Extract the license plate number from the following image. \
         Return the confidence level of the extraction as a number between 0 and 1."
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "licensePlate": {
                    "type": "string",
                    "description": "The license plate number extracted from the image."
                },
                "confidence": {
                    "type": "number",
                    "description": "The confidence level of the OCR extraction (0-1)."
                }
            },
            "required": ["licensePlate", "confidence"]
        })
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Result of reading a visitor's identification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VisitorIdExtraction {
    /// Full name printed on the document
    pub visitor_name: String,

    /// Document number printed on the document
    pub visitor_document_number: String,

    /// Model-reported confidence, conventionally within 0..=1
    pub confidence: f64,
}

impl ExtractionFields for VisitorIdExtraction {
    const FLOW_NAME: &'static str = "ocrVisitorInformation";
    const SLUG: &'static str = "visitor-id";
    const FAILURE_MESSAGE: &'static str = "Failed to extract information from the ID.";

    fn instruction() -> &'static str {
        "You are an expert OCR reader that extracts data from images of identification documents.\n\n\
         Extract the name and document number from the following image. \
         Return the confidence level of the extraction as a number between 0 and 1."
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "visitorName": {
                    "type": "string",
                    "description": "The name of the visitor extracted from the image."
                },
                "visitorDocumentNumber": {
                    "type": "string",
                    "description": "The document number of the visitor extracted from the image."
                },
                "confidence": {
                    "type": "number",
                    "description": "The confidence level of the OCR extraction (0-1)."
                }
            },
            "required": ["visitorName", "visitorDocumentNumber", "confidence"]
        })
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }
}
