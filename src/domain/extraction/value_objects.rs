use crate::domain::extraction::errors::ExtractionError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;
use lazy_static::lazy_static;

lazy_static! {
    static ref DATA_URI_REGEX: regex::Regex =
        regex::Regex::new(r"^data:(image/[A-Za-z0-9.+-]+)((?:;[^;,]+)*);base64,(.+)$").unwrap();
}

/// A photo as the front end sends it: `data:<mime>;base64,<data>`.
///
/// Construction decodes the body once, so a payload that exists is always a
/// well-formed image data URI with a non-empty body. The original text is kept
/// for forwarding to the inference provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    media_type: String,
    data: String,
    byte_len: usize,
}

impl ImagePayload {
    pub fn parse(raw: &str) -> Result<Self, ExtractionError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ExtractionError::MissingInput);
        }

        let captures = DATA_URI_REGEX.captures(raw).ok_or_else(|| {
            ExtractionError::InvalidInput("expected data:image/<type>;base64,<data>".into())
        })?;

        let media_type = captures[1].to_ascii_lowercase();
        let data = captures[3].to_string();

        let bytes = STANDARD
            .decode(data.as_bytes())
            .map_err(|e| ExtractionError::InvalidInput(format!("body is not base64: {}", e)))?;
        if bytes.is_empty() {
            return Err(ExtractionError::InvalidInput("image body is empty".into()));
        }

        let payload = Self {
            media_type,
            data,
            byte_len: bytes.len(),
        };

        if let Some(sniffed) = sniff_format(&bytes) {
            let declared = ImageFormat::from_mime_type(&payload.media_type);
            if declared.is_some_and(|d| d != sniffed) {
                tracing::debug!(
                    declared = %payload.media_type,
                    sniffed = ?sniffed,
                    "image payload media type does not match its content"
                );
            }
        }

        Ok(payload)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Base64 body without the `data:` prefix.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Size of the decoded image in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}
