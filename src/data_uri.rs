//! Encoded file references — `data:<mimetype>;base64,<payload>`.
//!
//! Every file-bearing interface in the system (serial extraction, product
//! search with image context, the upload endpoint) consumes this exact
//! representation, so it lives in one place. An `EncodedFile` is immutable
//! once built; callers clone or re-encode, never mutate.

use base64::Engine as _;

/// Errors from parsing or building an encoded file reference.
#[derive(Debug, thiserror::Error)]
pub enum DataUriError {
    #[error("Not a data URI (missing 'data:' scheme)")]
    MissingScheme,
    #[error("Data URI missing ';base64,' payload separator")]
    MissingSeparator,
    #[error("Base64 decode failed: {0}")]
    Base64(String),
    #[error("Decoded payload is empty")]
    EmptyPayload,
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// An uploaded file captured as raw bytes plus its declared media type.
///
/// Self-describing encoded form: `data:<mimetype>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    media_type: String,
    bytes: Vec<u8>,
}

impl EncodedFile {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Parse a `data:<mimetype>;base64,<payload>` string.
    ///
    /// The media type defaults to `application/octet-stream` when the URI
    /// omits it (`data:;base64,...`), which browsers are allowed to produce.
    pub fn from_data_uri(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
        let (media_type, payload) = rest
            .split_once(";base64,")
            .ok_or(DataUriError::MissingSeparator)?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| DataUriError::Base64(e.to_string()))?;
        if bytes.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }

        let media_type = if media_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            media_type.to_string()
        };

        Ok(Self { media_type, bytes })
    }

    /// Read a file from disk, deriving the media type from magic bytes first
    /// and the file extension second.
    pub fn from_path(path: &std::path::Path) -> Result<Self, DataUriError> {
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }
        let media_type = sniff_media_type(&bytes)
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(path)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });
        Ok(Self { media_type, bytes })
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The base64 payload alone, as the inference backend expects images.
    pub fn base64_payload(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// The full self-describing form.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.base64_payload())
    }
}

/// Detect a media type from magic bytes.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
        Some("image/jpeg")
    } else if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        Some("image/png")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.len() >= 5 && &bytes[0..5] == b"%PDF-" {
        Some("application/pdf")
    } else {
        None
    }
}
