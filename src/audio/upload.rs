//! Audio upload payload and container-format validation.
//!
//! Validation runs before any external call is attempted: an upload that is
//! empty or not an accepted container is rejected immediately, with zero
//! collaborator invocations.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Allowlists
// ---------------------------------------------------------------------------

/// Declared content types accepted without looking at the filename.
const ALLOWED_CONTENT_TYPES: &[&str] = &["audio/mpeg", "audio/wav", "audio/mp3"];

/// Filename extensions accepted when the declared content type is missing,
/// generic, or unrecognised.
const ALLOWED_EXTENSIONS: &[&str] = &["mp3", "wav"];

// ---------------------------------------------------------------------------
// UploadError
// ---------------------------------------------------------------------------

/// Why an upload was rejected before the pipeline ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The payload contained no bytes at all.
    #[error("No audio file provided")]
    Missing,

    /// Neither the declared content type nor the filename extension is an
    /// accepted audio container.
    #[error("Invalid file type. Please upload .mp3 or .wav file")]
    UnsupportedFormat,
}

// ---------------------------------------------------------------------------
// AudioUpload
// ---------------------------------------------------------------------------

/// An inbound audio payload: opaque bytes plus metadata for the
/// transcription provider.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    /// Raw container bytes — never decoded locally.
    pub bytes: Vec<u8>,
    /// Original filename, forwarded to the provider and used as the
    /// fallback format check.
    pub filename: String,
    /// Declared MIME type, if the caller supplied one.
    pub content_type: Option<String>,
}

impl AudioUpload {
    pub fn new(bytes: Vec<u8>, filename: &str, content_type: Option<&str>) -> Self {
        Self {
            bytes,
            filename: filename.to_string(),
            content_type: content_type.map(str::to_string),
        }
    }

    /// Check the payload against the container allowlist.
    ///
    /// An upload passes when its declared content type is on the allowlist
    /// **or** its filename extension is `mp3`/`wav` (case-insensitive).
    /// The extension fallback covers callers whose toolchain declares a
    /// generic type such as `application/octet-stream`.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.bytes.is_empty() {
            return Err(UploadError::Missing);
        }

        let type_ok = self
            .content_type
            .as_deref()
            .is_some_and(|t| ALLOWED_CONTENT_TYPES.contains(&t));

        let ext_ok = self
            .extension()
            .is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()));

        if type_ok || ext_ok {
            Ok(())
        } else {
            Err(UploadError::UnsupportedFormat)
        }
    }

    /// Lowercased filename extension, if any.
    fn extension(&self) -> Option<String> {
        let (stem, ext) = self.filename.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: &str, content_type: Option<&str>) -> AudioUpload {
        AudioUpload::new(vec![1, 2, 3], filename, content_type)
    }

    #[test]
    fn empty_payload_is_missing() {
        let u = AudioUpload::new(Vec::new(), "call.mp3", Some("audio/mpeg"));
        assert_eq!(u.validate(), Err(UploadError::Missing));
    }

    #[test]
    fn allowed_content_types_pass() {
        for ct in ["audio/mpeg", "audio/wav", "audio/mp3"] {
            assert_eq!(upload("recording", Some(ct)).validate(), Ok(()));
        }
    }

    #[test]
    fn extension_fallback_covers_generic_content_type() {
        let u = upload("call.mp3", Some("application/octet-stream"));
        assert_eq!(u.validate(), Ok(()));

        let u = upload("call.wav", None);
        assert_eq!(u.validate(), Ok(()));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(upload("CALL.WAV", None).validate(), Ok(()));
        assert_eq!(upload("Call.Mp3", None).validate(), Ok(()));
    }

    #[test]
    fn unsupported_format_is_rejected() {
        let u = upload("notes.txt", Some("text/plain"));
        assert_eq!(u.validate(), Err(UploadError::UnsupportedFormat));

        let u = upload("video.mp4", Some("video/mp4"));
        assert_eq!(u.validate(), Err(UploadError::UnsupportedFormat));
    }

    #[test]
    fn extensionless_filename_without_type_is_rejected() {
        let u = upload("recording", None);
        assert_eq!(u.validate(), Err(UploadError::UnsupportedFormat));
    }

    #[test]
    fn dotfile_is_not_treated_as_extension() {
        // ".mp3" has no stem, so there is no extension to fall back on.
        let u = upload(".mp3", None);
        assert_eq!(u.validate(), Err(UploadError::UnsupportedFormat));
    }
}
