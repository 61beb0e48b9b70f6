//! Audio module — the inbound upload payload and its validation.

pub mod upload;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use upload::{AudioUpload, UploadError};
