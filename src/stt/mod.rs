//! STT (Speech-to-Text) collaborator module.
//!
//! The audio is never decoded here — it is forwarded as an opaque byte blob
//! to an external transcription API in a single blocking call.

pub mod transcriber;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use transcriber::{ApiTranscriber, Transcriber, TranscriptionError};

// test-only re-export so the pipeline test module can import MockTranscriber
// without `use callscore::stt::transcriber::MockTranscriber`.
#[cfg(test)]
pub use transcriber::MockTranscriber;
