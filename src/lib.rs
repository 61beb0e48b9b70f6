//! callscore — call-center audio QA.
//!
//! Takes a call recording, transcribes it through an external
//! speech-to-text API, asks an external LLM to score the call against a
//! fixed weighted rubric, sanitizes the LLM's answer into a trustworthy
//! score map, and assembles the final [`scoring::AnalysisResult`].
//!
//! # Modules
//!
//! * [`criteria`] — the const rubric table (single source of truth for both
//!   prompting and validation).
//! * [`audio`] — the inbound upload payload and container validation.
//! * [`stt`] — the transcription collaborator.
//! * [`llm`] — the prompt builder and scoring collaborator.
//! * [`scoring`] — response sanitization and score aggregation.
//! * [`pipeline`] — the orchestrator state machine tying it all together.
//! * [`config`] — settings, paths, and the provider credential.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use callscore::audio::AudioUpload;
//! use callscore::config::AppConfig;
//! use callscore::pipeline::CallEvaluator;
//! use callscore::scoring::score_percentage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let evaluator = CallEvaluator::from_config(&config)?;
//!
//!     let bytes = std::fs::read("call.mp3")?;
//!     let upload = AudioUpload::new(bytes, "call.mp3", Some("audio/mpeg"));
//!
//!     let result = evaluator.evaluate(upload).await?;
//!     println!("{}% — {}", score_percentage(&result.scores), result.overall_feedback);
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod config;
pub mod criteria;
pub mod llm;
pub mod pipeline;
pub mod scoring;
pub mod stt;
