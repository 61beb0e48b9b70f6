//! Configuration module for callscore.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each external
//! collaborator, `AppPaths` for cross-platform data directories, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{ApiConfig, AppConfig, ScoringConfig, TranscriptionConfig, API_KEY_ENV};
