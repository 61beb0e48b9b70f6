//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//!
//! The provider credential is the one required secret.  It may live in
//! `settings.toml` or in the `GROQ_API_KEY` environment variable; the env
//! var wins when both are set.  [`ApiConfig::require_api_key`] is how the
//! pipeline detects a missing credential *before* any external call.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable that overrides `api.api_key` from the settings file.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Connection settings shared by both external collaborators.
///
/// Both the transcription and scoring endpoints live under one
/// OpenAI-compatible base URL (Groq by default), so one credential and one
/// timeout cover both calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the OpenAI-compatible API.
    ///
    /// - Groq default: `https://api.groq.com/openai/v1`
    /// - OpenAI: `https://api.openai.com/v1`
    pub base_url: String,
    /// Provider credential.  `None` means "look it up in the environment".
    pub api_key: Option<String>,
    /// Maximum seconds to wait for each external call before timing out.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".into(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

impl ApiConfig {
    /// Resolve the credential: env var first, then the settings file.
    ///
    /// Empty strings count as absent.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.is_empty()))
    }

    /// Resolve the credential or fail with a configuration message.
    ///
    /// Called before either external collaborator is invoked so a missing
    /// key surfaces as a configuration error, never as a transcription or
    /// scoring failure.
    pub fn require_api_key(&self) -> Result<String, String> {
        self.resolved_api_key().ok_or_else(|| {
            format!("{API_KEY_ENV} not configured — set the environment variable or api.api_key in settings.toml")
        })
    }
}

// ---------------------------------------------------------------------------
// TranscriptionConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-to-text collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Model identifier sent to the API (e.g. `"whisper-large-v3-turbo"`).
    pub model: String,
    /// Primary speech language as an ISO-639-1 code.
    pub language: String,
    /// Sampling temperature.  0.0 keeps transcription deterministic.
    pub temperature: f32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "whisper-large-v3-turbo".into(),
            language: "en".into(),
            temperature: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ScoringConfig
// ---------------------------------------------------------------------------

/// Settings for the LLM scoring collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Model identifier sent to the API (e.g. `"llama-3.3-70b-versatile"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,
    /// Maximum completion tokens for the evaluation response.
    pub max_tokens: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".into(),
            temperature: 0.3,
            max_tokens: 2_000,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use callscore::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shared provider connection settings.
    pub api: ApiConfig,
    /// Speech-to-text settings.
    pub transcription: TranscriptionConfig,
    /// LLM scoring settings.
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
