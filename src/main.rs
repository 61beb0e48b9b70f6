//! CLI entry point — evaluate one call recording and print the report.
//!
//! ```text
//! callscore <audio-file>          # .mp3 or .wav
//! callscore --json <audio-file>   # machine-readable output only
//! ```
//!
//! The provider credential is read from `GROQ_API_KEY` (or
//! `settings.toml`); its absence is reported before any network call.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use callscore::audio::AudioUpload;
use callscore::config::AppConfig;
use callscore::criteria::EVALUATION_PARAMETERS;
use callscore::pipeline::CallEvaluator;
use callscore::scoring::{score_percentage, total_score, AnalysisResult};

// ---------------------------------------------------------------------------
// Argument handling
// ---------------------------------------------------------------------------

struct Args {
    audio_path: String,
    json_only: bool,
}

fn parse_args() -> Option<Args> {
    let mut json_only = false;
    let mut audio_path = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_only = true,
            "-h" | "--help" => return None,
            _ => audio_path = Some(arg),
        }
    }

    audio_path.map(|audio_path| Args {
        audio_path,
        json_only,
    })
}

/// Map a filename extension to the declared content type the provider sees.
fn content_type_for(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

fn print_report(result: &AnalysisResult) {
    println!("Call Evaluation Report");
    println!("======================");
    for param in EVALUATION_PARAMETERS {
        let awarded = result.scores.get(param.key).copied().unwrap_or(0.0);
        println!("{:<28} {:>5} / {}", param.name, awarded, param.weight);
    }
    println!(
        "\nTotal: {} / 108  ({}%)",
        total_score(&result.scores),
        score_percentage(&result.scores)
    );
    println!("\nOverall feedback:\n{}", result.overall_feedback);
    println!("\nObservation:\n{}", result.observation);
    if let Some(transcript) = &result.transcript {
        println!("\nTranscript:\n{transcript}");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

async fn run(args: Args) -> Result<()> {
    let config = AppConfig::load().context("loading settings.toml")?;
    let evaluator = CallEvaluator::from_config(&config)?;

    let path = Path::new(&args.audio_path);
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio")
        .to_string();

    let upload = AudioUpload::new(bytes, &filename, content_type_for(path));

    let result = evaluator.evaluate(upload).await?;

    if args.json_only {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_args() else {
        eprintln!("usage: callscore [--json] <audio-file (.mp3/.wav)>");
        return ExitCode::FAILURE;
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_maps_known_extensions() {
        assert_eq!(content_type_for(Path::new("a/call.mp3")), Some("audio/mpeg"));
        assert_eq!(content_type_for(Path::new("call.WAV")), Some("audio/wav"));
        assert_eq!(content_type_for(Path::new("call.ogg")), None);
        assert_eq!(content_type_for(Path::new("call")), None);
    }
}
