//! Severity Core - Main Entry Point

mod api;
mod constants;
mod logic;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::logic::features::encode;
use crate::logic::model::DecisionEngine;

#[derive(Parser)]
#[command(name = "severity-core")]
#[command(version, about = "Accident severity prediction tool", long_about = None)]
struct Cli {
    /// Path to the trained model bundle
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Print prediction results as JSON instead of advice copy
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    let model_path = constants::resolve_model_path(cli.model.as_deref());

    // Load before any input is read. A broken deployment must never reach
    // the questionnaire.
    let mut engine = DecisionEngine::new();
    if let Err(e) = engine.load(&model_path) {
        log::error!("Cannot start: {}", e);
        return ExitCode::FAILURE;
    }

    if let Some(metadata) = engine.metadata() {
        log::info!(
            "Model ready: type={} threshold={} features={}",
            metadata.model_type,
            metadata.decision_threshold,
            metadata.feature_count
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    match run(&engine, &mut input, &mut output, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("I/O failure: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// The interactive session: questionnaire → encode → predict → render,
/// repeated until the user quits or input ends.
fn run<R: BufRead, W: Write>(
    engine: &DecisionEngine,
    input: &mut R,
    output: &mut W,
    json: bool,
) -> io::Result<()> {
    if !json {
        writeln!(output, "{}", api::banner())?;
    }

    loop {
        let Some(selection) = api::collect_selection(input, output)? else {
            break;
        };

        let vector = encode(&selection);
        log::debug!("Encoded selection: {}", vector.to_log_entry());

        match engine.predict(&vector) {
            Ok(result) => {
                if json {
                    // serde_json on our own Serialize type cannot fail
                    writeln!(output, "\n{}", serde_json::to_string(&result).expect("serializable result"))?;
                } else {
                    writeln!(output, "\n{}", api::render_verdict(&result))?;
                }
            }
            Err(e) => {
                // Fatal to this request only; the engine state is untouched
                log::error!("Prediction failed: {}", e);
                writeln!(output, "Prediction failed: {}", e)?;
            }
        }

        if !prompt_again(engine, input, output, json)? {
            break;
        }
    }

    Ok(())
}

/// Repeat prompt: Enter for another prediction, `s` for engine status,
/// `q` to quit. Returns false when the session should end.
fn prompt_again<R: BufRead, W: Write>(
    engine: &DecisionEngine,
    input: &mut R,
    output: &mut W,
    json: bool,
) -> io::Result<bool> {
    loop {
        write!(output, "\n[Enter] predict again  [s] status  [q] quit > ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(true),
            "q" | "quit" => return Ok(false),
            "s" | "status" => {
                let status = engine.status();
                if json {
                    writeln!(output, "\n{}", serde_json::to_string(&status).expect("serializable status"))?;
                } else {
                    writeln!(output, "\nEngine status:")?;
                    writeln!(output, "  model loaded:     {}", status.model_loaded)?;
                    writeln!(output, "  model type:       {}", status.model_type)?;
                    if let Some(threshold) = status.decision_threshold {
                        writeln!(output, "  threshold:        {:.3}", threshold)?;
                    }
                    writeln!(output, "  feature layout:   v{} ({} columns)", status.feature_version, status.feature_count)?;
                    writeln!(output, "  predictions:      {}", status.prediction_count)?;
                    writeln!(output, "  avg latency (ms): {:.3}", status.avg_latency_ms)?;
                }
            }
            other => writeln!(output, "  Unknown option '{}'", other)?,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
