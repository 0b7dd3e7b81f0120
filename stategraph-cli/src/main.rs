//! Workflow binary: parses options, runs or resumes the workflow, prints the final result.

use clap::Parser;
use serde_json::Value;
use stategraph_cli::{run_with_options, RunOptions};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stategraph")]
#[command(about = "Branching analysis workflow: step1 → analyze → high/low confidence, or simple path")]
struct Args {
    /// Input object as JSON, e.g. '{"needs_analysis": true, "confidence": 0.9}'
    #[arg(short, long, value_name = "JSON")]
    input: Option<String>,

    /// Run id for checkpoints (overrides RUN_ID)
    #[arg(long)]
    run_id: Option<String>,

    /// SQLite database for checkpoints (overrides DB_PATH)
    #[arg(long, value_name = "PATH")]
    db_path: Option<String>,

    /// Resume the run id from its latest checkpoint instead of starting over
    #[arg(long)]
    resume: bool,

    /// Run the plain-function form instead of the graph
    #[arg(long)]
    procedural: bool,

    /// Maximum node executions (overrides RECURSION_LIMIT)
    #[arg(long)]
    recursion_limit: Option<usize>,

    /// Confidence above which the high-confidence path is taken (overrides CONFIDENCE_THRESHOLD)
    #[arg(long)]
    threshold: Option<f64>,

    /// Debug logs: node start/complete, state updates, checkpoints
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn to_run_options(&self) -> RunOptions {
        RunOptions {
            run_id: self.run_id.clone(),
            db_path: self.db_path.clone(),
            recursion_limit: self.recursion_limit,
            confidence_threshold: self.threshold,
            resume: self.resume,
            procedural: self.procedural,
            verbose: self.verbose,
        }
    }

    /// Parsed `--input`; a default high-confidence sample when neither input nor resume is given.
    fn input(&self) -> Result<Option<Value>, serde_json::Error> {
        match &self.input {
            Some(raw) => serde_json::from_str(raw).map(Some),
            None if self.resume => Ok(None),
            None => Ok(Some(serde_json::json!({
                "needs_analysis": true,
                "confidence": 0.9,
            }))),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = match args.input() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: --input is not valid JSON: {}", e);
            std::process::exit(2);
        }
    };

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("interrupted; stopping before the next node");
        cancel_on_signal.cancel();
    });

    let outcome = match run_with_options(input, &args.to_run_options(), cancel).await {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(run_id) = &outcome.run_id {
        eprintln!("run_id: {}", run_id);
    }
    println!("{}", serde_json::to_string_pretty(&outcome.final_result)?);
    Ok(())
}
