//! Assessor — Demo CLI
//!
//! Grades a result record from an agent run against one of the reference
//! benchmark tasks (or a directory of task definitions) and prints the
//! verdict.
//!
//! Usage:
//!   cargo run -p demo -- list
//!   cargo run -p demo -- grade --task minimum-comm --result run.json
//!   cargo run -p demo -- grade --task license-compliance-check --result run.json --json
//!
//! Exit status: 0 when the record passes, 1 when it fails, 2 on usage or
//! configuration errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use assessor_catalog::TaskCatalog;
use assessor_contracts::{
    error::{AssessorError, AssessorResult},
    verdict::Verdict,
};
use assessor_ref_bench::{builtin_catalog, Bench, PythonRuntime, PythonSettings};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Assessor — grading harness for AI agent benchmark runs.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Grade agent result records against benchmark tasks",
    long_about = "Grades agent result records against benchmark task definitions,\n\
                  printing per-field feedback and an overall verdict."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the task ids available for grading.
    List {
        /// Load task definitions from this directory instead of the built-in set.
        #[arg(long)]
        tasks_dir: Option<PathBuf>,
    },
    /// Grade one result record.
    Grade(GradeArgs),
}

#[derive(Args)]
struct GradeArgs {
    /// Task id to grade against.
    #[arg(long)]
    task: String,

    /// Path to the result record (JSON).
    #[arg(long)]
    result: PathBuf,

    /// Load task definitions from this directory instead of the built-in set.
    #[arg(long)]
    tasks_dir: Option<PathBuf>,

    /// Python interpreter used to run submitted encode/decode routines.
    #[arg(long, env = "ASSESSOR_PYTHON")]
    python: Option<String>,

    /// Print the verdict as JSON.
    #[arg(long)]
    json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::List { tasks_dir } => run_list(tasks_dir.as_deref()).map(|()| true),
        Command::Grade(args) => run_grade(&args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(2);
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_list(tasks_dir: Option<&Path>) -> AssessorResult<()> {
    let catalog = load_catalog(tasks_dir)?;
    for task in catalog.tasks() {
        if task.description.is_empty() {
            println!("{}", task.id);
        } else {
            println!("{:<32} {}", task.id, task.description);
        }
    }
    Ok(())
}

/// Returns whether the record passed.
fn run_grade(args: &GradeArgs) -> AssessorResult<bool> {
    let catalog = load_catalog(args.tasks_dir.as_deref())?;

    let mut settings = PythonSettings::from_env();
    if let Some(python) = &args.python {
        settings = settings.with_python_command(python.as_str());
    }
    let bench = Bench::new(catalog, Arc::new(PythonRuntime::new(settings)));

    let record = read_record(&args.result)?;
    info!(task_id = %args.task, result = %args.result.display(), "grading record");
    let verdict = bench.grade(&args.task, &record)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&verdict).map_err(|e| {
            AssessorError::ConfigError {
                reason: format!("failed to render verdict: {e}"),
            }
        })?;
        println!("{rendered}");
    } else {
        print_verdict(&args.task, &verdict);
    }
    Ok(verdict.passed)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_catalog(tasks_dir: Option<&Path>) -> AssessorResult<TaskCatalog> {
    match tasks_dir {
        Some(dir) => TaskCatalog::from_dir(dir),
        None => builtin_catalog(),
    }
}

fn read_record(path: &Path) -> AssessorResult<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| AssessorError::ConfigError {
        reason: format!("failed to read result record '{}': {}", path.display(), e),
    })?;
    serde_json::from_str(&contents).map_err(|e| AssessorError::ConfigError {
        reason: format!("result record '{}' is not valid JSON: {}", path.display(), e),
    })
}

fn print_verdict(task_id: &str, verdict: &Verdict) {
    println!();
    println!("Task:    {task_id}");
    println!("Verdict: {}", if verdict.passed { "PASS" } else { "FAIL" });
    println!("=================================");
    for line in verdict.feedback_lines() {
        println!("{line}");
    }
    println!();
}
