//! CLI entrypoint for the portfmt conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use portfmt_harness::fixtures::{DEFAULT_CAPACITY, fixture_paths};
use portfmt_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogLevel, now_utc, validate_log_file,
};
use portfmt_harness::verify::escape_output;
use portfmt_harness::{ConformanceReport, FixtureArg, FixtureSet, TestRunner, VerificationSummary};

/// Conformance tooling for portfmt.
#[derive(Debug, Parser)]
#[command(name = "portfmt-harness")]
#[command(about = "Conformance testing harness for portfmt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the engine against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown). A JSON twin is written next to it.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index output path (hashes of the report and log).
        #[arg(long)]
        artifact_index: Option<PathBuf>,
    },
    /// Format one string and print the stored bytes and logical length.
    Format {
        /// Output buffer capacity, terminator included.
        #[arg(long, default_value_t = DEFAULT_CAPACITY)]
        capacity: usize,
        /// Format string.
        format: String,
        /// Typed arguments: i:-5 u:7 l: ul: ll: ull: z: zs: f:3.5 p:0x10 s:text b:hex null
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        /// Path to the JSONL file.
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
            artifact_index,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let mut fixture_sets = Vec::new();
            for path in fixture_paths(&fixture)? {
                match FixtureSet::from_file(&path) {
                    Ok(set) => fixture_sets.push(set),
                    Err(err) => eprintln!("Skipping {}: {err}", path.display()),
                }
            }
            if fixture_sets.is_empty() {
                return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
            }

            let run_id = format!("run-{}", std::process::id());
            let runner = TestRunner::new("fixture-verify");
            let mut results = Vec::new();
            match &log {
                Some(log_path) => {
                    let mut emitter = LogEmitter::to_file(log_path, "portfmt", &run_id)?;
                    emitter.emit(LogLevel::Info, "run_start")?;
                    for set in &fixture_sets {
                        results.extend(runner.run_logged(set, &mut emitter)?);
                    }
                    emitter.emit(LogLevel::Info, "run_end")?;
                    emitter.flush()?;
                }
                None => {
                    for set in &fixture_sets {
                        results.extend(runner.run(set));
                    }
                }
            }

            let summary = VerificationSummary::from_results(results);
            for r in summary.results.iter().filter(|r| !r.passed) {
                eprintln!("FAIL {} [{}]", r.case_name, r.section);
                if let Some(diff) = &r.diff {
                    eprintln!("{diff}");
                }
            }
            eprintln!(
                "Total: {}, Passed: {}, Failed: {}",
                summary.total, summary.passed, summary.failed
            );

            let all_passed = summary.all_passed();
            let mut index = ArtifactIndex::new(&run_id);
            if let Some(report_path) = &report {
                let doc = ConformanceReport {
                    title: String::from("portfmt Conformance Report"),
                    families: fixture_sets.iter().map(|s| s.family.clone()).collect(),
                    timestamp: now_utc(),
                    summary,
                };
                std::fs::write(report_path, doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, doc.to_json())?;
                index.add_file(report_path, "report_md")?;
                index.add_file(&json_path, "report_json")?;
                eprintln!("Report written to {}", report_path.display());
            }
            if let Some(log_path) = &log {
                index.add_file(log_path, "log")?;
            }
            if let Some(index_path) = &artifact_index {
                std::fs::write(index_path, index.to_json()?)?;
            }

            if !all_passed {
                return Err("conformance failures detected".into());
            }
        }
        Command::Format {
            capacity,
            format,
            args,
        } => {
            let parsed = args
                .iter()
                .map(|s| s.parse::<FixtureArg>())
                .collect::<Result<Vec<_>, _>>()?;
            let format_args: Vec<_> = parsed.iter().map(FixtureArg::as_format_arg).collect();
            let mut buf = vec![0u8; capacity];
            let length = portfmt_core::format_into(&mut buf, format.as_bytes(), &format_args)?;
            let stored = length.min(capacity.saturating_sub(1));
            println!("{}", escape_output(&buf[..stored]));
            println!("length: {length}");
            if stored < length {
                println!("truncated: {} of {length} bytes stored", stored);
            }
        }
        Command::ValidateLog { path } => {
            let (lines, errors) = validate_log_file(&path)?;
            for err in &errors {
                eprintln!("{err}");
            }
            println!("{lines} lines, {} errors", errors.len());
            if !errors.is_empty() {
                return Err(format!("{} invalid log entries", errors.len()).into());
            }
        }
    }

    Ok(())
}
