use anyhow::Result;
use clap::{Parser, Subcommand};
use posindex::{ProximityQuery, ReadPolicy, SearchOutcome};
use proximity::{run_query, run_stats};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "proximity")]
#[command(about = "Positional index and proximity queries over a directory of .txt files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find FIRST and SECOND exactly DISTANCE words apart, in either order, and write CSV reports
    Query {
        /// Input path (directory searched recursively for .txt files, or a single file)
        input: PathBuf,
        /// Directory receiving the result CSV files
        output: PathBuf,
        /// First word (letters only)
        first: String,
        /// Second word (letters only)
        second: String,
        /// Exact distance in words between the two terms
        #[arg(allow_negative_numbers = true)]
        distance: i64,
        /// Abort on the first unreadable document instead of skipping it
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Build the index and print its statistics as JSON
    Stats {
        /// Input path (directory searched recursively for .txt files, or a single file)
        input: PathBuf,
        /// Only print totals, not per-term counts
        #[arg(long, default_value_t = false)]
        summary: bool,
        /// Abort on the first unreadable document instead of skipping it
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

fn policy(strict: bool) -> ReadPolicy {
    if strict { ReadPolicy::Strict } else { ReadPolicy::Lenient }
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Query { input, output, first, second, distance, strict } => {
            let query = ProximityQuery::new(&first, &second, distance)?;
            tracing::info!(input = %input.display(), output = %output.display(), "starting proximity query");
            let report = run_query(&input, &output, &query, policy(strict))?;
            match (&report.outcome, &report.written) {
                (SearchOutcome::Matches(_), Some((paths, summary))) => {
                    println!("{} matches written to {}", summary.rows, paths.result.display());
                    println!("detailed results written to {}", paths.detailed.display());
                }
                _ => println!("No results found from your query."),
            }
        }
        Commands::Stats { input, summary, strict } => {
            let stats = run_stats(&input, policy(strict), summary)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    tracing::info!(elapsed_s = start.elapsed().as_secs_f64(), "process completed");
    Ok(())
}
