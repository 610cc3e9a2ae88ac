//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mxhunt` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Interrupt handling
//! - User-facing output (console listing, txt and JSON files)
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::*;

use mxhunt::export::{print_mx_hosts, write_json_report, write_mx_hosts};
use mxhunt::initialization::init_logger_with;
use mxhunt::{run_hunt, Config, HuntReport, LogFormat, LogLevel};

#[derive(Debug, Parser)]
#[command(
    name = "mxhunt",
    about = "Hunt for mail servers using MSOL federation discovery"
)]
#[command(group(ArgGroup::new("input").required(true)))]
struct Cli {
    /// Domain to check
    #[arg(short, long, group = "input")]
    domain: Option<String>,

    /// A file with domains to check, one per line
    #[arg(short, long, group = "input")]
    file: Option<PathBuf>,

    /// Rate limit of concurrent connections
    #[arg(short, long, default_value_t = 10)]
    rate: u32,

    /// Quiet mode, do not output mail servers to console
    #[arg(short, long)]
    quiet: bool,

    /// JSON report file base name (ex: mx_report)
    #[arg(short, long)]
    json: Option<String>,

    /// TXT output file base name (ex: mx_servers)
    #[arg(short, long)]
    output: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_seconds: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,
}

fn load_seeds(cli: &Cli) -> Result<Vec<String>> {
    if let Some(domain) = &cli.domain {
        return Ok(vec![domain.clone()]);
    }

    // The input group guarantees a file path when no domain was given.
    let path = cli.file.as_ref().context("no input provided")?;
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read domain file: {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

fn write_outputs(cli: &Cli, report: &HuntReport) -> Result<()> {
    let hosts = report.normalized_mx_hosts();

    if let Some(base) = &cli.output {
        write_mx_hosts(base, &hosts)?;
    }
    if let Some(base) = &cli.json {
        write_json_report(base, &report.seeds)?;
    }
    if !cli.quiet {
        print_mx_hosts(&hosts);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logger_with(cli.log_level.clone().into(), cli.log_format.clone()) {
        eprintln!("{}", format!("Error: {e}").red());
        process::exit(1);
    }

    let hunt = async {
        let config = Config {
            seeds: load_seeds(&cli)?,
            rate_limit: cli.rate,
            timeout_seconds: cli.timeout_seconds,
        };
        run_hunt(config).await
    };

    // A user interrupt cancels all outstanding work before any file is
    // written, so an aborted run never leaves partial output behind.
    let report = tokio::select! {
        result = hunt => match result {
            Ok(report) => report,
            Err(e) => {
                eprintln!("{}", format!("Error: {e:#}").red());
                process::exit(1);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("{}", "Aborted!".red());
            process::exit(130);
        }
    };

    // A run that discovered nothing writes nothing.
    if !report.domains.is_empty() {
        if let Err(e) = write_outputs(&cli, &report) {
            eprintln!("{}", format!("Error: {e:#}").red());
            process::exit(1);
        }
    }
}
