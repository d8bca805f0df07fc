//! CLI tool for resolving the licenses of installed npm dependencies

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use node_license_scan::{is_permissive, scan, LicenseEntry, LicenseSummary, ScanConfig, UNKNOWN_LICENSE};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "license-scan")]
#[command(about = "Resolve the license of every package in an installed node_modules tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the package to scan (the directory holding package.json)
    #[arg(short = 'p', long)]
    path: Option<PathBuf>,

    /// Path to a configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// JSON file of pre-resolved entries, keyed by name@version
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Leave out packages under a permissive license
    #[arg(long)]
    omit_permissive: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Resolving licenses...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = scan(&config);

    spinner.finish_and_clear();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{} Scan failed: {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    match cli.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{} Failed to serialize summary: {}", "Error:".red().bold(), e);
                process::exit(1);
            }
        },
        OutputFormat::Table => display_table(&summary),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Config file first, then overrides file, then CLI flags
fn build_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    if let Some(path) = &cli.overrides {
        config
            .load_overrides(path)
            .with_context(|| format!("failed to load overrides {}", path.display()))?;
    }
    if let Some(path) = &cli.path {
        config.path = path.clone();
    }
    if cli.omit_permissive {
        config.omit_permissive = true;
    }

    config.validate()?;
    Ok(config)
}

fn colored_license(entry: &LicenseEntry) -> ColoredString {
    match entry.license.as_deref() {
        Some(license) if is_permissive(license) => license.green(),
        Some(UNKNOWN_LICENSE) | None => entry.license.as_deref().unwrap_or("unclassified").yellow(),
        Some(license) => license.red(),
    }
}

fn display_table(summary: &LicenseSummary) {
    println!("\n{}", "=== License Summary ===".bold());

    for (id, entry) in summary {
        println!(
            "{:<40} {:<16} {}",
            id.cyan(),
            colored_license(entry),
            entry.source.as_deref().unwrap_or("-")
        );
        if let Some(repository) = &entry.repository {
            println!("    {}", repository.dimmed());
        }
    }

    let unknown = summary
        .values()
        .filter(|entry| matches!(entry.license.as_deref(), None | Some(UNKNOWN_LICENSE)))
        .count();
    println!();
    println!("Packages: {}", summary.len());
    println!("Unknown licenses: {}", unknown);
}
