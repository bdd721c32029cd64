//! GovTrace - Entry Point
//!
//! Loads the generator configuration, builds the dataset, prints a summary
//! and optionally writes the export package.

use std::path::{Path, PathBuf};

use clap::Parser;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use govtrace::core::config::{GeneratorConfig, DEFAULT_CONFIG_PATH};
use govtrace::core::error::Result;
use govtrace::core::random::MODULUS;
use govtrace::core::types::FiscalYear;
use govtrace::dataset::{budget_trend, build_dataset, GenerationSession};
use govtrace::export;

/// Synthetic ward governance dataset generator
#[derive(Parser, Debug)]
#[command(name = "govtrace")]
#[command(about = "Generate synthetic ward governance data and a hash-linked audit ledger")]
struct Args {
    /// Generator config (TOML); falls back to built-in defaults when absent
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Draw a fresh seed instead of the configured one
    #[arg(long, conflicts_with = "seed")]
    random_seed: bool,

    /// Show the dashboard snapshot for one fiscal year (e.g. 2020-21)
    #[arg(long)]
    year: Option<FiscalYear>,

    /// Write the dataset package into this directory
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("govtrace=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config(&args.config)?;

    if args.random_seed {
        config.seed = rand::thread_rng().gen_range(1..MODULUS);
        tracing::info!(seed = config.seed, "Using random seed");
    } else if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;

    if let Some(year) = args.year {
        return show_year(config, year, &args.format);
    }

    let dataset = build_dataset(config)?;

    match args.format.as_str() {
        "json" => println!("{}", dataset.to_json()),
        _ => {
            println!("{}", dataset.summary());
            println!();
            println!("Budget trend (leading schemes, lakhs):");
            let years: Vec<FiscalYear> = dataset.years.iter().map(|y| y.year).collect();
            for point in budget_trend(&dataset.schemes, &years) {
                let values: Vec<String> = point
                    .values
                    .iter()
                    .map(|v| format!("{} {}", v.scheme, v.amount))
                    .collect();
                println!("  {}: {}", point.year, values.join(", "));
            }
        }
    }

    if let Some(out) = args.out {
        let written = export::write_package(&out, &dataset)?;
        println!("\nWrote {} files to {}", written.len(), out.display());
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<GeneratorConfig> {
    if path.exists() {
        GeneratorConfig::load(path)
    } else {
        tracing::warn!(path = %path.display(), "Config file not found - using built-in defaults");
        Ok(GeneratorConfig::default())
    }
}

fn show_year(config: GeneratorConfig, year: FiscalYear, format: &str) -> Result<()> {
    let mut session = GenerationSession::new(config)?;
    let snapshot = session.snapshot(year)?;

    if format == "json" {
        println!("{}", export::to_pretty_json(&snapshot)?);
        return Ok(());
    }

    let stats = &snapshot.overview;
    println!("=== {} ===", year);
    println!(
        "Allocated {}L ({}% utilized) across {} wards in {} districts",
        stats.total_allocated,
        stats.utilization_percent(),
        stats.total_wards,
        stats.district_count
    );
    println!(
        "Avg governance {} | green {} yellow {} red {} | {} grievances",
        stats.avg_governance_score,
        stats.green_wards,
        stats.yellow_wards,
        stats.red_wards,
        stats.total_complaints
    );
    println!();

    for district in &snapshot.districts {
        println!(
            "  {:<18} {:>3} wards  {:>8}L allocated  {:>8}L utilized  score {}",
            district.name,
            district.ward_count,
            district.total_allocated,
            district.total_utilized,
            district.avg_governance_score
        );
    }

    println!();
    println!("Audit ledger (latest 15 of {}):", snapshot.ledger.len());
    for entry in snapshot.ledger.entries().iter().rev().take(15) {
        println!(
            "  #{:<3} {}  {:<20} {:<26} {}...",
            entry.sequence,
            entry.timestamp_string(),
            entry.action,
            entry.ward_id,
            entry.current_hash.get(..24).unwrap_or(entry.current_hash.as_str())
        );
    }

    match snapshot.ledger.verify_chain() {
        Ok(()) => println!("Chain verified in sequence order"),
        Err(e) => println!("Chain verification failed: {}", e),
    }

    Ok(())
}
