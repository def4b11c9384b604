//! # Carbon CLI Application
//!
//! Command-line front end for `carbon_core`: load an exported model tree,
//! run the embodied carbon analysis against the configured databases, print
//! a summary, and optionally write the full JSON report.
//!
//! Configuration is layered: built-in defaults, then `--config FILE`, then
//! individual flags. A bad database name or country code is fatal before
//! any analysis starts.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use carbon_core::analysis::AnalysisSummary;
use carbon_core::calculation::strength::Country;
use carbon_core::factors::{ConcreteDatabase, SteelDatabase, TimberDatabase};
use carbon_core::{
    load_config, load_model, save_report, CalcResult, CalculatorConfig, ModelAnalyzer,
};

/// Embodied carbon analysis for exported building models
#[derive(Parser, Debug)]
#[command(name = "carbon_cli", version, about)]
struct Cli {
    /// Exported model tree (JSON)
    model: PathBuf,

    /// Config file (JSON); individual flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Timber database name, e.g. "ATHENA 2021"
    #[arg(long = "timber-db", value_name = "NAME")]
    timber_db: Option<String>,

    /// Steel database name, e.g. "Type 350 MPa"
    #[arg(long = "steel-db", value_name = "NAME")]
    steel_db: Option<String>,

    /// Concrete database name, e.g. "GUL Low Air"
    #[arg(long = "concrete-db", value_name = "NAME")]
    concrete_db: Option<String>,

    /// Country the model originates from: CAN or USA
    #[arg(long, value_name = "CODE")]
    country: Option<String>,

    /// Write the full JSON report to this path
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

fn run() -> CalcResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let model = load_model(&cli.model)?;

    let mut analyzer = ModelAnalyzer::new(config.clone());
    let summary = analyzer.analyze(&model);

    print_summary(&config, &summary);

    if let Some(output) = &cli.output {
        save_report(&summary, output)?;
        println!();
        println!("Report written to {}", output.display());
    }

    Ok(())
}

/// Defaults, overridden by the config file, overridden by flags
fn build_config(cli: &Cli) -> CalcResult<CalculatorConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CalculatorConfig::default(),
    };

    if let Some(name) = &cli.timber_db {
        config.timber_database = TimberDatabase::from_name(name)?;
    }
    if let Some(name) = &cli.steel_db {
        config.steel_database = SteelDatabase::from_name(name)?;
    }
    if let Some(name) = &cli.concrete_db {
        config.concrete_database = ConcreteDatabase::from_name(name)?;
    }
    if let Some(code) = &cli.country {
        config.country = Country::from_code(code)?;
    }

    Ok(config)
}

fn print_summary(config: &CalculatorConfig, summary: &AnalysisSummary) {
    println!("═══════════════════════════════════════════════");
    println!("  EMBODIED CARBON SUMMARY");
    println!("═══════════════════════════════════════════════");
    println!();
    println!("Databases:");
    println!("  Timber:   {}", config.timber_database.name());
    println!("  Steel:    {}", config.steel_database.name());
    println!("  Concrete: {}", config.concrete_database.name());
    println!("  Country:  {}", config.country.code());
    println!();
    println!("{}", summary.summary_text());

    let mut by_level: BTreeMap<&str, f64> = BTreeMap::new();
    for record in &summary.processed {
        *by_level.entry(record.level.as_str()).or_default() += record.total_carbon_kg;
    }
    if !by_level.is_empty() {
        println!();
        println!("Carbon by level:");
        for (level, carbon_kg) in by_level {
            println!("  {:<24} {:>14.1} kgCO₂e", level, carbon_kg);
        }
    }

    println!("═══════════════════════════════════════════════");
}
