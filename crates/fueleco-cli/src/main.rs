//! Fueleco CLI - Operator tooling for the fuel-economy store

use anyhow::Result;
use clap::{Parser, Subcommand};
use fueleco_ingest::ingest_files;
use fueleco_store::VehicleStore;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "fueleco")]
#[command(about = "Fuel-economy data service - load vehicle CSVs and inspect the store")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load vehicle CSV files into the store, replacing existing contents
    Ingest {
        /// Paths to source CSV files, loaded in the given order
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Path to the store file
        #[arg(short, long, default_value = "fuel_economy.db")]
        db: PathBuf,

        /// Optional path to write the ingest report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show a summary of the store contents
    Report {
        /// Path to the store file
        #[arg(short, long, default_value = "fuel_economy.db")]
        db: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Ingest {
            sources,
            db,
            report,
        } => {
            run_ingest(&sources, &db, report.as_deref()).await?;
        }
        Commands::Report { db } => {
            show_report(&db).await?;
        }
    }

    Ok(())
}

async fn run_ingest(sources: &[PathBuf], db: &Path, report_path: Option<&Path>) -> Result<()> {
    info!("Ingesting {} source file(s) into {:?}", sources.len(), db);

    let store = VehicleStore::new(db);
    let report = ingest_files(&store, sources).await?;

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        info!("Wrote ingest report to {:?}", path);
    }

    println!("\n=== Ingest Complete ===");
    for source in &report.sources {
        println!("  {:?}: {} rows", source.path, source.rows);
    }
    println!("Rows loaded: {}", report.rows_loaded);
    println!("Store: {:?}", db);

    Ok(())
}

async fn show_report(db: &Path) -> Result<()> {
    let store = VehicleStore::new(db);
    let count = store.count().await?;
    let options = store.filter_options().await?;

    println!("\n=== Store Report ===");
    println!("Store: {:?}", db);
    println!("Rows: {}", count);
    println!(
        "Model years: {}",
        options
            .years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Manufacturers:");
    for manufacturer in &options.manufacturers {
        println!("  - {}", manufacturer);
    }

    Ok(())
}
