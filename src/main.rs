use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use listing_forge::error::{format_error, ContentError};
use listing_forge::lifecycle::{setup_tracing, ContentService, ServiceConfig};
use listing_forge::model::{BatchRequest, ProductRecord};
use serde::Serialize;
use tracing::{info, info_span, Instrument};

#[derive(Parser)]
#[command(name = "listing-forge")]
#[command(version)]
#[command(about = "Generate marketplace listing content for products", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate content for one product record read from a JSON file
    #[clap(visible_alias = "p")]
    Product {
        /// Path to the product record
        file: PathBuf,
    },
    /// Generate content for every row of a spreadsheet range
    #[clap(visible_alias = "b")]
    Batch {
        #[arg(long)]
        sheet_id: String,
        /// Range holding a header row followed by product rows
        #[arg(long)]
        input_range: String,
        /// Top-left cell or range receiving the results
        #[arg(long)]
        output_range: String,
    },
}

#[tokio::main]
async fn main() {
    setup_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        let response = format_error(e.as_ref());
        match serde_json::to_string_pretty(&response) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("Error: {}", response.message),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::from_env()?,
    };
    let service = ContentService::from_config(&config)?;

    match cli.command {
        Commands::Product { file } => {
            let record = read_record(&file)?;
            let result = service
                .generate_content_for_product(&record)
                .instrument(info_span!("product", file = %file.display()))
                .await?;
            info!(status = result.status().as_str(), "Product processed");
            print_json(&result)
        }
        Commands::Batch {
            sheet_id,
            input_range,
            output_range,
        } => {
            let request = BatchRequest::new(sheet_id, input_range, output_range);
            let report = service.process_product_batch(&request).await?;
            print_json(&report)
        }
    }
}

fn read_record(path: &Path) -> Result<ProductRecord, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let record = serde_json::from_str(&raw)
        .map_err(|e| ContentError::invalid(&[format!("product record is not valid JSON: {e}")]))?;
    Ok(record)
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
