//! Workmap CLI - Build treemap chart input from BLS labor-market data
//!
//! # Main Commands
//!
//! ```bash
//! workmap chart --year 2024 --region "United States"   # Treemap figure JSON
//! workmap fetch                                        # Fetch data (with fallback)
//! workmap export input.csv -o filtered.csv             # Filtered CSV export
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! workmap parse input.csv          # Just decode CSV to JSON records
//! workmap metadata input.csv       # Show dropdown metadata for a file
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use workmap::logs::{log_success, log_warning};
use workmap::{
    decode_file, export_to_file, fallback_records, project, select, ColorScheme, Limit, Metadata,
    Parameter, Query, Record, Selection, WorkmapResult, DATA_URL_ENV, DEFAULT_DATA_URL,
    NO_DATA_MESSAGE,
};

#[derive(Parser)]
#[command(name = "workmap")]
#[command(about = "Build treemap chart input from BLS labor-market statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Observation year, or "all"
    #[arg(long, default_value = "2024")]
    year: String,

    /// Region type (National, State, Metropolitan), or "all"
    #[arg(long, default_value = "National")]
    region_type: String,

    /// Region name, or "all"
    #[arg(long, default_value = "United States")]
    region: String,

    /// Sizing parameter: employment or gdp
    #[arg(long, default_value = "employment")]
    parameter: String,

    /// Color scheme: complexity, employment or wage
    #[arg(long, default_value = "complexity")]
    color_scheme: String,

    /// Truncation: all or top50
    #[arg(long, default_value = "top50")]
    limit: String,
}

impl FilterArgs {
    fn query(&self) -> Query {
        Query {
            year: Query::year_filter(&self.year),
            region_type: Query::region_type_filter(&self.region_type),
            region: Query::region_filter(&self.region),
            parameter: Parameter::from_label(&self.parameter),
            color_scheme: ColorScheme::from_label(&self.color_scheme),
            limit: Limit::from_label(&self.limit),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a CSV file and output JSON records
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a treemap figure for a query
    Chart {
        /// Input CSV file (default: embedded sample data)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the filtered records as CSV
    Export {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show dropdown metadata for a dataset
    Metadata {
        /// Input CSV file (default: embedded sample data)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Fetch the external dataset, falling back to the embedded sample
    Fetch {
        /// Dataset URL (default: $WORKMAP_DATA_URL or the published data)
        #[arg(long)]
        url: Option<String>,

        /// Output file for the records JSON (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Chart {
            input,
            filter,
            output,
        } => cmd_chart(input.as_deref(), &filter.query(), output.as_deref()),

        Commands::Export {
            input,
            filter,
            output,
        } => cmd_export(&input, &filter.query(), &output),

        Commands::Metadata { input } => cmd_metadata(input.as_deref()),

        Commands::Fetch { url, output } => cmd_fetch(url, output.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Records from a file, or the embedded sample when no file is given.
fn load_records(input: Option<&Path>) -> WorkmapResult<Vec<Record>> {
    match input {
        Some(path) => Ok(decode_file(path)?),
        None => Ok(fallback_records().to_vec()),
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> WorkmapResult<()> {
    let records = decode_file(input)?;
    log_success(format!(
        "Decoded {} records from {}",
        records.len(),
        input.display()
    ));

    let json = serde_json::to_string_pretty(&records)?;
    write_output(&json, output)
}

fn cmd_chart(
    input: Option<&Path>,
    query: &Query,
    output: Option<&Path>,
) -> WorkmapResult<()> {
    let records = load_records(input)?;

    match select(&records, query) {
        Selection::Empty => {
            println!("{}", NO_DATA_MESSAGE);
            Ok(())
        }
        Selection::Matched(aggregate) => {
            log_success(format!(
                "{} occupations, root value {}",
                aggregate.children.len(),
                aggregate.root_value
            ));
            let figure = project(&aggregate).to_figure();
            let json = serde_json::to_string_pretty(&figure)?;
            write_output(&json, output)
        }
    }
}

fn cmd_export(
    input: &Path,
    query: &Query,
    output: &Path,
) -> WorkmapResult<()> {
    let records = decode_file(input)?;

    let filtered = match select(&records, query) {
        Selection::Matched(aggregate) => aggregate.children,
        Selection::Empty => {
            log_warning("No records matched the query; exporting header only");
            Vec::new()
        }
    };

    export_to_file(&filtered, output)?;
    log_success(format!(
        "Exported {} records to {}",
        filtered.len(),
        output.display()
    ));
    Ok(())
}

fn cmd_metadata(input: Option<&Path>) -> WorkmapResult<()> {
    let records = load_records(input)?;
    let metadata = Metadata::from_records(&records);
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

async fn cmd_fetch(
    url: Option<String>,
    output: Option<&Path>,
) -> WorkmapResult<()> {
    let url = url
        .or_else(|| std::env::var(DATA_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_DATA_URL.to_string());

    let dataset = workmap::load(&url).await;
    eprintln!("   Source: {}", dataset.data_source);
    eprintln!("   Records: {}", dataset.records.len());
    eprintln!("   Years: {:?}", dataset.metadata.years);
    eprintln!("   Last updated: {}", dataset.last_updated);

    let json = serde_json::to_string_pretty(&dataset.records)?;
    write_output(&json, output)
}

/// Print to stdout or write to a file.
fn write_output(content: &str, output: Option<&Path>) -> WorkmapResult<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            log_success(format!("Saved to: {}", path.display()));
        }
        None => println!("{}", content),
    }
    Ok(())
}
