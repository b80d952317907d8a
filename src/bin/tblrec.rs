//! tblrec - Table reconciliation CLI tool
//!
//! Reconciles two row files, or serves request bodies through the route table.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use table_reconcile::reconcile::{
    DuplicateKeyPolicy, ReconcileError, ReconcileOptions, Reconciler, Side,
    DEFAULT_SECONDARY_IDENTIFIER,
};
use table_reconcile::service::Router;
use table_reconcile::value::{self, Row};

/// Reconcile a system-of-record table against its downstream replica.
#[derive(Parser)]
#[command(name = "tblrec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by TBLREC_LOG)
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile two JSON/YAML lists of rows
    Compare {
        /// Rows of the system of record; omitted means an empty table
        #[arg(short, long, env = "TBLREC_LEFT")]
        left: Option<PathBuf>,

        /// Rows of the downstream replica
        #[arg(short, long, env = "TBLREC_RIGHT")]
        right: PathBuf,

        /// Field matching rows across the two tables
        #[arg(short = 'k', long, env = "TBLREC_PRIMARY_KEY")]
        primary_key: Option<String>,

        /// Field copied from downstream rows onto differing rows
        #[arg(long, env = "TBLREC_SECONDARY_IDENTIFIER", default_value = DEFAULT_SECONDARY_IDENTIFIER)]
        secondary_identifier: String,

        /// Do not copy any secondary identifier
        #[arg(long, conflicts_with = "secondary_identifier")]
        no_secondary_identifier: bool,

        /// Repeated primary keys: reject or cross-product
        #[arg(long, env = "TBLREC_DUPLICATE_KEYS", default_value = "reject")]
        duplicate_keys: DuplicateKeyPolicy,

        /// Output location. Use '-' for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
    },

    /// Serve a JSON request body through one route
    Request {
        /// Route name, e.g. comparetbl
        route: String,

        /// File holding the request body
        file: PathBuf,

        /// Output location. Use '-' for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
    },

    /// List the registered routes
    Routes,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("TBLREC_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Compare {
            left,
            right,
            primary_key,
            secondary_identifier,
            no_secondary_identifier,
            duplicate_keys,
            output,
        } => {
            let mut builder = ReconcileOptions::builder().duplicate_keys(duplicate_keys);
            if let Some(primary_key) = primary_key {
                builder = builder.primary_key(primary_key);
            }
            builder = if no_secondary_identifier {
                builder.no_secondary_identifier()
            } else {
                builder.secondary_identifier(secondary_identifier)
            };
            let options = builder.build()?;

            let left = match left {
                Some(path) => read_rows(&path, Side::Left)?,
                None => Vec::new(),
            };
            let right = read_rows(&right, Side::Right)?;

            let result = Reconciler::new(options).reconcile(&left, &right)?;
            eprintln!("{}", result.summary());

            let mut output = open_output(&output)?;
            writeln!(output, "{}", serde_json::to_string_pretty(&result)?)?;
        }
        Commands::Request {
            route,
            file,
            output,
        } => {
            let body = fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read request file {:?}: {}", file, e))?;

            let response = Router::with_default_routes().handle(&route, &body);

            let mut output = open_output(&output)?;
            writeln!(output, "{}", response.body)?;

            if !response.is_success() {
                return Err(format!("request failed with status {}", response.status).into());
            }
        }
        Commands::Routes => {
            let mut output = io::stdout();
            for route in Router::with_default_routes().routes() {
                writeln!(output, "{}", route)?;
            }
        }
    }

    Ok(())
}

fn read_rows(path: &Path, side: Side) -> Result<Vec<Row>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {} file {:?}: {}", side, path, e))?;

    let rows = value::from_yaml(&content).map_err(|e| ReconcileError::malformed(side, e))?;
    debug!(%side, rows = rows.len(), path = %path.display(), "loaded rows");

    Ok(rows)
}

fn open_output(output: &str) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
    if output == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        let file = fs::File::create(output)
            .map_err(|e| format!("Failed to create output file {:?}: {}", output, e))?;
        Ok(Box::new(file))
    }
}
