//! Cost Tree CLI
//!
//! Builds hierarchical cost reports from flat cost records and exports
//! them as numbered JSON/CSV tables.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use cost_tree::commands::{
    display_schema, display_version, execute_report, select_source, validate_args,
    validate_report_file, ReportArgs,
};

/// Cost Tree - hierarchical cost roll-ups and numbered exports
#[derive(Parser, Debug)]
#[command(name = "cost-tree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a cost report from records
    Report {
        /// JSON file with the raw records (takes precedence over --url)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Backend endpoint returning the raw records
        #[arg(long, env = "COST_TREE_API_URL")]
        url: Option<String>,

        /// Bearer token for the backend
        #[arg(long, env = "COST_TREE_API_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Reporting period sent to the backend (YYYY-MM, --url only)
        #[arg(long)]
        period: Option<String>,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Output path for the CSV rows (optional)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Report title
        #[arg(long)]
        title: Option<String>,

        /// Print the tree outline to stdout
        #[arg(long)]
        summary: bool,

        /// Record ids to expand in the outline (roots are always expanded)
        #[arg(long, value_delimiter = ',')]
        expand: Vec<String>,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            input,
            url,
            token,
            period,
            output,
            csv,
            title,
            summary,
            expand,
        } => {
            let source = select_source(input, url, token, period)?;

            let args = ReportArgs {
                source,
                output_json: output,
                output_csv: csv,
                title,
                print_summary: summary,
                expand,
            };

            // Validate args first
            validate_args(&args)?;

            execute_report(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
