//! doi-tasks binary entry point

use clap::{Parser, Subcommand};
use doi_tasks::commands::{
    run_export_listing, run_inventory, run_partition, run_remaining, run_validated,
};
use doi_tasks::logging::init_tracing;
use doi_tasks::Config;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "doi-tasks")]
#[command(about = "Reconcile DOI sources and prepare fetch tasks")]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for the doi crates (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Unique, duplicate and missing DOI reports for a folder of exports
    Inventory {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Per-registrant task files and the ranked summary index
    Partition {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Downloaded-set list to leave out
        #[arg(long)]
        exclude: Option<PathBuf>,
    },
    /// Task manifest minus already-downloaded DOIs
    Remaining {
        #[arg(long)]
        tasks: PathBuf,
        #[arg(long)]
        downloaded: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Downloaded DOIs still present in the current exports
    Validated {
        #[arg(long)]
        downloaded: PathBuf,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Object-store listing export to a sorted downloaded-set list
    ExportListing {
        #[arg(long)]
        listing: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Inventory { input, output } => {
            let report = run_inventory(&config, &input, &output)?;
            info!("{}", report);
        }
        Command::Partition {
            input,
            output,
            exclude,
        } => {
            let outcome = run_partition(&config, &input, &output, exclude.as_deref())?;
            info!(
                groups = outcome.groups,
                batch_files = outcome.batch_files,
                "{}",
                outcome.report
            );
        }
        Command::Remaining {
            tasks,
            downloaded,
            output,
        } => {
            run_remaining(&config, &tasks, &downloaded, &output)?;
        }
        Command::Validated {
            downloaded,
            input,
            output,
        } => {
            run_validated(&config, &downloaded, &input, &output)?;
        }
        Command::ExportListing { listing, output } => {
            run_export_listing(&config, &listing, &output)?;
        }
    }

    Ok(())
}
