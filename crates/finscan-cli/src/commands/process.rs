//! Process command - analyze a single document image.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use finscan_core::{DocumentAnalyzer, ImageSource};

use super::GlobalOptions;
use crate::output::{base_filename, format_summary, save_record};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Document image (png, jpg, tiff, ...)
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the full record as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Do not write result files
    #[arg(long)]
    no_save: bool,
}

pub fn run(args: ProcessArgs, globals: &GlobalOptions) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = globals.load_config()?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("File {} does not exist", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Analyzing document...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut analyzer = DocumentAnalyzer::from_config(&config);
    let record = analyzer.analyze(&ImageSource::Path(args.input.clone()));

    pb.finish_and_clear();

    if !record.is_success() {
        anyhow::bail!(
            "Failed to analyze {}: {}",
            args.input.display(),
            record.error().unwrap_or("unknown error")
        );
    }

    if !args.no_save {
        let dir = args.output.clone().unwrap_or_else(|| config.output.directory.clone());
        let base = base_filename(&record, &args.input);
        let saved = save_record(
            &record,
            &dir,
            &base,
            config.output.write_json,
            config.output.write_csv,
        )?;

        println!("{} Data saved to:", style("✓").green());
        if let Some(path) = &saved.json {
            println!("  - JSON: {}", path.display());
        }
        if let Some(path) = &saved.csv {
            println!("  - CSV: {}", path.display());
        }
        println!();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", format_summary(&record));
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
