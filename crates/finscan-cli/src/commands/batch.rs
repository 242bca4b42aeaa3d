//! Batch processing command for multiple document images.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use finscan_core::{DocumentAnalyzer, ImageSource};

use super::GlobalOptions;
use crate::output::{base_filename, save_record, write_summary};

/// Image extensions picked up from the glob.
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching document images
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write summary_report.csv
    #[arg(long)]
    summary: bool,

    /// Stop at the first document that fails
    #[arg(long)]
    fail_fast: bool,
}

/// Failure of a single file.
struct Failure {
    path: PathBuf,
    error: String,
}

pub fn run(args: BatchArgs, globals: &GlobalOptions) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = globals.load_config()?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut analyzer = DocumentAnalyzer::from_config(&config);
    let mut failures = Vec::new();
    let mut succeeded = 0usize;

    for path in &files {
        let record = analyzer.analyze(&ImageSource::Path(path.clone()));

        let outcome = if record.is_success() {
            let base = base_filename(&record, path);
            save_record(
                &record,
                &output_dir,
                &base,
                config.output.write_json,
                config.output.write_csv,
            )
            .map_err(|e| format!("failed to save results: {}", e))
        } else {
            Err(record.error().unwrap_or("unknown error").to_string())
        };

        match outcome {
            Ok(_) => {
                debug!("Wrote results for {}", path.display());
                succeeded += 1;
            }
            Err(error_msg) => {
                if args.fail_fast {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
                warn!("Failed to process {}: {}", path.display(), error_msg);
                failures.push(Failure {
                    path: path.clone(),
                    error: error_msg,
                });
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if args.summary {
        let rows = analyzer.summary_rows();
        if rows.is_empty() {
            println!("{} No data to generate report", style("ℹ").blue());
        } else {
            let summary_path = output_dir.join("summary_report.csv");
            write_summary(&summary_path, &rows)?;
            println!(
                "{} Summary report saved to {}",
                style("✓").green(),
                summary_path.display()
            );
        }
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(succeeded).green(),
        style(failures.len()).red()
    );

    if !failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &failures {
            println!("  - {}: {}", failure.path.display(), failure.error);
        }
    }

    Ok(())
}
