//! CLI application for financial document analysis.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{GlobalOptions, batch, config, process};

/// Financial document analysis - OCR, classification, field extraction and sentiment
#[derive(Parser)]
#[command(name = "finscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the Tesseract executable (if not in PATH)
    #[arg(short, long, global = true)]
    tesseract: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single document image
    Process(process::ProcessArgs),

    /// Analyze every document image matching a glob pattern
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let globals = GlobalOptions {
        config: cli.config,
        tesseract: cli.tesseract,
    };

    match cli.command {
        Commands::Process(args) => process::run(args, &globals),
        Commands::Batch(args) => batch::run(args, &globals),
        Commands::Config(args) => config::run(args),
    }
}
