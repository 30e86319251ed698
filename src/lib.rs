//! Cropmark: detection post-processing and annotation for crop disease images.
//!
//! Cropmark takes the raw output of an object detector (class index,
//! confidence, box per object), keeps one detection per class, clips boxes to
//! the image, draws them with their class names onto a copy of the image,
//! attaches a reference link to each class, and returns the annotated image
//! as base64 JPEG alongside the detections.
//!
//! # Modules
//!
//! - [`ir`]: Detection types at each pipeline stage, and recorded-detection readers
//! - [`catalog`]: Class index to class name
//! - [`links`]: Class name to reference link, with fallback
//! - [`config`]: Configuration loaded once at startup
//! - [`pipeline`]: The post-processing stages and their orchestration
//! - [`error`]: Error types for cropmark operations

pub mod catalog;
pub mod config;
pub mod error;
pub mod ir;
pub mod links;
pub mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use config::PipelineConfig;
pub use error::{CropmarkError, DetectionError, EncodingError};
pub use pipeline::{Pipeline, PipelineOutput};

use links::ClassLinkTable;
use pipeline::RecordedDetector;

/// The cropmark CLI application.
#[derive(Parser)]
#[command(name = "cropmark")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log pipeline decisions (dropped boxes, fallback links) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Annotate an image with recorded detections.
    Annotate(AnnotateArgs),

    /// Print the reference link for a class name.
    Link(LinkArgs),
}

/// Arguments for the annotate subcommand.
#[derive(clap::Args)]
struct AnnotateArgs {
    /// Input image (JPEG, PNG, BMP or WebP).
    image: PathBuf,

    /// Recorded detections for the image.
    #[arg(long)]
    detections: PathBuf,

    /// Detections format ('auto', 'json', or 'txt').
    #[arg(long, default_value = "auto")]
    detections_format: String,

    /// Pipeline configuration file (YAML).
    #[arg(long, env = "CROPMARK_CONFIG")]
    config: PathBuf,

    /// Output format for the result ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Also write the annotated JPEG to this path.
    #[arg(long)]
    save: Option<PathBuf>,
}

/// Arguments for the link subcommand.
#[derive(clap::Args)]
struct LinkArgs {
    /// Class name to resolve.
    class_name: String,

    /// Configuration file whose link table to use (built-in table if omitted).
    #[arg(long, env = "CROPMARK_CONFIG")]
    config: Option<PathBuf>,
}

/// Run the cropmark CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CropmarkError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Annotate(args)) => run_annotate(args),
        Some(Commands::Link(args)) => run_link(args),
        None => {
            println!("cropmark {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Detection post-processing and annotation.");
            println!();
            println!("Run 'cropmark --help' for usage information.");
            Ok(())
        }
    }
}

/// Logs go to stderr so `--output json` stays machine-readable. `RUST_LOG`
/// overrides the level chosen here.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init();
}

/// Execute the annotate subcommand.
fn run_annotate(args: AnnotateArgs) -> Result<(), CropmarkError> {
    if !matches!(args.output.as_str(), "text" | "json") {
        return Err(CropmarkError::UnsupportedFormat(format!(
            "output '{}' (supported: text, json)",
            args.output
        )));
    }

    let config = PipelineConfig::from_path(&args.config)?;
    let pipeline = Pipeline::new(config);
    let detector = RecordedDetector::from_path(&args.detections, &args.detections_format)?;

    let image_bytes = std::fs::read(&args.image)?;
    let output = pipeline.run(&image_bytes, &detector)?;

    if let Some(path) = &args.save {
        std::fs::write(path, output.image.jpeg_bytes())?;
        tracing::info!("Annotated image saved to: {}", path.display());
    }

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&output).map_err(CropmarkError::OutputJson)?;
            println!("{}", json);
        }
        _ => print!("{}", output),
    }

    Ok(())
}

/// Execute the link subcommand.
fn run_link(args: LinkArgs) -> Result<(), CropmarkError> {
    let links = match &args.config {
        Some(path) => PipelineConfig::from_path(path)?.links,
        None => ClassLinkTable::crop_disease(),
    };

    match links.get(&args.class_name) {
        Some(url) => println!("{}", url),
        None => println!("{} (fallback)", links.fallback()),
    }
    Ok(())
}
