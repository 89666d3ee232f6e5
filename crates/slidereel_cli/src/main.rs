//! SlideReel binary entry point.
//!
//! Thin driver around `slidereel_core`: parses arguments, loads config,
//! wires a run logger that echoes to the console, and runs one assembly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use slidereel_core::assembly::SequenceAssembler;
use slidereel_core::config::ConfigManager;
use slidereel_core::logging::{init_tracing, LogCallback, LogLevel, RunLogger};
use slidereel_core::media::FfmpegTool;
use slidereel_core::models::AssemblyJob;

/// Assemble slide images, narration clips and transition clips into one video.
#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    /// Slide image, repeated once per slide, in presentation order
    #[arg(long = "image", value_name = "FILE", required = true)]
    images: Vec<PathBuf>,

    /// Narration clip, repeated once per slide, paired with images by order
    #[arg(long = "audio", value_name = "FILE", required = true)]
    audios: Vec<PathBuf>,

    /// Transition source clip, one per adjacent slide pair
    #[arg(long = "transition", value_name = "FILE")]
    transitions: Vec<PathBuf>,

    /// Output video path (default: <output_folder>/<run-name>.mp4)
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Trimmed transition duration in seconds (overrides config)
    #[arg(long, value_name = "SECONDS")]
    transition_duration: Option<f64>,

    /// Config file (created with defaults on first run)
    #[arg(long, value_name = "FILE", default_value = "slidereel.toml")]
    config: PathBuf,

    /// Run name, used for the scratch directory and log file
    #[arg(long, value_name = "NAME")]
    run_name: Option<String>,
}

fn main() -> Result<()> {
    init_tracing(LogLevel::Info);

    let cli = Cli::parse();

    let mut config = ConfigManager::new(&cli.config);
    config
        .load_or_create()
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    config
        .ensure_dirs_exist()
        .context("creating working directories")?;

    let settings = config.settings().clone();

    // Each run gets its own scratch directory and log file; concurrent runs
    // must not share scratch.
    let run_name = cli.run_name.unwrap_or_else(|| {
        format!("reel_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    });

    let output_path = cli
        .output
        .unwrap_or_else(|| config.output_folder().join(format!("{}.mp4", run_name)));

    let echo: LogCallback = Box::new(|line| println!("{}", line));
    let logger = Arc::new(
        RunLogger::new(
            &run_name,
            config.logs_folder(),
            settings.logging.to_log_config(),
            Some(echo),
        )
        .context("creating run logger")?,
    );

    tracing::info!("SlideReel v{} run '{}'", slidereel_core::version(), run_name);

    let tool = FfmpegTool::new(&settings, logger.clone());
    let scratch_dir = config.scratch_root().join(&run_name);

    let job = AssemblyJob::new(
        cli.images,
        cli.audios,
        cli.transitions,
        cli.transition_duration
            .unwrap_or(settings.encode.transition_duration),
        output_path,
    );

    let assembler = SequenceAssembler::new(&tool, scratch_dir, logger.clone());
    let final_path = assembler.assemble(&job).context("assembly failed")?;

    println!("Assembled: {}", final_path.display());
    println!("Run log: {}", logger.log_path().display());

    Ok(())
}
