//! pixelflow - run an image transform job
//!
//! Reads a JSON job file, decodes its input image, runs the listed
//! operations in order and writes the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use pixelflow_core::{decode, encode, ImageBuffer, Job};

#[derive(Parser)]
#[command(name = "pixelflow")]
#[command(author, version, about = "Apply a JSON-described transform pipeline to an image")]
#[command(long_about = "
Apply a JSON-described transform pipeline to an image.

Job file:
  { \"input\": \"in.png\", \"output\": \"out/result.png\",
    \"operations\": [ {\"type\": \"box\", \"width\": 5}, {\"type\": \"sobel\"} ] }

Transforms: box, sobel, sharpen, brightness, contrast, saturation
")]
struct Cli {
    /// Path to the JSON job file
    #[arg(short, long)]
    config: PathBuf,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let job = Job::from_path(&cli.config)
        .with_context(|| format!("Failed to load job {}", cli.config.display()))?;
    run(&job)?;
    Ok(())
}

/// Execute a loaded job and return the final image.
fn run(job: &Job) -> Result<ImageBuffer> {
    let image = decode::load(&job.input)
        .with_context(|| format!("Failed to read {}", job.input.display()))?;
    info!(
        "{}: {}x{} {:?}, {} operation(s)",
        job.input.display(),
        image.width(),
        image.height(),
        image.mode(),
        job.pipeline.len()
    );

    let result = job.pipeline.run(image);

    if let Some(output) = &job.output {
        save(output, &result)?;
    }
    if job.display {
        warn!("display requested but no viewer is available; skipping");
    }
    Ok(result)
}

fn save(path: &Path, image: &ImageBuffer) -> Result<()> {
    encode::save(path, image).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(())
}
