use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io;
use std::path::PathBuf;

use pixelwar_placer::{
    api::HttpCanvasApi,
    config::Config,
    models::Coordinate,
    pacing::ThreadSleeper,
    prompt::Prompter,
    region::parse_coordinate,
    session::{RunOptions, RunOutcome, Session},
};

/// Paint a local image onto the pixel war canvas
#[derive(Debug, Parser)]
#[command(version, about)]
struct Arguments {
    /// Service root, overrides PIXELWAR_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Directory scanned for the image, overrides PIXELWAR_IMAGE_DIR
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Use this image instead of scanning a directory
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Top-left corner as x,y (skips the prompt)
    #[arg(long, value_parser = parse_coordinate, requires = "last")]
    first: Option<Coordinate>,

    /// Bottom-right corner as x,y (skips the prompt)
    #[arg(long, value_parser = parse_coordinate, requires = "first")]
    last: Option<Coordinate>,

    /// Do not ask for confirmation before sending
    #[arg(short, long)]
    yes: bool,

    /// Stop after the preview
    #[arg(long)]
    dry_run: bool,

    /// Do not draw the preview in the terminal
    #[arg(long)]
    no_preview: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let arguments = Arguments::parse();
    init_logging(arguments.verbose);

    let mut config = Config::from_env();
    if let Some(base_url) = arguments.base_url {
        config.base_url = base_url;
    }
    if let Some(image_dir) = arguments.image_dir {
        config.image_dir = image_dir;
    }

    let options = RunOptions {
        image: arguments.image,
        first: arguments.first,
        last: arguments.last,
        assume_yes: arguments.yes,
        dry_run: arguments.dry_run,
        show_preview: !arguments.no_preview,
    };

    let api = HttpCanvasApi::new(config.clone()).context("Failed to build the HTTP client")?;
    let mut session = Session::new(config, options, api, ThreadSleeper);
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    match session.run(&mut prompter)? {
        RunOutcome::DryRun { pixels } => {
            info!("Dry run finished, {pixels} pixels would have been placed");
        }
        RunOutcome::Submitted(report) => {
            info!(
                "Done: {} placed, {} failed",
                report.succeeded, report.failed
            );
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}
