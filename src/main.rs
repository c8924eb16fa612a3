//! storystrip - Entry Point

use clap::Parser;
use std::path::PathBuf;
use storystrip::model::AppError;
use storystrip::source::ContentSource;
use storystrip::strip::StoriesList;
use tracing::info;

/// Number of demo stories when neither a file nor `--demo` is given.
const DEFAULT_DEMO_ITEMS: usize = 24;

/// storystrip - interactive preview of the stories strip engine
#[derive(Parser, Debug)]
#[command(name = "storystrip")]
#[command(version)]
#[command(about = "Terminal preview of a compact/expanded stories strip")]
pub struct Args {
    /// Path to a JSON content snapshot (array of descriptors, or JSON lines of snapshots)
    #[arg(conflicts_with = "demo")]
    pub file: Option<PathBuf>,

    /// Generate this many demo stories instead of reading a file
    #[arg(long, value_name = "N")]
    pub demo: Option<usize>,

    /// Reject snapshots that repeat a story id
    #[arg(long)]
    pub strict: bool,

    /// Mirror horizontal scrolling
    #[arg(long)]
    pub rtl: bool,

    /// Let the area past the last story select it
    #[arg(long)]
    pub full_clickable: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn content_source(&self) -> Result<ContentSource, AppError> {
        match &self.file {
            Some(path) => Ok(ContentSource::from_file(path, self.strict)?),
            None => Ok(ContentSource::demo(
                self.demo.unwrap_or(DEFAULT_DEMO_ITEMS),
            )),
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = storystrip::config::resolve(
        args.config.clone(),
        args.rtl.then_some(true),
        args.full_clickable.then_some(true),
    )?;

    storystrip::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let source = args.content_source()?;
    info!(snapshots = source.snapshot_count(), "Content loaded");

    let list = StoriesList::new(config.style, config.strip)?;
    storystrip::view::run_preview(list, source, config.frame_interval)?;

    Ok(())
}
