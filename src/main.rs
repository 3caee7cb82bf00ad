use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::Env;
use log::{info, LevelFilter};
// For picking random images to show
use rand::{rngs::SmallRng, SeedableRng};

use csv_imageset::dataset::save_dataset;
use csv_imageset::render::{self, Glyphs};
use csv_imageset::stats::DatasetStats;
use csv_imageset::tokenize::DEFAULT_MAX_FIELD_WIDTH;
use csv_imageset::{load_dataset_with, Dataset, LoadOptions};

#[derive(Parser)]
#[command(
    name = "csv_imageset",
    version,
    about = "Load labeled image datasets from CSV and draw them in the terminal"
)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Less log output (-q warn, -qq error)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print dataset size and image dimensions
    Info(InfoArgs),
    /// Draw one or more images
    Show(ShowArgs),
    /// Print label and pixel statistics
    Stats(StatsArgs),
    /// Write the loaded images back out as CSV
    Export(ExportArgs),
}

#[derive(Args)]
struct DatasetArgs {
    /// CSV file: a header row, then one `label,pixel,...` row per image
    path: PathBuf,
    #[arg(long, default_value_t = 28)]
    height: usize,
    #[arg(long, default_value_t = 28)]
    width: usize,
    /// Stop after this many images
    #[arg(long)]
    limit: Option<usize>,
    /// Longest field kept by the tokenizer, plus one
    #[arg(long, default_value_t = DEFAULT_MAX_FIELD_WIDTH)]
    max_field_width: usize,
}

impl DatasetArgs {
    fn load(&self) -> Result<Dataset> {
        let mut options =
            LoadOptions::new(self.height, self.width).with_max_field_width(self.max_field_width);
        options.limit = self.limit;

        let now = Instant::now();
        let dataset = load_dataset_with(&self.path, &options)
            .with_context(|| format!("unable to load {}", self.path.display()))?;
        info!(
            "Loaded {} examples from {} [{}ms]",
            dataset.count(),
            self.path.display(),
            now.elapsed().as_millis()
        );
        Ok(dataset)
    }
}

#[derive(Args)]
struct InfoArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Also draw the first image
    #[arg(long)]
    head: bool,
    #[arg(long)]
    ascii: bool,
}

#[derive(Args)]
struct ShowArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// First image to draw
    #[arg(long, default_value_t = 0)]
    index: usize,
    /// How many consecutive images to draw
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Draw this many randomly chosen images instead
    #[arg(long, conflicts_with_all = ["index", "count"])]
    random: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Use plain ASCII instead of block characters
    #[arg(long)]
    ascii: bool,
}

#[derive(Args)]
struct StatsArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Share of images that must agree for a position to count as constant
    #[arg(long, default_value_t = 0.98)]
    ratio: f64,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Info(args) => run_info(args),
        Commands::Show(args) => run_show(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Export(args) => run_export(args),
    }
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if let Some(level) = level_override(verbose, quiet) {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

// Without -v or -q, RUST_LOG (or "info") decides
fn level_override(verbose: u8, quiet: u8) -> Option<LevelFilter> {
    match (quiet, verbose) {
        (0, 0) => None,
        (0, 1) => Some(LevelFilter::Debug),
        (0, _) => Some(LevelFilter::Trace),
        (1, _) => Some(LevelFilter::Warn),
        _ => Some(LevelFilter::Error),
    }
}

fn glyphs(ascii: bool) -> Glyphs {
    if ascii {
        Glyphs::Ascii
    } else {
        Glyphs::Unicode
    }
}

fn run_info(args: InfoArgs) -> Result<()> {
    let dataset = args.dataset.load()?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render::render_summary(&dataset))?;
    if args.head {
        write!(stdout, "{}", render::render_head(&dataset, glyphs(args.ascii)))?;
    }
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let dataset = args.dataset.load()?;
    if dataset.is_empty() {
        bail!("{} contains no images", args.dataset.path.display());
    }

    let indices = match args.random {
        Some(amount) => dataset.sample_indices(amount, &mut SmallRng::seed_from_u64(args.seed)),
        None => {
            if args.index >= dataset.count() {
                bail!(
                    "index {} is out of range, dataset has {} images",
                    args.index,
                    dataset.count()
                );
            }
            let end = args.index.saturating_add(args.count).min(dataset.count());
            (args.index..end).collect()
        }
    };

    let style = glyphs(args.ascii);
    let mut stdout = io::stdout().lock();
    for index in indices {
        writeln!(stdout, "Image #{index}")?;
        write!(stdout, "{}", render::render_properties(&dataset[index], style))?;
    }
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    if !(0.0..=1.0).contains(&args.ratio) {
        bail!("--ratio must be between 0 and 1, got {}", args.ratio);
    }
    let dataset = args.dataset.load()?;

    let now = Instant::now();
    let stats = DatasetStats::compute(&dataset, args.ratio);
    info!("Computed statistics [{}ms]", now.elapsed().as_millis());

    write!(io::stdout().lock(), "{}", render::render_stats(&stats))?;
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let dataset = args.dataset.load()?;
    save_dataset(&dataset, &args.output)
        .with_context(|| format!("unable to write {}", args.output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_applies_without_flags() {
        assert_eq!(level_override(0, 0), None);
    }

    #[test]
    fn flags_override_rust_log() {
        assert_eq!(level_override(1, 0), Some(LevelFilter::Debug));
        assert_eq!(level_override(3, 0), Some(LevelFilter::Trace));
        assert_eq!(level_override(0, 1), Some(LevelFilter::Warn));
        assert_eq!(level_override(2, 2), Some(LevelFilter::Error));
    }

    #[test]
    fn dataset_options_are_per_subcommand() {
        let cli = Cli::parse_from(["csv_imageset", "show", "data.csv", "--height", "2", "-v"]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.dataset.height, 2);
                assert_eq!(args.dataset.width, 28);
            }
            _ => panic!("expected show"),
        }
    }
}
