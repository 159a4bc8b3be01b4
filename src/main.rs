use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing::info;

mod color;
mod config;
mod display;
mod input;
mod overlap;
mod scene;

use color::ColorScheme;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "fanlap")]
#[command(author, version, about = "Fan pattern overlap calculator")]
struct Args {
    /// Path index: distance between the two pattern centers
    #[arg(short, long, allow_hyphen_values = true)]
    index: Option<String>,

    /// Fan pattern radius
    #[arg(short, long, allow_hyphen_values = true)]
    radius: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Fill colors: classic, ocean, fire, forest, purple, monochrome
    #[arg(long)]
    colors: Option<ColorScheme>,

    /// Unit name shown in readouts, e.g. "in" or "mm"
    #[arg(long)]
    units: Option<String>,

    /// Decimal places in labels and readouts
    #[arg(long)]
    precision: Option<usize>,

    /// Plot background as hex, e.g. "#FFFFFF"
    #[arg(long, value_name = "HEX")]
    background: Option<String>,

    /// Hide the concentric reference rings
    #[arg(long)]
    no_rings: bool,

    /// Hide the background grid
    #[arg(long)]
    no_grid: bool,

    /// Hide the legend
    #[arg(long)]
    no_legend: bool,

    /// Write a commented config file to the default location and exit
    #[arg(long)]
    init_config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    // Logs go to stderr so completion scripts on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fanlap=warn".parse()?),
        )
        .init();

    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "fanlap", &mut std::io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config template to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    let autorun = args.index.is_some() && args.radius.is_some();
    info!("Starting fanlap (autorun: {})", autorun);

    display::terminal::run(config, autorun)
}
