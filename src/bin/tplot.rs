//! tplot: streaming terminal line charts
//!
//! Reads numbers from a file or stdin, one line per time step and one
//! column per series, and keeps a live box-drawing chart of the most recent
//! values on screen.
//!
//! Run: `vmstat 1 | awk '{print $13; fflush()}' | tplot -t cpu`

use trueno_plot::chart::AxisMode;
use trueno_plot::color::Color;
use trueno_plot::config::{Config, Overrides};
use trueno_plot::plotter::{resolve_cols, Plotter};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::PathBuf;

/// tplot: streaming terminal line charts
#[derive(Parser, Debug)]
#[command(name = "tplot")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Plot a stream of numbers as a live terminal line chart", long_about = None)]
struct Cli {
    /// Input file; reads stdin when absent or "-"
    file: Option<PathBuf>,

    /// Chart height in rows
    #[arg(short, long)]
    rows: Option<usize>,

    /// Chart width in columns (defaults to the terminal width)
    #[arg(short, long)]
    cols: Option<usize>,

    /// Number of series per input line
    #[arg(short, long)]
    series: Option<usize>,

    /// Series color, repeat once per series
    #[arg(long = "color", value_name = "COLOR")]
    colors: Vec<Color>,

    /// Fixed lower bound of the value axis
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// Fixed upper bound of the value axis
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,

    /// Fractional digits in labels and statistics
    #[arg(short, long)]
    precision: Option<usize>,

    /// Y axis placement: reserved, overlay or hidden
    #[arg(long)]
    axis: Option<AxisMode>,

    /// Title printed above the chart
    #[arg(short, long)]
    title: Option<String>,

    /// Render once at end of input
    #[arg(long)]
    batch: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            rows: self.rows,
            cols: self.cols,
            series: self.series,
            colors: self.colors.clone(),
            min: self.min,
            max: self.max,
            precision: self.precision,
            axis: self.axis,
            title: self.title.clone(),
            batch: self.batch,
            no_color: self.no_color,
        }
    }

    fn input(&self) -> Result<Box<dyn BufRead>> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => {
                let file = File::open(path)
                    .with_context(|| format!("cannot open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            _ => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(&Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let base = match (&cli.config, Config::default_path()) {
        (Some(path), _) => Config::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        (None, Some(path)) => Config::load_or_default(path),
        (None, None) => Config::default(),
    };
    let config = base.with_overrides(&cli.overrides()).context("invalid configuration")?;

    let stdout = io::stdout();
    let terminal = stdout.is_terminal();
    let width = terminal
        .then(crossterm::terminal::size)
        .and_then(std::result::Result::ok)
        .map(|(cols, _)| usize::from(cols));
    let cols = resolve_cols(&config, width);
    log::debug!("plotting {} series in {}x{}", config.series, config.rows, cols);

    // An explicit width is honored as given.
    let fit = width.filter(|_| config.cols.is_none());
    let mut plotter = Plotter::new(config, cols)?;
    if let Some(width) = fit {
        plotter = plotter.fit_width(width);
    }
    let input = cli.input()?;
    plotter.run(input, &mut stdout.lock(), terminal)?;

    Ok(())
}
