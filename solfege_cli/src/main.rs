use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use solfege_core::{
    chart::{self, ChartLayout, Metric, Projection},
    stats::storage::{FileStorage, MemoryStorage, Storage},
    time::SystemClock,
    StatsStore, TrainerConfig,
};
use solfege_data::Mode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod play;
mod render;

#[derive(Debug, Parser)]
#[command(name = "solfege")]
#[command(about = "Solfège ear-training quizzes with local progress tracking", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the history file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Relative,
    Ordinance,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Relative => Mode::Relative,
            ModeArg::Ordinance => Mode::Ordinance,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    Accuracy,
    Time,
}

impl From<MetricArg> for Metric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Accuracy => Metric::Accuracy,
            MetricArg::Time => Metric::MedianTime,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a quiz in the terminal
    Play {
        mode: ModeArg,
        /// Stop after this many finished questions
        #[arg(short, long)]
        rounds: Option<u32>,
        /// Shuffle the answer options for every question
        #[arg(long)]
        shuffle: bool,
        /// Seed for reproducible questions
        #[arg(long)]
        seed: Option<u64>,
        /// Override the pause before the next question
        #[arg(long)]
        advance_ms: Option<u64>,
    },
    /// Print summary and daily statistics
    Stats {
        #[arg(short, long)]
        mode: Option<ModeArg>,
        /// Also list the most recent attempts
        #[arg(long)]
        recent: bool,
    },
    /// Print a daily chart
    Chart {
        #[arg(short, long)]
        mode: ModeArg,
        #[arg(long, value_enum, default_value = "accuracy")]
        metric: MetricArg,
        /// Also write the chart as an SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Delete all recorded history
    Reset,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solfege=warn,solfege_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TrainerConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => TrainerConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let storage = open_storage(&config, cli.memory);
    let stats = StatsStore::open(storage, Arc::new(SystemClock));

    match cli.command {
        Command::Play {
            mode,
            rounds,
            shuffle,
            seed,
            advance_ms,
        } => {
            if let Some(ms) = advance_ms {
                config.relative_advance_ms = ms;
                config.ordinance_advance_ms = ms;
            }
            let options = play::PlayOptions {
                mode: mode.into(),
                rounds,
                shuffle,
                seed,
            };
            let stdin = std::io::stdin();
            play::run_session(stats.into_shared(), &config, &options, stdin.lock())?;
        }
        Command::Stats { mode, recent } => {
            let modes: Vec<Mode> = match mode {
                Some(m) => vec![m.into()],
                None => Mode::ALL.to_vec(),
            };
            for mode in modes {
                print!("{}", render::stats_report(&stats, mode, config.history_days));
                if recent {
                    let attempts = stats.recent_history(mode, config.recent_limit);
                    print!("{}", render::recent_report(&attempts));
                }
            }
        }
        Command::Chart { mode, metric, svg } => {
            let buckets = stats.daily_buckets(mode.into(), config.history_days);
            let projection = chart::project(&buckets, metric.into());
            print!("{}", render::chart_report(&projection));
            if let Some(path) = svg {
                write_svg(&projection, &path)?;
            }
        }
        Command::Reset => {
            let mut stats = stats;
            stats.reset();
            println!("History cleared.");
        }
    }

    Ok(())
}

fn open_storage(config: &TrainerConfig, memory: bool) -> Box<dyn Storage> {
    if memory {
        return Box::new(MemoryStorage::new());
    }
    let dir = config
        .data_dir
        .clone()
        .unwrap_or_else(FileStorage::default_dir);
    Box::new(FileStorage::new(dir))
}

fn write_svg(projection: &Projection, path: &Path) -> anyhow::Result<()> {
    let layout = ChartLayout::default();
    let svg = render::chart_svg(projection, &layout);
    fs::write(path, svg).with_context(|| format!("failed to write: {}", path.display()))?;
    Ok(())
}
