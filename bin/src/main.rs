//! equilens CLI binary.
//!
//! Provides a command-line interface to the equilens equity-curve engine.

mod cmd;
mod sink;

use std::{path::PathBuf, process};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use equilens::{EngineConfig, PeriodSelection, RebaseMode};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cmd::{bands, breakdown, export, summary, zoom};

#[derive(Parser)]
#[command(name = "equilens")]
#[command(about = "Equity-curve analytics for backtested strategies", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cumulative return convention (compounding or additive)
    #[arg(long, global = true)]
    mode: Option<RebaseMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show initial metrics, period metrics and bands of a document
    Summary {
        /// Dashboard document (JSON)
        document: PathBuf,

        /// Period to show (all, test, valid_test); defaults to the configured period
        #[arg(short, long)]
        period: Option<PeriodSelection>,
    },

    /// Recompute metrics for a zoomed index range
    Zoom {
        /// Dashboard document (JSON)
        document: PathBuf,

        /// Period the range refers to
        #[arg(short, long, default_value = "test")]
        period: PeriodSelection,

        /// Left edge of the visible axis, in index units (fractions allowed)
        #[arg(long, allow_negative_numbers = true)]
        start: f64,

        /// Right edge of the visible axis, in index units (fractions allowed)
        #[arg(long, allow_negative_numbers = true)]
        end: f64,
    },

    /// List background bands of a period
    Bands {
        /// Dashboard document (JSON)
        document: PathBuf,

        /// Period to list
        #[arg(short, long)]
        period: Option<PeriodSelection>,

        /// Which labels to list
        #[arg(short, long, value_enum, default_value = "segments")]
        kind: BandKind,
    },

    /// Performance by market regime and dataset segment
    Breakdown {
        /// Dashboard document (JSON)
        document: PathBuf,

        /// Annualization constant; defaults to the configured trading days
        #[arg(long)]
        trading_days: Option<usize>,
    },

    /// Build a dashboard document from daily returns
    Export {
        /// Daily returns (JSON array of {date, strategy, benchmark})
        input: PathBuf,

        /// Last date of the Train segment (YYYY-MM-DD)
        #[arg(long)]
        train_end: String,

        /// Last date of the Valid segment (YYYY-MM-DD)
        #[arg(long)]
        valid_end: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Label kind for the `bands` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum BandKind {
    /// Train / Valid / Test
    Segments,
    /// Bull / Bear / Choppy
    Regimes,
}

impl Cli {
    fn init_logging(&self) {
        let level = match self.verbose {
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

        // A subscriber may already be installed when embedded; keep it.
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn engine_config(&self) -> Result<EngineConfig> {
        let config = match &self.config {
            Some(path) => EngineConfig::from_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        Ok(match self.mode {
            Some(mode) => config.with_rebase_mode(mode),
            None => config,
        })
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let config = cli.engine_config()?;

    match cli.command {
        Commands::Summary { document, period } => {
            summary::show_summary(&document, period, config)?;
        }
        Commands::Zoom {
            document,
            period,
            start,
            end,
        } => {
            zoom::show_zoom(&document, period, start, end, config)?;
        }
        Commands::Bands {
            document,
            period,
            kind,
        } => {
            bands::list_bands(&document, period, kind, &config)?;
        }
        Commands::Breakdown {
            document,
            trading_days,
        } => {
            let trading_days = trading_days.unwrap_or(config.trading_days_per_year);
            breakdown::show_breakdown(&document, trading_days)?;
        }
        Commands::Export {
            input,
            train_end,
            valid_end,
            output,
        } => {
            export::export_document(&input, &train_end, &valid_end, output.as_deref(), &config)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_accepts_axis_bounds() {
        let cli = Cli::try_parse_from([
            "equilens", "zoom", "doc.json", "--period", "all", "--start", "-0.4", "--end", "2.2",
        ])
        .unwrap();
        let Commands::Zoom { start, end, period, .. } = cli.command else {
            panic!("expected zoom");
        };
        assert_eq!(period, PeriodSelection::All);
        assert_eq!(
            equilens::ViewportRange::from_axis(start, end),
            equilens::ViewportRange::new(0, 3)
        );
    }

    #[test]
    fn test_breakdown_trading_days() {
        let cli =
            Cli::try_parse_from(["equilens", "breakdown", "doc.json", "--trading-days", "250"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Breakdown { trading_days: Some(250), .. }
        ));

        let cli = Cli::try_parse_from(["equilens", "breakdown", "doc.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Breakdown { trading_days: None, .. }
        ));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["equilens", "-vv", "summary", "doc.json", "--mode", "additive"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.mode, Some(RebaseMode::Additive));
        assert_eq!(cli.engine_config().unwrap().rebase_mode, RebaseMode::Additive);
    }
}
