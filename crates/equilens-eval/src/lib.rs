//! Equity-curve analytics for equilens.
//!
//! This crate provides the numerical core of the dashboard:
//! - Period selection and re-basing ([`FilteredCurve`], [`rebase()`])
//! - Summary metrics: annualized return, max drawdown, Sharpe, IR
//!   ([`MetricsCalculator`])
//! - Run-length bands for segment and regime backgrounds ([`runs()`])
//! - Metrics for a zoomed viewport ([`recompute_for_range`])
//! - Regime x segment performance tables ([`regime_breakdown`])
//! - Document export from daily backtest returns ([`build_document`])
//!
//! Every function is a pure, synchronous transformation of its inputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use equilens_eval::{FilteredCurve, MetricsCalculator};
//! use equilens_traits::{PeriodSelection, RebaseMode};
//!
//! let curve = FilteredCurve::build(&document, PeriodSelection::Test, RebaseMode::Compounding)
//!     .expect("document has Test data");
//! let metrics = MetricsCalculator::default().compute(&curve.dates, &curve.strategy, Some(&curve.benchmark));
//! println!("{}", metrics.display());
//! ```

pub mod breakdown;
pub mod export;
pub mod metrics;
pub mod period;
pub mod rebase;
pub mod runs;
pub mod viewport;

// Re-export main types
pub use breakdown::{BreakdownRow, CellStats, regime_breakdown};
pub use export::{DailyReturn, ExportConfig, build_document, test_period_metrics};
pub use metrics::{Metrics, MetricsCalculator, MetricsConfig, format_percent, format_ratio};
pub use period::{FilteredCurve, select};
pub use rebase::{rebase, rebase_from_start, rebase_optional, rebase_value};
pub use runs::{Run, expand, runs};
pub use viewport::{ViewportRange, recompute_for_range};
