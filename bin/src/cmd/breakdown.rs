//! Breakdown command implementation.

use std::path::Path;

use anyhow::Result;
use equilens_eval::{format_percent, regime_breakdown};

use crate::{cmd::load_store, sink::header};

/// Print the regime x segment performance table, annualized over
/// `trading_days` per year.
pub(crate) fn show_breakdown(document: &Path, trading_days: usize) -> Result<()> {
    let store = load_store(document)?;
    let rows = regime_breakdown(store.document(), trading_days);

    header("Regime / Segment Breakdown");
    println!("Annualized over {trading_days} trading days\n");

    println!(
        "{:<8} {:<6} {:>6} {:>9} {:>9} {:>9} {:>8} {:>8} {:>8} {:>7}",
        "Regime", "Seg", "Days", "Strat", "Bench", "Excess", "Sharpe", "IR", "Vol", "Win"
    );
    println!("{}", "-".repeat(88));

    let ratio = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));

    for row in &rows {
        let regime = row.regime.map_or_else(|| "All".to_string(), |r| r.to_string());
        match &row.stats {
            Some(s) => println!(
                "{:<8} {:<6} {:>6} {:>9} {:>9} {:>9} {:>8} {:>8} {:>8} {:>7}",
                regime,
                row.segment.to_string(),
                row.observations,
                format_percent(s.strategy_return),
                format_percent(s.benchmark_return),
                format_percent(s.outperformance),
                ratio(s.strategy_sharpe),
                ratio(s.information_ratio),
                format_percent(s.strategy_volatility),
                format_percent(s.strategy_win_rate),
            ),
            None => println!(
                "{:<8} {:<6} {:>6}   (not enough data)",
                regime,
                row.segment.to_string(),
                row.observations
            ),
        }
    }
    println!();

    Ok(())
}
