//! Plain-text render sink for terminal output.

use std::fmt::Display;

use equilens::{Band, Bands, FilteredCurve, Metrics, RenderSink, SummaryMetrics};
use equilens_eval::{format_percent, format_ratio};

/// Print a boxed section header.
pub(crate) fn header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║ {title:<61}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Writes everything the engine shows to stdout.
#[derive(Debug, Default)]
pub(crate) struct TextSink {
    /// Also list every band run under the curve.
    pub(crate) show_bands: bool,
}

impl RenderSink for TextSink {
    fn show_curve(&mut self, curve: &FilteredCurve, bands: &Bands) {
        let (Some(first), Some(last)) = (curve.dates.first(), curve.dates.last()) else {
            return;
        };
        println!("Period:     {}", curve.period);
        println!("Range:      {first} to {last} ({} points)", curve.len());
        if let (Some(s), Some(b)) = (curve.strategy.last(), curve.benchmark.last()) {
            println!("Strategy:   {}", format_percent(*s));
            println!("Benchmark:  {}", format_percent(*b));
        }
        println!(
            "Bands:      {} segment, {} regime",
            bands.segments.len(),
            bands.regimes.len()
        );

        if self.show_bands {
            println!();
            for band in &bands.segments {
                print_band(curve, band);
            }
            for band in &bands.regimes {
                print_band(curve, band);
            }
        }
        println!();
    }

    fn show_metrics(&mut self, metrics: &Metrics) {
        println!("{}", metrics.display());
        println!();
    }

    fn show_initial(&mut self, metrics: &SummaryMetrics) {
        println!("Shipped metrics:");
        let field = |v: Option<f64>, f: fn(f64) -> String| v.map_or_else(|| "-".to_string(), f);
        println!("  Annualized Return:  {}", field(metrics.annualized_return, format_percent));
        println!("  Max Drawdown:       {}", field(metrics.max_drawdown, format_percent));
        println!("  Sharpe Ratio:       {}", field(metrics.sharpe_ratio, format_ratio));
        println!("  Information Ratio:  {}", field(metrics.information_ratio, format_ratio));
        println!();
    }
}

/// Print one band as `label  start_date .. end_date  (n pts)  fill`.
pub(crate) fn print_band<L: Display>(curve: &FilteredCurve, band: &Band<L>) {
    let fill = band.fill.map_or_else(|| "none".to_string(), |f| f.to_string());
    println!(
        "  {:<12} {} .. {}  ({:>4} pts)  {}",
        band.run.label.to_string(),
        curve.dates[band.run.start],
        curve.dates[band.run.end],
        band.run.len(),
        fill
    );
}
