//! Zoom command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use equilens::{EngineConfig, PeriodSelection, ViewportRange};

use crate::{
    cmd::open_session,
    sink::{TextSink, header},
};

/// Show the metrics of a period, then of an axis range within it.
///
/// Axis bounds are widened to whole indices, so a partly visible point
/// counts as visible.
pub(crate) fn show_zoom(
    document: &Path,
    period: PeriodSelection,
    start: f64,
    end: f64,
    config: EngineConfig,
) -> Result<()> {
    let mut session = open_session(document, config)?;
    let mut sink = TextSink::default();

    header("Full Period");
    if !session.select_period(period, &mut sink) {
        bail!("period {period} has no points");
    }

    header("Zoomed Range");
    let range = ViewportRange::from_axis(start, end);
    println!("Axis:       {start} to {end}");
    if let Some(curve) = session.current_curve()
        && let Some(clamped) = range.clamp(curve.len())
    {
        println!(
            "Dates:      {} to {}",
            curve.dates[clamped.start], curve.dates[clamped.end]
        );
    }
    println!();

    if !session.zoom(range, &mut sink) {
        println!("Range is empty; metrics unchanged.");
    }

    Ok(())
}
