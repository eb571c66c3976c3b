//! Summary command implementation.

use std::path::Path;

use anyhow::Result;
use equilens::{EngineConfig, PeriodSelection};

use crate::{
    cmd::open_session,
    sink::{TextSink, header},
};

/// Show shipped metrics, then the metrics and bands of one period.
pub(crate) fn show_summary(
    document: &Path,
    period: Option<PeriodSelection>,
    mut config: EngineConfig,
) -> Result<()> {
    if let Some(period) = period {
        config.default_period = period;
    }

    header("Equity Curve Summary");

    let mut session = open_session(document, config)?;
    println!("Document:   {}", document.display());
    println!("Points:     {}", session.store().len());
    println!("Mode:       {}", session.config().rebase_mode);
    println!();

    let mut sink = TextSink { show_bands: true };
    if !session.load(&mut sink) {
        println!(
            "Period {} has no points; nothing to show.",
            session.config().default_period
        );
    }

    Ok(())
}
