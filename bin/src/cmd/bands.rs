//! Bands command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use equilens::{Bands, EngineConfig, FilteredCurve, PeriodSelection, RegimePalette, SegmentPalette};

use crate::{
    BandKind,
    cmd::load_store,
    sink::{header, print_band},
};

/// List the background bands of a period.
pub(crate) fn list_bands(
    document: &Path,
    period: Option<PeriodSelection>,
    kind: BandKind,
    config: &EngineConfig,
) -> Result<()> {
    let store = load_store(document)?;
    let period = period.unwrap_or(config.default_period);

    let Some(curve) = FilteredCurve::build(store.document(), period, config.rebase_mode) else {
        bail!("period {period} has no points");
    };
    let bands = Bands::for_curve(&curve, &SegmentPalette, &RegimePalette);

    match kind {
        BandKind::Segments => {
            header("Segment Bands");
            for band in &bands.segments {
                print_band(&curve, band);
            }
        }
        BandKind::Regimes => {
            header("Regime Bands");
            for band in &bands.regimes {
                print_band(&curve, band);
            }
        }
    }
    println!();

    Ok(())
}
