#![doc(issue_tracker_base_url = "https://github.com/factordynamics/equilens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # equilens
//!
//! Interactive analytics for strategy equity curves.
//!
//! equilens is an umbrella crate that re-exports the equilens sub-crates and
//! adds the session layer that ties them to a display.
//!
//! ## Quick Start
//!
//! ```ignore
//! use equilens::{EngineConfig, PeriodSelection, SeriesStore, Session, ViewportRange};
//!
//! # fn main() -> equilens::Result<()> {
//! let store = SeriesStore::from_path("dashboard_data.json")?;
//! let mut session = Session::new(store, EngineConfig::default());
//!
//! // `sink` is any RenderSink implementation
//! session.load(&mut sink);
//! session.select_period(PeriodSelection::All, &mut sink);
//! session.zoom(ViewportRange::new(120, 240), &mut sink);
//! session.reset_zoom(&mut sink);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Error type, label types and statistics helpers
//! - [`data`] - Document schema, validation and the series store
//! - [`eval`] - Filtering, re-basing, metrics, bands and breakdowns
//! - [`Session`] - Per-user state driving a [`RenderSink`]
//!
//! ## Data Flow
//!
//! 1. **SeriesStore** validates and holds the document
//! 2. **FilteredCurve** selects a period and re-bases it to zero
//! 3. **MetricsCalculator** summarizes the visible range
//! 4. **Bands** color the segment and regime runs behind the curve

/// Version information for the equilens crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod render;
pub mod session;

/// Error type, label types and statistics helpers.
pub mod traits {
    pub use equilens_traits::*;
}

/// Document schema, validation and the series store.
pub mod data {
    pub use equilens_data::*;
}

/// Filtering, re-basing, metrics, bands and breakdowns.
pub mod eval {
    pub use equilens_eval::*;
}

pub use config::EngineConfig;
pub use render::{Band, BandPalette, Bands, Fill, RegimePalette, RenderSink, SegmentPalette};
pub use session::Session;

pub use equilens_data::{EquityCurveDocument, SeriesStore, SummaryMetrics};
pub use equilens_eval::{FilteredCurve, Metrics, MetricsCalculator, ViewportRange};
pub use equilens_traits::{
    Date, EquilensError, PeriodSelection, RebaseMode, Regime, Result, Segment,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
