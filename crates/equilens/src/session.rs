//! Interactive dashboard session.
//!
//! A [`Session`] owns the loaded document and the current period selection.
//! Each user action (select a period, zoom, reset zoom) recomputes what is
//! needed and pushes the result to a [`RenderSink`]. Actions that would
//! produce nothing to show leave the current state and display untouched.

use equilens_data::SeriesStore;
use equilens_eval::{FilteredCurve, Metrics, MetricsCalculator, ViewportRange, recompute_for_range};
use equilens_traits::PeriodSelection;
use tracing::{debug, info, warn};

use crate::{
    config::EngineConfig,
    render::{Bands, RegimePalette, RenderSink, SegmentPalette},
};

/// The state of one dashboard session.
#[derive(Debug)]
pub struct Session {
    store: SeriesStore,
    config: EngineConfig,
    calculator: MetricsCalculator,
    current_period: Option<PeriodSelection>,
    current: Option<FilteredCurve>,
    metrics: Option<Metrics>,
}

impl Session {
    /// Create a session over a loaded store. Nothing is shown until
    /// [`load`](Self::load) or [`select_period`](Self::select_period).
    #[must_use]
    pub const fn new(store: SeriesStore, config: EngineConfig) -> Self {
        let calculator = MetricsCalculator::new(config.metrics_config());
        Self {
            store,
            config,
            calculator,
            current_period: None,
            current: None,
            metrics: None,
        }
    }

    /// Initial display: the document's shipped metrics, then the configured
    /// default period.
    ///
    /// Returns whether the default period had data to show.
    pub fn load(&mut self, sink: &mut impl RenderSink) -> bool {
        if let Some(initial) = self.store.initial_metrics() {
            sink.show_initial(initial);
        }
        info!(
            points = self.store.len(),
            period = %self.config.default_period,
            mode = %self.config.rebase_mode,
            "session loaded"
        );
        self.select_period(self.config.default_period, sink)
    }

    /// Switch to `period`: filter, re-base, recompute metrics and bands and
    /// redraw.
    ///
    /// Returns `false` without touching state or display when the period
    /// selects no points.
    pub fn select_period(&mut self, period: PeriodSelection, sink: &mut impl RenderSink) -> bool {
        let Some(curve) =
            FilteredCurve::build(self.store.document(), period, self.config.rebase_mode)
        else {
            warn!(period = %period, "period selects no points, keeping current view");
            return false;
        };

        let metrics = self.calculator.compute(&curve.dates, &curve.strategy, Some(&curve.benchmark));
        let bands = Bands::for_curve(&curve, &SegmentPalette, &RegimePalette);

        sink.show_curve(&curve, &bands);
        sink.show_metrics(&metrics);

        self.current_period = Some(period);
        self.current = Some(curve);
        self.metrics = Some(metrics);
        true
    }

    /// Recompute metrics for the visible range of the current curve.
    ///
    /// Only the metrics panel is updated. Returns `false` when there is no
    /// current curve or the clamped range is empty.
    pub fn zoom(&mut self, range: ViewportRange, sink: &mut impl RenderSink) -> bool {
        let Some(curve) = &self.current else {
            debug!("zoom ignored, nothing selected");
            return false;
        };
        let Some(metrics) = recompute_for_range(curve, range, &self.calculator) else {
            debug!(start = range.start, end = range.end, "zoom range is empty");
            return false;
        };
        sink.show_metrics(&metrics);
        self.metrics = Some(metrics);
        true
    }

    /// Return to the full current period.
    ///
    /// Returns `false` when nothing has been selected yet.
    pub fn reset_zoom(&mut self, sink: &mut impl RenderSink) -> bool {
        match self.current_period {
            Some(period) => self.select_period(period, sink),
            None => false,
        }
    }

    /// The loaded store.
    #[must_use]
    pub const fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// The session's configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The selected period, if any.
    #[must_use]
    pub const fn current_period(&self) -> Option<PeriodSelection> {
        self.current_period
    }

    /// The curve currently displayed.
    #[must_use]
    pub const fn current_curve(&self) -> Option<&FilteredCurve> {
        self.current.as_ref()
    }

    /// The metrics currently displayed.
    #[must_use]
    pub const fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }
}
