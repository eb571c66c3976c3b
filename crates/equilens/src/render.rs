//! The rendering boundary and background band colors.
//!
//! A [`RenderSink`] receives everything a chart needs: the filtered curve,
//! the colored background bands and the metrics panel values. How it draws
//! them is up to the implementation.

use std::fmt;

use equilens_data::SummaryMetrics;
use equilens_eval::{FilteredCurve, Metrics, Run, runs};
use equilens_traits::{Regime, Segment};
use serde::Serialize;

/// Receiver of the engine's display output.
pub trait RenderSink {
    /// Draw a curve with its background bands.
    fn show_curve(&mut self, curve: &FilteredCurve, bands: &Bands);

    /// Update the metrics panel.
    fn show_metrics(&mut self, metrics: &Metrics);

    /// Show metrics shipped with the document before any selection.
    ///
    /// Fields absent from the document are `None`.
    fn show_initial(&mut self, metrics: &SummaryMetrics);
}

/// An RGBA fill color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fill {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Opacity in `[0, 1]`
    pub a: f32,
}

impl Fill {
    /// Create a fill color.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Whether the fill draws nothing.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Maps a label to the color of its background band.
pub trait BandPalette<L> {
    /// Fill for `label`, or `None` to draw no band.
    fn fill(&self, label: &L) -> Option<Fill>;
}

/// Default colors for dataset segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentPalette;

impl BandPalette<Segment> for SegmentPalette {
    fn fill(&self, label: &Segment) -> Option<Fill> {
        match label {
            Segment::Train => Some(Fill::rgba(255, 255, 255, 0.05)),
            Segment::Valid => Some(Fill::rgba(255, 193, 7, 0.1)),
            Segment::Test => Some(Fill::rgba(0, 0, 0, 0.0)),
            Segment::Unknown(_) => None,
        }
    }
}

/// Default colors for market regimes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegimePalette;

impl BandPalette<Regime> for RegimePalette {
    fn fill(&self, label: &Regime) -> Option<Fill> {
        match label {
            Regime::Bull => Some(Fill::rgba(76, 175, 80, 0.2)),
            Regime::Bear => Some(Fill::rgba(244, 67, 54, 0.25)),
            Regime::Choppy => Some(Fill::rgba(158, 158, 158, 0.1)),
            Regime::Unknown(_) => None,
        }
    }
}

/// A run of equal labels with its background color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band<L> {
    /// The labelled index range.
    pub run: Run<L>,
    /// Background color; `None` for labels the palette does not know.
    pub fill: Option<Fill>,
}

/// Segment and regime bands of one curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bands {
    /// Bands of the segment labels.
    pub segments: Vec<Band<Segment>>,
    /// Bands of the regime labels.
    pub regimes: Vec<Band<Regime>>,
}

impl Bands {
    /// Compute both band sets of `curve` with the given palettes.
    #[must_use]
    pub fn for_curve(
        curve: &FilteredCurve,
        segment_palette: &impl BandPalette<Segment>,
        regime_palette: &impl BandPalette<Regime>,
    ) -> Self {
        Self {
            segments: colored(&curve.segments, segment_palette),
            regimes: colored(&curve.regimes, regime_palette),
        }
    }
}

fn colored<L: PartialEq + Clone>(labels: &[L], palette: &impl BandPalette<L>) -> Vec<Band<L>> {
    runs(labels)
        .into_iter()
        .map(|run| Band {
            fill: palette.fill(&run.label),
            run,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use equilens_data::EquityCurveDocument;
    use equilens_traits::{Date, PeriodSelection, RebaseMode};

    #[test]
    fn test_default_palettes() {
        assert_eq!(
            SegmentPalette.fill(&Segment::Valid),
            Some(Fill::rgba(255, 193, 7, 0.1))
        );
        assert!(SegmentPalette.fill(&Segment::Test).unwrap().is_transparent());
        assert!(SegmentPalette.fill(&Segment::Unknown("holdout".into())).is_none());
        assert_eq!(
            RegimePalette.fill(&Regime::Bear),
            Some(Fill::rgba(244, 67, 54, 0.25))
        );
        assert!(RegimePalette.fill(&Regime::Unknown(7)).is_none());
    }

    #[test]
    fn test_fill_display() {
        assert_eq!(
            Fill::rgba(76, 175, 80, 0.2).to_string(),
            "rgba(76, 175, 80, 0.2)"
        );
    }

    #[test]
    fn test_bands_for_curve() {
        let dates = (1..=5)
            .map(|d| Date::from_ymd_opt(2024, 2, d).unwrap())
            .collect();
        let doc = EquityCurveDocument::new(
            dates,
            vec![0.0; 5],
            vec![0.0; 5],
            None,
            None,
            vec![
                Segment::Train,
                Segment::Train,
                Segment::Valid,
                Segment::Test,
                Segment::Test,
            ],
            Some(vec![
                Regime::Bull,
                Regime::Bull,
                Regime::Bull,
                Regime::Unknown(9),
                Regime::Bear,
            ]),
        )
        .unwrap();
        let curve = FilteredCurve::build(&doc, PeriodSelection::All, RebaseMode::Compounding).unwrap();
        let bands = Bands::for_curve(&curve, &SegmentPalette, &RegimePalette);

        assert_eq!(bands.segments.len(), 3);
        assert_eq!((bands.segments[0].run.start, bands.segments[0].run.end), (0, 1));
        assert_eq!(bands.regimes.len(), 3);
        assert_eq!((bands.regimes[0].run.start, bands.regimes[0].run.end), (0, 2));
        assert!(bands.regimes[1].fill.is_none());
    }
}
