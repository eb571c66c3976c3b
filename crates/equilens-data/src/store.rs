//! Session-lifetime holder of the loaded document.

use std::{fs, io::Read, path::Path};

use equilens_traits::{EquilensError, Result};
use tracing::{debug, info};

use crate::document::{EquityCurveDocument, RawDashboard, SummaryMetrics};

/// Holds the one equity-curve document of a session.
///
/// The document is validated on load and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    document: EquityCurveDocument,
    initial_metrics: Option<SummaryMetrics>,
}

impl SeriesStore {
    /// Wrap an already validated document.
    #[must_use]
    pub const fn new(document: EquityCurveDocument, initial_metrics: Option<SummaryMetrics>) -> Self {
        Self {
            document,
            initial_metrics,
        }
    }

    /// Parse and validate a dashboard document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid, the `equity_curve` block or a
    /// required series is missing, or the series fail validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDashboard = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Parse and validate a dashboard document from a reader.
    ///
    /// # Errors
    ///
    /// Same as [`from_json_str`](Self::from_json_str), plus read failures.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawDashboard = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    /// Load a dashboard document from a file.
    ///
    /// # Errors
    ///
    /// Same as [`from_json_str`](Self::from_json_str), plus I/O failures.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading dashboard document");
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validate an already parsed dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`EquilensError::MissingSeries`] without an `equity_curve`
    /// block, or any validation error from [`EquityCurveDocument`].
    pub fn from_raw(raw: RawDashboard) -> Result<Self> {
        let curve = raw
            .equity_curve
            .ok_or_else(|| EquilensError::MissingSeries("equity_curve".to_string()))?;
        let document = EquityCurveDocument::try_from(curve)?;

        info!(
            points = document.len(),
            has_ma20 = document.bench_ma20().is_some(),
            has_ma60 = document.bench_ma60().is_some(),
            has_regimes = document.regimes().is_some(),
            "loaded equity curve"
        );

        let initial_metrics = raw.metrics.filter(|m| !m.is_empty());
        Ok(Self::new(document, initial_metrics))
    }

    /// The loaded document.
    #[must_use]
    pub const fn document(&self) -> &EquityCurveDocument {
        &self.document
    }

    /// Metrics shipped with the document, if any were present.
    #[must_use]
    pub const fn initial_metrics(&self) -> Option<&SummaryMetrics> {
        self.initial_metrics.as_ref()
    }

    /// Number of points in the loaded curve.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.document.len()
    }

    /// Whether the loaded curve is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.document.is_empty()
    }
}
