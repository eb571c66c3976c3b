//! Equity-curve documents for equilens.
//!
//! This crate defines the on-disk dashboard document, validates it into an
//! immutable [`EquityCurveDocument`], and holds it for a session in a
//! [`SeriesStore`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use equilens_data::SeriesStore;
//!
//! let store = SeriesStore::from_path("dashboard/data.json")?;
//! println!("{} points", store.len());
//! # Ok::<(), equilens_traits::EquilensError>(())
//! ```
//!
//! Malformed documents (missing required series, length mismatches,
//! decreasing dates) are rejected as a whole; nothing is partially loaded.

mod document;
mod store;

pub use document::{
    DashboardData, EquityCurveDocument, RawDashboard, RawEquityCurve, SummaryMetrics,
};
pub use store::SeriesStore;
