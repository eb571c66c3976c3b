#![doc(issue_tracker_base_url = "https://github.com/factordynamics/equilens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the equilens equity-curve engine.
//!
//! This crate provides the pieces shared by every other equilens crate: the
//! error type, the categorical labels carried by an equity-curve document,
//! the period and re-basing enums, and small statistics helpers.

/// The version of the equilens-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{EquilensError, Result};
pub use types::{Date, PeriodSelection, RebaseMode, Regime, Segment};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
