//! Common types used throughout equilens.
//!
//! Categorical labels carried by an equity-curve document, the period keys a
//! user can select, and the re-basing convention of a deployment.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::EquilensError;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// Dataset partition a point belongs to.
///
/// Labels outside the known set are kept as [`Segment::Unknown`] so that a
/// document with an unexpected label still loads; such points are never
/// selected by a period other than [`PeriodSelection::All`] and render with no
/// background fill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Segment {
    /// In-sample training data.
    Train,
    /// Validation data.
    Valid,
    /// Out-of-sample test data.
    Test,
    /// Any other label found in the document.
    Unknown(String),
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Train" => Self::Train,
            "Valid" => Self::Valid,
            "Test" => Self::Test,
            _ => Self::Unknown(s),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Segment> for String {
    fn from(segment: Segment) -> Self {
        segment.to_string()
    }
}

/// Market regime of a point, encoded as `-1`, `0` or `1` in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Regime {
    /// Downtrend (`-1`).
    Bear,
    /// Sideways market (`0`). Also used when a document carries no regimes.
    #[default]
    Choppy,
    /// Uptrend (`1`).
    Bull,
    /// Any other code found in the document.
    #[display("Regime({_0})")]
    Unknown(i64),
}

impl Regime {
    /// The integer code used in documents.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Bear => -1,
            Self::Choppy => 0,
            Self::Bull => 1,
            Self::Unknown(code) => *code,
        }
    }
}

impl From<i64> for Regime {
    fn from(code: i64) -> Self {
        match code {
            -1 => Self::Bear,
            0 => Self::Choppy,
            1 => Self::Bull,
            other => Self::Unknown(other),
        }
    }
}

impl From<Regime> for i64 {
    fn from(regime: Regime) -> Self {
        regime.code()
    }
}

/// Period a user can select on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodSelection {
    /// Every point in the document.
    #[display("all")]
    All,
    /// Only points labelled [`Segment::Test`].
    #[default]
    #[display("test")]
    Test,
    /// Points labelled [`Segment::Valid`] or [`Segment::Test`].
    #[display("valid_test")]
    ValidTest,
}

impl PeriodSelection {
    /// All selectable periods, in button order.
    pub const ALL: [Self; 3] = [Self::All, Self::Test, Self::ValidTest];

    /// Whether a point with the given segment label belongs to this period.
    #[must_use]
    pub const fn contains(&self, segment: &Segment) -> bool {
        match self {
            Self::All => true,
            Self::Test => matches!(segment, Segment::Test),
            Self::ValidTest => matches!(segment, Segment::Valid | Segment::Test),
        }
    }
}

impl FromStr for PeriodSelection {
    type Err = EquilensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "test" => Ok(Self::Test),
            "valid_test" | "valid-test" | "valid" => Ok(Self::ValidTest),
            other => Err(EquilensError::InvalidData(format!(
                "unknown period `{other}` (expected all, test or valid_test)"
            ))),
        }
    }
}

/// Convention of the cumulative-return series of a deployment.
///
/// Chosen once at configuration time and passed explicitly to every
/// re-basing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebaseMode {
    /// Values are growth factor minus one; re-basing divides growth factors.
    #[default]
    #[display("compounding")]
    Compounding,
    /// Values are running sums of period returns; re-basing subtracts.
    #[display("additive")]
    Additive,
}

impl FromStr for RebaseMode {
    type Err = EquilensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compounding" | "geometric" => Ok(Self::Compounding),
            "additive" | "arithmetic" => Ok(Self::Additive),
            other => Err(EquilensError::InvalidData(format!(
                "unknown rebase mode `{other}` (expected compounding or additive)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_from_label() {
        assert_eq!(Segment::from("Train"), Segment::Train);
        assert_eq!(Segment::from("Valid"), Segment::Valid);
        assert_eq!(Segment::from("Test"), Segment::Test);
        assert_eq!(
            Segment::from("Holdout"),
            Segment::Unknown("Holdout".to_string())
        );
    }

    #[test]
    fn test_segment_serde() {
        let segments: Vec<Segment> = serde_json::from_str(r#"["Train","Test","Oos"]"#).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Train,
                Segment::Test,
                Segment::Unknown("Oos".to_string())
            ]
        );
        let back = serde_json::to_string(&segments).unwrap();
        assert_eq!(back, r#"["Train","Test","Oos"]"#);
    }

    #[test]
    fn test_regime_codes() {
        let regimes: Vec<Regime> = serde_json::from_str("[-1, 0, 1, 7]").unwrap();
        assert_eq!(
            regimes,
            vec![Regime::Bear, Regime::Choppy, Regime::Bull, Regime::Unknown(7)]
        );
        assert_eq!(Regime::default(), Regime::Choppy);
        assert_eq!(Regime::Unknown(7).code(), 7);
        assert_eq!(Regime::Bull.to_string(), "Bull");
    }

    #[test]
    fn test_period_contains() {
        assert!(PeriodSelection::All.contains(&Segment::Train));
        assert!(PeriodSelection::All.contains(&Segment::Unknown("x".to_string())));
        assert!(PeriodSelection::Test.contains(&Segment::Test));
        assert!(!PeriodSelection::Test.contains(&Segment::Valid));
        assert!(PeriodSelection::ValidTest.contains(&Segment::Valid));
        assert!(!PeriodSelection::ValidTest.contains(&Segment::Train));
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("all".parse::<PeriodSelection>().unwrap(), PeriodSelection::All);
        assert_eq!(
            "valid-test".parse::<PeriodSelection>().unwrap(),
            PeriodSelection::ValidTest
        );
        assert!("train".parse::<PeriodSelection>().is_err());
        assert_eq!(PeriodSelection::ValidTest.to_string(), "valid_test");
    }

    #[test]
    fn test_rebase_mode_parse() {
        assert_eq!(
            "Additive".parse::<RebaseMode>().unwrap(),
            RebaseMode::Additive
        );
        assert_eq!(RebaseMode::default(), RebaseMode::Compounding);
        let mode: RebaseMode = serde_json::from_str(r#""additive""#).unwrap();
        assert_eq!(mode, RebaseMode::Additive);
    }
}
