//! Run-length segmentation of categorical labels.
//!
//! Background bands (Train/Valid/Test segments or Bull/Bear/Choppy regimes)
//! are painted per contiguous block of identical labels. The scan is
//! sequential: a run boundary depends on the previous label.

use serde::Serialize;

/// A maximal block of identical labels, `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run<L> {
    /// First index of the run.
    pub start: usize,
    /// Last index of the run (inclusive).
    pub end: usize,
    /// Label shared by every index in the run.
    pub label: L,
}

impl<L> Run<L> {
    /// Number of indices covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a run covers at least one index.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether `index` falls inside the run.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// Compress `labels` into maximal runs, in order.
///
/// The runs partition `0..labels.len()`. Empty input gives no runs.
///
/// # Examples
///
/// ```
/// use equilens_eval::runs;
///
/// let bands = runs(&["Train", "Train", "Valid", "Test", "Test"]);
/// assert_eq!(bands.len(), 3);
/// assert_eq!((bands[1].start, bands[1].end, bands[1].label), (2, 2, "Valid"));
/// ```
#[must_use]
pub fn runs<L: PartialEq + Clone>(labels: &[L]) -> Vec<Run<L>> {
    let Some(first) = labels.first() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut start = 0;
    let mut current = first;

    for (i, label) in labels.iter().enumerate().skip(1) {
        if label != current {
            out.push(Run {
                start,
                end: i - 1,
                label: current.clone(),
            });
            start = i;
            current = label;
        }
    }
    out.push(Run {
        start,
        end: labels.len() - 1,
        label: current.clone(),
    });

    out
}

/// Expand runs back into one label per index.
#[must_use]
pub fn expand<L: Clone>(runs: &[Run<L>]) -> Vec<L> {
    runs.iter()
        .flat_map(|run| std::iter::repeat_n(run.label.clone(), run.len()))
        .collect()
}
