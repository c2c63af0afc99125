use serde::{Deserialize, Serialize};

use crate::core::{BoundaryIndex, BoundaryMark, Granularity, ParsedTimeSpec};

const STRIDE_DAY: usize = 1;
const STRIDE_WEEK: usize = 2;
const STRIDE_MONTH: usize = 11;

/// Up to four hours of data: every half-hour mark.
const MINUTES_DENSE_RANGE: u64 = 240;
/// Up to twelve hours of data: every other mark.
const MINUTES_MEDIUM_RANGE: u64 = 720;
const STRIDE_MINUTES_DENSE: usize = 1;
const STRIDE_MINUTES_MEDIUM: usize = 2;
const STRIDE_MINUTES_SPARSE: usize = 21;

/// Inclusive index window into the scale's value sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub min: usize,
    pub max: usize,
}

impl VisibleWindow {
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Window spanning every value, or `None` for an empty sequence.
    #[must_use]
    pub fn full(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|last| Self::new(0, last))
    }

    #[must_use]
    pub fn fits(self, len: usize) -> bool {
        self.min <= self.max && self.max < len
    }
}

/// Step between emitted boundary marks.
///
/// Minute scales size the stride from the whole dataset, not the window.
#[must_use]
pub fn tick_stride(spec: ParsedTimeSpec, total_len: usize) -> usize {
    match spec.granularity() {
        Granularity::Day => STRIDE_DAY,
        Granularity::Week => STRIDE_WEEK,
        Granularity::Month => STRIDE_MONTH,
        Granularity::Minutes => {
            let bucket = spec.minute_bucket().map_or(1, |bucket| u64::from(bucket.get()));
            minutes_stride(bucket.saturating_mul(total_len as u64))
        }
    }
}

#[must_use]
pub fn minutes_stride(time_range_minutes: u64) -> usize {
    if time_range_minutes <= MINUTES_DENSE_RANGE {
        STRIDE_MINUTES_DENSE
    } else if time_range_minutes <= MINUTES_MEDIUM_RANGE {
        STRIDE_MINUTES_MEDIUM
    } else {
        STRIDE_MINUTES_SPARSE
    }
}

/// One selected axis label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedTick {
    pub index: usize,
    pub mark: BoundaryMark,
}

/// Picks the boundary marks inside `window`, keeping every `stride`-th one.
///
/// Never fails: inverted windows or windows past the end produce nothing, and
/// `window.max` is clamped to the last indexed value.
#[must_use]
pub fn select_ticks(
    boundaries: &BoundaryIndex,
    window: VisibleWindow,
    stride: usize,
) -> Vec<SelectedTick> {
    let Some(last) = boundaries.len().checked_sub(1) else {
        return Vec::new();
    };
    let end = window.max.min(last);
    if window.min > end {
        return Vec::new();
    }

    (window.min..=end)
        .filter_map(|index| {
            boundaries
                .mark(index)
                .map(|mark| SelectedTick { index, mark: *mark })
        })
        .step_by(stride.max(1))
        .collect()
}
