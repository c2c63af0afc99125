use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "parallel-normalize")]
use rayon::prelude::*;

use crate::core::{CalendarMoment, Granularity, ParsedTimeSpec, TimeNormalizer};
use crate::error::ScaleResult;

/// Why a point was flagged as a preferred label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// First point after a month change (day/week/month scales).
    MonthStart,
    /// First point after a day change (minute scales).
    DayStart,
    /// Point landing on `:00` or `:30` (minute scales).
    HalfHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundaryMark {
    pub kind: BoundaryKind,
    pub moment: CalendarMoment,
}

/// Boundary marks keyed by position in the scale's value sequence.
///
/// Built once per value sequence; membership lookups are a vector index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundaryIndex {
    marks: Vec<Option<BoundaryMark>>,
    mark_count: usize,
}

impl BoundaryIndex {
    #[must_use]
    pub fn empty(len: usize) -> Self {
        Self {
            marks: vec![None; len],
            mark_count: 0,
        }
    }

    /// Number of values the index was built for.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.mark_count
    }

    #[must_use]
    pub fn is_boundary(&self, index: usize) -> bool {
        self.mark(index).is_some()
    }

    #[must_use]
    pub fn mark(&self, index: usize) -> Option<&BoundaryMark> {
        self.marks.get(index).and_then(Option::as_ref)
    }

    /// Iterates marked positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BoundaryMark)> + '_ {
        self.marks
            .iter()
            .enumerate()
            .filter_map(|(index, mark)| mark.as_ref().map(|mark| (index, mark)))
    }

    fn insert(&mut self, index: usize, kind: BoundaryKind, moment: CalendarMoment) {
        let slot = &mut self.marks[index];
        if slot.is_none() {
            self.mark_count += 1;
        }
        *slot = Some(BoundaryMark { kind, moment });
    }
}

/// Normalizes every value once and scans adjacent pairs for boundaries.
///
/// Minute scales mark the first point of a new day, otherwise points on a
/// half-hour; calendar scales mark the first point of a new month. After a
/// day/month change is marked, the marked point is not compared again as the
/// left side of a pair.
pub fn detect_boundaries(
    values: &[Value],
    spec: ParsedTimeSpec,
    normalizer: &TimeNormalizer,
) -> ScaleResult<BoundaryIndex> {
    let moments = normalize_all(values, normalizer)?;
    Ok(scan_moments(&moments, spec.granularity()))
}

pub(crate) fn scan_moments(
    moments: &[CalendarMoment],
    granularity: Granularity,
) -> BoundaryIndex {
    let mut index = BoundaryIndex::empty(moments.len());

    let mut step = 0;
    while step + 1 < moments.len() {
        let cur = moments[step];
        let next = moments[step + 1];

        if granularity.is_intraday() {
            if cur.day != next.day {
                index.insert(step + 1, BoundaryKind::DayStart, next);
                step += 2;
                continue;
            }
            if cur.is_half_hour_mark() {
                index.insert(step, BoundaryKind::HalfHour, cur);
            }
        } else if cur.month != next.month {
            index.insert(step + 1, BoundaryKind::MonthStart, next);
            step += 2;
            continue;
        }

        step += 1;
    }

    index
}

fn normalize_all(
    values: &[Value],
    normalizer: &TimeNormalizer,
) -> ScaleResult<Vec<CalendarMoment>> {
    #[cfg(feature = "parallel-normalize")]
    {
        let normalized: Vec<ScaleResult<CalendarMoment>> = values
            .par_iter()
            .enumerate()
            .map(|(index, value)| normalizer.normalize(index, value))
            .collect();
        normalized.into_iter().collect()
    }

    #[cfg(not(feature = "parallel-normalize"))]
    {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| normalizer.normalize(index, value))
            .collect()
    }
}
