use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Broken-down wall-clock time of one data point.
///
/// `month` is 1-based and `day` is the day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarMoment {
    #[must_use]
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    #[must_use]
    pub fn from_naive(time: NaiveDateTime) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
            day: time.day(),
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
        }
    }

    /// Minutes `:00` and `:30` are the intraday label anchors.
    #[must_use]
    pub fn is_half_hour_mark(self) -> bool {
        self.minute % 30 == 0
    }
}

impl From<NaiveDateTime> for CalendarMoment {
    fn from(time: NaiveDateTime) -> Self {
        Self::from_naive(time)
    }
}
