pub mod boundary;
pub mod calendar;
pub mod tick_selector;
pub mod time_normalizer;
pub mod type_spec;

pub use boundary::{BoundaryIndex, BoundaryKind, BoundaryMark, detect_boundaries};
pub use calendar::CalendarMoment;
pub use tick_selector::{SelectedTick, VisibleWindow, minutes_stride, select_ticks, tick_stride};
pub use time_normalizer::{TextDateStrategy, TimeNormalizer, ZoneStrategy};
pub use type_spec::{Granularity, ParsedTimeSpec};
