//! kline-scale: axis tick selection for candlestick category scales.
//!
//! Values are scanned once for calendar boundaries (month starts, day starts,
//! half-hour marks); each window change only sub-samples the cached marks.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{KlineCategoryScale, KlineScaleConfig};
pub use error::{ScaleError, ScaleResult};
