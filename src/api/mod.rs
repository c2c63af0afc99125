mod kline_scale;
mod scale_config;
mod validation;

pub use kline_scale::{KlineCategoryScale, ScaleType, Tick};
pub use scale_config::KlineScaleConfig;
