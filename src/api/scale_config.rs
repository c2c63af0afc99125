use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ScaleError, ScaleResult};

/// Option bag accepted by [`super::KlineCategoryScale`].
///
/// Field names follow the chart option keys hosts already send
/// (`klineType`, `timeZoneOffset`, `minutes`, `dateFormate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KlineScaleConfig {
    pub kline_type: String,
    /// Seconds; non-zero pins timestamps to this offset instead of the host zone.
    #[serde(default)]
    pub time_zone_offset: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(
        default,
        rename = "dateFormate",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_format: Option<String>,
}

impl KlineScaleConfig {
    #[must_use]
    pub fn new(kline_type: impl Into<String>) -> Self {
        Self {
            kline_type: kline_type.into(),
            time_zone_offset: 0,
            minutes: None,
            date_format: None,
        }
    }

    #[must_use]
    pub fn with_time_zone_offset(mut self, offset_seconds: i64) -> Self {
        self.time_zone_offset = offset_seconds;
        self
    }

    #[must_use]
    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.minutes = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn from_json(value: &Value) -> ScaleResult<Self> {
        Self::deserialize(value)
            .map_err(|e| ScaleError::InvalidConfig(format!("failed to read kline config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ScaleResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ScaleError::InvalidConfig(format!("failed to parse kline config: {e}")))
    }

    pub fn to_json_pretty(&self) -> ScaleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScaleError::InvalidConfig(format!("failed to serialize kline config: {e}"))
        })
    }
}
