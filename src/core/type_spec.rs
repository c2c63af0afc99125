use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScaleError, ScaleResult};

const KLINE_TYPE_SEPARATOR: char = '-';

/// Time unit a kline scale groups its columns by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Minutes,
}

impl Granularity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Minutes => "minutes",
        }
    }

    #[must_use]
    pub fn is_intraday(self) -> bool {
        matches!(self, Self::Minutes)
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "minutes" => Some(Self::Minutes),
            _ => None,
        }
    }
}

/// Parsed form of a `kline-<word>[-<minutes>]` identifier.
///
/// `minute_bucket` is present exactly when the granularity is
/// [`Granularity::Minutes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ParsedTimeSpec {
    granularity: Granularity,
    minute_bucket: Option<NonZeroU32>,
}

impl ParsedTimeSpec {
    #[must_use]
    pub fn day() -> Self {
        Self::calendar(Granularity::Day)
    }

    #[must_use]
    pub fn week() -> Self {
        Self::calendar(Granularity::Week)
    }

    #[must_use]
    pub fn month() -> Self {
        Self::calendar(Granularity::Month)
    }

    #[must_use]
    pub fn minutes(bucket: NonZeroU32) -> Self {
        Self {
            granularity: Granularity::Minutes,
            minute_bucket: Some(bucket),
        }
    }

    fn calendar(granularity: Granularity) -> Self {
        Self {
            granularity,
            minute_bucket: None,
        }
    }

    /// Parses a kline type identifier such as `kline-day` or `kline-minutes-5`.
    ///
    /// The first segment is not inspected; only the granularity word and the
    /// optional minutes suffix carry meaning.
    pub fn parse(spec: &str) -> ScaleResult<Self> {
        let segments: Vec<&str> = spec.split(KLINE_TYPE_SEPARATOR).collect();
        if segments.len() < 2 {
            return Err(ScaleError::MalformedSpec {
                spec: spec.to_owned(),
                reason: "expected `kline-<granularity>[-<minutes>]`".to_owned(),
            });
        }

        let word = segments[1];
        let granularity =
            Granularity::from_word(word).ok_or_else(|| ScaleError::MalformedSpec {
                spec: spec.to_owned(),
                reason: format!("unknown granularity `{word}`"),
            })?;

        if granularity != Granularity::Minutes {
            return Ok(Self::calendar(granularity));
        }

        let Some(suffix) = segments.get(2) else {
            return Err(ScaleError::InvalidMinutesBucket {
                spec: spec.to_owned(),
                reason: "missing minutes suffix".to_owned(),
            });
        };
        let bucket = suffix
            .parse::<NonZeroU32>()
            .map_err(|err| ScaleError::InvalidMinutesBucket {
                spec: spec.to_owned(),
                reason: format!("`{suffix}` is not a positive integer ({err})"),
            })?;

        Ok(Self::minutes(bucket))
    }

    #[must_use]
    pub fn granularity(self) -> Granularity {
        self.granularity
    }

    #[must_use]
    pub fn minute_bucket(self) -> Option<NonZeroU32> {
        self.minute_bucket
    }
}

impl FromStr for ParsedTimeSpec {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ParsedTimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minute_bucket {
            Some(bucket) => write!(f, "kline-{}-{bucket}", self.granularity.as_str()),
            None => write!(f, "kline-{}", self.granularity.as_str()),
        }
    }
}
