use crate::core::{Granularity, ParsedTimeSpec, TextDateStrategy, TimeNormalizer, ZoneStrategy};
use crate::error::{ScaleError, ScaleResult};

use super::KlineScaleConfig;

const MAX_TIME_ZONE_OFFSET_SECONDS: i64 = 14 * 60 * 60;

/// Everything a scale derives from its option bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ResolvedScaleConfig {
    pub(super) time_spec: ParsedTimeSpec,
    pub(super) normalizer: TimeNormalizer,
}

pub(super) fn resolve_kline_scale_config(
    config: &KlineScaleConfig,
) -> ScaleResult<ResolvedScaleConfig> {
    let time_spec = ParsedTimeSpec::parse(&config.kline_type)?;
    validate_minutes_option(time_spec, config.minutes)?;

    if !(-MAX_TIME_ZONE_OFFSET_SECONDS..=MAX_TIME_ZONE_OFFSET_SECONDS)
        .contains(&config.time_zone_offset)
    {
        return Err(ScaleError::InvalidConfig(format!(
            "timeZoneOffset must be between -{MAX_TIME_ZONE_OFFSET_SECONDS} and \
             {MAX_TIME_ZONE_OFFSET_SECONDS} seconds, got {}",
            config.time_zone_offset
        )));
    }

    let normalizer = TimeNormalizer::new(
        ZoneStrategy::from_offset_seconds(config.time_zone_offset),
        TextDateStrategy::from_optional_format(config.date_format.as_deref()),
    );

    Ok(ResolvedScaleConfig {
        time_spec,
        normalizer,
    })
}

/// The suffix in `klineType` is authoritative; a separate `minutes` option
/// may only repeat it. Zero means the host left the option unset.
fn validate_minutes_option(time_spec: ParsedTimeSpec, minutes: Option<u32>) -> ScaleResult<()> {
    let Some(configured) = minutes.filter(|minutes| *minutes != 0) else {
        return Ok(());
    };

    match (time_spec.granularity(), time_spec.minute_bucket()) {
        (Granularity::Minutes, Some(parsed)) if parsed.get() == configured => Ok(()),
        (Granularity::Minutes, Some(parsed)) => Err(ScaleError::MinutesMismatch {
            configured,
            parsed: parsed.get(),
        }),
        (granularity, _) => Err(ScaleError::InvalidConfig(format!(
            "minutes option is only valid for minute scales, got `{}`",
            granularity.as_str()
        ))),
    }
}
