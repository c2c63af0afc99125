use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::{
    BoundaryIndex, BoundaryMark, ParsedTimeSpec, TimeNormalizer, VisibleWindow, detect_boundaries,
    select_ticks, tick_stride,
};
use crate::error::{ScaleError, ScaleResult};

use super::KlineScaleConfig;
use super::validation::{ResolvedScaleConfig, resolve_kline_scale_config};

/// Scale variants known to the charting pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleType {
    Category,
    Kline,
}

/// Axis label chosen for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick<'a> {
    /// Position of the value in the scale's sequence.
    pub index: usize,
    pub value: &'a Value,
    pub mark: BoundaryMark,
}

/// Category scale over kline (candlestick) columns.
///
/// Boundary detection runs once per value sequence; tick computation only
/// walks the visible window.
#[derive(Debug, Clone)]
pub struct KlineCategoryScale {
    config: KlineScaleConfig,
    values: Vec<Value>,
    time_spec: ParsedTimeSpec,
    normalizer: TimeNormalizer,
    boundaries: BoundaryIndex,
    window: Option<VisibleWindow>,
}

impl KlineCategoryScale {
    /// Parses the config, normalizes every value and builds the boundary index.
    ///
    /// The visible window starts out covering the whole sequence.
    pub fn new(values: Vec<Value>, config: KlineScaleConfig) -> ScaleResult<Self> {
        let ResolvedScaleConfig {
            time_spec,
            normalizer,
        } = resolve_kline_scale_config(&config)?;
        let boundaries = detect_boundaries(&values, time_spec, &normalizer)?;
        debug!(
            kline_type = %time_spec,
            value_count = values.len(),
            mark_count = boundaries.mark_count(),
            "built kline scale"
        );

        let window = VisibleWindow::full(values.len());
        Ok(Self {
            config,
            values,
            time_spec,
            normalizer,
            boundaries,
            window,
        })
    }

    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        ScaleType::Kline
    }

    /// Reapplies an option bag, re-parsing the type and rescanning the values.
    ///
    /// On error the scale keeps its previous configuration and marks.
    pub fn change(&mut self, config: KlineScaleConfig) -> ScaleResult<()> {
        let resolved = resolve_kline_scale_config(&config).and_then(|resolved| {
            detect_boundaries(&self.values, resolved.time_spec, &resolved.normalizer)
                .map(|boundaries| (resolved, boundaries))
        });
        let (resolved, boundaries) = match resolved {
            Ok(rebuilt) => rebuilt,
            Err(err) => {
                warn!(
                    error = %err,
                    kline_type = %config.kline_type,
                    "rejecting kline scale reconfiguration"
                );
                return Err(err);
            }
        };

        debug!(
            kline_type = %resolved.time_spec,
            mark_count = boundaries.mark_count(),
            "reconfigured kline scale"
        );
        self.config = config;
        self.time_spec = resolved.time_spec;
        self.normalizer = resolved.normalizer;
        self.boundaries = boundaries;
        Ok(())
    }

    /// Replaces the value sequence and rebuilds the boundary index from scratch.
    ///
    /// The visible window is reset to the full new sequence.
    pub fn replace_values(&mut self, values: Vec<Value>) -> ScaleResult<()> {
        let boundaries = detect_boundaries(&values, self.time_spec, &self.normalizer)?;
        debug!(
            original_count = self.values.len(),
            value_count = values.len(),
            mark_count = boundaries.mark_count(),
            "replaced kline scale values"
        );
        self.window = VisibleWindow::full(values.len());
        self.values = values;
        self.boundaries = boundaries;
        Ok(())
    }

    /// Sets the inclusive index window; requires `min <= max < len`.
    pub fn set_visible_window(&mut self, min: usize, max: usize) -> ScaleResult<()> {
        let window = VisibleWindow::new(min, max);
        if !window.fits(self.values.len()) {
            return Err(ScaleError::InvalidWindow {
                min,
                max,
                len: self.values.len(),
            });
        }
        self.window = Some(window);
        Ok(())
    }

    /// Ticks for the current visible window.
    #[must_use]
    pub fn ticks(&self) -> Vec<Tick<'_>> {
        match self.window {
            Some(window) => self.ticks_for_window(window),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn tick_values(&self) -> Vec<&Value> {
        self.ticks().into_iter().map(|tick| tick.value).collect()
    }

    /// Ticks for an arbitrary window without changing the stored one.
    #[must_use]
    pub fn ticks_for_window(&self, window: VisibleWindow) -> Vec<Tick<'_>> {
        let stride = tick_stride(self.time_spec, self.values.len());
        let ticks: Vec<Tick<'_>> = select_ticks(&self.boundaries, window, stride)
            .into_iter()
            .filter_map(|selected| {
                self.values.get(selected.index).map(|value| Tick {
                    index: selected.index,
                    value,
                    mark: selected.mark,
                })
            })
            .collect();
        trace!(
            min = window.min,
            max = window.max,
            stride,
            tick_count = ticks.len(),
            "computed kline ticks"
        );
        ticks
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &KlineScaleConfig {
        &self.config
    }

    #[must_use]
    pub fn time_spec(&self) -> ParsedTimeSpec {
        self.time_spec
    }

    #[must_use]
    pub fn boundary_index(&self) -> &BoundaryIndex {
        &self.boundaries
    }

    #[must_use]
    pub fn visible_window(&self) -> Option<VisibleWindow> {
        self.window
    }
}
