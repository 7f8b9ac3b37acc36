use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chart::ChartSpec;
use crate::color::ColorScale;
use crate::data::aggregate::{count_by_city, top_n};
use crate::data::{CityCount, CleanedTable};

/// Lowest selectable magnitude; the catalogue has nothing below it.
pub const SLIDER_MIN: f64 = 4.0;
/// Slider resolution, expressed as steps per magnitude unit (0.1).
pub const STEPS_PER_UNIT: f64 = 10.0;
/// How many cities the chart shows.
pub const DEFAULT_TOP_N: usize = 20;

/// Float noise tolerated when deciding that a value sits on the 0.1 grid.
const GRID_TOLERANCE: f64 = 1e-9;

/// Snap `value` onto the slider grid when it is only float noise away from
/// a grid point (egui hands back `41 * 0.1 = 4.1000000000000005`).  Any
/// other value is kept as given.
fn snap_to_step(value: f64) -> f64 {
    let scaled = value * STEPS_PER_UNIT;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < GRID_TOLERANCE {
        nearest / STEPS_PER_UNIT
    } else {
        value
    }
}

/// Round to one decimal on the exact binary value, so 7.85 (stored as
/// 7.8499…) becomes 7.8.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Threshold
// ---------------------------------------------------------------------------

/// Minimum magnitude of interest.  Values within float noise of the slider
/// step are snapped so that a slider value of 4.1 compares equal to a parsed
/// "4.1"; off-grid values such as 4.05 are used as given.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// `None` for NaN or infinite input.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then(|| Self(snap_to_step(value)))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    fn on_grid(self) -> bool {
        snap_to_step(self.0) == round_one_decimal(self.0)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(SLIDER_MIN)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.on_grid() {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

// ---------------------------------------------------------------------------
// SliderRange
// ---------------------------------------------------------------------------

/// Bounds and tick marks of the magnitude slider for a given table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    /// Whole magnitudes from the minimum up to the observed maximum.
    pub marks: Vec<f64>,
}

impl SliderRange {
    pub fn for_table(table: &CleanedTable) -> Self {
        let observed = table.max_magnitude().unwrap_or(SLIDER_MIN);
        let first_mark = SLIDER_MIN as i64;
        let last_mark = observed.floor() as i64;

        Self {
            min: SLIDER_MIN,
            max: round_one_decimal(observed).max(SLIDER_MIN),
            step: 1.0 / STEPS_PER_UNIT,
            default: SLIDER_MIN,
            marks: (first_mark..=last_mark).map(|m| m as f64).collect(),
        }
    }

    /// Where `mark` sits along the slider, from 0 at `min` to 1 at `max`.
    pub fn mark_fraction(&self, mark: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((mark - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Dashboard – the pure (table, threshold) → chart mapping
// ---------------------------------------------------------------------------

/// Everything a renderer needs that never changes after startup.
#[derive(Debug)]
pub struct Dashboard {
    table: Arc<CleanedTable>,
    range: SliderRange,
    top_n: usize,
    scale: ColorScale,
}

impl Dashboard {
    pub fn new(table: Arc<CleanedTable>, top_n: usize) -> Self {
        let range = SliderRange::for_table(&table);
        log::info!(
            "dashboard ready: {} records, slider {:.1}..={:.1}",
            table.len(),
            range.min,
            range.max
        );
        Self {
            table,
            range,
            top_n,
            scale: ColorScale::viridis(),
        }
    }

    pub fn table(&self) -> &CleanedTable {
        &self.table
    }

    pub fn range(&self) -> &SliderRange {
        &self.range
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// The top-N ranked city counts for `threshold`.
    pub fn ranked(&self, threshold: Threshold) -> Vec<CityCount> {
        top_n(count_by_city(&self.table, threshold.value()), self.top_n)
    }

    pub fn chart(&self, threshold: Threshold) -> ChartSpec {
        let counts = self.ranked(threshold);
        ChartSpec::build(&counts, threshold, self.top_n, &self.scale)
    }
}

// ---------------------------------------------------------------------------
// DashboardController – owns the live threshold
// ---------------------------------------------------------------------------

/// One slider in, one chart out.  Keeps nothing but the current threshold
/// and the chart built for it.
#[derive(Debug)]
pub struct DashboardController {
    dashboard: Arc<Dashboard>,
    threshold: Threshold,
    chart: ChartSpec,
}

impl DashboardController {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        let threshold = Threshold::new(dashboard.range().default).unwrap_or_default();
        let chart = dashboard.chart(threshold);
        Self {
            dashboard,
            threshold,
            chart,
        }
    }

    /// Feed a new slider value.  Non-finite values are ignored.
    pub fn on_slider_change(&mut self, value: f64) -> &ChartSpec {
        match Threshold::new(value) {
            Some(threshold) if threshold != self.threshold => {
                self.threshold = threshold;
                self.chart = self.dashboard.chart(threshold);
                log::debug!(
                    "threshold {threshold}: {} cities in chart",
                    self.chart.bars.len()
                );
            }
            Some(_) => {}
            None => log::warn!("ignoring non-finite slider value {value}"),
        }
        &self.chart
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}
