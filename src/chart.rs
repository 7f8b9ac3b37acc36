use serde::{Deserialize, Serialize};

use crate::color::{to_hex, ColorScale};
use crate::dashboard::Threshold;
use crate::data::CityCount;

/// Category labels are tilted so long city names stay readable.
pub const TICK_ANGLE: f32 = -45.0;

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub city: String,
    pub count: usize,
    /// `#rrggbb`, keyed to `count`.
    pub color: String,
}

/// Renderer-independent description of the city bar chart.  The desktop UI
/// and the web page both draw from this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub tick_angle: f32,
    pub threshold: f64,
    pub bars: Vec<Bar>,
}

impl ChartSpec {
    /// Build the chart for already-ranked (and already-truncated) counts.
    pub fn build(
        counts: &[CityCount],
        threshold: Threshold,
        top_n: usize,
        scale: &ColorScale,
    ) -> Self {
        let min = counts.iter().map(|c| c.count).min().unwrap_or(0) as f64;
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;

        let bars = counts
            .iter()
            .map(|c| Bar {
                city: c.city.clone(),
                count: c.count,
                color: to_hex(scale.color_for(c.count as f64, min, max)),
            })
            .collect();

        Self {
            title: format!("{threshold}+ magnitude earthquakes (top {top_n} cities)"),
            x_label: "City".to_string(),
            y_label: "Earthquake count".to_string(),
            tick_angle: TICK_ANGLE,
            threshold: threshold.value(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest bar, used to size the value axis.
    pub fn max_count(&self) -> usize {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: f64) -> Threshold {
        Threshold::new(value).unwrap()
    }

    fn count(city: &str, count: usize) -> CityCount {
        CityCount {
            city: city.into(),
            count,
        }
    }

    #[test]
    fn title_shows_the_active_threshold() {
        let spec = ChartSpec::build(&[], at(4.0), 20, &ColorScale::viridis());
        assert_eq!(spec.title, "4.0+ magnitude earthquakes (top 20 cities)");
        assert_eq!(spec.tick_angle, -45.0);

        let spec = ChartSpec::build(&[], at(4.05), 20, &ColorScale::viridis());
        assert_eq!(spec.title, "4.05+ magnitude earthquakes (top 20 cities)");
        assert_eq!(spec.threshold, 4.05);
    }

    #[test]
    fn empty_counts_make_an_empty_chart() {
        let spec = ChartSpec::build(&[], at(9.9), 20, &ColorScale::viridis());
        assert!(spec.is_empty());
        assert_eq!(spec.max_count(), 0);
    }

    #[test]
    fn bars_keep_rank_and_colour_follows_count() {
        let counts = [count("IZMIR", 12), count("VAN", 7), count("MUGLA", 2)];
        let spec = ChartSpec::build(&counts, at(4.5), 20, &ColorScale::viridis());

        let cities: Vec<&str> = spec.bars.iter().map(|b| b.city.as_str()).collect();
        assert_eq!(cities, vec!["IZMIR", "VAN", "MUGLA"]);
        assert_eq!(spec.bars[0].color, "#fde725");
        assert_eq!(spec.bars[2].color, "#440154");
        assert_eq!(spec.max_count(), 12);
    }
}
