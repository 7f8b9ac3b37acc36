use std::sync::Arc;

use deprem_dash::chart::ChartSpec;
use deprem_dash::dashboard::{Dashboard, DashboardController, SliderRange};
use deprem_dash::data::model::CleaningReport;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Owns the live threshold and the chart built for it.
    pub controller: DashboardController,

    /// Value bound to the slider widget.
    pub slider_value: f64,

    /// Whether the ranked table is shown next to the chart.
    pub show_table: bool,
}

impl AppState {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        let controller = DashboardController::new(dashboard);
        let slider_value = controller.threshold().value();
        Self {
            controller,
            slider_value,
            show_table: true,
        }
    }

    /// Push the slider value through the controller.
    pub fn apply_slider(&mut self) {
        self.controller.on_slider_change(self.slider_value);
    }

    pub fn chart(&self) -> &ChartSpec {
        self.controller.chart()
    }

    pub fn range(&self) -> &SliderRange {
        self.controller.dashboard().range()
    }

    pub fn report(&self) -> CleaningReport {
        self.controller.dashboard().table().report()
    }

    /// Heading of the ranked table, e.g. `Top 20 cities, magnitude 4.5+`.
    pub fn table_heading(&self) -> String {
        format!(
            "Top {} cities, magnitude {}+",
            self.controller.dashboard().top_n(),
            self.controller.threshold()
        )
    }
}

#[cfg(test)]
mod tests {
    use deprem_dash::data::clean::clean;
    use deprem_dash::data::model::{RawTable, RawValue};

    use super::*;

    fn dashboard() -> Arc<Dashboard> {
        let text = |s: &str| RawValue::Text(s.to_string());
        let raw = RawTable {
            headers: ["Date", "Latitude", "Longitude", "Depth", "Magnitude", "Location"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![
                vec![text("d"), text("1"), text("2"), text("3"), text("4.3"), text("A (IZMIR)")],
                vec![text("d"), text("1"), text("2"), text("3"), text("5.6"), text("B (VAN)")],
                vec![text("d"), text("1"), text("2"), text("3"), text("x"), text("B (VAN)")],
            ],
        };
        let table = clean(raw).unwrap();
        Arc::new(Dashboard::new(Arc::new(table), 20))
    }

    #[test]
    fn starts_at_the_slider_default() {
        let state = AppState::new(dashboard());
        assert_eq!(state.slider_value, 4.0);
        assert_eq!(state.chart().bars.len(), 2);
        assert_eq!(state.range().max, 5.6);
        assert_eq!(state.report().dropped_missing, 1);
    }

    #[test]
    fn moving_the_slider_rebuilds_the_chart() {
        let mut state = AppState::new(dashboard());
        state.slider_value = 5.0;
        state.apply_slider();
        assert_eq!(state.chart().bars.len(), 1);
        assert_eq!(state.chart().bars[0].city, "VAN");
    }

    #[test]
    fn table_heading_names_the_limit_and_threshold() {
        let mut state = AppState::new(dashboard());
        assert_eq!(state.table_heading(), "Top 20 cities, magnitude 4.0+");

        state.slider_value = 45.0 * 0.1;
        state.apply_slider();
        assert_eq!(state.table_heading(), "Top 20 cities, magnitude 4.5+");
    }
}
