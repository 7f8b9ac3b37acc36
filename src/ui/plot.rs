use std::ops::RangeInclusive;

use deprem_dash::color::from_hex;
use eframe::egui::{Color32, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, GridMark, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// City bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
pub fn city_bar_chart(ui: &mut Ui, state: &AppState) {
    let chart = state.chart();
    ui.heading(&chart.title);

    if chart.is_empty() {
        ui.label("No earthquakes at or above this magnitude.");
    }

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let fill = from_hex(&bar.color)
                .map(|c| Color32::from_rgb(c.red, c.green, c.blue))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, bar.count as f64)
                .name(&bar.city)
                .fill(fill)
                .width(0.8)
        })
        .collect();

    // Category axis: bar index → city name.
    let cities: Vec<String> = chart.bars.iter().map(|b| b.city.clone()).collect();
    let city_axis = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
            return String::new();
        }
        cities.get(idx as usize).cloned().unwrap_or_default()
    };

    Plot::new("city_bar_chart")
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .x_axis_formatter(city_axis)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .include_x(-0.5)
        .include_x(chart.bars.len().max(1) as f64 - 0.5)
        .include_y(0.0)
        .include_y(chart.max_count().max(1) as f64 * 1.05)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&chart.y_label));
        });
}
