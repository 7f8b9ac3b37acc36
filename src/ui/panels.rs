use deprem_dash::dashboard::SliderRange;
use eframe::egui::{self, Align2, FontId, RichText, Sense, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Title, cleaning summary and the table toggle.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Earthquake city statistics");
        ui.separator();
        ui.label(state.report().to_string());
        ui.separator();
        if ui
            .selectable_label(state.show_table, "Ranking table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }
    });
}

// ---------------------------------------------------------------------------
// Magnitude slider
// ---------------------------------------------------------------------------

/// The single control: minimum magnitude, with whole-number marks below.
pub fn magnitude_slider(ui: &mut Ui, state: &mut AppState) {
    let range = state.range().clone();

    ui.add_space(4.0);
    ui.label(RichText::new("Minimum magnitude").strong());

    let slider = egui::Slider::new(&mut state.slider_value, range.min..=range.max)
        .step_by(range.step)
        .fixed_decimals(1)
        .show_value(true);
    let width = ui.available_width() * 0.8;
    ui.spacing_mut().slider_width = width;
    let response = ui.add(slider);
    if response.changed() {
        state.apply_slider();
    }

    slider_marks(ui, &range, response.rect.left(), width);
    ui.add_space(4.0);
}

/// Paint each mark under the value it stands for on the slider rail.
fn slider_marks(ui: &mut Ui, range: &SliderRange, left: f32, width: f32) {
    // The handle travels between rail ends inset by its radius.
    let thickness = ui
        .text_style_height(&TextStyle::Body)
        .max(ui.spacing().interact_size.y);
    let inset = thickness / 2.5;
    let travel = (width - 2.0 * inset).max(0.0);

    let (row, _) = ui.allocate_exact_size(egui::vec2(width, 14.0), Sense::hover());
    let color = ui.visuals().weak_text_color();
    let painter = ui.painter();
    for &mark in &range.marks {
        let x = left + inset + range.mark_fraction(mark) as f32 * travel;
        painter.text(
            egui::pos2(x, row.center().y),
            Align2::CENTER_CENTER,
            format!("{mark:.0}"),
            FontId::proportional(11.0),
            color,
        );
    }
}

// ---------------------------------------------------------------------------
// Ranked table (right side panel)
// ---------------------------------------------------------------------------

pub fn ranking_table(ui: &mut Ui, state: &AppState) {
    let chart = state.chart();

    ui.strong(state.table_heading());
    ui.separator();

    if chart.is_empty() {
        ui.label("No earthquakes at this threshold.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::remainder())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong(&chart.x_label);
            });
            header.col(|ui| {
                ui.strong("Count");
            });
        })
        .body(|mut body| {
            for (rank, bar) in chart.bars.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label((rank + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(&bar.city);
                    });
                    row.col(|ui| {
                        ui.label(bar.count.to_string());
                    });
                });
            }
        });
}
