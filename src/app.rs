use std::sync::Arc;

use deprem_dash::dashboard::Dashboard;
use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DepremApp {
    pub state: AppState,
}

impl DepremApp {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        Self {
            state: AppState::new(dashboard),
        }
    }
}

impl eframe::App for DepremApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + dataset summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Slider ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            panels::magnitude_slider(ui, &mut self.state);
        });

        // ---- Right side panel: ranked table ----
        if self.state.show_table {
            egui::SidePanel::right("ranking_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::ranking_table(ui, &self.state);
                });
        }

        // ---- Central panel: bar chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::city_bar_chart(ui, &self.state);
        });
    }
}
