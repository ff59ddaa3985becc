use eframe::egui;

use crate::color::TracePalette;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GapFinderApp {
    pub state: AppState,
    pub palette: TracePalette,
}

impl GapFinderApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            palette: TracePalette::default(),
        }
    }
}

impl eframe::App for GapFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis controls ----
        egui::SidePanel::left("analysis_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: literature ----
        egui::SidePanel::right("literature_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::literature_panel(ui, &mut self.state);
            });

        // ---- Central panel: preview + plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::data_preview(ui, &self.state);
            plot::analysis_plot(ui, &mut self.state, &self.palette);
        });
    }
}
