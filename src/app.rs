use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::loader::load_file;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MunicipalFinanceApp {
    pub state: AppState,
}

impl MunicipalFinanceApp {
    /// Apply the theme and load the dataset. This is the only load of the
    /// session; a failure leaves the app in its blocking error view.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        cc.egui_ctx.set_visuals(config.theme.visuals());

        let mut state = AppState::new(config.selection.into(), config.theme);
        state.apply_load(load_file(&config.data_path));
        Self { state }
    }
}

impl eframe::App for MunicipalFinanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(message) = &self.state.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::error_view(ui, message);
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::municipal_plot(ui, &self.state);
        });
    }
}
