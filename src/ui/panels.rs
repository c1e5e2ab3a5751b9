use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::truncate_label;
use crate::color::{SLOT_PAPER, SLOT_PRIMARY, SLOT_SECONDARY};
use crate::export::{export_to_path, DEFAULT_EXPORT_NAME};
use crate::state::AppState;

const CHIP_CHARS: usize = 15;
const SUMMARY_METRIC_CHARS: usize = 30;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let primary = state.theme.slot(SLOT_PRIMARY);
    ui.add_space(8.0);
    ui.label(
        RichText::new("Fjármáladashboard")
            .heading()
            .strong()
            .color(primary),
    );
    ui.separator();

    // Clone the domains so we can mutate state inside the widgets.
    let Some(domains) = state.domains().cloned() else {
        ui.label("Engin gögn hlaðin.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Municipalities (multi-select) ----
            let n_selected = state.selection.municipalities.len();
            let n_total = domains.municipalities.len();
            ui.strong("Sveitarfélög");
            selection_chips(ui, state);

            egui::CollapsingHeader::new(format!("Velja  ({n_selected}/{n_total})"))
                .id_salt("municipalities")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("Allt").clicked() {
                            state.set_municipalities(domains.municipalities.clone());
                        }
                        if ui.small_button("Ekkert").clicked() {
                            state.set_municipalities(Vec::new());
                        }
                    });
                    for municipality in &domains.municipalities {
                        let mut checked = state.selection.is_selected(municipality);
                        if ui.checkbox(&mut checked, municipality.as_str()).changed() {
                            state.toggle_municipality(municipality);
                        }
                    }
                });
            ui.separator();

            // ---- Segment ----
            ui.strong("Hluti");
            let current = state.selection.segment.clone();
            egui::ComboBox::from_id_salt("segment")
                .selected_text(current.as_str())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for segment in &domains.segments {
                        if ui.selectable_label(current == *segment, segment.as_str()).clicked() {
                            state.set_segment(segment.clone());
                        }
                    }
                });
            ui.separator();

            // ---- Metric ----
            ui.strong("Mælikvarði");
            let current = state.selection.metric.clone();
            egui::ComboBox::from_id_salt("metric")
                .selected_text(truncate_label(&current, SUMMARY_METRIC_CHARS))
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for metric in &domains.metrics {
                        if ui.selectable_label(current == *metric, metric.as_str()).clicked() {
                            state.set_metric(metric.clone());
                        }
                    }
                });

            ui.add_space(16.0);
            summary_card(ui, state);
        });
}

/// Selected municipalities as small coloured chips, in selection order.
fn selection_chips(ui: &mut Ui, state: &AppState) {
    let fill = state.theme.slot(SLOT_SECONDARY);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for municipality in &state.selection.municipalities {
            ui.label(
                RichText::new(truncate_label(municipality, CHIP_CHARS))
                    .small()
                    .color(Color32::WHITE)
                    .background_color(fill),
            )
            .on_hover_text(municipality.as_str());
        }
    });
}

/// "Yfirlit" box: selection count and current metric.
fn summary_card(ui: &mut Ui, state: &AppState) {
    let primary = state.theme.slot(SLOT_PRIMARY);
    egui::Frame::group(ui.style())
        .fill(state.theme.slot(SLOT_PAPER))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Yfirlit").strong().color(primary));
            ui.label(
                RichText::new(format!(
                    "{} sveitarfélög valin",
                    state.selection.municipalities.len()
                ))
                .color(primary),
            );
            ui.label(
                RichText::new(format!(
                    "Mælikvarði: {}",
                    truncate_label(&state.selection.metric, SUMMARY_METRIC_CHARS)
                ))
                .color(primary),
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Skrá", |ui: &mut Ui| {
            let can_export = !state.projection.series.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Vista sem CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let with_data = state
                .projection
                .series
                .iter()
                .filter(|s| !s.points.is_empty())
                .count();
            ui.label(format!(
                "{} athuganir, {} af {} völdum með gögn",
                ds.len(),
                with_data,
                state.projection.series.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(msg.as_str());
        }
    });
}

// ---------------------------------------------------------------------------
// Blocking error view
// ---------------------------------------------------------------------------

/// Full-window error shown when the dataset failed to load.
pub fn error_view(ui: &mut Ui, message: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.3);
        egui::Frame::group(ui.style())
            .fill(Color32::from_rgb(253, 237, 237))
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui: &mut Ui| {
                ui.set_max_width(600.0);
                ui.label(RichText::new(message).color(Color32::from_rgb(95, 33, 32)));
            });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Vista gögn grafs")
        .set_file_name(DEFAULT_EXPORT_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export_to_path(&state.projection, &path) {
            Ok(()) => {
                state.status_message = Some(format!("Vistað í {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Villa: {e:#}"));
            }
        }
    }
}
