use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Corner, HLine, Legend, Line, LineStyle, MarkerShape, Plot, Points};

use crate::color::SLOT_PRIMARY;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Municipality line chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart title and one line per projected series.
pub fn municipal_plot(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Engin gögn hlaðin.");
        });
        return;
    }

    ui.label(
        RichText::new(&state.selection.metric)
            .heading()
            .strong()
            .color(state.theme.slot(SLOT_PRIMARY)),
    );
    ui.add_space(8.0);

    let axis = state.projection.axis;

    Plot::new("municipal_plot")
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label("Ár")
        .y_axis_label(axis.title())
        .x_axis_formatter(|mark, _range| {
            // Years only; no fractional ticks.
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .y_axis_formatter(move |mark, _range| axis.format(mark.value))
        .label_formatter(move |name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!(
                    "{name}\nÁr: {:.0}\nGildi: {}",
                    value.x,
                    axis.format(value.y)
                )
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.hline(
                HLine::new(0.0)
                    .color(Color32::from_black_alpha(77))
                    .width(1.0)
                    .style(LineStyle::dotted_dense()),
            );

            for series in &state.projection.series {
                let color = state.theme.series_color(series.color_index);
                let xy: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .map(|&(year, value)| [f64::from(year), value])
                    .collect();

                plot_ui.line(Line::new(xy.clone()).name(&series.name).color(color).width(3.0));
                plot_ui.points(
                    Points::new(xy)
                        .name(&series.name)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(3.5),
                );
            }
        });
}
