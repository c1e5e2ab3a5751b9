use super::filter::{active_window, window_is_percent};
use super::model::Observation;
use crate::state::Selection;

// ---------------------------------------------------------------------------
// Plot-ready output
// ---------------------------------------------------------------------------

/// One municipality's line, ready for the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label; always the municipality name.
    pub name: String,
    /// `(year, display value)` pairs, years ascending.
    pub points: Vec<(i32, f64)>,
    /// Slot in the series palette (`selection index mod palette size`).
    pub color_index: usize,
    pub is_percent: bool,
}

/// Value-axis formatting hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisFormat {
    pub tick_suffix: &'static str,
    pub tick_precision: usize,
}

impl AxisFormat {
    pub const PERCENT: AxisFormat = AxisFormat {
        tick_suffix: "%",
        tick_precision: 1,
    };
    pub const PLAIN: AxisFormat = AxisFormat {
        tick_suffix: "",
        tick_precision: 2,
    };

    pub fn for_percent(is_percent: bool) -> Self {
        if is_percent {
            Self::PERCENT
        } else {
            Self::PLAIN
        }
    }

    /// Render a display value with the axis precision and suffix.
    pub fn format(&self, value: f64) -> String {
        format!(
            "{value:.prec$}{}",
            self.tick_suffix,
            prec = self.tick_precision
        )
    }

    /// Value-axis title.
    pub fn title(&self) -> &'static str {
        if self.tick_suffix == "%" {
            "Prósenta (%)"
        } else {
            "Gildi"
        }
    }
}

/// Everything the chart needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub series: Vec<Series>,
    pub is_percent: bool,
    pub axis: AxisFormat,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            is_percent: false,
            axis: AxisFormat::PLAIN,
        }
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project the dataset through the current selection.
///
/// One series is produced per selected municipality, in selection order, even
/// when it has no data. Percentage windows are scaled by 100. Points are sorted
/// by year with a stable sort, so duplicate years keep their input order.
pub fn project(observations: &[Observation], selection: &Selection, palette_size: usize) -> Projection {
    let window = active_window(observations, &selection.segment, &selection.metric);
    let is_percent = window_is_percent(observations, &window);
    let scale = if is_percent { 100.0 } else { 1.0 };

    let series = selection
        .municipalities
        .iter()
        .enumerate()
        .map(|(index, municipality)| {
            let mut points: Vec<(i32, f64)> = window
                .iter()
                .map(|&i| &observations[i])
                .filter(|obs| obs.municipality == *municipality)
                .map(|obs| (obs.year, obs.value * scale))
                .collect();
            points.sort_by_key(|&(year, _)| year);

            Series {
                name: municipality.clone(),
                points,
                color_index: index.checked_rem(palette_size).unwrap_or(0),
                is_percent,
            }
        })
        .collect();

    Projection {
        series,
        is_percent,
        axis: AxisFormat::for_percent(is_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(m: &str, year: i32, y: f64, pct: bool) -> Observation {
        Observation {
            municipality: m.into(),
            year,
            segment: "A-hluti".into(),
            metric_name: "M".into(),
            value: y,
            is_percent_ratio: pct,
        }
    }

    fn selection(municipalities: &[&str]) -> Selection {
        Selection {
            municipalities: municipalities.iter().map(|s| s.to_string()).collect(),
            segment: "A-hluti".into(),
            metric: "M".into(),
        }
    }

    #[test]
    fn percent_window_is_scaled() {
        let data = [obs("A", 2020, 0.5, true), obs("A", 2021, 0.6, true)];
        let p = project(&data, &selection(&["A"]), 10);
        assert_eq!(p.series.len(), 1);
        let s = &p.series[0];
        assert_eq!(s.name, "A");
        assert!(s.is_percent);
        assert_eq!(s.points.len(), 2);
        assert_eq!(s.points[0].0, 2020);
        assert!((s.points[0].1 - 50.0).abs() < 1e-9);
        assert_eq!(s.points[1].0, 2021);
        assert!((s.points[1].1 - 60.0).abs() < 1e-9);
        assert_eq!(p.axis, AxisFormat::PERCENT);
    }

    #[test]
    fn absent_municipality_gets_empty_series() {
        let data = [obs("A", 2020, 0.5, true), obs("A", 2021, 0.6, true)];
        let p = project(&data, &selection(&["B"]), 10);
        assert_eq!(p.series.len(), 1);
        assert_eq!(p.series[0].name, "B");
        assert!(p.series[0].points.is_empty());
    }

    #[test]
    fn empty_selection_gives_no_series() {
        let data = [obs("A", 2020, 0.5, true)];
        assert!(project(&data, &selection(&[]), 10).series.is_empty());
    }

    #[test]
    fn unknown_metric_falls_back_to_plain_axis() {
        let data = [obs("A", 2020, 0.5, true)];
        let mut sel = selection(&["A", "B"]);
        sel.metric = "Ekki til".into();
        let p = project(&data, &sel, 10);
        assert_eq!(p.series.len(), 2);
        assert!(p.series.iter().all(|s| s.points.is_empty() && !s.is_percent));
        assert_eq!(p.axis, AxisFormat::PLAIN);
    }

    #[test]
    fn plain_values_are_unchanged_and_sorted_by_year() {
        let data = [
            obs("A", 2022, 3.0, false),
            obs("A", 2020, 1.0, false),
            obs("A", 2021, 2.0, false),
        ];
        let p = project(&data, &selection(&["A"]), 10);
        assert_eq!(p.series[0].points, vec![(2020, 1.0), (2021, 2.0), (2022, 3.0)]);
        assert_eq!(p.axis, AxisFormat::PLAIN);
    }

    #[test]
    fn duplicate_years_keep_input_order() {
        let data = [
            obs("A", 2021, 9.0, false),
            obs("A", 2020, 1.0, false),
            obs("A", 2020, 2.0, false),
        ];
        let p = project(&data, &selection(&["A"]), 10);
        assert_eq!(p.series[0].points, vec![(2020, 1.0), (2020, 2.0), (2021, 9.0)]);
    }

    #[test]
    fn first_window_row_sets_flag_for_every_series() {
        let data = [obs("B", 2020, 0.1, true), obs("A", 2020, 0.2, false)];
        let p = project(&data, &selection(&["A", "B"]), 10);
        assert!(p.is_percent);
        assert!((p.series[0].points[0].1 - 20.0).abs() < 1e-9);
        assert!((p.series[1].points[0].1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn colors_cycle_through_the_palette() {
        let names: Vec<String> = (0..5).map(|i| format!("S{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let p = project(&[], &selection(&refs), 3);
        let idx: Vec<usize> = p.series.iter().map(|s| s.color_index).collect();
        assert_eq!(idx, vec![0, 1, 2, 0, 1]);

        let p = project(&[], &selection(&refs), 0);
        assert!(p.series.iter().all(|s| s.color_index == 0));
    }

    #[test]
    fn axis_format_renders_values() {
        assert_eq!(AxisFormat::PERCENT.format(12.345), "12.3%");
        assert_eq!(AxisFormat::PLAIN.format(12.345), "12.35");
        assert_eq!(AxisFormat::PERCENT.title(), "Prósenta (%)");
        assert_eq!(AxisFormat::PLAIN.title(), "Gildi");
    }
}
