use crate::color::Theme;
use crate::data::domains::Domains;
use crate::data::loader::LoadError;
use crate::data::model::Dataset;
use crate::data::projection::{project, Projection};

// ---------------------------------------------------------------------------
// Selection – the three filter fields
// ---------------------------------------------------------------------------

pub const DEFAULT_MUNICIPALITIES: [&str; 5] = [
    "Reykjavíkurborg",
    "Garðabær",
    "Kópavogsbær",
    "Hafnarfjarðarkaupstaður",
    "Seltjarnarnesbær",
];
pub const DEFAULT_SEGMENT: &str = "A-hluti";
pub const DEFAULT_METRIC: &str = "Nettóskuldir sem hlutfall af tekjum";

/// Current filter. No setter ever rejects a value: anything outside the loaded
/// domains just projects to empty series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Ordered; the chart keeps this order.
    pub municipalities: Vec<String>,
    pub segment: String,
    pub metric: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            municipalities: DEFAULT_MUNICIPALITIES.iter().map(|m| m.to_string()).collect(),
            segment: DEFAULT_SEGMENT.to_string(),
            metric: DEFAULT_METRIC.to_string(),
        }
    }
}

impl Selection {
    pub fn set_municipalities(&mut self, municipalities: Vec<String>) {
        self.municipalities = municipalities;
    }

    pub fn set_segment(&mut self, segment: String) {
        self.segment = segment;
    }

    pub fn set_metric(&mut self, metric: String) {
        self.metric = metric;
    }

    /// Remove `municipality` if selected, otherwise append it to the end.
    pub fn toggle_municipality(&mut self, municipality: &str) {
        if let Some(pos) = self.municipalities.iter().position(|m| m == municipality) {
            self.municipalities.remove(pos);
        } else {
            self.municipalities.push(municipality.to_string());
        }
    }

    pub fn is_selected(&self, municipality: &str) -> bool {
        self.municipalities.iter().any(|m| m == municipality)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until loaded, or when loading failed).
    pub dataset: Option<Dataset>,

    /// Current filter.
    pub selection: Selection,

    /// Series for the current selection (recomputed on every change).
    pub projection: Projection,

    /// Theme with the series palette.
    pub theme: Theme,

    /// Terminal load error. When set the dashboard shows only this message.
    pub load_error: Option<String>,

    /// Non-fatal status line (e.g. export results).
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Selection::default(), Theme::default())
    }
}

impl AppState {
    pub fn new(selection: Selection, theme: Theme) -> Self {
        Self {
            dataset: None,
            selection,
            projection: Projection::default(),
            theme,
            load_error: None,
            status_message: None,
        }
    }

    /// Take the outcome of the one load of the session.
    pub fn apply_load(&mut self, result: Result<Dataset, LoadError>) {
        match result {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load data ({:?}): {e}", e.kind());
                self.dataset = None;
                self.projection = Projection::default();
                self.load_error = Some(e.user_message());
            }
        }
    }

    /// Ingest a newly loaded dataset and project the current selection.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.load_error = None;
        self.reproject();
    }

    /// Domains of the loaded dataset (empty before load).
    pub fn domains(&self) -> Option<&Domains> {
        self.dataset.as_ref().map(|ds| &ds.domains)
    }

    /// Recompute `projection` after a selection change.
    pub fn reproject(&mut self) {
        let observations = self
            .dataset
            .as_ref()
            .map(|ds| ds.observations.as_slice())
            .unwrap_or(&[]);
        self.projection = project(observations, &self.selection, self.theme.series.len());
        log::debug!(
            "Projected {} series for {:?} / {:?} (percent: {})",
            self.projection.series.len(),
            self.selection.segment,
            self.selection.metric,
            self.projection.is_percent,
        );
    }

    pub fn set_municipalities(&mut self, municipalities: Vec<String>) {
        self.selection.set_municipalities(municipalities);
        self.reproject();
    }

    pub fn toggle_municipality(&mut self, municipality: &str) {
        self.selection.toggle_municipality(municipality);
        self.reproject();
    }

    pub fn set_segment(&mut self, segment: String) {
        self.selection.set_segment(segment);
        self.reproject();
    }

    pub fn set_metric(&mut self, metric: String) {
        self.selection.set_metric(metric);
        self.reproject();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;

    fn dataset() -> Dataset {
        let rows: Vec<_> = [
            ("Garðabær", 2020, "A-hluti", "M", 0.5, true),
            ("Garðabær", 2021, "A-hluti", "M", 0.6, true),
            ("Vogar", 2020, "A-hluti", "M", 0.1, true),
            ("Vogar", 2020, "B-hluti", "N", 12.0, false),
        ]
        .into_iter()
        .map(|(m, year, seg, metric, value, pct)| {
            Observation {
                municipality: m.into(),
                year,
                segment: seg.into(),
                metric_name: metric.into(),
                value,
                is_percent_ratio: pct,
            }
            .to_raw_row()
        })
        .collect();
        Dataset::from_raw_rows(&rows)
    }

    #[test]
    fn defaults_before_data() {
        let state = AppState::default();
        assert_eq!(state.selection.municipalities.len(), 5);
        assert_eq!(state.selection.segment, "A-hluti");
        assert_eq!(state.selection.metric, "Nettóskuldir sem hlutfall af tekjum");
        assert!(state.domains().is_none());
        assert!(state.projection.series.is_empty());
    }

    #[test]
    fn defaults_missing_from_data_project_to_empty_series() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.projection.series.len(), 5);
        assert!(state.projection.series.iter().all(|s| s.points.is_empty()));
        assert!(!state.projection.is_percent);
    }

    #[test]
    fn every_setter_reprojects() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_metric("M".into());
        state.set_municipalities(vec!["Vogar".into(), "Garðabær".into()]);
        let names: Vec<&str> = state.projection.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Vogar", "Garðabær"]);
        assert!(state.projection.is_percent);
        assert_eq!(state.projection.series[1].points.len(), 2);

        state.set_segment("B-hluti".into());
        assert!(state.projection.series.iter().all(|s| s.points.is_empty()));

        state.set_metric("N".into());
        assert_eq!(state.projection.series[0].points, vec![(2020, 12.0)]);
        assert!(!state.projection.is_percent);

        state.set_municipalities(Vec::new());
        assert!(state.projection.series.is_empty());
    }

    #[test]
    fn toggle_appends_and_removes_preserving_order() {
        let mut sel = Selection {
            municipalities: vec!["A".into(), "B".into(), "C".into()],
            ..Selection::default()
        };
        sel.toggle_municipality("B");
        assert_eq!(sel.municipalities, vec!["A", "C"]);
        sel.toggle_municipality("B");
        assert_eq!(sel.municipalities, vec!["A", "C", "B"]);
        assert!(sel.is_selected("C"));
        assert!(!sel.is_selected("D"));
    }

    #[test]
    fn load_error_blocks_the_dashboard() {
        let mut state = AppState::default();
        let err = crate::data::loader::read_json_rows("{").unwrap_err();
        state.apply_load(Err(err));
        assert!(state.dataset.is_none());
        assert!(state
            .load_error
            .as_deref()
            .is_some_and(|m| m.starts_with("Villa við að hlaða gögnum")));
    }
}
