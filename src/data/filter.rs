use super::model::Observation;

/// Return indices of observations in the active window: those whose segment
/// and metric both match exactly. Dataset order is preserved.
///
/// Values that do not occur in the data are not an error, they simply give an
/// empty window.
pub fn active_window(observations: &[Observation], segment: &str, metric: &str) -> Vec<usize> {
    observations
        .iter()
        .enumerate()
        .filter(|(_, obs)| obs.segment == segment && obs.metric_name == metric)
        .map(|(i, _)| i)
        .collect()
}

/// Flag sampling: the first observation of the window decides whether the
/// whole window is a percentage ratio. An empty window is not a percentage.
pub fn window_is_percent(observations: &[Observation], window: &[usize]) -> bool {
    window
        .first()
        .is_some_and(|&i| observations[i].is_percent_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(seg: &str, metric: &str, pct: bool) -> Observation {
        Observation {
            municipality: "A".into(),
            year: 2020,
            segment: seg.into(),
            metric_name: metric.into(),
            value: 0.5,
            is_percent_ratio: pct,
        }
    }

    #[test]
    fn window_matches_segment_and_metric_in_order() {
        let data = [
            obs("A-hluti", "M", false),
            obs("B-hluti", "M", true),
            obs("A-hluti", "N", true),
            obs("A-hluti", "M", true),
        ];
        assert_eq!(active_window(&data, "A-hluti", "M"), vec![0, 3]);
        assert!(active_window(&data, "C-hluti", "M").is_empty());
    }

    #[test]
    fn first_row_decides_the_flag() {
        let data = [obs("A-hluti", "M", false), obs("A-hluti", "M", true)];
        let window = active_window(&data, "A-hluti", "M");
        assert!(!window_is_percent(&data, &window));
        assert!(window_is_percent(&data, &window[1..]));
        assert!(!window_is_percent(&data, &[]));
    }
}
