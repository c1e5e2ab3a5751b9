use std::collections::BTreeSet;

use super::model::Observation;

/// The three selectable value sets, each deduplicated and sorted by code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domains {
    pub municipalities: Vec<String>,
    pub segments: Vec<String>,
    pub metrics: Vec<String>,
}

impl Domains {
    /// Collect the distinct municipality, segment and metric names.
    pub fn extract(observations: &[Observation]) -> Self {
        let mut municipalities = BTreeSet::new();
        let mut segments = BTreeSet::new();
        let mut metrics = BTreeSet::new();

        for obs in observations {
            municipalities.insert(obs.municipality.as_str());
            segments.insert(obs.segment.as_str());
            metrics.insert(obs.metric_name.as_str());
        }

        fn owned(set: BTreeSet<&str>) -> Vec<String> {
            set.into_iter().map(str::to_string).collect()
        }

        Domains {
            municipalities: owned(municipalities),
            segments: owned(segments),
            metrics: owned(metrics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(m: &str, seg: &str, metric: &str) -> Observation {
        Observation {
            municipality: m.into(),
            year: 2020,
            segment: seg.into(),
            metric_name: metric.into(),
            value: 1.0,
            is_percent_ratio: false,
        }
    }

    #[test]
    fn empty_dataset_gives_empty_domains() {
        assert_eq!(Domains::extract(&[]), Domains::default());
    }

    #[test]
    fn values_are_unique_and_sorted_by_code_point() {
        let data = [
            obs("Reykjavíkurborg", "A-hluti", "Skuldir"),
            obs("Akureyrarbær", "A- og B-hluti", "Veltufé"),
            obs("Ísafjarðarbær", "A-hluti", "Skuldir"),
            obs("Akureyrarbær", "A-hluti", "Nettóskuldir"),
        ];
        let d = Domains::extract(&data);
        // 'Í' (U+00CD) sorts after every ASCII letter.
        assert_eq!(
            d.municipalities,
            vec!["Akureyrarbær", "Reykjavíkurborg", "Ísafjarðarbær"]
        );
        assert_eq!(d.segments, vec!["A- og B-hluti", "A-hluti"]);
        assert_eq!(d.metrics, vec!["Nettóskuldir", "Skuldir", "Veltufé"]);
    }
}
