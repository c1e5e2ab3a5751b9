use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::projection::Projection;

pub const DEFAULT_EXPORT_NAME: &str = "sveitarfelog-dashboard.csv";

/// Write the projected series as long-format CSV: `sveitarfelag,ar,gildi`.
///
/// Values are the display values, so percentages are already scaled by 100.
pub fn write_series_csv<W: Write>(projection: &Projection, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["sveitarfelag", "ar", "gildi"])?;
    for series in &projection.series {
        for (year, value) in &series.points {
            wtr.write_record([series.name.clone(), year.to_string(), value.to_string()])?;
        }
    }
    wtr.flush().context("flushing CSV export")?;
    Ok(())
}

/// Export to a file on disk.
pub fn export_to_path(projection: &Projection, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_series_csv(projection, file).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} series to {}", projection.series.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::projection::{AxisFormat, Series};

    #[test]
    fn writes_one_line_per_point_in_series_order() {
        let projection = Projection {
            series: vec![
                Series {
                    name: "Vogar".into(),
                    points: vec![(2020, 50.0), (2021, 60.5)],
                    color_index: 0,
                    is_percent: true,
                },
                Series {
                    name: "Akranes".into(),
                    points: vec![],
                    color_index: 1,
                    is_percent: true,
                },
            ],
            is_percent: true,
            axis: AxisFormat::PERCENT,
        };
        let mut out = Vec::new();
        write_series_csv(&projection, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "sveitarfelag,ar,gildi\nVogar,2020,50\nVogar,2021,60.5\n"
        );
    }

    #[test]
    fn export_to_path_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);
        export_to_path(&Projection::default(), &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "sveitarfelag,ar,gildi\n"
        );
    }
}
