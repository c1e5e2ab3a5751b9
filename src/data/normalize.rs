use std::collections::BTreeMap;

use super::model::{
    Observation, RawRow, RawValue, COL_IS_PERCENT, COL_METRIC, COL_MUNICIPALITY, COL_SEGMENT,
    COL_VALUE, COL_YEAR,
};

/// Turn raw rows into valid observations, in input order.
///
/// A row is kept only when municipality, year, segment and metric are present
/// and non-empty and the value is a finite number. Invalid rows are dropped
/// silently; this never fails.
pub fn normalize(rows: &[RawRow]) -> Vec<Observation> {
    rows.iter().filter_map(normalize_row).collect()
}

fn normalize_row(row: &RawRow) -> Option<Observation> {
    // Headers may still carry whitespace if the loader did not trim them.
    let cells: BTreeMap<&str, &RawValue> = row.iter().map(|(k, v)| (k.trim(), v)).collect();

    let municipality = cells.get(COL_MUNICIPALITY)?.as_text()?;
    let year = coerce_year(cells.get(COL_YEAR)?)?;
    let segment = cells.get(COL_SEGMENT)?.as_text()?;
    let metric_name = cells.get(COL_METRIC)?.as_text()?;
    let value = cells.get(COL_VALUE)?.as_f64().filter(|v| v.is_finite())?;
    let is_percent_ratio = cells.get(COL_IS_PERCENT).is_some_and(|v| coerce_flag(v));

    Some(Observation {
        municipality,
        year,
        segment,
        metric_name,
        value,
        is_percent_ratio,
    })
}

/// Years must be integral; `2020.0` is accepted, `2020.5` is not.
fn coerce_year(value: &RawValue) -> Option<i32> {
    match value {
        RawValue::Integer(i) => i32::try_from(*i).ok(),
        other => {
            let f = other.as_f64()?;
            if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
                Some(f as i32)
            } else {
                None
            }
        }
    }
}

/// Only a boolean `true` or the literal text `true` count as set.
fn coerce_flag(value: &RawValue) -> bool {
    match value {
        RawValue::Bool(b) => *b,
        RawValue::String(s) => s.trim() == "true",
        _ => false,
    }
}
