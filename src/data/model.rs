use std::collections::BTreeMap;

use super::domains::Domains;
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_MUNICIPALITY: &str = "sveitarfelag";
pub const COL_YEAR: &str = "ar";
pub const COL_SEGMENT: &str = "hluti";
pub const COL_METRIC: &str = "name";
pub const COL_VALUE: &str = "y";
pub const COL_IS_PERCENT: &str = "is_percent";

// ---------------------------------------------------------------------------
// RawValue – a single cell as the loader saw it
// ---------------------------------------------------------------------------

/// A single cell. Text sources (CSV, JSON strings) always give `String` so
/// labels keep their exact text; JSON numbers and bools keep their JSON type.
/// Numeric and flag interpretation happens in the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl RawValue {
    /// A text cell, trimmed. Empty (after trimming) means `Null`.
    pub fn from_cell(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            RawValue::Null
        } else {
            RawValue::String(s.to_string())
        }
    }

    /// Numeric view of the cell. Numeric strings are accepted too.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Float(v) => Some(*v),
            RawValue::Integer(i) => Some(*i as f64),
            RawValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Text view of the cell, trimmed. `None` for nulls, bools and blanks.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            RawValue::String(s) => s.trim().to_string(),
            RawValue::Integer(i) => i.to_string(),
            RawValue::Float(v) => v.to_string(),
            RawValue::Bool(_) | RawValue::Null => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// One raw row: column name → cell.
pub type RawRow = BTreeMap<String, RawValue>;

// ---------------------------------------------------------------------------
// Observation – one valid row of the normalized dataset
// ---------------------------------------------------------------------------

/// A single municipality/segment/metric measurement for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub municipality: String,
    pub year: i32,
    /// Accounting part, e.g. `A-hluti`.
    pub segment: String,
    pub metric_name: String,
    pub value: f64,
    /// The value is a ratio and is shown multiplied by 100.
    pub is_percent_ratio: bool,
}

impl Observation {
    /// Convert back to the raw shape the normalizer accepts.
    pub fn to_raw_row(&self) -> RawRow {
        let mut row = RawRow::new();
        row.insert(
            COL_MUNICIPALITY.to_string(),
            RawValue::String(self.municipality.clone()),
        );
        row.insert(COL_YEAR.to_string(), RawValue::Integer(self.year.into()));
        row.insert(
            COL_SEGMENT.to_string(),
            RawValue::String(self.segment.clone()),
        );
        row.insert(
            COL_METRIC.to_string(),
            RawValue::String(self.metric_name.clone()),
        );
        row.insert(COL_VALUE.to_string(), RawValue::Float(self.value));
        row.insert(
            COL_IS_PERCENT.to_string(),
            RawValue::Bool(self.is_percent_ratio),
        );
        row
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete normalized dataset
// ---------------------------------------------------------------------------

/// The normalized observations together with their selection domains.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    pub domains: Domains,
    /// Raw rows rejected by the normalizer.
    pub dropped_rows: usize,
}

impl Dataset {
    /// Normalize raw rows and derive the domains once.
    pub fn from_raw_rows(rows: &[RawRow]) -> Self {
        let observations = normalize(rows);
        let domains = Domains::extract(&observations);
        Dataset {
            dropped_rows: rows.len() - observations.len(),
            observations,
            domains,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
