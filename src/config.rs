use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::color::Theme;
use crate::state::{Selection, DEFAULT_METRIC, DEFAULT_MUNICIPALITIES, DEFAULT_SEGMENT};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "sveitarfelog-dashboard")]
#[command(about = "Financial indicators of Icelandic municipalities", long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Data file (.csv or .json); overrides `data_path` from the config
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

/// Initial selection as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionDefaults {
    pub municipalities: Vec<String>,
    pub segment: String,
    pub metric: String,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            municipalities: DEFAULT_MUNICIPALITIES.iter().map(|m| m.to_string()).collect(),
            segment: DEFAULT_SEGMENT.to_string(),
            metric: DEFAULT_METRIC.to_string(),
        }
    }
}

impl From<SelectionDefaults> for Selection {
    fn from(d: SelectionDefaults) -> Self {
        Selection {
            municipalities: d.municipalities,
            segment: d.segment,
            metric: d.metric,
        }
    }
}

/// Dashboard configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub selection: SelectionDefaults,
    pub theme: Theme,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/throun_data.csv"),
            selection: SelectionDefaults::default(),
            theme: Theme::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the config from the command line: file (if given), then overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(data) = &cli.data {
            config.data_path = data.clone();
        }
        Ok(config)
    }
}
