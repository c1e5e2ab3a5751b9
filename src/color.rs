use std::collections::BTreeMap;

use eframe::egui::{self, Color32};
use palette::{Hsla, IntoColor, Srgba};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Colour parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unrecognised colour syntax: {0:?}")]
    Syntax(String),
    #[error("bad number {0:?} in colour")]
    Number(String),
}

/// Parse `hsla(h, s%, l%, a)`, `hsl(h, s%, l%)`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_color(text: &str) -> Result<Color32, ColorParseError> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorParseError::Syntax(text.to_string()));
    }

    let args = text
        .strip_prefix("hsla(")
        .or_else(|| text.strip_prefix("hsl("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ColorParseError::Syntax(text.to_string()))?;

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(ColorParseError::Syntax(text.to_string()));
    }
    let number = |s: &str| -> Result<f32, ColorParseError> {
        s.trim_end_matches('%')
            .parse::<f32>()
            .map_err(|_| ColorParseError::Number(s.to_string()))
    };
    let hue = number(parts[0])?;
    let saturation = number(parts[1])? / 100.0;
    let lightness = number(parts[2])? / 100.0;
    let alpha = match parts.get(3).copied() {
        Some(a) => number(a)?,
        None => 1.0,
    };

    let hsla = Hsla::new(hue, saturation, lightness, alpha);
    let rgba: Srgba = hsla.into_color();
    let rgba: Srgba<u8> = rgba.into_format();
    Ok(Color32::from_rgba_unmultiplied(
        rgba.red,
        rgba.green,
        rgba.blue,
        rgba.alpha,
    ))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Theme: named slots + series palette
// ---------------------------------------------------------------------------

pub const SLOT_PRIMARY: &str = "primary";
pub const SLOT_PRIMARY_LIGHT: &str = "primary_light";
pub const SLOT_PRIMARY_DARK: &str = "primary_dark";
pub const SLOT_SECONDARY: &str = "secondary";
pub const SLOT_BACKGROUND: &str = "background";
pub const SLOT_PAPER: &str = "paper";
pub const SLOT_TEXT: &str = "text";
pub const SLOT_GRID: &str = "grid";

const DEFAULT_SLOTS: [(&str, &str); 8] = [
    (SLOT_PRIMARY, "hsla(232, 20%, 35%, 1)"),
    (SLOT_PRIMARY_LIGHT, "hsla(232, 20%, 45%, 1)"),
    (SLOT_PRIMARY_DARK, "hsla(232, 20%, 25%, 1)"),
    (SLOT_SECONDARY, "hsla(192, 100%, 33%, 1)"),
    (SLOT_BACKGROUND, "hsla(0, 9%, 98%, 1)"),
    (SLOT_PAPER, "#ffffff"),
    (SLOT_TEXT, "hsla(232, 20%, 15%, 1)"),
    (SLOT_GRID, "hsla(0, 0%, 90%, 1)"),
];

const DEFAULT_SERIES: [&str; 10] = [
    "hsla(232, 20%, 35%, 1)",
    "hsla(192, 100%, 33%, 1)",
    "hsla(280, 70%, 45%, 1)",
    "hsla(25, 95%, 53%, 1)",
    "hsla(348, 83%, 47%, 1)",
    "hsla(142, 71%, 45%, 1)",
    "hsla(45, 93%, 47%, 1)",
    "hsla(210, 70%, 50%, 1)",
    "hsla(320, 65%, 52%, 1)",
    "hsla(160, 60%, 45%, 1)",
];

/// Colour configuration: named UI slots plus the ordered series palette.
///
/// Colours are kept as text so the theme round-trips through the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub slots: BTreeMap<String, String>,
    pub series: Vec<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            series: DEFAULT_SERIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Theme {
    /// Resolve a named slot. Unknown or unparseable entries fall back to the
    /// built-in value, then to grey.
    pub fn slot(&self, name: &str) -> Color32 {
        let builtin = || {
            DEFAULT_SLOTS
                .iter()
                .find(|(k, _)| *k == name)
                .and_then(|(_, v)| parse_color(v).ok())
        };
        self.slots
            .get(name)
            .and_then(|text| match parse_color(text) {
                Ok(c) => Some(c),
                Err(e) => {
                    log::warn!("Theme slot {name:?}: {e}; using default");
                    None
                }
            })
            .or_else(builtin)
            .unwrap_or(Color32::GRAY)
    }

    /// Colour for a series palette index, cycling.
    pub fn series_color(&self, index: usize) -> Color32 {
        if self.series.is_empty() {
            return self.slot(SLOT_PRIMARY);
        }
        let text = &self.series[index % self.series.len()];
        parse_color(text).unwrap_or_else(|e| {
            log::warn!("Series colour {index}: {e}; using primary");
            self.slot(SLOT_PRIMARY)
        })
    }

    /// Light egui visuals coloured from the theme slots.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.slot(SLOT_BACKGROUND);
        visuals.window_fill = self.slot(SLOT_PAPER);
        visuals.extreme_bg_color = self.slot(SLOT_PAPER);
        visuals.override_text_color = Some(self.slot(SLOT_TEXT));
        visuals.hyperlink_color = self.slot(SLOT_SECONDARY);
        visuals.selection.bg_fill = self.slot(SLOT_SECONDARY);
        visuals.selection.stroke.color = self.slot(SLOT_PAPER);
        visuals.widgets.hovered.bg_stroke.color = self.slot(SLOT_PRIMARY);
        visuals.widgets.active.bg_fill = self.slot(SLOT_PRIMARY_DARK);
        visuals.widgets.inactive.bg_stroke.color = self.slot(SLOT_GRID);
        visuals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hsla_and_hex() {
        assert_eq!(parse_color("#ffffff"), Ok(Color32::WHITE));
        assert_eq!(parse_color(" #000000 "), Ok(Color32::BLACK));
        assert_eq!(
            parse_color("#ff000080"),
            Ok(Color32::from_rgba_unmultiplied(255, 0, 0, 128))
        );
        // hsl(0, 100%, 50%) is pure red.
        assert_eq!(parse_color("hsl(0, 100%, 50%)"), Ok(Color32::from_rgb(255, 0, 0)));
        assert_eq!(
            parse_color("hsla(120, 100%, 50%, 1)"),
            Ok(Color32::from_rgb(0, 255, 0))
        );
    }

    #[test]
    fn rejects_bad_colours() {
        assert!(matches!(parse_color("red"), Err(ColorParseError::Syntax(_))));
        assert!(matches!(parse_color("#12345"), Err(ColorParseError::Syntax(_))));
        assert!(matches!(parse_color("hsl(1, 2)"), Err(ColorParseError::Syntax(_))));
        assert!(matches!(
            parse_color("hsla(x, 1%, 1%, 1)"),
            Err(ColorParseError::Number(_))
        ));
    }

    #[test]
    fn default_theme_parses_completely() {
        let theme = Theme::default();
        assert_eq!(theme.series.len(), 10);
        for text in theme.series.iter().chain(theme.slots.values()) {
            assert!(parse_color(text).is_ok(), "{text}");
        }
        assert_eq!(theme.slot(SLOT_PAPER), Color32::WHITE);
    }

    #[test]
    fn bad_slot_falls_back_to_builtin() {
        let mut theme = Theme::default();
        theme.slots.insert(SLOT_PAPER.into(), "not a colour".into());
        assert_eq!(theme.slot(SLOT_PAPER), Color32::WHITE);
        assert_eq!(theme.slot("no_such_slot"), Color32::GRAY);
    }

    #[test]
    fn series_colours_cycle() {
        let theme = Theme {
            series: vec!["#ff0000".into(), "#00ff00".into()],
            ..Theme::default()
        };
        assert_eq!(theme.series_color(0), Color32::from_rgb(255, 0, 0));
        assert_eq!(theme.series_color(3), Color32::from_rgb(0, 255, 0));
    }
}
