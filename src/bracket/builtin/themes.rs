//! Built-in bracket palettes
//!
//! Every palette lists the depth colors in order followed by the
//! unexpected-bracket color as its last entry.

use std::collections::HashMap;

/// Default dark palette
pub const DARK: &[&str] = &["#FFD700", "#DA70D6", "#179FFF", "rgba(255, 18, 18, 0.8)"];

/// Default light palette
pub const LIGHT: &[&str] = &["#0431FA", "#319331", "#7B3814", "rgba(255, 18, 18, 0.8)"];

/// High contrast dark palette
pub const HC_DARK: &[&str] = &["#FFD700", "#DA70D6", "#87CEFA", "rgba(255, 50, 50, 1)"];

/// High contrast light palette (the editor leaves its unexpected color
/// blank, so the light one is used)
pub const HC_LIGHT: &[&str] = &["#0431FA", "#319331", "#7B3814", "rgba(255, 18, 18, 0.8)"];

/// Solarized dark palette (no unexpected color of its own, borrows dark's)
pub const SOLARIZED_DARK: &[&str] = &["#CDCDCD", "#B58900", "#d33682", "rgba(255, 18, 18, 0.8)"];

const PALETTES: &[(&str, &[&str])] = &[
    ("dark", DARK),
    ("light", LIGHT),
    ("hc-dark", HC_DARK),
    ("hc-light", HC_LIGHT),
    ("solarized-dark", SOLARIZED_DARK),
];

/// Look up a built-in palette by name
pub fn builtin_palette(name: &str) -> Option<&'static [&'static str]> {
    PALETTES
        .iter()
        .find(|(palette_name, _)| *palette_name == name)
        .map(|(_, palette)| *palette)
}

/// Names of all built-in palettes, in declaration order
pub fn builtin_palette_names() -> impl Iterator<Item = &'static str> {
    PALETTES.iter().map(|(name, _)| *name)
}

const FOREGROUND_KEYS: [&str; 6] = [
    "editorBracketHighlight.foreground1",
    "editorBracketHighlight.foreground2",
    "editorBracketHighlight.foreground3",
    "editorBracketHighlight.foreground4",
    "editorBracketHighlight.foreground5",
    "editorBracketHighlight.foreground6",
];

const UNEXPECTED_KEY: &str = "editorBracketHighlight.unexpectedBracket.foreground";

/// Base editor theme a color table falls back on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Light,
    Dark,
    LightHighContrast,
    DarkHighContrast,
}

impl ThemeKind {
    /// Pick the base kind from a theme's id and declared type
    ///
    /// The type defaults to dark. Ids containing `high-contrast` select the
    /// high contrast variant of that type.
    pub fn detect(theme_id: &str, theme_type: Option<&str>) -> Self {
        let light = theme_type == Some("light");
        match (light, theme_id.contains("high-contrast")) {
            (true, true) => ThemeKind::LightHighContrast,
            (true, false) => ThemeKind::Light,
            (false, true) => ThemeKind::DarkHighContrast,
            (false, false) => ThemeKind::Dark,
        }
    }

    /// Bracket colors the editor uses when a theme defines none
    fn base_colors(self) -> [(&'static str, &'static str); 4] {
        let (fg, unexpected) = match self {
            ThemeKind::Light => (["#0431FA", "#319331", "#7B3814"], "rgba(255, 18, 18, 0.8)"),
            ThemeKind::Dark => (["#FFD700", "#DA70D6", "#179FFF"], "rgba(255, 18, 18, 0.8)"),
            ThemeKind::LightHighContrast => (["#0431FA", "#319331", "#7B3814"], "#B5200D"),
            ThemeKind::DarkHighContrast => {
                (["#FFD700", "#DA70D6", "#87CEFA"], "rgba(255, 50, 50, 1)")
            }
        };
        [
            (FOREGROUND_KEYS[0], fg[0]),
            (FOREGROUND_KEYS[1], fg[1]),
            (FOREGROUND_KEYS[2], fg[2]),
            (UNEXPECTED_KEY, unexpected),
        ]
    }
}

/// Build a palette from an editor theme's color table
///
/// Collects `editorBracketHighlight.foreground1` through `foreground6` and
/// then the unexpected-bracket color. Keys missing from `colors` fall back
/// to the base table for `kind`; keys missing from both are skipped.
pub fn palette_from_theme_colors(kind: ThemeKind, colors: &HashMap<String, String>) -> Vec<String> {
    let base = kind.base_colors();
    let lookup = |key: &str| -> Option<String> {
        colors
            .get(key)
            .map(String::as_str)
            .or_else(|| base.iter().find(|(k, _)| *k == key).map(|(_, v)| *v))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    FOREGROUND_KEYS
        .iter()
        .copied()
        .chain(std::iter::once(UNEXPECTED_KEY))
        .filter_map(lookup)
        .collect()
}
