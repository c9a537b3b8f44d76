//! Built-in palettes and language defaults
//!
//! This module provides the static tables the default configuration
//! is assembled from.

mod langs;
mod themes;

pub use langs::{
    default_bracket_pairs, default_embedded_scopes, default_language_overrides,
    template_bracket_pairs,
};
pub use themes::{
    builtin_palette, builtin_palette_names, palette_from_theme_colors, ThemeKind, DARK, HC_DARK,
    HC_LIGHT, LIGHT, SOLARIZED_DARK,
};
