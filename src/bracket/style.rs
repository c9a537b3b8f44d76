//! Bracket style resolution
//!
//! Turns a nesting level into the presentation value written onto a
//! bracket token: a single `color` declaration for a flat palette, or one
//! declaration per theme for a themed color source.

use std::fmt;

use super::language::ResolvedConfig;
use super::matcher::BracketLevel;
use crate::config::{ColorSource, DefaultColor, DEFAULT_THEME};
use crate::error::{ColorizeError, Result};

/// Primary color property
pub const COLOR_PROPERTY: &str = "color";

/// One `property:value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: String,
    pub value: String,
}

impl StyleDeclaration {
    /// Create a declaration
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Style assigned to a bracket token
///
/// Declarations keep their emission order: the primary color first (if
/// any), then every other theme in the color source's declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketStyle {
    declarations: Vec<StyleDeclaration>,
}

impl BracketStyle {
    /// A style with just a primary color
    pub fn color(value: impl Into<String>) -> Self {
        Self {
            declarations: vec![StyleDeclaration::new(COLOR_PROPERTY, value)],
        }
    }

    /// Builder: append a declaration
    pub fn with_declaration(
        mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.declarations.push(StyleDeclaration::new(property, value));
        self
    }

    /// The declarations in emission order
    pub fn declarations(&self) -> &[StyleDeclaration] {
        &self.declarations
    }

    /// Value of a property, if declared
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// The primary color, if declared
    pub fn primary_color(&self) -> Option<&str> {
        self.get(COLOR_PROPERTY)
    }

    /// Check if nothing is declared
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Formats as inline CSS: `color:#FFD700;--shiki-dark:#0431FA`
impl fmt::Display for BracketStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", declaration.property, declaration.value)?;
        }
        Ok(())
    }
}

/// Pick a palette entry for a level
///
/// The last entry is the unexpected color; depths cycle through the
/// entries before it. A one-entry palette uses its only color for
/// everything. Returns None for an empty palette.
pub fn palette_color(palette: &[String], level: BracketLevel) -> Option<&str> {
    let last = palette.len().checked_sub(1)?;
    let index = match level {
        BracketLevel::Unexpected => last,
        BracketLevel::Depth(_) if last == 0 => 0,
        BracketLevel::Depth(depth) => depth % last,
    };
    Some(palette[index].as_str())
}

/// Resolve the style for a level under a language's settings
///
/// Fails if a themed color source is empty, if the default theme is
/// missing from it, or if any theme's palette is empty.
pub fn resolve_style(config: &ResolvedConfig<'_>, level: BracketLevel) -> Result<BracketStyle> {
    match config.colors {
        ColorSource::Flat(palette) => palette_color(palette, level)
            .map(BracketStyle::color)
            .ok_or(ColorizeError::EmptyColors),
        ColorSource::Themed(themes) => {
            if themes.is_empty() {
                return Err(ColorizeError::EmptyColors);
            }
            let theme_color = |theme: &str, palette: &[String]| {
                palette_color(palette, level)
                    .map(str::to_string)
                    .ok_or_else(|| ColorizeError::EmptyPalette(theme.to_string()))
            };

            let default_theme = match config.default_color {
                None => Some(DEFAULT_THEME),
                Some(DefaultColor::Theme(name)) if name.is_empty() => None,
                Some(DefaultColor::Theme(name)) => Some(name.as_str()),
                Some(DefaultColor::Disabled) => None,
            };

            let mut style = BracketStyle::default();
            if let Some(name) = default_theme {
                let palette = themes
                    .get(name)
                    .ok_or_else(|| ColorizeError::MissingDefaultColor(name.to_string()))?;
                style = style.with_declaration(COLOR_PROPERTY, theme_color(name, palette)?);
            }
            for (theme, palette) in themes {
                if Some(theme.as_str()) != default_theme {
                    let property = format!("{}{}", config.css_variable_prefix, theme);
                    style = style.with_declaration(property, theme_color(theme, palette)?);
                }
            }
            Ok(style)
        }
    }
}
