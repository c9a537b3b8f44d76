//! Colorizer configuration
//!
//! The global configuration holds the bracket pairs, the color source and
//! the CSS variable naming used for every language, plus a table of partial
//! per-language overrides. It can be built in code or loaded from TOML.
//!
//! Example:
//! ```toml
//! default-color = "light"
//! css-variable-prefix = "--shiki-"
//!
//! [colors]
//! light = ["#0431FA", "#319331", "#7B3814", "rgba(255, 18, 18, 0.8)"]
//! dark = ["#FFD700", "#DA70D6", "#179FFF", "rgba(255, 18, 18, 0.8)"]
//!
//! [[bracket-pairs]]
//! opener = "("
//! closer = ")"
//!
//! [langs.html]
//! bracket-pairs = []
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::bracket::builtin;
use crate::bracket::BracketPair;
use crate::error::{ColorizeError, Result};

/// Prefix for non-default theme custom properties
pub const DEFAULT_CSS_VARIABLE_PREFIX: &str = "--shiki-";

/// Theme used as the primary color when none is configured
pub const DEFAULT_THEME: &str = "light";

/// Where bracket colors come from
///
/// Each palette lists depth colors followed by the unexpected-bracket color.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawColorSource")]
pub enum ColorSource {
    /// One palette, rendered as a single color
    Flat(Vec<String>),
    /// Theme name to palette, in declared order
    Themed(IndexMap<String, Vec<String>>),
}

impl ColorSource {
    /// A flat palette from any list of colors
    pub fn flat<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColorSource::Flat(colors.into_iter().map(Into::into).collect())
    }

    /// A themed source from `(theme, palette)` entries, keeping their order
    pub fn themed<I, T, P, S>(themes: I) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
        T: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColorSource::Themed(
            themes
                .into_iter()
                .map(|(theme, palette)| {
                    (theme.into(), palette.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }

    /// A flat source from one of the built-in palettes
    pub fn builtin(name: &str) -> Result<Self> {
        builtin::builtin_palette(name)
            .map(|palette| ColorSource::flat(palette.iter().copied()))
            .ok_or_else(|| ColorizeError::UnknownTheme(name.to_string()))
    }

    /// Check if this is a flat source with no colors at all
    ///
    /// An empty flat palette leaves brackets uncolored; an empty theme
    /// mapping is a configuration error raised at style resolution.
    pub fn is_blank(&self) -> bool {
        matches!(self, ColorSource::Flat(colors) if colors.is_empty())
    }
}

impl Default for ColorSource {
    fn default() -> Self {
        ColorSource::flat(builtin::DARK.iter().copied())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColorSource {
    Flat(Vec<String>),
    Themed(IndexMap<String, Vec<String>>),
    Builtin(String),
}

impl TryFrom<RawColorSource> for ColorSource {
    type Error = ColorizeError;

    fn try_from(raw: RawColorSource) -> Result<Self> {
        match raw {
            RawColorSource::Flat(colors) => Ok(ColorSource::Flat(colors)),
            RawColorSource::Themed(themes) => Ok(ColorSource::Themed(themes)),
            RawColorSource::Builtin(name) => ColorSource::builtin(&name),
        }
    }
}

/// Which theme's color becomes the primary `color` property
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawDefaultColor")]
pub enum DefaultColor {
    Theme(String),
    /// Every theme is emitted as a custom property
    Disabled,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDefaultColor {
    Theme(String),
    Enabled(bool),
}

impl From<RawDefaultColor> for DefaultColor {
    fn from(raw: RawDefaultColor) -> Self {
        match raw {
            RawDefaultColor::Theme(name) if name.is_empty() => DefaultColor::Disabled,
            RawDefaultColor::Theme(name) => DefaultColor::Theme(name),
            RawDefaultColor::Enabled(true) => DefaultColor::Theme(DEFAULT_THEME.to_string()),
            RawDefaultColor::Enabled(false) => DefaultColor::Disabled,
        }
    }
}

/// Partial per-language configuration; unset fields fall through to global
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LanguageOverride {
    #[serde(default, alias = "themes")]
    pub colors: Option<ColorSource>,
    #[serde(default, alias = "defaultColor")]
    pub default_color: Option<DefaultColor>,
    #[serde(default, alias = "cssVariablePrefix")]
    pub css_variable_prefix: Option<String>,
    #[serde(default, alias = "bracketPairs")]
    pub bracket_pairs: Option<Vec<BracketPair>>,
}

impl LanguageOverride {
    /// Builder: override the color source
    pub fn with_colors(mut self, colors: ColorSource) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Builder: override the default color selection
    pub fn with_default_color(mut self, default_color: DefaultColor) -> Self {
        self.default_color = Some(default_color);
        self
    }

    /// Builder: override the CSS variable prefix
    pub fn with_css_variable_prefix(mut self, prefix: &str) -> Self {
        self.css_variable_prefix = Some(prefix.to_string());
        self
    }

    /// Builder: override the bracket pairs (empty disables brackets)
    pub fn with_bracket_pairs(mut self, pairs: Vec<BracketPair>) -> Self {
        self.bracket_pairs = Some(pairs);
        self
    }
}

/// Global colorizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ColorizerConfig {
    #[serde(alias = "themes")]
    pub colors: ColorSource,
    /// None selects the `light` theme
    #[serde(alias = "defaultColor")]
    pub default_color: Option<DefaultColor>,
    /// None selects `--shiki-`
    #[serde(alias = "cssVariablePrefix")]
    pub css_variable_prefix: Option<String>,
    #[serde(alias = "bracketPairs")]
    pub bracket_pairs: Vec<BracketPair>,
    pub langs: IndexMap<String, LanguageOverride>,
    /// Scope prefixes that re-admit brackets inside strings and comments
    #[serde(alias = "embeddedScopes")]
    pub embedded_scopes: Vec<String>,
}

impl Default for ColorizerConfig {
    fn default() -> Self {
        Self {
            colors: ColorSource::default(),
            default_color: None,
            css_variable_prefix: None,
            bracket_pairs: builtin::default_bracket_pairs(),
            langs: builtin::default_language_overrides(),
            embedded_scopes: builtin::default_embedded_scopes(),
        }
    }
}

impl ColorizerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Builder: set the color source
    pub fn with_colors(mut self, colors: ColorSource) -> Self {
        self.colors = colors;
        self
    }

    /// Builder: set the default color selection
    pub fn with_default_color(mut self, default_color: DefaultColor) -> Self {
        self.default_color = Some(default_color);
        self
    }

    /// Builder: set the CSS variable prefix
    pub fn with_css_variable_prefix(mut self, prefix: &str) -> Self {
        self.css_variable_prefix = Some(prefix.to_string());
        self
    }

    /// Builder: replace the bracket pairs
    pub fn with_bracket_pairs(mut self, pairs: Vec<BracketPair>) -> Self {
        self.bracket_pairs = pairs;
        self
    }

    /// Builder: add or replace one language override
    pub fn with_language(mut self, lang: &str, language: LanguageOverride) -> Self {
        self.langs.insert(lang.to_string(), language);
        self
    }

    /// Builder: replace the embedded-scope markers
    pub fn with_embedded_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.embedded_scopes = scopes.into_iter().map(Into::into).collect();
        self
    }
}
