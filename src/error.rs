//! Error types for bracket colorization

use thiserror::Error;

/// Result type alias for colorizer operations
pub type Result<T> = std::result::Result<T, ColorizeError>;

/// Colorizer error types
///
/// Every variant is a caller configuration mistake. Unbalanced brackets in
/// the highlighted source are never reported here; they receive the
/// unexpected-bracket color instead.
#[derive(Error, Debug)]
pub enum ColorizeError {
    #[error("`colors` option must not be empty")]
    EmptyColors,

    #[error("`colors` option must contain the defaultColor key `{0}`")]
    MissingDefaultColor(String),

    #[error("`colors` palette for theme `{0}` must not be empty")]
    EmptyPalette(String),

    #[error("Unknown built-in palette: {0}")]
    UnknownTheme(String),

    #[error("Invalid bracket pair: opener {opener:?}, closer {closer:?}")]
    InvalidBracketPair { opener: String, closer: String },

    #[error("Bracket pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
