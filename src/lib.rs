//! rainbow-brackets - nesting-depth colors for highlighted code
//!
//! Takes the scoped token stream produced by a TextMate-style highlighter
//! and gives every bracket a color by nesting depth, with a dedicated color
//! for brackets that have no valid partner.
//!
//! ```
//! use rainbow_brackets::{colorize, ColorSource, ColorizerConfig, Explanation, Token};
//!
//! let config = ColorizerConfig::default().with_colors(ColorSource::flat(["Y", "P", "B", "R"]));
//! let mut lines = vec![vec![
//!     Token::new("f()", 0).with_explanation(vec![Explanation::new("f()", &["source.ts"])]),
//! ]];
//! colorize(&config, &mut lines, "ts")?;
//!
//! let styles: Vec<String> = lines[0]
//!     .iter()
//!     .filter_map(|t| t.style.as_ref().map(|s| s.to_string()))
//!     .collect();
//! assert_eq!(styles, ["color:Y", "color:Y"]);
//! # Ok::<(), rainbow_brackets::ColorizeError>(())
//! ```

pub mod bracket;
pub mod config;
pub mod error;

pub use bracket::{
    colorize, BracketLevel, BracketPair, BracketStyle, Colorizer, Explanation, Scope, Token,
};
pub use config::{ColorSource, ColorizerConfig, DefaultColor, LanguageOverride};
pub use error::{ColorizeError, Result};
