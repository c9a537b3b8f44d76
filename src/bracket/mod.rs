//! Bracket colorizing module
//!
//! This module provides the bracket pass run over tokenizer output:
//! - Splitting tokens so every bracket stands alone
//! - Matching brackets with an opener stack across lines
//! - Resolving nesting levels to flat or themed styles

pub mod builtin;
mod colorizer;
mod language;
mod matcher;
mod rules;
mod scope;
mod split;
mod style;
mod tokens;

pub use colorizer::{colorize, Colorizer};
pub use language::{LanguageTable, ResolvedConfig};
pub use matcher::{match_brackets, BracketAssignment, BracketLevel};
pub use rules::{BracketPair, BracketRole, BracketRules};
pub use scope::{embedded_language, should_ignore_token};
pub use split::{explanation_spans, split_on_brackets, split_token};
pub use style::{palette_color, resolve_style, BracketStyle, StyleDeclaration, COLOR_PROPERTY};
pub use tokens::{Explanation, Scope, Token};
