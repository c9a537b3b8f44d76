//! Bracket colorizer
//!
//! This module provides the Colorizer that runs one highlighting pass:
//! split every token on bracket boundaries, match brackets across the whole
//! document, resolve each matched level to a style, and write the styles
//! onto the tokens.

use super::language::{LanguageTable, ResolvedConfig};
use super::matcher::{match_brackets, BracketLevel};
use super::scope::embedded_language;
use super::split::split_token;
use super::style::{resolve_style, BracketStyle};
use super::tokens::Token;
use crate::config::ColorizerConfig;
use crate::error::Result;

/// Colors matching bracket pairs in tokenized documents
///
/// Holds only compiled configuration; each `colorize` call keeps its own
/// opener stack, so one colorizer can serve any number of documents.
#[derive(Debug)]
pub struct Colorizer {
    languages: LanguageTable,
}

impl Colorizer {
    /// Create a colorizer, compiling the bracket rules of every language
    pub fn new(config: &ColorizerConfig) -> Result<Self> {
        Ok(Self {
            languages: LanguageTable::new(config)?,
        })
    }

    /// Settings in effect for a language tag
    pub fn resolve(&self, lang: &str) -> ResolvedConfig<'_> {
        self.languages.resolve(lang)
    }

    /// Split one token so every bracket is its own token
    ///
    /// The token's embedded language, when it has one, selects the settings.
    pub fn split_token(&self, token: &Token, lang: &str) -> Vec<Token> {
        let config = self.resolve(embedded_language(token).unwrap_or(lang));
        split_token(token, &config, self.languages.embedded_scopes())
    }

    /// Split every token of a line
    pub fn split_line(&self, line: &[Token], lang: &str) -> Vec<Token> {
        line.iter().flat_map(|token| self.split_token(token, lang)).collect()
    }

    /// Colorize a tokenized document in place
    ///
    /// Lines are replaced by their split tokens and bracket tokens get a
    /// style. Matching runs across line boundaries. On a configuration error
    /// the lines are left untouched.
    pub fn colorize(&self, lines: &mut Vec<Vec<Token>>, lang: &str) -> Result<()> {
        let _span = tracing::debug_span!("colorize", lang, lines = lines.len()).entered();

        let mut split: Vec<Vec<Token>> =
            lines.iter().map(|line| self.split_line(line, lang)).collect();

        let assignments = match_brackets(split.iter().flatten(), &self.languages, lang);
        let styles = assignments
            .iter()
            .map(|a| resolve_style(&a.config, a.level).map(|style| (a.index, style)))
            .collect::<Result<Vec<(usize, BracketStyle)>>>()?;

        let unexpected = assignments
            .iter()
            .filter(|a| a.level == BracketLevel::Unexpected)
            .count();
        tracing::debug!(
            brackets = assignments.len(),
            unexpected,
            "bracket pass complete"
        );

        let mut flat: Vec<&mut Token> = split.iter_mut().flatten().collect();
        for (index, style) in styles {
            if let Some(token) = flat.get_mut(index) {
                token.style = Some(style);
            }
        }

        *lines = split;
        Ok(())
    }
}

/// Colorize a tokenized document with a one-off colorizer
pub fn colorize(config: &ColorizerConfig, lines: &mut Vec<Vec<Token>>, lang: &str) -> Result<()> {
    Colorizer::new(config)?.colorize(lines, lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::tokens::Explanation;
    use crate::config::{ColorSource, DefaultColor, LanguageOverride};
    use crate::error::ColorizeError;

    fn code(content: &str, offset: usize) -> Token {
        Token::new(content, offset)
            .with_explanation(vec![Explanation::new(content, &["source.ts"])])
    }

    fn config() -> ColorizerConfig {
        ColorizerConfig::default().with_colors(ColorSource::flat(["Y", "P", "B", "R"]))
    }

    fn styled(lines: &[Vec<Token>]) -> Vec<(String, String)> {
        lines
            .iter()
            .flatten()
            .filter_map(|t| t.style.as_ref().map(|s| (t.content.clone(), s.to_string())))
            .collect()
    }

    #[test]
    fn test_colorize_across_lines() {
        let mut lines = vec![vec![code("f({", 0)], vec![code("  })", 4)]];
        let colorizer = Colorizer::new(&config()).unwrap();
        colorizer.colorize(&mut lines, "ts").unwrap();

        assert_eq!(lines[0].len(), 3);
        assert_eq!(lines[1].len(), 3);
        assert_eq!(
            styled(&lines),
            [
                ("(".to_string(), "color:Y".to_string()),
                ("{".to_string(), "color:P".to_string()),
                ("}".to_string(), "color:P".to_string()),
                (")".to_string(), "color:Y".to_string()),
            ]
        );
    }

    #[test]
    fn test_colorize_reuses_colorizer() {
        let colorizer = Colorizer::new(&config()).unwrap();
        let mut first = vec![vec![code("(", 0)]];
        let mut second = vec![vec![code(")", 0)]];
        colorizer.colorize(&mut first, "ts").unwrap();
        colorizer.colorize(&mut second, "ts").unwrap();
        // No stack survives between documents
        assert_eq!(styled(&first), [("(".to_string(), "color:R".to_string())]);
        assert_eq!(styled(&second), [(")".to_string(), "color:R".to_string())]);
    }

    #[test]
    fn test_error_leaves_lines_untouched() {
        let config = ColorizerConfig::default()
            .with_colors(ColorSource::Themed(Default::default()))
            .with_default_color(DefaultColor::Disabled);
        let mut lines = vec![vec![code("{}", 0)]];
        let before = lines.clone();
        let err = colorize(&config, &mut lines, "ts").unwrap_err();
        assert!(matches!(err, ColorizeError::EmptyColors));
        assert_eq!(lines, before);
    }

    #[test]
    fn test_no_brackets_no_error() {
        // Color errors only surface once a bracket needs a style
        let config =
            ColorizerConfig::default().with_colors(ColorSource::Themed(Default::default()));
        let mut lines = vec![vec![code("let x = 1;", 0)]];
        colorize(&config, &mut lines, "ts").unwrap();
        assert!(styled(&lines).is_empty());
    }

    #[test]
    fn test_unclosed_embedded_opener_under_blank_document_palette() {
        // The document language colors nothing, so the opener keeps the
        // embedded language's palette
        let config = config().with_language(
            "md",
            LanguageOverride::default().with_colors(ColorSource::Flat(Vec::new())),
        );
        let js = Token::new("f(", 0).with_explanation(vec![Explanation::new(
            "f(",
            &["text.html.markdown", "source.js"],
        )]);
        let mut lines = vec![vec![js]];
        colorize(&config, &mut lines, "md").unwrap();
        assert_eq!(styled(&lines), [("(".to_string(), "color:R".to_string())]);
    }

    #[test]
    fn test_unclosed_opener_uses_document_palette() {
        let config = config().with_language(
            "md",
            LanguageOverride::default().with_colors(ColorSource::flat(["a", "z"])),
        );
        let js = Token::new("f(", 0).with_explanation(vec![Explanation::new(
            "f(",
            &["text.html.markdown", "source.js"],
        )]);
        let mut lines = vec![vec![js]];
        colorize(&config, &mut lines, "md").unwrap();
        assert_eq!(styled(&lines), [("(".to_string(), "color:z".to_string())]);
    }

    #[test]
    fn test_split_token_uses_embedded_language() {
        let colorizer = Colorizer::new(&config()).unwrap();
        let js = Token::new("f()", 0)
            .with_explanation(vec![Explanation::new("f()", &["text.html.basic", "source.js"])]);
        assert_eq!(colorizer.split_token(&js, "html").len(), 3);
        let tag = Token::new("f()", 0)
            .with_explanation(vec![Explanation::new("f()", &["text.html.basic"])]);
        assert_eq!(colorizer.split_token(&tag, "html").len(), 1);
    }
}
