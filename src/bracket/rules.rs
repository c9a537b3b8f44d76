//! Bracket pair definitions and the compiled bracket pattern
//!
//! A `BracketRules` set holds the pairs that apply to one language and a
//! single alternation regex used to cut tokens on bracket boundaries.

use regex::Regex;
use serde::Deserialize;

use crate::error::{ColorizeError, Result};

/// An opener/closer pair with optional scope filters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BracketPair {
    pub opener: String,
    pub closer: String,
    /// Only brackets carrying one of these scopes (or a sub-scope) count
    #[serde(default, alias = "scopesAllowList")]
    pub scopes_allow_list: Option<Vec<String>>,
    /// Brackets carrying one of these scopes (or a sub-scope) never count
    #[serde(default, alias = "scopesDenyList")]
    pub scopes_deny_list: Option<Vec<String>>,
}

impl BracketPair {
    /// Create an unfiltered pair
    pub fn new(opener: &str, closer: &str) -> Self {
        Self {
            opener: opener.to_string(),
            closer: closer.to_string(),
            scopes_allow_list: None,
            scopes_deny_list: None,
        }
    }

    /// Builder: restrict the pair to the given scopes
    pub fn with_allow_list<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes_allow_list = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: exclude the pair from the given scopes
    pub fn with_deny_list<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes_deny_list = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.opener.is_empty() || self.closer.is_empty() {
            return Err(ColorizeError::InvalidBracketPair {
                opener: self.opener.clone(),
                closer: self.closer.clone(),
            });
        }
        Ok(())
    }
}

/// Which side of a pair a bracket token is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketRole {
    Opener,
    Closer,
}

/// The bracket pairs for one language, with their compiled pattern
#[derive(Debug, Clone)]
pub struct BracketRules {
    pairs: Vec<BracketPair>,
    /// Alternation of every opener and closer, longest first (None if no pairs)
    pattern: Option<Regex>,
}

impl BracketRules {
    /// Validate the pairs and compile their pattern
    pub fn new(pairs: Vec<BracketPair>) -> Result<Self> {
        for pair in &pairs {
            pair.validate()?;
        }
        let pattern = build_pattern(&pairs)?;
        Ok(Self { pairs, pattern })
    }

    /// The pairs in declaration order
    pub fn pairs(&self) -> &[BracketPair] {
        &self.pairs
    }

    /// Check if no pairs are configured
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Find the first bracket in text starting at position
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }
        self.pattern
            .as_ref()?
            .find_at(text, start)
            .map(|m| (m.start(), m.end()))
    }

    /// Classify trimmed token content as an opener or closer
    ///
    /// Returns the first pair (in declaration order) naming the content on
    /// either side. The content is an opener if any pair opens with it.
    pub fn classify(&self, content: &str) -> Option<(&BracketPair, BracketRole)> {
        let pair = self
            .pairs
            .iter()
            .find(|pair| pair.opener == content || pair.closer == content)?;
        let role = if self.pairs.iter().any(|pair| pair.opener == content) {
            BracketRole::Opener
        } else {
            BracketRole::Closer
        };
        Some((pair, role))
    }

    /// The opener matching a closer (first pair with that closer wins)
    pub fn opener_for(&self, closer: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.closer == closer)
            .map(|pair| pair.opener.as_str())
    }
}

/// Build the bracket alternation: unique strings, longest first, escaped
fn build_pattern(pairs: &[BracketPair]) -> Result<Option<Regex>> {
    let mut brackets: Vec<&str> = Vec::new();
    for pair in pairs {
        for bracket in [pair.opener.as_str(), pair.closer.as_str()] {
            if !brackets.contains(&bracket) {
                brackets.push(bracket);
            }
        }
    }
    if brackets.is_empty() {
        return Ok(None);
    }

    // Stable: equal lengths keep declaration order
    brackets.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = brackets
        .iter()
        .map(|bracket| regex::escape(bracket))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(Regex::new(&alternation)?))
}
