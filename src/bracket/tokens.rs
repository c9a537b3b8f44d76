//! Token types consumed from the upstream tokenizer
//!
//! Field names follow the tokenizer's JSON token dump so a dump can be
//! deserialized directly: `content`, `offset`, `explanation[].content`,
//! `explanation[].scopes[].scopeName`. The assigned bracket style is written
//! back out as `htmlStyle`.

use serde::{Deserialize, Serialize, Serializer};

use super::style::BracketStyle;

/// A single scope name (e.g. `string.quoted.double.ts`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "scopeName")]
    pub name: String,
}

impl Scope {
    /// Create a scope from its dotted name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Check if this scope is `prefix` itself or nested under it
    ///
    /// `meta.type` matches `meta.type` and `meta.type.annotation`, but not
    /// `meta.typeparameters`.
    pub fn is_under(&self, prefix: &str) -> bool {
        self.name
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    }
}

/// Scope annotation for one character run inside a token
///
/// Scopes are ordered root first: index 0 is the grammar's root scope
/// (`source.ts`) and the last entry is the deepest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// Text covered by this run
    pub content: String,
    /// Scopes applied to the run, outermost first
    pub scopes: Vec<Scope>,
}

impl Explanation {
    /// Create an explanation from its text and scope names
    pub fn new<S: AsRef<str>>(content: impl Into<String>, scopes: &[S]) -> Self {
        Self {
            content: content.into(),
            scopes: scopes.iter().map(|s| Scope::new(s.as_ref())).collect(),
        }
    }
}

/// A highlighted token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Raw text content
    pub content: String,
    /// Byte offset of the token in the source
    pub offset: usize,
    /// Per-run scope explanation, absent when the tokenizer did not record it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Vec<Explanation>>,
    /// Bracket style assigned by the colorizer
    #[serde(
        rename = "htmlStyle",
        default,
        skip_deserializing,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_style"
    )]
    pub style: Option<BracketStyle>,
}

impl Token {
    /// Create a token without explanation data
    pub fn new(content: impl Into<String>, offset: usize) -> Self {
        Self {
            content: content.into(),
            offset,
            explanation: None,
            style: None,
        }
    }

    /// Builder: attach explanation runs
    pub fn with_explanation(mut self, explanation: Vec<Explanation>) -> Self {
        self.explanation = Some(explanation);
        self
    }

    /// Content with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    /// Byte length of the content
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the token has no content
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Scopes of the first explanation run, if any
    pub fn first_scopes(&self) -> Option<&[Scope]> {
        self.explanation
            .as_deref()
            .and_then(|runs| runs.first())
            .map(|run| run.scopes.as_slice())
    }
}

fn serialize_style<S: Serializer>(
    style: &Option<BracketStyle>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match style {
        Some(style) => serializer.collect_str(style),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_is_under() {
        let scope = Scope::new("meta.type.annotation.ts");
        assert!(scope.is_under("meta.type"));
        assert!(scope.is_under("meta.type.annotation.ts"));
        assert!(!scope.is_under("meta.ty"));
        assert!(!Scope::new("meta.typeparameters.ts").is_under("meta.type"));
    }

    #[test]
    fn test_token_trimmed() {
        let token = Token::new("  { ", 4);
        assert_eq!(token.trimmed(), "{");
        assert_eq!(token.len(), 4);
        assert!(!token.is_empty());
    }

    #[test]
    fn test_first_scopes() {
        let token = Token::new("x", 0);
        assert!(token.first_scopes().is_none());

        let token = token.with_explanation(vec![Explanation::new(
            "x",
            &["source.ts", "variable.other.readwrite.ts"],
        )]);
        let scopes = token.first_scopes().unwrap();
        assert_eq!(scopes.len(), 2);
        assert_eq!(scopes[0].name, "source.ts");
    }
}
