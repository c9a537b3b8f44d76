//! Default bracket pairs and per-language overrides

use indexmap::IndexMap;

use crate::bracket::rules::BracketPair;
use crate::config::LanguageOverride;

/// Scopes that mark a TypeScript angle bracket as a type parameter delimiter
const TYPE_PARAMETER_SCOPES: [&str; 2] = [
    "punctuation.definition.typeparameters.begin.ts",
    "punctuation.definition.typeparameters.end.ts",
];

/// Default pairs: `[]`, `{}`, `()` and type-parameter `<>`
pub fn default_bracket_pairs() -> Vec<BracketPair> {
    vec![
        BracketPair::new("[", "]"),
        BracketPair::new("{", "}"),
        BracketPair::new("(", ")"),
        BracketPair::new("<", ">").with_allow_list(TYPE_PARAMETER_SCOPES),
    ]
}

/// Pairs for Jinja-like template languages
pub fn template_bracket_pairs() -> Vec<BracketPair> {
    vec![
        BracketPair::new("[", "]"),
        BracketPair::new("{", "}"),
        BracketPair::new("(", ")"),
        BracketPair::new("{{", "}}"),
        BracketPair::new("{%", "%}"),
    ]
}

/// Default language overrides
///
/// HTML brackets are tag delimiters, not nesting, so HTML gets no pairs.
pub fn default_language_overrides() -> IndexMap<String, LanguageOverride> {
    let mut langs = IndexMap::new();
    langs.insert(
        "html".to_string(),
        LanguageOverride::default().with_bracket_pairs(Vec::new()),
    );
    for lang in ["jinja", "liquid"] {
        langs.insert(
            lang.to_string(),
            LanguageOverride::default().with_bracket_pairs(template_bracket_pairs()),
        );
    }
    langs
}

/// Scope prefixes that re-admit brackets inside strings and comments
pub fn default_embedded_scopes() -> Vec<String> {
    vec!["meta.embedded.".to_string(), "meta.template.expression.".to_string()]
}
