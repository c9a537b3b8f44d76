//! Scope classification for bracket tokens
//!
//! Decides from a token's explanation scopes whether it can take part in
//! bracket matching at all, and which embedded language it belongs to.

use super::tokens::{Scope, Token};

const COMMENT_SCOPE: &str = "comment.";
const STRING_SCOPE: &str = "string.";
const SOURCE_SCOPE: &str = "source.";

/// Check if a token must be skipped for bracket purposes
///
/// A token is skipped when it has no explanation data, when it sits in a
/// comment or string deeper than any embedded-language scope, when an
/// allow-list is given and none of its scopes is allowed, or when a
/// deny-list is given and any of its scopes is denied.
pub fn should_ignore_token(
    token: &Token,
    embedded_scopes: &[String],
    allow_list: Option<&[String]>,
    deny_list: Option<&[String]>,
) -> bool {
    let Some(scopes) = token.first_scopes() else {
        return true;
    };

    let deepest = |prefix: &str| scopes.iter().rposition(|scope| scope.name.starts_with(prefix));
    let embedded = scopes.iter().rposition(|scope| {
        embedded_scopes
            .iter()
            .any(|marker| scope.name.starts_with(marker.as_str()))
    });
    // None orders below every index, so an absent embedded scope never wins
    if deepest(COMMENT_SCOPE) > embedded || deepest(STRING_SCOPE) > embedded {
        return true;
    }

    if let Some(allowed) = allow_list.filter(|list| !list.is_empty()) {
        if !any_scope_under(token, allowed) {
            return true;
        }
    }

    if let Some(denied) = deny_list.filter(|list| !list.is_empty()) {
        if any_scope_under(token, denied) {
            return true;
        }
    }

    false
}

/// Check if any scope of any explanation run is one of `prefixes` or below it
fn any_scope_under(token: &Token, prefixes: &[String]) -> bool {
    token
        .explanation
        .iter()
        .flatten()
        .flat_map(|run| run.scopes.iter())
        .any(|scope| prefixes.iter().any(|prefix| scope.is_under(prefix)))
}

/// The language tag of the deepest `source.<lang>` scope in the first run
///
/// `source.ts` yields `ts`. Scopes with further dots (`source.css.scss`)
/// are not language roots.
pub fn embedded_language(token: &Token) -> Option<&str> {
    token.first_scopes()?.iter().rev().find_map(language_of)
}

fn language_of(scope: &Scope) -> Option<&str> {
    let lang = scope.name.strip_prefix(SOURCE_SCOPE)?;
    let is_word = !lang.is_empty() && lang.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_word.then_some(lang)
}
