//! Bracket matching over a flattened token stream
//!
//! Openers are pushed on a stack. A closer searches the stack from the top
//! for the nearest opener of its pair; everything above that opener is
//! unwound and marked unexpected, and the pair takes the depth left on the
//! stack. Closers with no opener anywhere on the stack, and openers still
//! pending at the end, are unexpected. The stack spans line boundaries.

use super::language::{LanguageTable, ResolvedConfig};
use super::rules::BracketRole;
use super::scope::{embedded_language, should_ignore_token};
use super::tokens::Token;

/// Nesting level a bracket is colored by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketLevel {
    /// Matched pair with this many enclosing pairs
    Depth(usize),
    /// No valid partner under the stack discipline
    Unexpected,
}

/// A level decided for one token
#[derive(Debug, Clone, Copy)]
pub struct BracketAssignment<'a> {
    /// Position of the token in the flattened stream
    pub index: usize,
    pub level: BracketLevel,
    /// Settings the style is resolved under
    pub config: ResolvedConfig<'a>,
}

/// An opener waiting for its closer
struct PendingOpener<'a, 't> {
    index: usize,
    bracket: &'t str,
    /// Settings the opener was pushed under
    config: ResolvedConfig<'a>,
}

/// Match brackets across a whole document's tokens
///
/// `lang` is the document language; tokens inside an embedded language are
/// resolved under that language's settings instead. Unwound openers take
/// the settings of the closer that unwound them. Openers left at the end
/// take the document language's settings, or their own when the document
/// language colors nothing.
pub fn match_brackets<'a, 't, I>(
    tokens: I,
    languages: &'a LanguageTable,
    lang: &str,
) -> Vec<BracketAssignment<'a>>
where
    I: IntoIterator<Item = &'t Token>,
{
    let mut stack: Vec<PendingOpener<'a, 't>> = Vec::new();
    let mut assignments = Vec::new();

    for (index, token) in tokens.into_iter().enumerate() {
        let config = languages.resolve(embedded_language(token).unwrap_or(lang));
        if !config.is_active() {
            continue;
        }

        let bracket = token.trimmed();
        let Some((pair, role)) = config.rules.classify(bracket) else {
            continue;
        };
        if should_ignore_token(
            token,
            languages.embedded_scopes(),
            pair.scopes_allow_list.as_deref(),
            pair.scopes_deny_list.as_deref(),
        ) {
            continue;
        }

        match role {
            BracketRole::Opener => stack.push(PendingOpener {
                index,
                bracket,
                config,
            }),
            BracketRole::Closer => {
                let opener = config.rules.opener_for(bracket);
                let found =
                    opener.and_then(|opener| stack.iter().rposition(|p| p.bracket == opener));
                let Some(position) = found else {
                    tracing::trace!(index, bracket, "closer without opener");
                    assignments.push(BracketAssignment {
                        index,
                        level: BracketLevel::Unexpected,
                        config,
                    });
                    continue;
                };

                for unwound in stack.drain(position + 1..) {
                    tracing::trace!(
                        index = unwound.index,
                        bracket = unwound.bracket,
                        "opener unwound"
                    );
                    assignments.push(BracketAssignment {
                        index: unwound.index,
                        level: BracketLevel::Unexpected,
                        config,
                    });
                }
                if let Some(matched) = stack.pop() {
                    let level = BracketLevel::Depth(stack.len());
                    assignments.push(BracketAssignment {
                        index: matched.index,
                        level,
                        config,
                    });
                    assignments.push(BracketAssignment { index, level, config });
                }
            }
        }
    }

    let fallback = languages.resolve(lang);
    for pending in stack {
        tracing::trace!(
            index = pending.index,
            bracket = pending.bracket,
            "opener never closed"
        );
        let config = if fallback.is_active() {
            fallback
        } else {
            pending.config
        };
        assignments.push(BracketAssignment {
            index: pending.index,
            level: BracketLevel::Unexpected,
            config,
        });
    }

    assignments
}
