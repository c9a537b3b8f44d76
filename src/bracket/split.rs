//! Token splitting on bracket boundaries
//!
//! The tokenizer may hand over a run like `({` or `foo(` as one token. This
//! module cuts such tokens so every configured bracket is a token of its
//! own, and hands each fragment the explanation runs that cover it.

use std::ops::Range;

use super::language::ResolvedConfig;
use super::rules::BracketRules;
use super::scope::should_ignore_token;
use super::tokens::{Explanation, Token};

/// Split a raw token under a language's settings
///
/// Tokens are returned unchanged when no brackets are configured, when the
/// palette is blank, or when the whole token is ignored (no explanation,
/// or plain string/comment text).
pub fn split_token(
    raw: &Token,
    config: &ResolvedConfig<'_>,
    embedded_scopes: &[String],
) -> Vec<Token> {
    if !config.is_active() || should_ignore_token(raw, embedded_scopes, None, None) {
        return vec![raw.clone()];
    }
    split_on_brackets(raw, config.rules)
}

/// Cut a token into bracket and non-bracket fragments
///
/// Fragments cover the token's content exactly and in order.
pub fn split_on_brackets(raw: &Token, rules: &BracketRules) -> Vec<Token> {
    let pieces = bracket_pieces(&raw.content, rules);
    if pieces.len() <= 1 {
        return vec![raw.clone()];
    }

    let spans = raw
        .explanation
        .as_deref()
        .map(|runs| explanation_spans(&raw.content, runs));

    let fragments: Vec<Token> = pieces
        .into_iter()
        .map(|piece| Token {
            content: raw.content[piece.clone()].to_string(),
            offset: raw.offset + piece.start,
            explanation: raw
                .explanation
                .as_deref()
                .zip(spans.as_deref())
                .map(|(runs, spans)| overlapping_runs(runs, spans, &piece, raw.len())),
            style: raw.style.clone(),
        })
        .collect();

    tracing::trace!(
        offset = raw.offset,
        content = raw.content.as_str(),
        fragments = fragments.len(),
        "split token"
    );
    fragments
}

/// Byte ranges of the fragments: text between brackets, and each bracket
fn bracket_pieces(content: &str, rules: &BracketRules) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut pos = 0;

    while let Some((start, end)) = rules.find_at(content, pos) {
        if start > pos {
            pieces.push(pos..start);
        }
        pieces.push(start..end);
        pos = end;
    }
    if pos < content.len() {
        pieces.push(pos..content.len());
    }

    pieces
}

/// Recompute the byte span each explanation run covers in the token
///
/// Whitespace merging can leave the runs' leading and trailing whitespace
/// out of step with the token's, so a lone run spans the whole token, the
/// first run takes the token's leading whitespace plus its own trimmed
/// content, the last run its own trimmed content plus the token's trailing
/// whitespace, and interior runs keep their raw length.
pub fn explanation_spans(content: &str, runs: &[Explanation]) -> Vec<Range<usize>> {
    let leading = content.len() - content.trim_start().len();
    let trailing = content.len() - content.trim_end().len();
    let last = runs.len().saturating_sub(1);

    let mut start = 0;
    runs.iter()
        .enumerate()
        .map(|(i, run)| {
            let len = if runs.len() == 1 {
                content.len()
            } else if i == 0 {
                leading + run.content.trim_start().len()
            } else if i == last {
                run.content.trim_end().len() + trailing
            } else {
                run.content.len()
            };
            let span = start..start + len;
            start += len;
            span
        })
        .collect()
}

/// The runs whose span shares at least one byte with the fragment
///
/// An empty run belongs to the fragment holding its position, or to the
/// last fragment when it sits at the very end.
fn overlapping_runs(
    runs: &[Explanation],
    spans: &[Range<usize>],
    piece: &Range<usize>,
    len: usize,
) -> Vec<Explanation> {
    runs.iter()
        .zip(spans)
        .filter(|(_, span)| {
            if span.is_empty() {
                piece.start <= span.start && (span.start < piece.end || piece.end == len)
            } else {
                span.start < piece.end && piece.start < span.end
            }
        })
        .map(|(run, _)| run.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::language::LanguageTable;
    use crate::bracket::rules::BracketPair;
    use crate::config::{ColorSource, ColorizerConfig};

    fn rules() -> BracketRules {
        BracketRules::new(vec![
            BracketPair::new("(", ")"),
            BracketPair::new("[", "]"),
            BracketPair::new("{", "}"),
        ])
        .unwrap()
    }

    fn contents(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.content.as_str()).collect()
    }

    fn run_contents(token: &Token) -> Vec<&str> {
        token
            .explanation
            .iter()
            .flatten()
            .map(|run| run.content.as_str())
            .collect()
    }

    #[test]
    fn test_pieces() {
        let rules = rules();
        assert_eq!(bracket_pieces("foo(bar)", &rules), [0..3, 3..4, 4..7, 7..8]);
        assert_eq!(bracket_pieces("({", &rules), [0..1, 1..2]);
        assert_eq!(bracket_pieces("plain", &rules), [0..5]);
        assert_eq!(bracket_pieces("", &rules), Vec::<Range<usize>>::new());
    }

    #[test]
    fn test_split_offsets() {
        let raw = Token::new("a(b", 10);
        let parts = split_on_brackets(&raw, &rules());
        assert_eq!(contents(&parts), ["a", "(", "b"]);
        let offsets: Vec<_> = parts.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, [10, 11, 12]);
    }

    #[test]
    fn test_surrounding_whitespace_split() {
        let raw = Token::new(" ( ", 3);
        assert_eq!(
            split_on_brackets(&raw, &rules()),
            [Token::new(" ", 3), Token::new("(", 4), Token::new(" ", 5)]
        );
        let raw = Token::new("(", 3);
        assert_eq!(split_on_brackets(&raw, &rules()), [raw.clone()]);
    }

    #[test]
    fn test_explanation_spans_single_run() {
        let runs = vec![Explanation::new("({", &["source.ts"])];
        assert_eq!(explanation_spans("  ({ ", &runs), [0..5]);
    }

    #[test]
    fn test_explanation_spans_whitespace_mismatch() {
        // Whitespace was merged into the token but not into the runs
        let runs = vec![
            Explanation::new("(", &["source.ts", "meta.brace.round.ts"]),
            Explanation::new("x", &["source.ts", "variable.ts"]),
            Explanation::new(") ", &["source.ts", "meta.brace.round.ts"]),
        ];
        assert_eq!(explanation_spans("  (x)  ", &runs), [0..3, 3..4, 4..7]);
    }

    #[test]
    fn test_fragments_get_overlapping_runs() {
        let raw = Token::new("foo({", 0).with_explanation(vec![
            Explanation::new("foo", &["source.ts", "entity.name.function.ts"]),
            Explanation::new("(", &["source.ts", "meta.brace.round.ts"]),
            Explanation::new("{", &["source.ts", "punctuation.definition.block.ts"]),
        ]);
        let parts = split_on_brackets(&raw, &rules());
        assert_eq!(contents(&parts), ["foo", "(", "{"]);
        assert_eq!(run_contents(&parts[0]), ["foo"]);
        assert_eq!(run_contents(&parts[1]), ["("]);
        assert_eq!(run_contents(&parts[2]), ["{"]);
    }

    #[test]
    fn test_run_spanning_fragments_is_shared() {
        let raw = Token::new("a[b]", 0).with_explanation(vec![
            Explanation::new("a[b", &["source.ts", "meta.array.ts"]),
            Explanation::new("]", &["source.ts", "meta.brace.square.ts"]),
        ]);
        let parts = split_on_brackets(&raw, &rules());
        assert_eq!(contents(&parts), ["a", "[", "b", "]"]);
        assert_eq!(run_contents(&parts[1]), ["a[b"]);
        assert_eq!(run_contents(&parts[3]), ["]"]);
    }

    #[test]
    fn test_empty_runs_are_kept() {
        let raw = Token::new("()", 0).with_explanation(vec![
            Explanation::new("", &["source.ts", "meta.lead.ts"]),
            Explanation::new("(", &["source.ts", "meta.brace.round.ts"]),
            Explanation::new("", &["source.ts", "meta.between.ts"]),
            Explanation::new(")", &["source.ts", "meta.brace.round.ts"]),
            Explanation::new("", &["source.ts", "meta.trail.ts"]),
        ]);
        let parts = split_on_brackets(&raw, &rules());
        assert_eq!(contents(&parts), ["(", ")"]);
        assert_eq!(run_contents(&parts[0]), ["", "("]);
        assert_eq!(run_contents(&parts[1]), ["", ")", ""]);
        let total: usize = parts.iter().map(|t| run_contents(t).len()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_split_token_skips_strings_and_inactive() {
        let config =
            ColorizerConfig::default().with_colors(ColorSource::flat(["Y", "P", "B", "R"]));
        let table = LanguageTable::new(&config).unwrap();
        let markers = table.embedded_scopes();

        let string = Token::new("\"(a)\"", 0).with_explanation(vec![Explanation::new(
            "\"(a)\"",
            &["source.ts", "string.quoted.double.ts"],
        )]);
        assert_eq!(split_token(&string, &table.resolve("ts"), markers).len(), 1);

        let code = Token::new("f(a)", 0)
            .with_explanation(vec![Explanation::new("f(a)", &["source.ts"])]);
        assert_eq!(split_token(&code, &table.resolve("ts"), markers).len(), 4);
        assert_eq!(split_token(&code, &table.resolve("html"), markers).len(), 1);

        let bare = Token::new("f(a)", 0);
        assert_eq!(split_token(&bare, &table.resolve("ts"), markers).len(), 1);
    }

    #[test]
    fn test_blank_palette_disables_splitting() {
        let config = ColorizerConfig::default().with_colors(ColorSource::Flat(Vec::new()));
        let table = LanguageTable::new(&config).unwrap();
        let code = Token::new("f(a)", 0)
            .with_explanation(vec![Explanation::new("f(a)", &["source.ts"])]);
        assert_eq!(split_token(&code, &table.resolve("ts"), table.embedded_scopes()).len(), 1);
    }
}
