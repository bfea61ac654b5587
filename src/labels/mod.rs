//! Juliet test-case label extraction from comment blocks.
//!
//! Juliet sources mark flawed and fixed code with comments such as
//! `/* POTENTIAL FLAW: ... */` or `/* FIX: ... */`. Consecutive comment tokens
//! form a block; each block that carries at least one label is reported once,
//! together with the declaration enclosing the code right after it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::frontend::{ChildVisit, Cursor, CursorKind, TokenBuffer, TranslationUnit};
use crate::ir::{SourceLocation, TokenKind};

// A label is an upper-case run right after the comment opener, ended by ':'
static LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(/\*|//)\s*([A-Z0-9 ]+):").unwrap());

/// Return the label carried by a comment's text, if any.
pub fn match_label(text: &str) -> Option<&str> {
    LABEL_RE
        .captures(text)
        .and_then(|cap| cap.get(2))
        .map(|m| m.as_str())
}

/// A run of consecutive comment tokens with at least one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Index of the first comment token of the block.
    pub start: usize,
    /// Index of the first token after the block, if the block does not end the file.
    pub next: Option<usize>,
    /// Labels in the order they appear, top to bottom.
    pub labels: Vec<String>,
}

/// Group a token stream into comment blocks and keep the labelled ones.
pub fn labeled_blocks<S: AsRef<str>>(tokens: &[(TokenKind, S)]) -> Vec<CommentBlock> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].0 != TokenKind::Comment {
            i += 1;
            continue;
        }

        let start = i;
        let mut labels = Vec::new();
        while i < tokens.len() && tokens[i].0 == TokenKind::Comment {
            if let Some(label) = match_label(tokens[i].1.as_ref()) {
                labels.push(label.to_string());
            }
            i += 1;
        }

        if !labels.is_empty() {
            blocks.push(CommentBlock {
                start,
                next: (i < tokens.len()).then_some(i),
                labels,
            });
        }
    }

    blocks
}

/// One reported comment block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRecord {
    pub file: String,
    pub line: u32,
    pub parent_kind: String,
    pub parent_name: String,
    pub labels: Vec<String>,
}

/// Scan a translation unit's tokens for labelled comment blocks.
pub fn extract(tu: &TranslationUnit<'_>, tokens: &TokenBuffer<'_>) -> Vec<LabelRecord> {
    let lexed: Vec<(TokenKind, String)> = tokens
        .iter()
        .map(|t| {
            let kind = t.kind();
            // Only comment text is ever matched
            let text = if kind == TokenKind::Comment {
                t.spelling()
            } else {
                String::new()
            };
            (kind, text)
        })
        .collect();

    let mut records = Vec::new();
    for block in labeled_blocks(&lexed) {
        let Some(start) = tokens.get(block.start) else {
            continue;
        };
        let location = start.location().file_location();

        let parent = match block.next.and_then(|i| tokens.get(i)) {
            Some(next) => {
                let at = next.location().file_location();
                enclosing_declaration(next.annotate(), tu.cursor(), &at)
            }
            None => Some(tu.cursor()),
        };

        let (parent_kind, parent_name) = match parent {
            Some(cursor) => (cursor.kind().spelling(), cursor.spelling()),
            None => (String::new(), String::new()),
        };

        tracing::debug!(
            file = %location.file,
            line = location.line,
            labels = ?block.labels,
            "labelled comment block"
        );

        records.push(LabelRecord {
            file: location.file,
            line: location.line,
            parent_kind,
            parent_name,
            labels: block.labels,
        });
    }

    records
}

/// The declaration a labelled block belongs to, given the cursor of the token
/// following it: its semantic parent, or the declaration itself when the
/// parent is the translation unit (a label in front of a top-level
/// declaration).
///
/// Macro expansions and type references have no semantic parent; for those
/// the innermost function spanning the token's position `at` is used.
fn enclosing_declaration<'a>(
    annotated: Cursor<'a>,
    root: Cursor<'a>,
    at: &SourceLocation,
) -> Option<Cursor<'a>> {
    match annotated.semantic_parent() {
        Some(parent) if parent.kind() != CursorKind::TRANSLATION_UNIT => Some(parent),
        _ if annotated.kind().is_declaration() => Some(annotated),
        parent => enclosing_function(root, at).or(parent),
    }
}

/// The innermost function declaration under `root` whose extent covers `at`.
fn enclosing_function<'a>(root: Cursor<'a>, at: &SourceLocation) -> Option<Cursor<'a>> {
    let mut found = None;
    root.visit_children(|cursor, _| {
        let (start, end) = cursor.extent();
        if start.file != at.file || !(start.offset..end.offset).contains(&at.offset) {
            return ChildVisit::Continue;
        }
        if cursor.kind().is_function() {
            found = Some(cursor);
        }
        ChildVisit::Recurse
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(items: &[(TokenKind, &'static str)]) -> Vec<(TokenKind, &'static str)> {
        items.to_vec()
    }

    #[test]
    fn matches_line_and_block_comments() {
        assert_eq!(match_label("// BAD 1: trigger"), Some("BAD 1"));
        assert_eq!(match_label("/* POTENTIAL FLAW: data may be NULL */"), Some("POTENTIAL FLAW"));
        assert_eq!(match_label("/*FIX: use a bounded copy */"), Some("FIX"));
    }

    #[test]
    fn ignores_non_label_comments() {
        assert_eq!(match_label("// just a note: nothing here"), None);
        assert_eq!(match_label("/* TODO */"), None);
        assert_eq!(match_label("  // FLAW: indented text is not at the start"), None);
    }

    #[test]
    fn groups_consecutive_comments_in_order() {
        let tokens = lex(&[
            (TokenKind::Keyword, "int"),
            (TokenKind::Comment, "/* FIX: first */"),
            (TokenKind::Comment, "/* unrelated */"),
            (TokenKind::Comment, "// POTENTIAL FLAW: second"),
            (TokenKind::Identifier, "data"),
        ]);
        let blocks = labeled_blocks(&tokens);
        assert_eq!(
            blocks,
            vec![CommentBlock {
                start: 1,
                next: Some(4),
                labels: vec!["FIX".into(), "POTENTIAL FLAW".into()],
            }]
        );
    }

    #[test]
    fn block_without_labels_is_dropped() {
        let tokens = lex(&[
            (TokenKind::Comment, "/* plain comment */"),
            (TokenKind::Identifier, "x"),
            (TokenKind::Comment, "// FLAW: real"),
            (TokenKind::Punctuation, ";"),
        ]);
        let blocks = labeled_blocks(&tokens);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, 2);
        assert_eq!(blocks[0].labels, vec!["FLAW".to_string()]);
    }

    #[test]
    fn trailing_block_has_no_next_token() {
        let tokens = lex(&[
            (TokenKind::Punctuation, "}"),
            (TokenKind::Comment, "/* INCIDENTAL: end of file */"),
        ]);
        let blocks = labeled_blocks(&tokens);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].next, None);
    }

    #[test]
    fn separate_blocks_are_reported_separately() {
        let tokens = lex(&[
            (TokenKind::Comment, "// GOOD: one"),
            (TokenKind::Identifier, "a"),
            (TokenKind::Comment, "// GOOD: two"),
            (TokenKind::Identifier, "b"),
        ]);
        let labels: Vec<Vec<String>> = labeled_blocks(&tokens)
            .into_iter()
            .map(|b| b.labels)
            .collect();
        assert_eq!(labels, vec![vec!["GOOD".to_string()], vec!["GOOD".to_string()]]);
    }
}
