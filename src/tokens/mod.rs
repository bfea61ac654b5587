//! Annotated token streams.
//!
//! Every non-comment token of a file becomes a [`TokenRecord`] carrying its
//! lexical kind, its line, its text and the kind of the cursor it maps to.
//! Identifiers additionally carry what they resolve to.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::frontend::{Cursor, CursorKind, TokenBuffer, TranslationUnit};
use crate::ir::TokenKind;

/// `tokenize` output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenReport {
    pub filename: String,
    pub tokens: Vec<TokenRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub kind: TokenKind,
    pub line: u32,
    pub text: String,
    /// Spelling of the cursor kind the token annotates to.
    pub sem: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sym: Option<TokenSymbol>,
}

/// What an identifier token resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSymbol {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none", default)]
    pub reference: Option<RefLocation>,
}

/// Where an expression's target is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefLocation {
    pub file: String,
    pub linenum: u32,
}

/// Cursor kinds whose tokens are never emitted. They show up inside
/// preprocessor directives.
pub fn is_spurious(kind: CursorKind) -> bool {
    kind == CursorKind::INVALID_FILE || kind == CursorKind::INCLUSION_DIRECTIVE
}

/// Build the symbol sub-record for an identifier annotated to `cursor`.
fn describe_identifier(cursor: &Cursor<'_>) -> TokenSymbol {
    let mut sym = TokenSymbol {
        type_name: cursor.canonical_type_spelling(),
        ..Default::default()
    };

    let kind = cursor.kind();
    if kind.is_declaration() {
        sym.id = Some(cursor.usr());
        sym.kind = Some(kind.spelling());
    } else if kind.is_expression() {
        if let Some(target) = cursor.definition_or_referenced() {
            let location = target.location().spelling_location();
            sym.reference = Some(RefLocation {
                file: location.file,
                linenum: location.line,
            });
            sym.id = Some(target.usr());
            sym.kind = Some(target.kind().spelling());
        }
    }

    sym
}

/// Single pass over a file's tokens.
pub fn annotate_tokens(tu: &TranslationUnit<'_>, tokens: &TokenBuffer<'_>) -> TokenReport {
    let mut records = Vec::with_capacity(tokens.len());

    for token in tokens.iter() {
        let kind = token.kind();
        if kind == TokenKind::Comment {
            continue;
        }

        let cursor = token.annotate();
        let cursor_kind = cursor.kind();
        if is_spurious(cursor_kind) {
            continue;
        }

        let sym = (kind == TokenKind::Identifier).then(|| describe_identifier(&cursor));
        records.push(TokenRecord {
            kind,
            line: token.location().file_location().line,
            text: token.spelling(),
            sem: cursor_kind.spelling(),
            sym,
        });
    }

    TokenReport {
        filename: tu.spelling(),
        tokens: records,
    }
}

/// Output path for a source file: `<dir>/<basename>.tok`.
pub fn output_path(source: &Path, dir: &Path) -> PathBuf {
    let mut name = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tok");
    dir.join(name)
}
