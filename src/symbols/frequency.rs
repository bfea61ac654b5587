use std::collections::BTreeMap;

use serde::Serialize;

use crate::frontend::{Cursor, TokenBuffer, TranslationUnit};
use crate::ir::{Linkage, SourceLocation, TokenKind};

/// First-seen data for one entity plus how often it was referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyRecord {
    #[serde(flatten)]
    pub location: SourceLocation,
    /// The token text at the first occurrence.
    pub text: String,
    pub freq: u32,
    pub kind: String,
    pub linkage: Linkage,
}

/// Occurrence counter per USR.
#[derive(Debug, Default)]
pub struct FrequencyMap {
    records: BTreeMap<String, FrequencyRecord>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `usr`. `first_seen` builds the record on the
    /// first occurrence; later ones only bump the counter.
    pub fn record<F>(&mut self, usr: &str, first_seen: F)
    where
        F: FnOnce() -> FrequencyRecord,
    {
        match self.records.get_mut(usr) {
            Some(record) => record.freq += 1,
            None => {
                let mut record = first_seen();
                record.freq = 1;
                self.records.insert(usr.to_string(), record);
            }
        }
    }

    pub fn get(&self, usr: &str) -> Option<&FrequencyRecord> {
        self.records.get(usr)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_report(self, filename: String) -> FrequencyReport {
        FrequencyReport {
            filename,
            symbols: self.records.into_values().collect(),
        }
    }
}

/// `count_symbols` output document.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    pub filename: String,
    pub symbols: Vec<FrequencyRecord>,
}

/// Resolve an annotated identifier to the declaration it stands for.
///
/// Declarations resolve to themselves; expressions to their definition, or
/// failing that to what they reference. Any other kind is logged and skipped.
fn resolve_declaration<'c>(cursor: Cursor<'c>) -> Option<Cursor<'c>> {
    let kind = cursor.kind();
    if kind.is_declaration() {
        Some(cursor)
    } else if kind.is_expression() {
        cursor.definition_or_referenced()
    } else {
        tracing::warn!(cursor_kind = %kind, "Unknown cursor type, skipping token");
        None
    }
}

/// Single pass over the token stream counting references per entity.
pub fn count_symbols(tu: &TranslationUnit<'_>, tokens: &TokenBuffer<'_>) -> FrequencyReport {
    let mut map = FrequencyMap::new();

    for token in tokens.iter().filter(|t| t.kind() == TokenKind::Identifier) {
        let Some(decl) = resolve_declaration(token.annotate()) else {
            continue;
        };

        map.record(&decl.usr(), || FrequencyRecord {
            location: decl.location().spelling_location(),
            text: token.spelling(),
            freq: 1,
            kind: decl.kind().spelling(),
            linkage: decl.linkage(),
        });
    }

    let filename = tu.spelling();
    tracing::debug!(file = %filename, symbols = map.len(), "frequency pass finished");
    map.into_report(filename)
}
