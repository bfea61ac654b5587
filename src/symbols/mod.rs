//! Symbol maps keyed by USR.
//!
//! A symbol is identified by the declaration an occurrence resolves to, not by
//! its spelling, so every textual occurrence of the same entity collapses into
//! one record. Records are created on first sight and only grow afterwards.

pub mod frequency;

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::config::SymbolSettings;
use crate::frontend::{ChildVisit, Cursor, CursorKind, TranslationUnit};
use crate::ir::{Availability, Linkage, SourceLocation, Visibility};

pub use frequency::{FrequencyMap, FrequencyRecord, FrequencyReport};

/// Everything known about one referenced entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub spelling: String,
    pub kind: String,
    pub is_builtin: bool,
    /// Declaration site; absent for compiler intrinsics.
    pub origin: Option<SourceLocation>,
    pub has_definition: bool,
    pub linkage: Linkage,
    pub availability: Availability,
    pub visibility: Visibility,
    /// Occurrences keyed by byte offset.
    pub occurrences: BTreeMap<u32, SourceLocation>,
}

impl SymbolRecord {
    /// Build a record from the declaration cursor an occurrence resolved to.
    pub fn from_origin(origin: &Cursor<'_>, builtin_prefix: &str) -> Self {
        let spelling = origin.spelling();
        let is_builtin = spelling.starts_with(builtin_prefix);
        // An intrinsic's location is meaningless
        let location = (!is_builtin).then(|| origin.location().spelling_location());

        Self {
            kind: origin.kind().spelling(),
            is_builtin,
            origin: location,
            has_definition: origin.definition().is_some(),
            linkage: origin.linkage(),
            availability: origin.availability(),
            visibility: origin.visibility(),
            occurrences: BTreeMap::new(),
            spelling,
        }
    }
}

/// Accumulates one [`SymbolRecord`] per USR.
#[derive(Debug, Default)]
pub struct SymbolMap {
    records: BTreeMap<String, SymbolRecord>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note an occurrence of the entity `usr`. `populate` runs only the first
    /// time the USR is seen. An offset already recorded is left untouched.
    pub fn record<F>(&mut self, usr: &str, occurrence: SourceLocation, populate: F)
    where
        F: FnOnce() -> SymbolRecord,
    {
        let record = self
            .records
            .entry(usr.to_string())
            .or_insert_with(populate);
        record
            .occurrences
            .entry(occurrence.offset)
            .or_insert(occurrence);
    }

    pub fn get(&self, usr: &str) -> Option<&SymbolRecord> {
        self.records.get(usr)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finalize into the serializable report, dropping unnamed symbols and
    /// the configured noise names.
    pub fn into_report(self, filename: String, ignored: &HashSet<String>) -> SymbolReport {
        let symbols = self
            .records
            .into_values()
            .filter(|r| !r.spelling.is_empty() && !ignored.contains(&r.spelling))
            .map(SymbolEntry::from)
            .collect();
        SymbolReport { filename, symbols }
    }
}

/// `find_symbols` output document.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport {
    pub filename: String,
    pub symbols: Vec<SymbolEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolEntry {
    pub is_builtin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<SourceLocation>,
    pub spelling: String,
    pub kind: String,
    pub linkage: Linkage,
    pub availability: Availability,
    pub visibility: Visibility,
    pub def: bool,
    pub occurrences: Vec<SourceLocation>,
}

impl From<SymbolRecord> for SymbolEntry {
    fn from(record: SymbolRecord) -> Self {
        Self {
            is_builtin: record.is_builtin,
            origin: record.origin,
            spelling: record.spelling,
            kind: record.kind,
            linkage: record.linkage,
            availability: record.availability,
            visibility: record.visibility,
            def: record.has_definition,
            occurrences: record.occurrences.into_values().collect(),
        }
    }
}

/// Cursors that name an entity: declarations and the three reference forms.
fn names_entity(kind: CursorKind) -> bool {
    kind.is_declaration()
        || kind == CursorKind::DECL_REF_EXPR
        || kind == CursorKind::MEMBER_REF_EXPR
        || kind == CursorKind::TYPE_REF
}

/// Walk the whole AST and collect every entity referenced from the main file.
pub fn map_symbols(tu: &TranslationUnit<'_>, settings: &SymbolSettings) -> SymbolReport {
    let tu_name = tu.spelling();
    let mut map = SymbolMap::new();

    tu.cursor().visit_children(|cursor, _parent| {
        let location = cursor.location().spelling_location();
        if location.file == tu_name && names_entity(cursor.kind()) {
            if let Some(origin) = cursor.referenced() {
                let usr = origin.usr();
                map.record(&usr, location, || {
                    SymbolRecord::from_origin(&origin, &settings.builtin_prefix)
                });
            }
        }
        ChildVisit::Recurse
    });

    tracing::debug!(file = %tu_name, symbols = map.len(), "symbol walk finished");
    let ignored: HashSet<String> = settings.ignored_names.iter().cloned().collect();
    map.into_report(tu_name, &ignored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loc(offset: u32, line: u32) -> SourceLocation {
        SourceLocation {
            file: "a.c".into(),
            line,
            column: 1,
            offset,
        }
    }

    fn record(spelling: &str) -> SymbolRecord {
        SymbolRecord {
            spelling: spelling.into(),
            kind: "VarDecl".into(),
            is_builtin: false,
            origin: Some(loc(4, 1)),
            has_definition: true,
            linkage: Linkage::External,
            availability: Availability::Available,
            visibility: Visibility::Default,
            occurrences: BTreeMap::new(),
        }
    }

    #[test]
    fn repeated_offsets_collapse() {
        let mut map = SymbolMap::new();
        map.record("c:@x", loc(4, 1), || record("x"));
        map.record("c:@x", loc(4, 1), || record("x"));
        map.record("c:@x", loc(15, 1), || record("x"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("c:@x").unwrap().occurrences.len(), 2);
    }

    #[test]
    fn populate_runs_once() {
        let mut map = SymbolMap::new();
        let mut calls = 0;
        for offset in [1, 2, 3] {
            map.record("c:@f", loc(offset, 1), || {
                calls += 1;
                record("f")
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(map.get("c:@f").unwrap().occurrences.len(), 3);
    }

    #[test]
    fn report_drops_unnamed_and_ignored() {
        let mut map = SymbolMap::new();
        map.record("c:@x", loc(4, 1), || record("x"));
        map.record("c:@F@malloc", loc(20, 2), || record("malloc"));
        map.record("", loc(30, 3), || record(""));

        let ignored: HashSet<String> = ["malloc".to_string()].into_iter().collect();
        let report = map.into_report("a.c".into(), &ignored);
        let names: Vec<&str> = report.symbols.iter().map(|s| s.spelling.as_str()).collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn builtin_entry_omits_origin() {
        let mut builtin = record("__builtin_va_list");
        builtin.is_builtin = true;
        builtin.origin = None;
        let json = serde_json::to_value(SymbolEntry::from(builtin)).unwrap();
        assert_eq!(json["is_builtin"], true);
        assert!(json.get("origin").is_none());
        assert_eq!(json["linkage"], 4);
    }

    #[test]
    fn occurrences_serialize_in_offset_order() {
        let mut map = SymbolMap::new();
        map.record("c:@y", loc(40, 3), || record("y"));
        map.record("c:@y", loc(10, 1), || record("y"));
        let report = map.into_report("a.c".into(), &HashSet::new());
        let offsets: Vec<u32> = report.symbols[0].occurrences.iter().map(|o| o.offset).collect();
        assert_eq!(offsets, vec![10, 40]);
    }
}
