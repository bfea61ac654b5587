//! clangtok — libclang-driven extractors for C/C++ sources.
//!
//! Four pipelines share one shape: parse a file with libclang, walk its
//! token stream or AST, and derive a view of it.
//!
//! - [`extract_labels`]: Juliet test-case labels found in comment blocks,
//!   with the declaration enclosing each block.
//! - [`find_symbols`]: every entity referenced from the file, with its
//!   declaration site and all occurrence sites.
//! - [`count_symbols`]: every entity referenced by an identifier token, with
//!   how often it occurs.
//! - [`tokenize_file`]: every non-comment token annotated with its semantic
//!   kind and, for identifiers, what it resolves to.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use clangtok::config::Config;
//!
//! let config = Config::default();
//! let report = clangtok::find_symbols(Path::new("CWE121_bad.c"), &[], &config).unwrap();
//! println!("{}", clangtok::output::render_json(&report).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod frontend;
pub mod ir;
pub mod labels;
pub mod logging;
pub mod output;
pub mod symbols;
pub mod tokens;

use std::path::{Path, PathBuf};

use config::Config;
use error::Result;
use frontend::{Index, ParseOptions};
use labels::LabelRecord;
use symbols::{FrequencyReport, SymbolReport};
use tokens::TokenReport;

/// Scan the comment blocks of `path` for Juliet labels.
pub fn extract_labels(
    path: &Path,
    compiler_args: &[String],
    config: &Config,
) -> Result<Vec<LabelRecord>> {
    let index = Index::new(config.parse.display_diagnostics);
    let args = config.parse.compiler_args(compiler_args);
    let tu = index.parse(path, &args, config.parse.options())?;
    let tokens = tu.tokenize_file(path)?;
    Ok(labels::extract(&tu, &tokens))
}

/// Build the symbol map of `path` by walking its full AST.
pub fn find_symbols(
    path: &Path,
    compiler_args: &[String],
    config: &Config,
) -> Result<SymbolReport> {
    let index = Index::new(config.parse.display_diagnostics);
    let args = config.parse.compiler_args(compiler_args);
    // No detailed preprocessing record for the AST walk
    let tu = index.parse(path, &args, ParseOptions::default())?;
    Ok(symbols::map_symbols(&tu, &config.symbols))
}

/// Count references per entity over the identifier tokens of `path`.
pub fn count_symbols(
    path: &Path,
    compiler_args: &[String],
    config: &Config,
) -> Result<FrequencyReport> {
    let index = Index::new(config.parse.display_diagnostics);
    let args = config.parse.compiler_args(compiler_args);
    let tu = index.parse(path, &args, config.parse.options())?;
    let tokens = tu.tokenize_file(path)?;
    Ok(symbols::frequency::count_symbols(&tu, &tokens))
}

/// Annotate every token of `path`. Compiler arguments come from the
/// configuration only: the include directories, then `parse.extra_args`.
pub fn tokenize_file(path: &Path, config: &Config) -> Result<TokenReport> {
    let index = Index::new(config.parse.display_diagnostics);
    let args = config.parse.compiler_args(&config.tokenize.include_args());
    let tu = index.parse(path, &args, config.parse.options())?;
    let tokens = tu.tokenize_file(path)?;
    Ok(tokens::annotate_tokens(&tu, &tokens))
}

/// Tokenize `path` and write the report to `<output_dir>/<basename>.tok`.
/// Returns the written path.
pub fn write_token_file(path: &Path, output_dir: &Path, config: &Config) -> Result<PathBuf> {
    let report = tokenize_file(path, config)?;
    let rendered = output::render_json(&report)?;
    let out = tokens::output_path(path, output_dir);
    std::fs::write(&out, rendered)?;
    tracing::info!(
        source = %path.display(),
        output = %out.display(),
        tokens = report.tokens.len(),
        "wrote token file"
    );
    Ok(out)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::error::ToolError;
    use crate::ir::TokenKind;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn quiet() -> Config {
        let mut config = Config::default();
        config.parse.display_diagnostics = false;
        config
    }

    #[test]
    fn label_before_function_names_the_function() {
        let records = extract_labels(
            Path::new("tests/fixtures/labels/bad_function.c"),
            &[],
            &quiet(),
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        let line = output::csv::render_line(&records[0]);
        assert!(line.ends_with("bad_function.c,1,FunctionDecl,bad,BAD 1"), "{line}");
    }

    #[test]
    fn labels_inside_body_report_enclosing_function() {
        let records = extract_labels(
            Path::new("tests/fixtures/labels/good_function.c"),
            &[],
            &quiet(),
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.line, 4);
        assert_eq!(record.parent_kind, "FunctionDecl");
        assert_eq!(record.parent_name, "good");
        assert_eq!(record.labels, vec!["FIX".to_string(), "POTENTIAL FLAW".to_string()]);
    }

    #[test]
    fn label_before_macro_call_reports_enclosing_function() {
        let records = extract_labels(
            Path::new("tests/fixtures/labels/macro_in_body.c"),
            &[],
            &quiet(),
        )
        .unwrap();
        let lines: Vec<String> = records.iter().map(output::csv::render_line).collect();
        assert_eq!(lines.len(), 2, "{lines:?}");
        assert!(lines[0].ends_with("macro_in_body.c,8,FunctionDecl,good,FIX"), "{}", lines[0]);
        assert!(
            lines[1].ends_with("macro_in_body.c,10,FunctionDecl,good,INCIDENTAL"),
            "{}",
            lines[1]
        );
    }

    #[test]
    fn declaration_and_reference_collapse_into_one_symbol() {
        let report = find_symbols(
            Path::new("tests/fixtures/symbols/round_trip.cpp"),
            &[],
            &quiet(),
        )
        .unwrap();
        let xs: Vec<_> = report
            .symbols
            .iter()
            .filter(|s| s.spelling == "x" && !s.is_builtin)
            .collect();
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].occurrences.len(), 2);
        assert!(xs[0].def);
        assert_eq!(xs[0].kind, "VarDecl");
        assert_eq!(xs[0].origin.as_ref().map(|o| (o.line, o.column)), Some((1, 5)));
        assert!(report.symbols.iter().any(|s| s.spelling == "y"));
    }

    #[test]
    fn frequency_counts_every_reference() {
        let report = count_symbols(
            Path::new("tests/fixtures/symbols/counter.c"),
            &[],
            &quiet(),
        )
        .unwrap();
        let counter = report
            .symbols
            .iter()
            .find(|s| s.text == "counter")
            .unwrap();
        assert_eq!(counter.freq, 4);
        assert_eq!(counter.location.line, 1);
        assert_eq!(counter.location.column, 5);
        assert_eq!(counter.kind, "VarDecl");

        let bump = report.symbols.iter().find(|s| s.text == "bump").unwrap();
        assert_eq!(bump.freq, 1);
        assert_eq!(bump.kind, "FunctionDecl");
    }

    #[test]
    fn macro_tokens_are_skipped_without_aborting() {
        let report = count_symbols(
            Path::new("tests/fixtures/symbols/macro_use.c"),
            &[],
            &quiet(),
        )
        .unwrap();
        assert!(report.symbols.iter().all(|s| s.text != "N" && s.text != "define"));

        let a = report.symbols.iter().find(|s| s.text == "a").unwrap();
        assert_eq!(a.freq, 2);
        assert_eq!(a.location.line, 2);
        assert_eq!(a.kind, "VarDecl");

        let b = report.symbols.iter().find(|s| s.text == "b").unwrap();
        assert_eq!(b.freq, 1);
        assert_eq!(report.symbols.len(), 2);
    }

    #[test]
    fn tokenizer_filters_comments_and_directives() {
        let report = tokenize_file(Path::new("tests/fixtures/tokenize/twice.c"), &quiet()).unwrap();
        assert!(report.filename.ends_with("twice.c"));
        assert!(!report.tokens.is_empty());
        assert!(report.tokens.iter().all(|t| t.kind != TokenKind::Comment));
        assert!(report
            .tokens
            .iter()
            .all(|t| t.sem != "InvalidFile" && t.sem != "InclusionDirective"));
        assert!(report
            .tokens
            .iter()
            .all(|t| t.sym.is_some() == (t.kind == TokenKind::Identifier)));
    }

    #[test]
    fn tokenizer_resolves_identifiers() {
        let report = tokenize_file(Path::new("tests/fixtures/tokenize/twice.c"), &quiet()).unwrap();

        let decl = report
            .tokens
            .iter()
            .find(|t| t.text == "twice" && t.line == 5)
            .unwrap();
        let sym = decl.sym.as_ref().unwrap();
        assert_eq!(sym.kind.as_deref(), Some("FunctionDecl"));
        assert!(sym.id.as_deref().unwrap_or_default().contains("twice"));

        let use_site = report
            .tokens
            .iter()
            .find(|t| t.text == "n" && t.line == 7)
            .unwrap();
        let sym = use_site.sym.as_ref().unwrap();
        assert_eq!(sym.kind.as_deref(), Some("ParmDecl"));
        assert_eq!(sym.reference.as_ref().map(|r| r.linenum), Some(5));
    }

    #[test]
    fn token_file_written_next_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = write_token_file(
            Path::new("tests/fixtures/tokenize/twice.c"),
            dir.path(),
            &quiet(),
        )
        .unwrap();
        assert_eq!(out, dir.path().join("twice.c.tok"));

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("{\n    \"filename\""));
        let parsed: TokenReport = serde_json::from_str(&content).unwrap();
        assert!(parsed.filename.ends_with("twice.c"));
    }

    #[test]
    fn missing_source_is_a_parse_failure() {
        let err = find_symbols(Path::new("tests/fixtures/missing.c"), &[], &quiet()).unwrap_err();
        assert!(matches!(err, ToolError::Parse { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
