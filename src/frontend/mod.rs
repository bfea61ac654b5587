//! Owning wrappers over the libclang C API.
//!
//! Every libclang handle acquired here is released in a `Drop` impl, and the
//! borrow structure mirrors the library's ownership rules: a
//! [`TranslationUnit`] cannot outlive its [`Index`], and a [`TokenBuffer`] or
//! [`Cursor`] cannot outlive its translation unit.

mod cursor;
mod token;

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int, c_uint};
use std::path::Path;
use std::ptr;

use clang_sys::*;

pub use cursor::{ChildVisit, Cursor, CursorKind};
pub use token::{Token, TokenBuffer};

use crate::error::{Result, ToolError};
use crate::ir::SourceLocation;

/// Take ownership of a libclang string, copy it out and dispose it.
pub(crate) fn into_string(raw: CXString) -> String {
    unsafe {
        let ptr = clang_getCString(raw);
        let out = if ptr.is_null() {
            String::new()
        } else {
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        };
        clang_disposeString(raw);
        out
    }
}

fn c_string(value: &str) -> Result<CString> {
    CString::new(value)
        .map_err(|_| ToolError::Usage(format!("argument contains a NUL byte: {value:?}")))
}

// libclang addresses file offsets with a c_uint; larger files cannot be tokenized whole
fn end_offset(size: u64, file: &str) -> Result<c_uint> {
    c_uint::try_from(size).map_err(|_| ToolError::Tokenize {
        file: file.to_string(),
    })
}

/// Options applied when building a translation unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Keep macro definitions, expansions and inclusion directives in the AST.
    pub detailed_preprocessing: bool,
}

impl ParseOptions {
    fn flags(self) -> CXTranslationUnit_Flags {
        let mut flags = CXTranslationUnit_None;
        if self.detailed_preprocessing {
            flags |= CXTranslationUnit_DetailedPreprocessingRecord;
        }
        flags
    }
}

/// A libclang index (`CXIndex`).
pub struct Index {
    raw: CXIndex,
}

impl Index {
    /// Create an index that omits declarations from precompiled headers.
    pub fn new(display_diagnostics: bool) -> Self {
        let raw = unsafe { clang_createIndex(1, display_diagnostics as c_int) };
        Self { raw }
    }

    /// Parse `path` with the given compiler arguments.
    pub fn parse(
        &self,
        path: &Path,
        args: &[String],
        options: ParseOptions,
    ) -> Result<TranslationUnit<'_>> {
        let file = path.display().to_string();
        if !path.is_file() {
            return Err(ToolError::Parse { file });
        }

        let c_path = c_string(&file)?;
        let c_args = args
            .iter()
            .map(|a| c_string(a))
            .collect::<Result<Vec<_>>>()?;
        let arg_ptrs: Vec<*const c_char> = c_args.iter().map(|a| a.as_ptr()).collect();

        let raw = unsafe {
            clang_parseTranslationUnit(
                self.raw,
                c_path.as_ptr(),
                arg_ptrs.as_ptr(),
                arg_ptrs.len() as c_int,
                ptr::null_mut(),
                0,
                options.flags(),
            )
        };

        if raw.is_null() {
            return Err(ToolError::Parse { file });
        }

        tracing::debug!(file = %file, args = ?args, "parsed translation unit");
        Ok(TranslationUnit {
            raw,
            _index: PhantomData,
        })
    }
}

impl Drop for Index {
    fn drop(&mut self) {
        unsafe { clang_disposeIndex(self.raw) }
    }
}

/// A parsed translation unit (`CXTranslationUnit`).
pub struct TranslationUnit<'i> {
    raw: CXTranslationUnit,
    _index: PhantomData<&'i Index>,
}

impl<'i> TranslationUnit<'i> {
    /// The main file name as it was given to the parser.
    pub fn spelling(&self) -> String {
        into_string(unsafe { clang_getTranslationUnitSpelling(self.raw) })
    }

    /// The root cursor of the AST.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::from_raw(unsafe { clang_getTranslationUnitCursor(self.raw) })
    }

    /// Tokenize the whole of `path`, from byte offset 0 to its size on disk.
    pub fn tokenize_file(&self, path: &Path) -> Result<TokenBuffer<'_>> {
        let file = path.display().to_string();
        let size = end_offset(std::fs::metadata(path)?.len(), &file)?;
        let c_path = c_string(&file)?;

        let range = unsafe {
            let cx_file = clang_getFile(self.raw, c_path.as_ptr());
            if cx_file.is_null() {
                return Err(ToolError::Tokenize { file });
            }
            let start = clang_getLocationForOffset(self.raw, cx_file, 0);
            let end = clang_getLocationForOffset(self.raw, cx_file, size);
            clang_getRange(start, end)
        };

        if unsafe { clang_Range_isNull(range) } != 0 {
            return Err(ToolError::Tokenize { file });
        }

        let mut tokens: *mut CXToken = ptr::null_mut();
        let mut count: c_uint = 0;
        unsafe { clang_tokenize(self.raw, range, &mut tokens, &mut count) };

        tracing::debug!(file = %file, count, "tokenized file");
        Ok(TokenBuffer::new(self.raw, tokens, count))
    }
}

impl Drop for TranslationUnit<'_> {
    fn drop(&mut self) {
        unsafe { clang_disposeTranslationUnit(self.raw) }
    }
}

/// A source location (`CXSourceLocation`) within a translation unit.
#[derive(Clone, Copy)]
pub struct Location<'tu> {
    raw: CXSourceLocation,
    _tu: PhantomData<&'tu ()>,
}

impl<'tu> Location<'tu> {
    pub(crate) fn from_raw(raw: CXSourceLocation) -> Self {
        Self {
            raw,
            _tu: PhantomData,
        }
    }

    /// Resolve through macro expansions to the expansion site.
    pub fn file_location(&self) -> SourceLocation {
        self.resolve(clang_getFileLocation)
    }

    /// Resolve to the location where the text was spelled.
    pub fn spelling_location(&self) -> SourceLocation {
        self.resolve(clang_getSpellingLocation)
    }

    fn resolve(
        &self,
        getter: unsafe extern "C" fn(
            CXSourceLocation,
            *mut CXFile,
            *mut c_uint,
            *mut c_uint,
            *mut c_uint,
        ),
    ) -> SourceLocation {
        let mut file: CXFile = ptr::null_mut();
        let mut line: c_uint = 0;
        let mut column: c_uint = 0;
        let mut offset: c_uint = 0;
        unsafe { getter(self.raw, &mut file, &mut line, &mut column, &mut offset) };

        let file = if file.is_null() {
            String::new()
        } else {
            into_string(unsafe { clang_getFileName(file) })
        };

        SourceLocation {
            file,
            line,
            column,
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_offset_fits_in_c_uint() {
        assert_eq!(end_offset(0, "a.c").unwrap(), 0);
        assert_eq!(end_offset(u64::from(c_uint::MAX), "a.c").unwrap(), c_uint::MAX);
    }

    #[test]
    fn oversized_file_is_a_tokenize_failure() {
        let err = end_offset(u64::from(c_uint::MAX) + 1, "huge.c").unwrap_err();
        assert!(matches!(err, ToolError::Tokenize { ref file } if file == "huge.c"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn nul_byte_in_argument_is_a_usage_error() {
        assert!(matches!(c_string("-D\0X"), Err(ToolError::Usage(_))));
    }
}
