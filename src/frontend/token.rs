use std::marker::PhantomData;
use std::os::raw::c_uint;

use clang_sys::*;

use super::{into_string, Cursor, Location};
use crate::ir::TokenKind;

/// The token array returned by `clang_tokenize`, released on drop.
pub struct TokenBuffer<'tu> {
    tu: CXTranslationUnit,
    ptr: *mut CXToken,
    count: c_uint,
    _tu: PhantomData<&'tu ()>,
}

impl<'tu> TokenBuffer<'tu> {
    pub(super) fn new(tu: CXTranslationUnit, ptr: *mut CXToken, count: c_uint) -> Self {
        Self {
            tu,
            ptr,
            count,
            _tu: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.ptr.is_null()
    }

    pub fn get(&self, index: usize) -> Option<Token<'_>> {
        if self.is_empty() || index >= self.len() {
            return None;
        }
        let raw = unsafe { *self.ptr.add(index) };
        Some(Token {
            raw,
            tu: self.tu,
            _buffer: PhantomData,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl Drop for TokenBuffer<'_> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe { clang_disposeTokens(self.tu, self.ptr, self.count) }
        }
    }
}

/// One lexical token of a [`TokenBuffer`].
#[derive(Clone, Copy)]
pub struct Token<'b> {
    raw: CXToken,
    tu: CXTranslationUnit,
    _buffer: PhantomData<&'b ()>,
}

impl<'b> Token<'b> {
    pub fn kind(&self) -> TokenKind {
        TokenKind::from_code(unsafe { clang_getTokenKind(self.raw) })
    }

    /// The literal source text of the token.
    pub fn spelling(&self) -> String {
        into_string(unsafe { clang_getTokenSpelling(self.tu, self.raw) })
    }

    pub fn location(&self) -> Location<'b> {
        Location::from_raw(unsafe { clang_getTokenLocation(self.tu, self.raw) })
    }

    /// Map the token to the most specific cursor covering it.
    pub fn annotate(&self) -> Cursor<'b> {
        let mut raw = self.raw;
        let mut cursor = unsafe { clang_getNullCursor() };
        unsafe { clang_annotateTokens(self.tu, &mut raw, 1, &mut cursor) };
        Cursor::from_raw(cursor)
    }
}
