use std::marker::PhantomData;

use clang_sys::*;

use super::{into_string, Location};
use crate::ir::{Availability, Linkage, SourceLocation, Visibility};

/// Kind of an AST node (`CXCursorKind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorKind(CXCursorKind);

impl CursorKind {
    pub const TYPE_REF: Self = Self(CXCursor_TypeRef);
    pub const INVALID_FILE: Self = Self(CXCursor_InvalidFile);
    pub const DECL_REF_EXPR: Self = Self(CXCursor_DeclRefExpr);
    pub const MEMBER_REF_EXPR: Self = Self(CXCursor_MemberRefExpr);
    pub const TRANSLATION_UNIT: Self = Self(CXCursor_TranslationUnit);
    pub const INCLUSION_DIRECTIVE: Self = Self(CXCursor_InclusionDirective);

    pub fn is_declaration(self) -> bool {
        unsafe { clang_isDeclaration(self.0) != 0 }
    }

    pub fn is_expression(self) -> bool {
        unsafe { clang_isExpression(self.0) != 0 }
    }

    /// Free functions, methods, constructors, destructors, conversions and
    /// function templates.
    pub fn is_function(self) -> bool {
        matches!(
            self.0,
            CXCursor_FunctionDecl
                | CXCursor_CXXMethod
                | CXCursor_Constructor
                | CXCursor_Destructor
                | CXCursor_ConversionFunction
                | CXCursor_FunctionTemplate
        )
    }

    /// libclang's name for this kind, e.g. `FunctionDecl` or `macro expansion`.
    pub fn spelling(self) -> String {
        into_string(unsafe { clang_getCursorKindSpelling(self.0) })
    }
}

impl std::fmt::Display for CursorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

/// What the AST walk should do after visiting a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildVisit {
    Continue,
    Recurse,
}

impl ChildVisit {
    fn into_raw(self) -> CXChildVisitResult {
        match self {
            Self::Continue => CXChildVisit_Continue,
            Self::Recurse => CXChildVisit_Recurse,
        }
    }
}

/// A handle to one AST node.
#[derive(Clone, Copy)]
pub struct Cursor<'tu> {
    raw: CXCursor,
    _tu: PhantomData<&'tu ()>,
}

impl<'tu> Cursor<'tu> {
    pub(crate) fn from_raw(raw: CXCursor) -> Self {
        Self {
            raw,
            _tu: PhantomData,
        }
    }

    fn non_null(raw: CXCursor) -> Option<Self> {
        let cursor = Self::from_raw(raw);
        (!cursor.is_null()).then_some(cursor)
    }

    pub fn is_null(&self) -> bool {
        unsafe { clang_equalCursors(self.raw, clang_getNullCursor()) != 0 }
    }

    pub fn kind(&self) -> CursorKind {
        CursorKind(unsafe { clang_getCursorKind(self.raw) })
    }

    pub fn spelling(&self) -> String {
        into_string(unsafe { clang_getCursorSpelling(self.raw) })
    }

    /// The Unified Symbol Resolution string identifying the entity.
    pub fn usr(&self) -> String {
        into_string(unsafe { clang_getCursorUSR(self.raw) })
    }

    pub fn location(&self) -> Location<'tu> {
        Location::from_raw(unsafe { clang_getCursorLocation(self.raw) })
    }

    /// First and one-past-last position of the source range the cursor
    /// spans, resolved through macro expansions.
    pub fn extent(&self) -> (SourceLocation, SourceLocation) {
        let range = unsafe { clang_getCursorExtent(self.raw) };
        let start = Location::from_raw(unsafe { clang_getRangeStart(range) });
        let end = Location::from_raw(unsafe { clang_getRangeEnd(range) });
        (start.file_location(), end.file_location())
    }

    pub fn semantic_parent(&self) -> Option<Cursor<'tu>> {
        Self::non_null(unsafe { clang_getCursorSemanticParent(self.raw) })
    }

    pub fn definition(&self) -> Option<Cursor<'tu>> {
        Self::non_null(unsafe { clang_getCursorDefinition(self.raw) })
    }

    pub fn referenced(&self) -> Option<Cursor<'tu>> {
        Self::non_null(unsafe { clang_getCursorReferenced(self.raw) })
    }

    /// The definition of the entity if one is visible, otherwise whatever the
    /// cursor refers to.
    pub fn definition_or_referenced(&self) -> Option<Cursor<'tu>> {
        self.definition().or_else(|| self.referenced())
    }

    pub fn linkage(&self) -> Linkage {
        Linkage::from_code(unsafe { clang_getCursorLinkage(self.raw) })
    }

    pub fn availability(&self) -> Availability {
        Availability::from_code(unsafe { clang_getCursorAvailability(self.raw) })
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::from_code(unsafe { clang_getCursorVisibility(self.raw) })
    }

    /// Spelling of the canonical type of this cursor, if it has a type.
    pub fn canonical_type_spelling(&self) -> Option<String> {
        unsafe {
            let ty = clang_getCursorType(self.raw);
            if ty.kind == CXType_Invalid {
                return None;
            }
            Some(into_string(clang_getTypeSpelling(clang_getCanonicalType(ty))))
        }
    }

    /// Walk the children of this cursor in pre-order. The callback receives
    /// each cursor and its parent.
    pub fn visit_children<F>(&self, mut visitor: F)
    where
        F: FnMut(Cursor<'tu>, Cursor<'tu>) -> ChildVisit,
    {
        extern "C" fn trampoline<'tu, F>(
            cursor: CXCursor,
            parent: CXCursor,
            data: CXClientData,
        ) -> CXChildVisitResult
        where
            F: FnMut(Cursor<'tu>, Cursor<'tu>) -> ChildVisit,
        {
            let visitor = unsafe { &mut *(data as *mut F) };
            visitor(Cursor::from_raw(cursor), Cursor::from_raw(parent)).into_raw()
        }

        unsafe {
            clang_visitChildren(
                self.raw,
                trampoline::<F>,
                &mut visitor as *mut F as CXClientData,
            );
        }
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("kind", &self.kind().spelling())
            .field("spelling", &self.spelling())
            .finish()
    }
}
