//! Data model shared by the extractors.
//!
//! These types are independent of libclang handles: the `frontend` module
//! converts cursors, tokens and locations into them, and the tool modules
//! accumulate and serialize them.

use serde::{Deserialize, Serialize};

/// A resolved position in a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Punctuation,
    Keyword,
    Identifier,
    Literal,
    Comment,
    Unknown,
}

impl TokenKind {
    /// Map a `CXTokenKind` code.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Punctuation,
            1 => Self::Keyword,
            2 => Self::Identifier,
            3 => Self::Literal,
            4 => Self::Comment,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Punctuation => write!(f, "Punctuation"),
            Self::Keyword => write!(f, "Keyword"),
            Self::Identifier => write!(f, "Identifier"),
            Self::Literal => write!(f, "Literal"),
            Self::Comment => write!(f, "Comment"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Linkage of a declaration (`CXLinkageKind`). Serialized as the libclang code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i32")]
pub enum Linkage {
    Invalid,
    NoLinkage,
    Internal,
    UniqueExternal,
    External,
    Other(i32),
}

impl Linkage {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Invalid,
            1 => Self::NoLinkage,
            2 => Self::Internal,
            3 => Self::UniqueExternal,
            4 => Self::External,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Invalid => 0,
            Self::NoLinkage => 1,
            Self::Internal => 2,
            Self::UniqueExternal => 3,
            Self::External => 4,
            Self::Other(code) => code,
        }
    }
}

impl From<Linkage> for i32 {
    fn from(linkage: Linkage) -> Self {
        linkage.code()
    }
}

/// Availability of a declaration (`CXAvailabilityKind`). Serialized as the libclang code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i32")]
pub enum Availability {
    Available,
    Deprecated,
    NotAvailable,
    NotAccessible,
    Other(i32),
}

impl Availability {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Available,
            1 => Self::Deprecated,
            2 => Self::NotAvailable,
            3 => Self::NotAccessible,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Available => 0,
            Self::Deprecated => 1,
            Self::NotAvailable => 2,
            Self::NotAccessible => 3,
            Self::Other(code) => code,
        }
    }
}

impl From<Availability> for i32 {
    fn from(availability: Availability) -> Self {
        availability.code()
    }
}

/// Symbol visibility (`CXVisibilityKind`). Serialized as the libclang code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i32")]
pub enum Visibility {
    Invalid,
    Hidden,
    Protected,
    Default,
    Other(i32),
}

impl Visibility {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Invalid,
            1 => Self::Hidden,
            2 => Self::Protected,
            3 => Self::Default,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Invalid => 0,
            Self::Hidden => 1,
            Self::Protected => 2,
            Self::Default => 3,
            Self::Other(code) => code,
        }
    }
}

impl From<Visibility> for i32 {
    fn from(visibility: Visibility) -> Self {
        visibility.code()
    }
}
