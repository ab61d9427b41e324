use std::fmt;

use crate::token::Span;

/// A parse tree node with its source location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Atom {
    pub value: AtomValue,
    pub span: Span,
}

/// Payload of an [`Atom`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AtomValue {
    /// Placeholder; never produced by the parser.
    #[default]
    Null,
    /// Bare word.
    Symbol(String),
    /// Raw string literal, quotes and escapes included.
    String(String),
    /// Unsigned decimal integer.
    Int(u64),
    /// `{ ... }` sequence of commands. Also the root of every program.
    Batch(Vec<Atom>),
    /// `[ ... ]` sequence of commands.
    Inline(Vec<Atom>),
    /// `( ... )` sequence of arbitrary atoms.
    List(Vec<Atom>),
    /// Command: its name followed by its arguments.
    Cmd(Vec<Atom>),
}

/// Discriminant of [`AtomValue`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Null,
    Symbol,
    String,
    Int,
    Batch,
    Inline,
    List,
    Cmd,
}

impl AtomKind {
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Batch | Self::Inline | Self::List | Self::Cmd)
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::Symbol => "SYMBOL",
            Self::String => "STRING",
            Self::Int => "INT",
            Self::Batch => "BATCH",
            Self::Inline => "INLINE",
            Self::List => "LIST",
            Self::Cmd => "CMD",
        };
        f.write_str(name)
    }
}

impl Atom {
    #[must_use]
    pub const fn new(value: AtomValue, span: Span) -> Self {
        Self { value, span }
    }

    #[must_use]
    pub const fn kind(&self) -> AtomKind {
        match &self.value {
            AtomValue::Null => AtomKind::Null,
            AtomValue::Symbol(_) => AtomKind::Symbol,
            AtomValue::String(_) => AtomKind::String,
            AtomValue::Int(_) => AtomKind::Int,
            AtomValue::Batch(_) => AtomKind::Batch,
            AtomValue::Inline(_) => AtomKind::Inline,
            AtomValue::List(_) => AtomKind::List,
            AtomValue::Cmd(_) => AtomKind::Cmd,
        }
    }

    /// Children of a container atom; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.value {
            AtomValue::Batch(c) | AtomValue::Inline(c) | AtomValue::List(c) | AtomValue::Cmd(c) => {
                c
            }
            AtomValue::Null | AtomValue::Symbol(_) | AtomValue::String(_) | AtomValue::Int(_) => {
                &[]
            }
        }
    }

    /// Symbol text, if this is a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.value {
            AtomValue::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Raw literal text, if this is a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match &self.value {
            AtomValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<u64> {
        match self.value {
            AtomValue::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Pre-order walk over this atom and all its descendants.
    pub fn walk(&self, visit: &mut impl FnMut(&Self)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
