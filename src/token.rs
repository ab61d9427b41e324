use std::fmt;

/// Half-open byte range `[start, end)` into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    #[must_use]
    pub const fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely inside this span.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The bytes this span covers in `source`.
    ///
    /// Out-of-range spans yield an empty slice rather than panicking.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        source.get(self.start..self.end).unwrap_or_default()
    }
}

/// 1-based line and column, counted in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Translate a byte offset into a line and column.
    ///
    /// Offsets past the end of `source` are clamped to its length.
    #[must_use]
    pub fn locate(source: &[u8], offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;

        for &b in &source[..offset.min(source.len())] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of ASCII whitespace.
    Whitespace,
    /// `#` up to (not including) the end of the line.
    Comment,
    /// Letters, digits and `_`, not starting with a digit.
    Symbol,
    /// Run of decimal digits.
    Int,
    /// Double-quoted literal, quotes included.
    String,
    /// Any other single byte, stored verbatim.
    Verbatim(u8),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace => write!(f, "WS"),
            Self::Comment => write!(f, "COMMENT"),
            Self::Symbol => write!(f, "SYMBOL"),
            Self::Int => write!(f, "INT"),
            Self::String => write!(f, "STRING"),
            Self::Verbatim(b) => write!(f, "{}", b.escape_ascii()),
        }
    }
}

/// A single token with its kind and source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }

    /// The raw bytes of this token.
    #[must_use]
    pub fn text<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        self.span.slice(source)
    }
}
