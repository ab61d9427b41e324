use std::fmt;

use tracing::{debug, trace};

use crate::ast::{Atom, AtomKind, AtomValue};
use crate::lexer::{self, Lexer};
use crate::token::{Position, Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended inside a string literal.
    UnexpectedEof,
    /// A closing token or `;` did not match the innermost open construct.
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    /// An atom of the wrong kind for its enclosing construct.
    ExpectedAtom { expected: AtomKind, found: AtomKind },
    /// End of input with a construct still open.
    Unclosed { kind: AtomKind },
    /// A token no production accepts here.
    UnexpectedToken { found: TokenKind },
    /// The parser reached a state it should never be in.
    Internal { reason: &'static str },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected eof"),
            Self::ExpectedToken { expected, found } => {
                write!(f, "expected token '{expected}', found '{found}'")
            }
            Self::ExpectedAtom { expected, found } => {
                write!(f, "expected atom '{expected}', found '{found}'")
            }
            Self::Unclosed { kind } => write!(f, "unclosed atom '{kind}'"),
            Self::UnexpectedToken { found } => write!(f, "unexpected token '{found}'"),
            Self::Internal { reason } => write!(f, "internal parser fault: {reason}"),
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {pos}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the source.
    pub pos: usize,
}

impl ParseError {
    const fn new(kind: ParseErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    /// Whether this error is a defect in the parser rather than in
    /// the input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Internal { .. })
    }

    /// Line and column of the error within `source`.
    #[must_use]
    pub fn position(&self, source: &[u8]) -> Position {
        Position::locate(source, self.pos)
    }

    /// Render as `path@line:col: message`.
    #[must_use]
    pub fn report(&self, path: &str, source: &[u8]) -> String {
        format!("{path}@{}: {}", self.position(source), self.kind)
    }
}

/// Parse a source buffer into its root `Batch` atom.
///
/// The whole program is an implicit batch whose first command is open
/// from the start. Parsing stops at the first error.
///
/// # Errors
///
/// Returns `ParseError` on mismatched or unclosed brackets, stray
/// punctuation, or an unterminated string literal.
pub fn parse(source: &[u8]) -> Result<Atom, ParseError> {
    Parser::new(source).parse()
}

/// Kind of construct a frame is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Batch,
    Inline,
    List,
    Cmd,
}

impl Scope {
    const fn atom_kind(self) -> AtomKind {
        match self {
            Self::Batch => AtomKind::Batch,
            Self::Inline => AtomKind::Inline,
            Self::List => AtomKind::List,
            Self::Cmd => AtomKind::Cmd,
        }
    }

    /// Token that opens a construct of this scope.
    const fn opener(self) -> TokenKind {
        match self {
            Self::Batch => TokenKind::Verbatim(b'{'),
            Self::Inline => TokenKind::Verbatim(b'['),
            Self::List => TokenKind::Verbatim(b'('),
            Self::Cmd => TokenKind::Verbatim(b';'),
        }
    }

    fn into_value(self, children: Vec<Atom>) -> AtomValue {
        match self {
            Self::Batch => AtomValue::Batch(children),
            Self::Inline => AtomValue::Inline(children),
            Self::List => AtomValue::List(children),
            Self::Cmd => AtomValue::Cmd(children),
        }
    }
}

/// An open construct being collected.
#[derive(Debug)]
struct Frame {
    scope: Scope,
    /// Token that opened the construct; `None` for the implicit frames
    /// opened at the start of input.
    open: Option<Token>,
    children: Vec<Atom>,
}

impl Frame {
    /// Kind of the token that opened this frame, reported when a closer
    /// does not match it.
    fn opened_by(&self) -> TokenKind {
        self.open.map_or_else(|| self.scope.opener(), |t| t.kind)
    }
}

/// Stack of open constructs.
#[derive(Debug, Default)]
struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    fn open(&mut self, scope: Scope, open: Option<Token>) {
        trace!(?scope, depth = self.frames.len(), "open frame");
        self.frames.push(Frame {
            scope,
            open,
            children: Vec::new(),
        });
    }

    fn top_scope(&self) -> Option<Scope> {
        self.frames.last().map(|f| f.scope)
    }

    /// Hand a finished atom to the innermost frame.
    fn push(&mut self, atom: Atom) -> Result<(), ParseError> {
        let Some(top) = self.frames.last_mut() else {
            return Err(exhausted(atom.span.start));
        };

        match top.scope {
            Scope::Batch | Scope::Inline => {
                if atom.kind() != AtomKind::Cmd {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedAtom {
                            expected: AtomKind::Cmd,
                            found: atom.kind(),
                        },
                        atom.span.start,
                    ));
                }
                if !atom.children().is_empty() {
                    top.children.push(atom);
                }
            }
            Scope::Cmd => {
                if atom.kind() == AtomKind::Cmd {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedAtom {
                            expected: AtomKind::Symbol,
                            found: AtomKind::Cmd,
                        },
                        atom.span.start,
                    ));
                }
                top.children.push(atom);
            }
            Scope::List => top.children.push(atom),
        }

        Ok(())
    }

    /// Close the innermost frame, which must be a command.
    fn close_command(&mut self, at: Token) -> Result<(), ParseError> {
        match self.frames.last() {
            None => return Err(exhausted(at.span.start)),
            Some(top) if top.scope != Scope::Cmd => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedToken {
                        expected: top.opened_by(),
                        found: at.kind,
                    },
                    at.span.start,
                ));
            }
            Some(_) => {}
        }

        let Some(frame) = self.frames.pop() else {
            return Err(exhausted(at.span.start));
        };
        let span = match (frame.children.first(), frame.children.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::empty(at.span.start),
        };
        trace!(children = frame.children.len(), "close command");

        self.push(Atom::new(Scope::Cmd.into_value(frame.children), span))
    }

    /// Close the innermost container with `closer`, first closing the
    /// command open inside it.
    fn close(&mut self, scope: Scope, closer: Token) -> Result<(), ParseError> {
        if self.top_scope() == Some(Scope::Cmd) {
            self.close_command(closer)?;
        }

        let open = match self.frames.last() {
            None => return Err(exhausted(closer.span.start)),
            Some(Frame { open: None, .. }) => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken { found: closer.kind },
                    closer.span.start,
                ));
            }
            Some(top) if top.scope != scope => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedToken {
                        expected: top.opened_by(),
                        found: closer.kind,
                    },
                    closer.span.start,
                ));
            }
            Some(Frame { open: Some(open), .. }) => *open,
        };

        let Some(frame) = self.frames.pop() else {
            return Err(exhausted(closer.span.start));
        };
        trace!(?scope, children = frame.children.len(), "close frame");

        let span = Span::new(open.span.start, closer.span.end);
        self.push(Atom::new(scope.into_value(frame.children), span))
    }

    /// Unwind at end of input and return the root batch.
    fn finish(mut self, len: usize) -> Result<Atom, ParseError> {
        if self.top_scope() == Some(Scope::Cmd) {
            self.close_command(Token::new(TokenKind::Whitespace, len, len))?;
        }

        if self.frames.len() > 1 {
            let Some(top) = self.frames.last() else {
                return Err(exhausted(len));
            };
            let pos = top.open.map_or(0, |t| t.span.start);
            return Err(ParseError::new(
                ParseErrorKind::Unclosed {
                    kind: top.scope.atom_kind(),
                },
                pos,
            ));
        }

        match self.frames.pop() {
            Some(Frame {
                scope: Scope::Batch,
                children,
                ..
            }) => Ok(Atom::new(AtomValue::Batch(children), Span::new(0, len))),
            Some(_) => Err(ParseError::new(
                ParseErrorKind::Internal {
                    reason: "root frame is not a batch",
                },
                len,
            )),
            None => Err(exhausted(len)),
        }
    }
}

const fn exhausted(pos: usize) -> ParseError {
    ParseError::new(
        ParseErrorKind::Internal {
            reason: "frame stack exhausted",
        },
        pos,
    )
}

struct Parser<'a> {
    source: &'a [u8],
    stack: Stack,
}

impl<'a> Parser<'a> {
    fn new(source: &'a [u8]) -> Self {
        let mut stack = Stack::default();
        stack.open(Scope::Batch, None);
        stack.open(Scope::Cmd, None);

        Self { source, stack }
    }

    fn parse(mut self) -> Result<Atom, ParseError> {
        for token in Lexer::new(self.source) {
            self.feed(token)?;
        }

        let len = self.source.len();
        let root = self.stack.finish(len)?;
        debug!(commands = root.children().len(), len, "parsed program");
        Ok(root)
    }

    fn feed(&mut self, token: Token) -> Result<(), ParseError> {
        match token.kind {
            TokenKind::Whitespace | TokenKind::Comment => Ok(()),
            TokenKind::Symbol | TokenKind::Int | TokenKind::String => {
                let atom = self.leaf(token)?;
                self.stack.push(atom)
            }
            TokenKind::Verbatim(b'(') => {
                self.stack.open(Scope::List, Some(token));
                Ok(())
            }
            TokenKind::Verbatim(b'{') => {
                self.stack.open(Scope::Batch, Some(token));
                self.stack.open(Scope::Cmd, Some(token));
                Ok(())
            }
            TokenKind::Verbatim(b'[') => {
                self.stack.open(Scope::Inline, Some(token));
                self.stack.open(Scope::Cmd, Some(token));
                Ok(())
            }
            TokenKind::Verbatim(b')') => self.stack.close(Scope::List, token),
            TokenKind::Verbatim(b'}') => self.stack.close(Scope::Batch, token),
            TokenKind::Verbatim(b']') => self.stack.close(Scope::Inline, token),
            TokenKind::Verbatim(b';') => {
                self.stack.close_command(token)?;
                self.stack.open(Scope::Cmd, Some(token));
                Ok(())
            }
            TokenKind::Verbatim(_) => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken { found: token.kind },
                token.span.start,
            )),
        }
    }

    fn leaf(&self, token: Token) -> Result<Atom, ParseError> {
        let text = token.text(self.source);

        let value = match token.kind {
            TokenKind::Int => AtomValue::Int(text.iter().fold(0u64, |n, &d| {
                n.wrapping_mul(10).wrapping_add(u64::from(d - b'0'))
            })),
            TokenKind::Symbol => AtomValue::Symbol(String::from_utf8_lossy(text).into_owned()),
            TokenKind::String => {
                if !lexer::is_terminated(text) {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedEof,
                        token.span.start,
                    ));
                }
                AtomValue::String(String::from_utf8_lossy(text).into_owned())
            }
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::Verbatim(_) => {
                return Err(ParseError::new(
                    ParseErrorKind::Internal {
                        reason: "token has no leaf atom",
                    },
                    token.span.start,
                ));
            }
        };

        Ok(Atom::new(value, token.span))
    }
}
