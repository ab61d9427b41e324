use crate::token::{Token, TokenKind};

/// Tokenize a source buffer into a sequence of tokens.
///
/// Never fails: bytes that start no multi-byte token come out as
/// [`TokenKind::Verbatim`] and are left for the parser to reject.
#[must_use]
pub fn tokenize(input: &[u8]) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Lazy tokenizer over a byte buffer.
///
/// Every call to [`Iterator::next`] returns exactly one token and moves
/// the cursor past it, so the returned spans tile the input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next token.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn take_while(&mut self, cond: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&cond) {
            self.pos += 1;
        }
    }

    fn read_string(&mut self) {
        self.pos += 1; // opening quote

        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                b'"' => return,
                // the escaped byte is never interpreted here
                b'\\' => self.pos = (self.pos + 1).min(self.input.len()),
                _ => {}
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let start = self.pos;
        let c = self.peek()?;

        let kind = match c {
            c if is_space(c) => {
                self.take_while(is_space);
                TokenKind::Whitespace
            }
            b'#' => {
                self.take_while(|c| c != b'\n');
                TokenKind::Comment
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                self.take_while(is_symbol);
                TokenKind::Symbol
            }
            c if c.is_ascii_digit() => {
                self.take_while(|c| c.is_ascii_digit());
                TokenKind::Int
            }
            b'"' => {
                self.read_string();
                TokenKind::String
            }
            _ => {
                self.pos += 1;
                TokenKind::Verbatim(c)
            }
        };

        Some(Token::new(kind, start, self.pos))
    }
}

const fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Symbol continuation bytes. Only used after the first byte, which
/// must not be a digit.
const fn is_symbol(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Whether a string literal (as produced by the lexer, quotes included)
/// ends with an un-escaped closing quote.
#[must_use]
pub fn is_terminated(literal: &[u8]) -> bool {
    let Some((&b'"', body)) = literal.split_first() else {
        return false;
    };

    let mut i = 0;
    while i < body.len() {
        match body[i] {
            b'"' => return i + 1 == body.len(),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }

    false
}

/// Strip the quotes from a string literal and resolve its escapes.
///
/// `\n`, `\t`, `\r`, `\"` and `\\` are translated; any other escaped
/// byte keeps its backslash. Invalid UTF-8 is replaced lossily.
#[must_use]
pub fn unescape(literal: &[u8]) -> String {
    let body = literal.strip_prefix(b"\"").unwrap_or(literal);
    let body = if is_terminated(literal) {
        body.strip_suffix(b"\"").unwrap_or(body)
    } else {
        body
    };

    let mut value = Vec::with_capacity(body.len());
    let mut bytes = body.iter().copied();
    while let Some(c) = bytes.next() {
        if c != b'\\' {
            value.push(c);
            continue;
        }
        match bytes.next() {
            Some(b'n') => value.push(b'\n'),
            Some(b't') => value.push(b'\t'),
            Some(b'r') => value.push(b'\r'),
            Some(b'"') => value.push(b'"'),
            Some(b'\\') => value.push(b'\\'),
            Some(c) => value.extend_from_slice(&[b'\\', c]),
            None => value.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&value).into_owned()
}
