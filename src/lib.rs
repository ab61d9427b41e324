//! Tokenizer, structural parser, and evaluator for the jcl command
//! language.
//!
//! A program is a sequence of commands separated by `;`. Arguments are
//! symbols, integers, string literals, or one of three nesting
//! constructs: batches `{ ... }`, inline batches `[ ... ]`, and lists
//! `( ... )`. Parsing produces a tree of [`Atom`]s rooted at an
//! implicit batch.
//!
//! # Quick start
//!
//! ## Parse a program
//!
//! ```
//! use jcl::{AtomKind, parse};
//!
//! let root = parse(b"echo 1; echo (a { b })").unwrap();
//! assert_eq!(root.kind(), AtomKind::Batch);
//! assert_eq!(root.children().len(), 2);
//! ```
//!
//! ## Run a program
//!
//! ```
//! let mut out = Vec::new();
//! jcl::run_str("echo hello \", world\"", &mut out).unwrap();
//! assert_eq!(out, b"hello, world\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod eval;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

use std::io::Write;

pub use ast::{Atom, AtomKind, AtomValue};
pub use eval::{Interpreter, RuntimeError, RuntimeErrorKind, run};
pub use formatter::format;
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use token::{Position, Span, Token, TokenKind};

/// Unified error type covering both parsing and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// An evaluation error.
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Render as `path@line:col: message`.
    #[must_use]
    pub fn report(&self, path: &str, source: &[u8]) -> String {
        match self {
            Self::Parse(e) => e.report(path, source),
            Self::Runtime(e) => e.report(path, source),
        }
    }
}

/// Parse a program held in a string.
pub fn parse_str(input: &str) -> Result<Atom, ParseError> {
    parse(input.as_bytes())
}

/// Parse and evaluate a program in one step.
pub fn run_str(input: &str, out: &mut impl Write) -> Result<(), Error> {
    let root = parse_str(input)?;
    Ok(run(&root, out)?)
}
