//! Evaluator for parsed programs.
//!
//! Walks a root batch command by command and dispatches each one on
//! its name. The only builtin is `echo`.

use std::fmt;
use std::io::{self, Write};

use tracing::debug;

use crate::ast::{Atom, AtomKind, AtomValue};
use crate::lexer;
use crate::token::{Position, Span};

/// Classifies a runtime error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// The program root is neither a batch nor an inline batch.
    NotABatch { found: AtomKind },
    /// A batch child is not a command.
    NotACommand { found: AtomKind },
    /// A command with no name.
    EmptyCommand,
    /// The first atom of a command is not a symbol.
    NameNotSymbol { found: AtomKind },
    UnknownCommand { name: String },
    MissingArguments {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    /// An argument kind the command cannot handle.
    UnsupportedArgument {
        command: &'static str,
        found: AtomKind,
    },
    /// Writing command output failed.
    Output(io::ErrorKind),
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotABatch { found } => write!(f, "expected batch, found '{found}'"),
            Self::NotACommand { found } => {
                write!(f, "batch must consist of commands, found '{found}'")
            }
            Self::EmptyCommand => write!(f, "empty command"),
            Self::NameNotSymbol { found } => {
                write!(f, "command name must be a symbol, found '{found}'")
            }
            Self::UnknownCommand { name } => write!(f, "unknown command: {name}"),
            Self::MissingArguments {
                command,
                expected,
                found,
            } => write!(
                f,
                "{command}: expected at least {expected} argument(s), found {found}"
            ),
            Self::UnsupportedArgument { command, found } => {
                write!(f, "{command}: unsupported argument '{found}'")
            }
            Self::Output(kind) => write!(f, "failed to write output: {kind}"),
        }
    }
}

/// Error produced while evaluating a program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {}", span.start)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    const fn new(kind: RuntimeErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Render as `path@line:col: message`.
    #[must_use]
    pub fn report(&self, path: &str, source: &[u8]) -> String {
        let pos = Position::locate(source, self.span.start);
        format!("{path}@{pos}: {}", self.kind)
    }
}

/// Evaluate `root`, writing command output to `out`.
///
/// # Errors
///
/// Returns `RuntimeError` for malformed commands, unknown command
/// names, bad arguments, or failed writes.
pub fn run(root: &Atom, out: &mut impl Write) -> Result<(), RuntimeError> {
    Interpreter::new(out).run(root)
}

/// Executes commands against an output sink.
#[derive(Debug)]
pub struct Interpreter<W> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the interpreter and return its output sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run every command of a batch or inline batch in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing command.
    pub fn run(&mut self, root: &Atom) -> Result<(), RuntimeError> {
        if !matches!(root.value, AtomValue::Batch(_) | AtomValue::Inline(_)) {
            return Err(RuntimeError::new(
                RuntimeErrorKind::NotABatch { found: root.kind() },
                root.span,
            ));
        }

        for cmd in root.children() {
            self.exec(cmd)?;
        }

        Ok(())
    }

    fn exec(&mut self, cmd: &Atom) -> Result<(), RuntimeError> {
        let AtomValue::Cmd(atoms) = &cmd.value else {
            return Err(RuntimeError::new(
                RuntimeErrorKind::NotACommand { found: cmd.kind() },
                cmd.span,
            ));
        };
        let Some((head, args)) = atoms.split_first() else {
            return Err(RuntimeError::new(RuntimeErrorKind::EmptyCommand, cmd.span));
        };
        let Some(name) = head.as_symbol() else {
            return Err(RuntimeError::new(
                RuntimeErrorKind::NameNotSymbol { found: head.kind() },
                head.span,
            ));
        };

        debug!(command = name, args = args.len(), "dispatch");
        match name {
            "echo" => self.echo(cmd.span, args),
            _ => Err(RuntimeError::new(
                RuntimeErrorKind::UnknownCommand {
                    name: name.to_string(),
                },
                head.span,
            )),
        }
    }

    fn echo(&mut self, span: Span, args: &[Atom]) -> Result<(), RuntimeError> {
        if args.is_empty() {
            return Err(RuntimeError::new(
                RuntimeErrorKind::MissingArguments {
                    command: "echo",
                    expected: 1,
                    found: 0,
                },
                span,
            ));
        }

        let mut line = String::new();
        for arg in args {
            match &arg.value {
                AtomValue::Symbol(s) => line.push_str(s),
                AtomValue::String(s) => line.push_str(&lexer::unescape(s.as_bytes())),
                AtomValue::Int(n) => line.push_str(&n.to_string()),
                _ => {
                    return Err(RuntimeError::new(
                        RuntimeErrorKind::UnsupportedArgument {
                            command: "echo",
                            found: arg.kind(),
                        },
                        arg.span,
                    ));
                }
            }
        }
        line.push('\n');

        self.out
            .write_all(line.as_bytes())
            .map_err(|e| RuntimeError::new(RuntimeErrorKind::Output(e.kind()), span))
    }
}
