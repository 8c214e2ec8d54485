//! Turtille Error Handling
//!
//! Every failure the interpreter can report is a variant of [`TurtilleError`]. The enum derives
//! `thiserror::Error` for display and `miette::Diagnostic` for codes, labels and help text, so
//! the REPL and CLI render all of them through the same [`print_error`] path.
//!
//! Two variants are not failures: [`TurtilleError::Stop`] is how `quit` unwinds the session,
//! and [`TurtilleError::Interrupted`] is how Ctrl-C unwinds a running program back to the
//! REPL, the CLI or an enclosing `animate`.

use std::{ops::Range, path::PathBuf, sync::Arc};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

pub type Result<T, E = TurtilleError> = std::result::Result<T, E>;

#[derive(Debug, Error, Diagnostic)]
pub enum TurtilleError {
    #[error("Syntax error: cannot parse '{fragment}'")]
    #[diagnostic(code(turtille::parse::syntax))]
    Syntax {
        fragment: String,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("not a valid command from here")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("Unknown command: {}", .names.join(", "))]
    #[diagnostic(
        code(turtille::runtime::unknown_command),
        help("type 'help' to list the builtin commands, or define it with 'name -> ...'")
    )]
    UnknownCommand { names: Vec<String> },

    #[error("Cannot redefine builtin command '{name}'")]
    #[diagnostic(code(turtille::define::reserved_name))]
    ReservedName { name: String },

    #[error("Command '{name}' is already registered")]
    #[diagnostic(code(turtille::define::collision))]
    Collision { name: String },

    #[error("Arithmetic error: {reason}")]
    #[diagnostic(code(turtille::runtime::arithmetic))]
    Arithmetic { reason: &'static str },

    #[error("'{command}' expects {expected} argument(s), got {actual}")]
    #[diagnostic(code(turtille::runtime::arity))]
    Arity {
        command: String,
        expected: String,
        actual: usize,
    },

    #[error("Recursion limit of {limit} nested calls exceeded in '{name}'")]
    #[diagnostic(
        code(turtille::runtime::recursion_limit),
        help("a macro that calls itself never finishes; redefine it without the self reference")
    )]
    RecursionLimit { name: String, limit: usize },

    #[error("Invalid argument for '{command}': {reason}")]
    #[diagnostic(code(turtille::runtime::invalid_argument))]
    InvalidArgument { command: String, reason: String },

    #[error("Failed to {operation} '{}'", .path.display())]
    #[diagnostic(code(turtille::io))]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stopped")]
    #[diagnostic(code(turtille::signal::stop))]
    Stop,

    #[error("interrupted")]
    #[diagnostic(code(turtille::signal::interrupted))]
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Runtime,
    Definition,
    Io,
    Signal,
}

impl TurtilleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax { .. } => ErrorCategory::Parse,
            Self::UnknownCommand { .. }
            | Self::Arithmetic { .. }
            | Self::Arity { .. }
            | Self::RecursionLimit { .. }
            | Self::InvalidArgument { .. } => ErrorCategory::Runtime,
            Self::ReservedName { .. } | Self::Collision { .. } => ErrorCategory::Definition,
            Self::Io { .. } => ErrorCategory::Io,
            Self::Stop | Self::Interrupted => ErrorCategory::Signal,
        }
    }

    /// True for the `quit` signal, which ends a session without being a failure.
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }

    /// True when Ctrl-C cut a program short.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Self::Interrupted)
    }

    pub(crate) fn arity(command: &str, expected: &str, actual: usize) -> Self {
        Self::Arity {
            command: command.to_string(),
            expected: expected.to_string(),
            actual,
        }
    }

    pub(crate) fn invalid_argument(command: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

/// Source text plus a display name (`<repl:3>`, `shapes.tur:12`) for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }

    /// Builds a syntax error for the text starting at `span.start`. The label runs to the
    /// end of the line since nothing after the failure point was understood.
    pub fn syntax_error(&self, span: Range<usize>, help: Option<String>) -> TurtilleError {
        let start = span.start.min(self.content.len());
        let fragment = self.content[start..].trim();
        let fragment = if fragment.is_empty() {
            "end of line".to_string()
        } else {
            fragment.to_string()
        };
        TurtilleError::Syntax {
            fragment,
            src: self.to_named_source(),
            span: (start..self.content.len().max(span.end)).into(),
            help,
        }
    }
}

/// Prints a TurtilleError with full miette diagnostics.
pub fn print_error(error: TurtilleError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
