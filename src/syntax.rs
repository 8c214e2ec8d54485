//! Syntax module for the Turtille language
//!
//! Source text is read one line at a time. Each non-blank line becomes at most one
//! [`Statement`](crate::ast::Statement): a run of commands or a macro definition.

pub mod parser;

pub use parser::{parse, parse_line};

/// Words the grammar claims for itself (see `grammar.pest`). A macro by one of these
/// names could be defined but never called.
pub const KEYWORDS: [&str; 16] = [
    "forward", "backward", "back", "left", "right", "f", "b", "l", "r", "move", "mv", "m", "goto",
    "g", "repeat", "animate",
];
