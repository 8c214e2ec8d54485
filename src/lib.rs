pub use crate::errors::{ErrorCategory, Result, TurtilleError};
pub use crate::runtime::{Interpreter, InterpreterBuilder, InterpreterConfig};

pub mod ast;
pub mod atoms;
pub mod cli;
pub mod errors;
pub mod pen;
pub mod repl;
pub mod runtime;
pub mod syntax;
