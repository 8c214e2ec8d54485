//! AST module for the Turtille language
//!
//! Every command shape the grammar knows (movement, goto, generic calls, repetition,
//! animation, comments) normalizes to the same [`Command`] tuple: a name plus evaluated
//! positional arguments. `repeat` and `animate` keep their body as an [`Arg::Program`]
//! so unrolling happens at execution time, not at parse time.

use std::fmt;

pub mod builder;
pub mod expr;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// An ordered list of commands: a top-level run or a macro body.
pub type Program = Vec<Command>;

/// A positional command argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Number(f64),
    Text(String),
    Program(Program),
}

/// A single invocation by name. Names are resolved against the registry only when
/// the command runs, which is what lets macros refer to commands defined later.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub args: Vec<Arg>,
}

/// One parsed line, before the interpreter applies it.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Run(Program),
    Define { name: String, body: Program },
}

pub const COMMENT: &str = "comment";

impl Arg {
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Number(_) => "number",
            Arg::Text(_) => "text",
            Arg::Program(_) => "program",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Arg::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Arg::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_program(&self) -> Option<&Program> {
        match self {
            Arg::Program(p) => Some(p),
            _ => None,
        }
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Number(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<Program> for Arg {
    fn from(value: Program) -> Self {
        Arg::Program(value)
    }
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// A command without arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(COMMENT, vec![Arg::Text(text.into())])
    }

    pub fn is_comment(&self) -> bool {
        self.name == COMMENT
    }

    /// Pushes this command's name and the names inside nested bodies onto `out`.
    pub fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.name);
        for arg in &self.args {
            if let Arg::Program(body) = arg {
                for command in body {
                    command.collect_names(out);
                }
            }
        }
    }
}

// ============================================================================
// CANONICAL SOURCE FORM
// ============================================================================

/// Formats a number the way the grammar reads it back.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    n.to_string()
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Number(n) => f.write_str(&format_number(*n)),
            Arg::Text(s) => write!(f, "\"{s}\""),
            Arg::Program(body) => write!(f, "[{}]", ProgramDisplay(body)),
        }
    }
}

/// Renders a command so that parsing the output yields an equal command list.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_comment() {
            let text = self.args.first().and_then(Arg::as_text).unwrap_or_default();
            return write!(f, "# {text}");
        }
        f.write_str(&self.name)?;
        let mut previous_was_number = false;
        for arg in &self.args {
            match arg {
                // `move 3 -4` would read as the single expression `3 - 4`
                Arg::Number(n) if previous_was_number && *n < 0.0 => {
                    write!(f, " ({})", format_number(*n))?
                }
                _ => write!(f, " {arg}")?,
            }
            previous_was_number = matches!(arg, Arg::Number(_));
        }
        Ok(())
    }
}

/// Display adapter for a whole program, commands separated by spaces.
pub struct ProgramDisplay<'a>(pub &'a [Command]);

impl fmt::Display for ProgramDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_plain_commands() {
        let cmd = Command::new("f", vec![10.0.into()]);
        assert_eq!(cmd.to_string(), "f 10");
        assert_eq!(Command::bare("up").to_string(), "up");
        assert_eq!(Command::new("r", vec![2.5.into()]).to_string(), "r 2.5");
    }

    #[test]
    fn renders_nested_bodies_as_blocks() {
        let body = vec![Command::new("f", vec![10.0.into()]), Command::bare("sq")];
        let cmd = Command::new("repeat", vec![4.0.into(), body.into()]);
        assert_eq!(cmd.to_string(), "repeat 4 [f 10 sq]");
    }

    #[test]
    fn parenthesizes_negative_number_after_number() {
        let cmd = Command::new("move", vec![3.0.into(), (-4.0).into()]);
        assert_eq!(cmd.to_string(), "move 3 (-4)");
        let cmd = Command::new("r", vec![(-45.0).into()]);
        assert_eq!(cmd.to_string(), "r -45");
    }

    #[test]
    fn collects_nested_names() {
        let inner = vec![Command::bare("a"), Command::bare("b")];
        let cmd = Command::new("repeat", vec![2.0.into(), inner.into()]);
        let mut names = Vec::new();
        cmd.collect_names(&mut names);
        assert_eq!(names, vec!["repeat", "a", "b"]);
    }

    #[test]
    fn text_arguments_are_quoted() {
        let cmd = Command::new("inspect", vec!["sq".into()]);
        assert_eq!(cmd.to_string(), "inspect \"sq\"");
    }
}
