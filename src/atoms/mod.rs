//! # Turtille Builtins
//!
//! Builtins are the reserved primitive commands. Each one is a plain function pointer
//! taking the interpreter and the evaluated arguments of the call.
//!
//! ## Module Structure
//!
//! - **`movement`**: pen commands (`forward`, `left`, `move`, `up`, `clear`, ...)
//! - **`control`**: `quit`, `help`, `print`, `inspect`, `repeat`, `reset`, `comment`
//! - **`session`**: capability and history commands (`animate`, `save`, `load`, `last`)

use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Arg, Program},
    errors::{Result, TurtilleError},
    runtime::{Interpreter, Registry},
};

pub mod control;
pub mod movement;
pub mod session;

// ============================================================================
// CORE TYPES AND TRAITS
// ============================================================================

/// Builtin function type: the interpreter plus the call's arguments.
pub type BuiltinFn = fn(&mut Interpreter, &[Arg]) -> Result<()>;

// Output sink for `print`, `help`, `inspect` and animation frames.
pub trait OutputSink {
    fn emit(&mut self, text: &str);

    /// Called before each animation frame. Only terminals need to do anything.
    fn clear_screen(&mut self) {}
}

// A null output sink for testing or running without output.
pub struct NullSink;
impl OutputSink for NullSink {
    fn emit(&mut self, _text: &str) {}
}

/// Shared handle to the session's output sink.
#[derive(Clone)]
pub struct SharedOutput(pub Rc<RefCell<dyn OutputSink>>);

impl SharedOutput {
    pub fn new<T: OutputSink + 'static>(sink: T) -> Self {
        SharedOutput(Rc::new(RefCell::new(sink)))
    }

    /// Wraps a sink the caller keeps a handle to, e.g. a buffer a test reads back.
    pub fn from_shared<T: OutputSink + 'static>(sink: Rc<RefCell<T>>) -> Self {
        SharedOutput(sink)
    }

    pub fn emit(&self, text: &str) {
        self.0.borrow_mut().emit(text);
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, dyn OutputSink> {
        self.0.borrow_mut()
    }
}

// ============================================================================
// ARGUMENT HELPERS
// ============================================================================

/// Exactly `N` numeric arguments.
pub(crate) fn numbers<const N: usize>(command: &str, args: &[Arg]) -> Result<[f64; N]> {
    if args.len() != N {
        return Err(TurtilleError::arity(command, &N.to_string(), args.len()));
    }
    let mut values = [0.0; N];
    for (slot, arg) in values.iter_mut().zip(args) {
        *slot = expect_number(command, arg)?;
    }
    Ok(values)
}

pub(crate) fn no_args(command: &str, args: &[Arg]) -> Result<()> {
    numbers::<0>(command, args).map(|_| ())
}

/// Zero or one quoted-text argument.
pub(crate) fn optional_text<'a>(command: &str, args: &'a [Arg]) -> Result<Option<&'a str>> {
    match args {
        [] => Ok(None),
        [Arg::Text(text)] => Ok(Some(text.as_str())),
        [other] => Err(TurtilleError::invalid_argument(
            command,
            format!("expected quoted text, got a {}", other.type_name()),
        )),
        _ => Err(TurtilleError::arity(command, "0 or 1", args.len())),
    }
}

/// `[count?, body]` as built for `repeat` and `animate`.
pub(crate) fn counted_body<'a>(command: &str, args: &'a [Arg]) -> Result<(Option<f64>, &'a Program)> {
    match args {
        [Arg::Program(body)] => Ok((None, body)),
        [count, Arg::Program(body)] => Ok((Some(expect_number(command, count)?), body)),
        _ => Err(TurtilleError::arity(command, "a count and a body", args.len())),
    }
}

fn expect_number(command: &str, arg: &Arg) -> Result<f64> {
    let number = arg.as_number().ok_or_else(|| {
        TurtilleError::invalid_argument(
            command,
            format!("expected a number, got a {}", arg.type_name()),
        )
    })?;
    if !number.is_finite() {
        return Err(TurtilleError::invalid_argument(
            command,
            format!("expected a finite number, got {number}"),
        ));
    }
    Ok(number)
}

// ============================================================================
// REGISTRATION
// ============================================================================

/// Pen and control builtins, in alias-priority order.
pub fn register_core(registry: &mut Registry) -> Result<()> {
    movement::register_movement(registry)?;
    control::register_control(registry)
}

pub fn register_animation(registry: &mut Registry) -> Result<()> {
    registry.register("animate", session::animate)
}

pub fn register_persistence(registry: &mut Registry) -> Result<()> {
    registry.register("save", session::save)?;
    registry.register("load", session::load)
}

pub fn register_history(registry: &mut Registry) -> Result<()> {
    registry.register("_", session::last)?;
    registry.register("last", session::last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_checks_count_and_type() {
        assert_eq!(numbers::<2>("move", &[Arg::Number(1.0), Arg::Number(2.0)]).unwrap(), [1.0, 2.0]);
        assert!(matches!(
            numbers::<1>("f", &[]),
            Err(TurtilleError::Arity { actual: 0, .. })
        ));
        assert!(matches!(
            numbers::<1>("f", &[Arg::Text("x".into())]),
            Err(TurtilleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            numbers::<1>("f", &[Arg::Number(f64::INFINITY)]),
            Err(TurtilleError::InvalidArgument { .. })
        ));
        assert!(numbers::<1>("f", &[Arg::Number(f64::NAN)]).is_err());
    }

    #[test]
    fn optional_text_accepts_none_or_one() {
        assert_eq!(optional_text("save", &[]).unwrap(), None);
        assert_eq!(optional_text("save", &[Arg::Text("a.tur".into())]).unwrap(), Some("a.tur"));
        assert!(optional_text("save", &[Arg::Number(1.0)]).is_err());
    }
}
