//! Capability and history builtins.
//!
//! `animate`, `save` and `load` are only registered when the interpreter was built
//! with the matching capability; `_` and `last` are always there.

use std::path::Path;

use log::debug;

use crate::{
    ast::Arg,
    atoms::{counted_body, no_args, optional_text},
    errors::Result,
    runtime::Interpreter,
};

/// Usage: animate [count] <body>
pub fn animate(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let (count, body) = counted_body("animate", args)?;
    vm.animate(count, body)
}

/// Usage: save ["path"]
pub fn save(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let path = optional_text("save", args)?.map(Path::new);
    vm.save(path)
}

/// Usage: load ["path"]
///
/// Registers the definitions in the file. Other commands in it are not run.
pub fn load(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let path = optional_text("load", args)?.map(Path::new);
    let skipped = vm.load(path, false);
    if !skipped.is_empty() {
        debug!("load ignored {} non-definition command(s)", skipped.len());
    }
    Ok(())
}

/// Runs the previous top-level command again.
pub fn last(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    no_args("last", args)?;
    vm.replay_last()
}
