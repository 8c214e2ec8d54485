//! Pen builtins.
//!
//! Registration order decides who gets a one-letter alias, so it is fixed here.

use crate::{
    ast::Arg,
    atoms::{no_args, numbers},
    errors::Result,
    runtime::{Interpreter, Registry},
};

pub fn register_movement(registry: &mut Registry) -> Result<()> {
    registry.register("left", left)?;
    registry.register("right", right)?;
    registry.register("up", up)?;
    registry.register("down", down)?;
    registry.register("forward", forward)?;
    registry.register("back", back)?;
    registry.register("clear", clear)?;
    registry.register("move", move_to)
}

/// Usage: left <degrees>
pub fn left(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let [angle] = numbers::<1>("left", args)?;
    vm.pen().left(angle);
    Ok(())
}

/// Usage: right <degrees>
pub fn right(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let [angle] = numbers::<1>("right", args)?;
    vm.pen().right(angle);
    Ok(())
}

pub fn up(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    no_args("up", args)?;
    vm.pen().up();
    Ok(())
}

pub fn down(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    no_args("down", args)?;
    vm.pen().down();
    Ok(())
}

/// Usage: forward <steps>
pub fn forward(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let [step] = numbers::<1>("forward", args)?;
    vm.pen().forward(step);
    Ok(())
}

/// Usage: back <steps>
pub fn back(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let [step] = numbers::<1>("back", args)?;
    vm.pen().back(step);
    Ok(())
}

/// Wipes the drawing but keeps position and heading.
pub fn clear(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    no_args("clear", args)?;
    vm.pen().clear();
    Ok(())
}

/// Usage: move <x> <y>
pub fn move_to(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let [x, y] = numbers::<2>("move", args)?;
    vm.pen().move_to(x, y);
    Ok(())
}
