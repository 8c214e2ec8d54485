//! Session control builtins: `quit`, `inspect`, `help`, `print`, `repeat`, `reset`, `comment`.

use log::debug;

use crate::{
    ast::Arg,
    atoms::{counted_body, no_args, optional_text},
    errors::{Result, TurtilleError},
    runtime::{Interpreter, Registry},
};

pub const USAGE: &str = r#"
Hi, I am Turtille!

Type 'q' or 'quit' to leave. Type 'forward', 'backward', 'left', or 'right' to move.
You can also chain instructions. For instance, for drawing a rectangle:

    forward right 90  forward right 90  forward right 90  forward right 90

Typing only the first letters of these words also works:

    f r 90  f r 90  f r 90  f r 90

Give this program a name and use it by its name:

    rect -> f r 90  f r 90  f r 90  f r 90   # define program
    rect                                     # run program

Repeat commands with 'number * command', 'command * number' or 'repeat number ...':

    r3f1 -> r 3 f 1    # define program
    120 * r3f1         # repeat program 120 times
    repeat 2 [f 10 r 180]

Programs can use other programs, even ones defined later:

    fr90   -> f r 90
    rect   -> 4 * fr90
    rec45  -> rect r 45
    flower -> clear 8 * rec45

    flower  # enjoy!

Do not forget to save all your programs:

    save                # writes to the default store
    save "shapes.tur"   # or to a file of your choice
    load "shapes.tur"

You can also draw animations:

    flower10 -> flower r 10  # draw something + change angle slightly
    animate 5 flower10       # repeat program 5 times
    animate flower10         # repeat program forever (press Ctrl-C to stop)

Other commands are:

    help            # show this help
    reset           # reset Turtille (angle and position)
    clear           # clear the screen (but do not reset angle and position)
    up / down       # lift or lower the pen for 'move'
    move 10 (-5)    # go to a coordinate
    print           # print the turtle frame to the screen
    inspect "rect"  # show a program ('inspect' alone lists all of them)
    _ / last        # run the last command again
    quit            # exit Turtille
"#;

pub fn register_control(registry: &mut Registry) -> Result<()> {
    registry.register("quit", quit)?;
    registry.register("inspect", inspect)?;
    registry.register("help", help)?;
    registry.register("print", print)?;
    registry.register("repeat", repeat)?;
    registry.register("reset", reset)?;
    registry.register("comment", comment)
}

/// Ends the session by unwinding with [`TurtilleError::Stop`].
pub fn quit(_vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    no_args("quit", args)?;
    Err(TurtilleError::Stop)
}

/// Usage: inspect ["name"]
///
/// Shows one macro's definition; without a name, all of them in definition order.
pub fn inspect(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    match optional_text("inspect", args)? {
        Some(name) => {
            let text = match vm.format_macro(name) {
                Some(text) => text,
                None if vm.registry.is_builtin(name) => format!("{name} (builtin)"),
                None => {
                    return Err(TurtilleError::UnknownCommand {
                        names: vec![name.to_string()],
                    })
                }
            };
            vm.emit(&text);
        }
        None => {
            let listing: Vec<String> = vm
                .macro_names()
                .filter_map(|name| vm.format_macro(name))
                .collect();
            vm.emit(&listing.join("\n"));
        }
    }
    Ok(())
}

pub fn help(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    no_args("help", args)?;
    vm.emit(USAGE);
    Ok(())
}

/// Emits the current frame.
pub fn print(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    no_args("print", args)?;
    let frame = vm.frame();
    vm.emit(&frame);
    Ok(())
}

/// Usage: repeat <count> <body>
pub fn repeat(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    match counted_body("repeat", args)? {
        (Some(count), body) => vm.repeat(count, body),
        (None, _) => Err(TurtilleError::arity("repeat", "a count and a body", 1)),
    }
}

/// Back to the origin, heading 0, and an empty drawing.
pub fn reset(vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    no_args("reset", args)?;
    vm.pen().reset();
    Ok(())
}

pub fn comment(_vm: &mut Interpreter, args: &[Arg]) -> Result<()> {
    let text = optional_text("comment", args)?.unwrap_or_default();
    debug!("comment: {text}");
    Ok(())
}
