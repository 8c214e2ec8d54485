//! The Turtille Command-Line Interface.
//!
//! Sets up logging and the Ctrl-C handler, builds the interpreter from the
//! arguments, then runs `--run` code, a file, or the REPL.

use std::{fs, path::Path, process};

use clap::Parser;
use log::{warn, LevelFilter};

use crate::{
    atoms::SharedOutput,
    cli::{args::TurtilleArgs, output::StdoutSink},
    errors::{print_error, Result, TurtilleError},
    pen::Turtle,
    repl,
    runtime::{interrupt::INTERRUPTED, Interpreter, InterpreterBuilder, Interrupt},
};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = TurtilleArgs::parse();
    init_logging(args.debug);

    if let Err(e) = execute(&args) {
        print_error(e);
        process::exit(1);
    }
}

/// Installs `pretty_env_logger` at INFO, or DEBUG with `--debug`. `RUST_LOG` filters win.
fn init_logging(debug: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    let _ = builder.try_init();
}

fn install_interrupt_handler(interrupt: &Interrupt) {
    let flag = interrupt.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.trigger()) {
        warn!("cannot trap Ctrl-C, running programs will only stop when done: {e}");
    }
}

/// Runs one session. Only startup problems are errors here; statement errors are
/// reported and the session goes on.
fn execute(args: &TurtilleArgs) -> Result<()> {
    let interrupt = Interrupt::new();
    install_interrupt_handler(&interrupt);

    let mut vm = InterpreterBuilder::from_config(&args.config(), interrupt)
        .pen(Turtle::new())
        .output(SharedOutput::new(StdoutSink))
        .build()?;

    if !args.run.is_empty() {
        run_program_text(&mut vm, &args.run.join(" "));
    } else if let Some(file) = &args.file {
        run_file(&mut vm, file)?;
    } else {
        repl::run_repl(&mut vm);
    }

    if args.print {
        let frame = vm.frame();
        vm.emit(&frame);
    }
    Ok(())
}

fn run_program_text(vm: &mut Interpreter, text: &str) {
    let result = vm.run_named(text, "<run>");
    report(vm, result);
}

/// Registers every definition in the file, then runs its other commands in order.
fn run_file(vm: &mut Interpreter, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|source| TurtilleError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let program = vm.load_source(&text, &path.display().to_string());
    let result = vm.execute(&program);
    report(vm, result);
    Ok(())
}

fn report(vm: &Interpreter, result: Result<()>) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_stop() => {}
        Err(e) if e.is_interrupt() => {
            vm.interrupt().take();
            vm.emit(INTERRUPTED);
        }
        Err(e) => print_error(e),
    }
}
