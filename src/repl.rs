//! Turtille REPL (Read-Eval-Print Loop)
//!
//! Reads one line at a time, runs it against a persistent interpreter and shows the
//! frame afterwards. The prompt and banner are skipped when stdin is not a terminal.

use std::io::{self, Write};

use crate::{
    ast::Command,
    atoms::control::USAGE,
    cli::output::{print_banner, print_notice},
    errors::print_error,
    runtime::{interrupt::INTERRUPTED, Interpreter},
};

pub const IDLE_INTERRUPT_NOTICE: &str = "Type 'q' or 'quit' to stop Turtille.";

/// What the loop does after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplFlow {
    Continue,
    Quit,
}

/// REPL state that persists across lines
pub struct ReplState<'vm> {
    vm: &'vm mut Interpreter,
    line_number: usize,
}

impl<'vm> ReplState<'vm> {
    pub fn new(vm: &'vm mut Interpreter) -> Self {
        Self { vm, line_number: 1 }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Runs one line. Errors are printed and the session continues; `quit` ends it.
    /// A Ctrl-C raised while the line runs is consumed here.
    pub fn eval_line(&mut self, input: &str) -> ReplFlow {
        let flow = self.run_line(input);
        self.vm.interrupt().take();
        flow
    }

    fn run_line(&mut self, input: &str) -> ReplFlow {
        let source_name = format!("<repl:{}>", self.line_number);
        self.line_number += 1;

        let result = self.vm.parse_named(input, &source_name).and_then(|program| {
            self.vm.execute(&program)?;
            Ok(program)
        });
        match result {
            Ok(program) => {
                if shows_frame(&program) {
                    let frame = self.vm.frame();
                    self.vm.emit(&frame);
                }
                ReplFlow::Continue
            }
            Err(e) if e.is_stop() => ReplFlow::Quit,
            Err(e) if e.is_interrupt() => {
                self.vm.emit(INTERRUPTED);
                let frame = self.vm.frame();
                self.vm.emit(&frame);
                ReplFlow::Continue
            }
            Err(e) => {
                print_error(e);
                ReplFlow::Continue
            }
        }
    }
}

/// A line shows the frame unless it ran nothing, or only asked for help.
fn shows_frame(program: &[Command]) -> bool {
    let commands: Vec<&Command> = program.iter().filter(|c| !c.is_comment()).collect();
    match commands.as_slice() {
        [] => false,
        [only] => !matches!(only.name.as_str(), "h" | "help"),
        _ => true,
    }
}

/// Main REPL entry point. Returns on `quit` or end of input.
pub fn run_repl(vm: &mut Interpreter) {
    let interrupt = vm.interrupt().clone();
    let interactive = atty::is(atty::Stream::Stdin);
    if interactive {
        print_banner();
        vm.emit(USAGE);
    }

    let mut state = ReplState::new(vm);
    loop {
        if interactive {
            print!("Turtille [{}]: ", state.line_number());
            let _ = io::stdout().flush();
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl+D)
                if interactive {
                    println!();
                }
                break;
            }
            Ok(_) => {
                // Ctrl-C while waiting for input discards the line
                if interrupt.take() {
                    print_notice(IDLE_INTERRUPT_NOTICE);
                    continue;
                }
                if line.trim().is_empty() {
                    continue;
                }
                if state.eval_line(&line) == ReplFlow::Quit {
                    break;
                }
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}
