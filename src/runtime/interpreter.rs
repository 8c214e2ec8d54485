//! # Turtille Interpreter
//!
//! Owns the registry, the macro table, the last-command slot, the pen and the
//! output sink. Text goes in through [`Interpreter::parse`] or [`Interpreter::run`]:
//! definitions are applied as they are parsed, everything else is executed.
//!
//! Macro bodies are stored as written and looked up by name on every call, so a
//! macro may refer to commands that only exist later.

use std::path::PathBuf;

use indexmap::IndexMap;
use log::debug;

use crate::{
    ast::{Command, Program, ProgramDisplay, Statement},
    atoms::{self, SharedOutput},
    errors::{Result, TurtilleError},
    pen::{Pen, Turtle},
    runtime::{
        animation::Animation,
        interrupt::Interrupt,
        persistence::Persistence,
        registry::{Action, Registry},
        InterpreterConfig,
    },
    syntax,
};

/// Nested macro calls allowed before a call chain is treated as runaway recursion.
pub const MAX_CALL_DEPTH: usize = 256;

const HISTORY_COMMANDS: [&str; 2] = ["_", "last"];

pub struct Interpreter {
    pub(crate) pen: Box<dyn Pen>,
    pub(crate) registry: Registry,
    pub(crate) macros: IndexMap<String, Program>,
    pub(crate) last: Option<Command>,
    pub(crate) animation: Option<Animation>,
    pub(crate) persistence: Option<Persistence>,
    pub(crate) output: SharedOutput,
    pub(crate) interrupt: Interrupt,
    depth: usize,
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Wires the optional capabilities; their builtins are registered only when present.
pub struct InterpreterBuilder {
    pen: Box<dyn Pen>,
    output: SharedOutput,
    animation: Option<Animation>,
    persistence: Option<Persistence>,
    interrupt: Interrupt,
    load_store: bool,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self {
            pen: Box::new(Turtle::new()),
            output: SharedOutput::new(atoms::NullSink),
            animation: None,
            persistence: None,
            interrupt: Interrupt::new(),
            load_store: false,
        }
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animation and persistence as configured, including the initial silent load.
    pub fn from_config(config: &InterpreterConfig, interrupt: Interrupt) -> Self {
        Self::new()
            .animation(Animation::new(config.frame_delay))
            .persistence(Persistence::new(config.store.clone()))
            .interrupt(interrupt)
            .load_store(config.load_store)
    }

    pub fn pen(mut self, pen: impl Pen + 'static) -> Self {
        self.pen = Box::new(pen);
        self
    }

    pub fn output(mut self, output: SharedOutput) -> Self {
        self.output = output;
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// The flag a Ctrl-C handler raises; running programs stop at the next command.
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn load_store(mut self, load: bool) -> Self {
        self.load_store = load;
        self
    }

    pub fn build(self) -> Result<Interpreter> {
        let mut registry = Registry::new();
        atoms::register_core(&mut registry)?;
        if self.animation.is_some() {
            atoms::register_animation(&mut registry)?;
        }
        if self.persistence.is_some() {
            atoms::register_persistence(&mut registry)?;
        }
        atoms::register_history(&mut registry)?;

        let mut interpreter = Interpreter {
            pen: self.pen,
            registry,
            macros: IndexMap::new(),
            last: None,
            animation: self.animation,
            persistence: self.persistence,
            output: self.output,
            interrupt: self.interrupt,
            depth: 0,
        };
        if self.load_store {
            interpreter.load(None, true);
        }
        Ok(interpreter)
    }
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    // ========================================================================
    // FRONT END
    // ========================================================================

    /// Parses `text`, registering its definitions, and returns the commands to run.
    pub fn parse(&mut self, text: &str) -> Result<Program> {
        self.parse_named(text, "<input>")
    }

    /// Like [`parse`](Self::parse), naming lines `<source_name>:<line>` in diagnostics.
    pub fn parse_named(&mut self, text: &str, source_name: &str) -> Result<Program> {
        let mut program = Vec::new();
        for statement in syntax::parse(text, source_name)? {
            self.apply(statement, &mut program)?;
        }
        if !program.is_empty() {
            debug!("program: {}", ProgramDisplay(&program));
        }
        Ok(program)
    }

    pub(crate) fn apply(&mut self, statement: Statement, program: &mut Program) -> Result<()> {
        match statement {
            Statement::Run(commands) => program.extend(commands),
            Statement::Define { name, body } => self.define_macro(&name, body)?,
        }
        Ok(())
    }

    pub fn run(&mut self, text: &str) -> Result<()> {
        let program = self.parse(text)?;
        self.execute(&program)
    }

    pub fn run_named(&mut self, text: &str, source_name: &str) -> Result<()> {
        let program = self.parse_named(text, source_name)?;
        self.execute(&program)
    }

    /// Every callable name and alias, for completion.
    pub fn command_names(&self) -> Vec<String> {
        self.registry.names()
    }

    // ========================================================================
    // DEFINITIONS
    // ========================================================================

    /// Stores or replaces a macro. Reserved names leave the table untouched.
    pub fn define_macro(&mut self, name: &str, body: Program) -> Result<()> {
        self.registry.install_macro(name)?;
        debug!("adding func: {name} -> {}", ProgramDisplay(&body));
        self.macros.insert(name.to_string(), body);
        Ok(())
    }

    pub fn macro_body(&self, name: &str) -> Option<&Program> {
        self.macros.get(name)
    }

    /// Macro names in definition order.
    pub fn macro_names(&self) -> impl Iterator<Item = &str> {
        self.macros.keys().map(String::as_str)
    }

    /// `name -> body` in the form `save` writes.
    pub fn format_macro(&self, name: &str) -> Option<String> {
        self.macros
            .get(name)
            .map(|body| format!("{name} -> {}", ProgramDisplay(body)))
    }

    // ========================================================================
    // EXECUTION
    // ========================================================================

    /// Runs a top-level program.
    ///
    /// Every unresolvable name, nested bodies included, is reported in one error before
    /// anything runs. On success the last command becomes the one `last` replays.
    pub fn execute(&mut self, program: &[Command]) -> Result<()> {
        self.check_resolvable(program)?;
        self.run_program(program)?;
        self.remember(program);
        Ok(())
    }

    pub(crate) fn run_program(&mut self, program: &[Command]) -> Result<()> {
        program.iter().try_for_each(|command| {
            self.check_interrupt()?;
            self.invoke(command)
        })
    }

    /// Leaves the flag set so the caller that handles the interrupt can clear it.
    fn check_interrupt(&self) -> Result<()> {
        if self.interrupt.is_triggered() {
            debug!("interrupted");
            return Err(TurtilleError::Interrupted);
        }
        Ok(())
    }

    pub(crate) fn invoke(&mut self, command: &Command) -> Result<()> {
        debug!("running: {command}");
        match self.registry.get(&command.name).cloned() {
            Some(Action::Builtin(builtin)) => builtin(self, &command.args),
            Some(Action::Macro(name)) => self.call_macro(&name, command),
            None => Err(TurtilleError::UnknownCommand {
                names: vec![command.name.clone()],
            }),
        }
    }

    fn call_macro(&mut self, name: &str, command: &Command) -> Result<()> {
        if !command.args.is_empty() {
            return Err(TurtilleError::arity(name, "0", command.args.len()));
        }
        let body = self
            .macros
            .get(name)
            .cloned()
            .ok_or_else(|| TurtilleError::UnknownCommand {
                names: vec![name.to_string()],
            })?;
        if self.depth >= MAX_CALL_DEPTH {
            return Err(TurtilleError::RecursionLimit {
                name: name.to_string(),
                limit: MAX_CALL_DEPTH,
            });
        }
        self.check_resolvable(&body)?;

        self.depth += 1;
        let result = self.run_program(&body);
        self.depth -= 1;
        result
    }

    fn check_resolvable(&self, program: &[Command]) -> Result<()> {
        let mut names = Vec::new();
        for command in program {
            command.collect_names(&mut names);
        }
        let mut unknown: Vec<String> = Vec::new();
        for name in names {
            if !self.registry.contains(name) && !unknown.iter().any(|u| u == name) {
                unknown.push(name.to_string());
            }
        }
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(TurtilleError::UnknownCommand { names: unknown })
        }
    }

    fn remember(&mut self, program: &[Command]) {
        let Some(command) = program.iter().rev().find(|c| !c.is_comment()) else {
            return;
        };
        if !HISTORY_COMMANDS.contains(&command.name.as_str()) {
            self.last = Some(command.clone());
        }
    }

    /// Runs `body` `count` times; the count is truncated toward zero.
    pub fn repeat(&mut self, count: f64, body: &[Command]) -> Result<()> {
        let times = repeat_count("repeat", count)?;
        debug!("starting repeat loop: n={times}");
        for _ in 0..times {
            self.check_interrupt()?;
            self.run_program(body)?;
        }
        Ok(())
    }

    /// Re-invokes the most recent top-level command; nothing happens when there is none.
    pub fn replay_last(&mut self) -> Result<()> {
        match self.last.clone() {
            Some(command) => self.invoke(&command),
            None => {
                debug!("no command to replay");
                Ok(())
            }
        }
    }

    pub fn last_command(&self) -> Option<&Command> {
        self.last.as_ref()
    }

    // ========================================================================
    // COLLABORATORS
    // ========================================================================

    pub fn pen(&mut self) -> &mut dyn Pen {
        self.pen.as_mut()
    }

    pub fn frame(&self) -> String {
        self.pen.render_frame()
    }

    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    pub fn emit(&self, text: &str) {
        self.output.emit(text);
    }

    pub fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    pub fn store(&self) -> Option<PathBuf> {
        self.persistence.as_ref().map(|p| p.store().to_path_buf())
    }
}

pub(crate) fn repeat_count(command: &str, count: f64) -> Result<usize> {
    if !count.is_finite() || count < 0.0 {
        return Err(TurtilleError::invalid_argument(
            command,
            format!("repeat count must be a non-negative number, got {count}"),
        ));
    }
    Ok(count.trunc() as usize)
}
