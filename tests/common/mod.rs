//! Shared helpers: a pen that records every call and an interpreter wired to it.
#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use turtille::{
    atoms::SharedOutput,
    cli::output::OutputBuffer,
    pen::Pen,
    runtime::{Interpreter, InterpreterBuilder},
};

#[derive(Debug, Clone, PartialEq)]
pub enum PenCall {
    Forward(f64),
    Back(f64),
    Left(f64),
    Right(f64),
    Up,
    Down,
    MoveTo(f64, f64),
    Clear,
    Reset,
    Render,
}

pub type CallLog = Rc<RefCell<Vec<PenCall>>>;

/// Records calls into a log the test keeps a handle to. An optional hook runs after
/// every recorded call.
pub struct RecordingPen {
    pub calls: CallLog,
    pub hook: Option<Box<dyn Fn(&[PenCall])>>,
}

impl RecordingPen {
    pub fn new(calls: CallLog) -> Self {
        Self { calls, hook: None }
    }

    pub fn with_hook(calls: CallLog, hook: impl Fn(&[PenCall]) + 'static) -> Self {
        Self {
            calls,
            hook: Some(Box::new(hook)),
        }
    }

    fn record(&self, call: PenCall) {
        self.calls.borrow_mut().push(call);
        if let Some(hook) = &self.hook {
            hook(&self.calls.borrow());
        }
    }
}

impl Pen for RecordingPen {
    fn forward(&mut self, step: f64) {
        self.record(PenCall::Forward(step));
    }
    fn back(&mut self, step: f64) {
        self.record(PenCall::Back(step));
    }
    fn left(&mut self, angle: f64) {
        self.record(PenCall::Left(angle));
    }
    fn right(&mut self, angle: f64) {
        self.record(PenCall::Right(angle));
    }
    fn up(&mut self) {
        self.record(PenCall::Up);
    }
    fn down(&mut self) {
        self.record(PenCall::Down);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.record(PenCall::MoveTo(x, y));
    }
    fn clear(&mut self) {
        self.record(PenCall::Clear);
    }
    fn reset(&mut self) {
        self.record(PenCall::Reset);
    }
    fn render_frame(&self) -> String {
        self.record(PenCall::Render);
        "<frame>".to_string()
    }
}

pub struct Session {
    pub vm: Interpreter,
    pub calls: CallLog,
    pub output: Rc<RefCell<OutputBuffer>>,
}

impl Session {
    /// Drawing calls only; frame renders are left out.
    pub fn drawn(&self) -> Vec<PenCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| **c != PenCall::Render)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn printed(&self) -> String {
        self.output.borrow().as_str().to_string()
    }
}

/// A session on top of `builder`, with a recording pen and a buffered output.
pub fn session_with(builder: InterpreterBuilder) -> Session {
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let output = Rc::new(RefCell::new(OutputBuffer::new()));
    let vm = builder
        .pen(RecordingPen::new(calls.clone()))
        .output(SharedOutput::from_shared(output.clone()))
        .build()
        .unwrap();
    Session { vm, calls, output }
}

pub fn session() -> Session {
    session_with(Interpreter::builder())
}
