// tests/animate_tests.rs
//
// Everything lives in one test: animation changes the global log level, and
// parallel tests in this binary would see each other's changes.

mod common;

use std::{cell::RefCell, rc::Rc, time::Duration};

use common::{session_with, CallLog, PenCall, RecordingPen};
use log::LevelFilter;
use turtille::{
    atoms::SharedOutput,
    cli::output::OutputBuffer,
    runtime::{animation::STOPPED, Animation, Interpreter, Interrupt},
    TurtilleError,
};

fn forwards(calls: &[PenCall]) -> usize {
    calls.iter().filter(|c| matches!(c, PenCall::Forward(_))).count()
}

#[test]
fn animate_runs_exactly_n_times_and_restores_the_log_level() {
    log::set_max_level(LevelFilter::Trace);

    // counted: exactly five passes, one frame each
    let interrupt = Interrupt::new();
    let mut s = session_with(
        Interpreter::builder()
            .animation(Animation::new(Duration::ZERO))
            .interrupt(interrupt.clone()),
    );
    s.vm.run("step -> f 1").unwrap();
    s.vm.run("animate 5 step").unwrap();
    let calls = s.calls.borrow().clone();
    assert_eq!(forwards(&calls), 5);
    assert_eq!(calls.iter().filter(|c| **c == PenCall::Render).count(), 5);
    assert_eq!(s.output.borrow().screen_clears, 5);
    assert!(s.printed().contains("# press Ctrl-C to stop animation"));
    assert_eq!(log::max_level(), LevelFilter::Trace);

    // verbosity is capped while the body runs
    let levels = Rc::new(RefCell::new(Vec::new()));
    let seen = levels.clone();
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let mut vm = Interpreter::builder()
        .animation(Animation::new(Duration::ZERO))
        .pen(RecordingPen::with_hook(calls.clone(), move |_| {
            seen.borrow_mut().push(log::max_level())
        }))
        .build()
        .unwrap();
    vm.run("animate 2 f").unwrap();
    assert!(levels.borrow().iter().all(|level| *level == LevelFilter::Info));
    assert_eq!(log::max_level(), LevelFilter::Trace);

    // indefinite: interrupted during the second frame
    let interrupt = Interrupt::new();
    let trigger = interrupt.clone();
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let output = Rc::new(RefCell::new(OutputBuffer::new()));
    let mut vm = Interpreter::builder()
        .animation(Animation::new(Duration::ZERO))
        .interrupt(interrupt.clone())
        .output(SharedOutput::from_shared(output.clone()))
        .pen(RecordingPen::with_hook(calls.clone(), move |calls| {
            let renders = calls.iter().filter(|c| **c == PenCall::Render).count();
            if renders == 2 {
                trigger.trigger();
            }
        }))
        .build()
        .unwrap();
    vm.run("animate f r 10").unwrap();
    assert_eq!(forwards(&calls.borrow()), 2);
    assert!(output.borrow().as_str().ends_with(STOPPED));
    assert!(!interrupt.is_triggered());
    assert_eq!(log::max_level(), LevelFilter::Trace);

    // Ctrl-C in the middle of a pass stops the body at the next command
    let interrupt = Interrupt::new();
    let trigger = interrupt.clone();
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let output = Rc::new(RefCell::new(OutputBuffer::new()));
    let mut vm = Interpreter::builder()
        .animation(Animation::new(Duration::ZERO))
        .interrupt(interrupt.clone())
        .output(SharedOutput::from_shared(output.clone()))
        .pen(RecordingPen::with_hook(calls.clone(), move |calls| {
            if forwards(calls) == 3 {
                trigger.trigger();
            }
        }))
        .build()
        .unwrap();
    vm.run("animate [f r 10 f]").unwrap();
    assert_eq!(forwards(&calls.borrow()), 3);
    // second pass: f, then the interrupt stops it before r
    assert_eq!(
        *calls.borrow(),
        vec![
            PenCall::Forward(20.0),
            PenCall::Right(10.0),
            PenCall::Forward(20.0),
            PenCall::Render,
            PenCall::Forward(20.0),
        ]
    );
    assert!(output.borrow().as_str().ends_with(STOPPED));
    assert!(!interrupt.is_triggered());
    assert_eq!(log::max_level(), LevelFilter::Trace);

    // a failing body still restores the level
    let mut s = session_with(
        Interpreter::builder().animation(Animation::new(Duration::ZERO)),
    );
    let err = s.vm.run("animate 3 [f 1 repeat -1 f]").unwrap_err();
    assert!(matches!(err, TurtilleError::InvalidArgument { .. }));
    assert_eq!(log::max_level(), LevelFilter::Trace);

    // zero passes draw nothing
    let mut s = session_with(
        Interpreter::builder().animation(Animation::new(Duration::ZERO)),
    );
    s.vm.run("animate 0 f").unwrap();
    assert!(s.calls.borrow().is_empty());
}
