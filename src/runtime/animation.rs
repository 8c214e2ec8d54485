//! Animation capability.
//!
//! `animate` reruns a body and redraws the frame after every pass until its count
//! runs out or Ctrl-C raises the interpreter's [`Interrupt`](super::Interrupt). Debug
//! output would scroll the frames away, so log verbosity is capped for the duration
//! of the loop.

use std::{thread, time::Duration};

use log::{debug, LevelFilter};

use crate::{
    ast::Command,
    errors::{Result, TurtilleError},
    runtime::Interpreter,
};

pub const STOP_HINT: &str = "# press Ctrl-C to stop animation";
pub const STOPPED: &str = "# stopped animation";

/// Lowers `log::max_level` to at most `cap` and restores the previous level on drop.
pub struct LogLevelGuard {
    previous: LevelFilter,
}

impl LogLevelGuard {
    pub fn cap(cap: LevelFilter) -> Self {
        let previous = log::max_level();
        log::set_max_level(previous.min(cap));
        Self { previous }
    }
}

impl Drop for LogLevelGuard {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Animation {
    frame_delay: Duration,
}

impl Animation {
    pub fn new(frame_delay: Duration) -> Self {
        Self { frame_delay }
    }
}

impl Interpreter {
    /// Runs `body` then shows the frame, `count` times or until interrupted.
    ///
    /// An interrupt is not an error here: the loop consumes it, prints a notice and
    /// returns `Ok`.
    pub fn animate(&mut self, count: Option<f64>, body: &[Command]) -> Result<()> {
        let Some(animation) = self.animation else {
            return Err(TurtilleError::UnknownCommand {
                names: vec!["animate".to_string()],
            });
        };
        let limit = count
            .map(|count| super::interpreter::repeat_count("animate", count))
            .transpose()?;
        debug!("starting animation: n={limit:?}, body={}", body.len());

        let _quiet = LogLevelGuard::cap(LevelFilter::Info);
        // a Ctrl-C pressed before the animation started is not meant for it
        self.interrupt.take();

        let mut done = 0;
        while limit.map_or(true, |limit| done < limit) {
            match self.run_program(body) {
                Err(e) if e.is_interrupt() => {
                    self.stop_animation();
                    break;
                }
                result => result?,
            }
            done += 1;
            self.show_frame();
            if !animation.frame_delay.is_zero() {
                thread::sleep(animation.frame_delay);
            }
            if self.interrupt.is_triggered() {
                self.stop_animation();
                break;
            }
        }
        Ok(())
    }

    fn stop_animation(&self) {
        self.interrupt.take();
        self.output.emit(STOPPED);
    }

    fn show_frame(&self) {
        let frame = self.pen.render_frame();
        let mut sink = self.output.borrow_mut();
        sink.clear_screen();
        sink.emit(STOP_HINT);
        sink.emit(&frame);
    }
}
