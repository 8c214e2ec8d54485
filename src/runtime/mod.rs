//! # Turtille Runtime
//!
//! - **`registry`**: name and alias lookup for builtins and macros
//! - **`interpreter`**: the VM that parses, defines and executes programs
//! - **`animation`**: the redraw loop behind `animate`
//! - **`interrupt`**: the Ctrl-C flag every loop polls
//! - **`persistence`**: the macro table as DSL text, for `save` and `load`

use std::{path::PathBuf, time::Duration};

pub mod animation;
pub mod interpreter;
pub mod interrupt;
pub mod persistence;
pub mod registry;

pub use animation::{Animation, LogLevelGuard};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use interrupt::Interrupt;
pub use registry::{Action, Registry};

pub const DEFAULT_STORE: &str = ".turtille";
pub const DEFAULT_FPS: u32 = 24;

/// Session settings the front end maps its flags onto.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Where `save` and `load` go without an explicit path.
    pub store: PathBuf,
    /// Pause between animation frames.
    pub frame_delay: Duration,
    /// Load macros from `store` when the interpreter is built.
    pub load_store: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            store: PathBuf::from(DEFAULT_STORE),
            frame_delay: frame_delay(DEFAULT_FPS),
            load_store: true,
        }
    }
}

/// Frame delay for a frame rate; 0 fps means no delay.
pub fn frame_delay(fps: u32) -> Duration {
    if fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(1.0 / f64::from(fps))
    }
}
