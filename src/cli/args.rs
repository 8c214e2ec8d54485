//! Defines the command-line arguments for the Turtille CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::Parser;
use std::path::PathBuf;

use crate::runtime::{frame_delay, InterpreterConfig, DEFAULT_FPS, DEFAULT_STORE};

/// The main CLI argument structure.
///
/// Without `--run` or a file, Turtille starts the interactive REPL.
#[derive(Debug, Parser)]
#[command(
    name = "turtille",
    version,
    about = "Turtille: draw turtle graphics in the terminal with a tiny command language."
)]
pub struct TurtilleArgs {
    /// Turtille program code; several words are joined with spaces.
    #[arg(short = 'c', long = "run", value_name = "PROGRAM", num_args = 1..)]
    pub run: Vec<String>,

    /// A Turtille code file to run.
    #[arg(value_name = "TURFILE")]
    pub file: Option<PathBuf>,

    /// Print the turtle frame on exit.
    #[arg(short, long)]
    pub print: bool,

    /// Enable debug logs.
    #[arg(long)]
    pub debug: bool,

    /// Where `save` and `load` go without a path.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    /// Do not load the store at startup.
    #[arg(long)]
    pub no_load: bool,

    /// Animation frames per second (0 for no delay).
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,
}

impl TurtilleArgs {
    pub fn config(&self) -> InterpreterConfig {
        InterpreterConfig {
            store: self.store.clone(),
            frame_delay: frame_delay(self.fps),
            load_store: !self.no_load,
        }
    }
}
