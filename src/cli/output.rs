//! Handles all user-facing output for the CLI.
//!
//! Frames, help and `inspect` listings go through an [`OutputSink`]; the banner
//! and notices are colorized here with `termcolor`.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::atoms::OutputSink;

// ============================================================================
// OUTPUT SINKS: OutputBuffer and StdoutSink implementations
// ============================================================================

/// OutputBuffer: collects output into a String for testing or programmatic capture.
pub struct OutputBuffer {
    pub buffer: String,
    pub screen_clears: usize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            screen_clears: 0,
        }
    }
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }

    fn clear_screen(&mut self) {
        self.screen_clears += 1;
    }
}

/// StdoutSink: writes output to stdout for CLI and REPL use.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }

    fn clear_screen(&mut self) {
        print!("\x1B[2J\x1B[1;1H");
        let _ = io::stdout().flush();
    }
}

// ============================================================================
// CORE OUTPUT FUNCTIONS: User-facing CLI output utilities
// ============================================================================

/// Prints the REPL greeting in bold green.
pub fn print_banner() {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    println!("Turtille v{}", env!("CARGO_PKG_VERSION"));
    let _ = stdout.reset();
}

/// Prints a short hint in yellow.
pub fn print_notice(text: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
    println!("{}", text);
    let _ = stdout.reset();
}
