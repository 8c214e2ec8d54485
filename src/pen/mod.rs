//! # Pen
//!
//! The drawing surface the movement builtins delegate to. The interpreter only
//! knows the [`Pen`] trait; the default implementation is a [`Turtle`] drawing
//! braille dots onto a [`Canvas`].

pub mod canvas;
pub mod turtle;

pub use canvas::Canvas;
pub use turtle::Turtle;

/// Turtle-graphics state machine driven by the movement builtins.
///
/// Angles are in degrees; positive turns go right.
pub trait Pen {
    fn forward(&mut self, step: f64);

    fn back(&mut self, step: f64) {
        self.forward(-step);
    }

    fn left(&mut self, angle: f64);
    fn right(&mut self, angle: f64);

    /// Lifts the pen so `move_to` stops drawing.
    fn up(&mut self);
    fn down(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    /// Removes everything drawn, keeping position and heading.
    fn clear(&mut self);

    /// Back to the origin with heading 0 and an empty surface.
    fn reset(&mut self);

    /// The current drawing as printable text.
    fn render_frame(&self) -> String;
}
