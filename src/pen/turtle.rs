use log::trace;

use super::{
    canvas::{line, Canvas},
    Pen,
};

/// Braille turtle: a position, a heading in degrees and a pen that is up or down.
///
/// `forward` and `back` always draw, whatever the pen state; only `move_to` honours `up`.
#[derive(Debug, Clone)]
pub struct Turtle {
    canvas: Canvas,
    x: f64,
    y: f64,
    heading: f64,
    pen_down: bool,
}

impl Default for Turtle {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(),
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            pen_down: true,
        }
    }
}

impl Turtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn travel(&mut self, x: f64, y: f64, draw: bool) {
        if draw {
            for (px, py) in line(self.x, self.y, x, y) {
                self.canvas.set(px, py);
            }
        }
        trace!("turtle ({}, {}) -> ({x}, {y})", self.x, self.y);
        self.x = x;
        self.y = y;
    }
}

impl Pen for Turtle {
    fn forward(&mut self, step: f64) {
        let radians = self.heading.to_radians();
        let x = self.x + radians.cos() * step;
        let y = self.y + radians.sin() * step;
        self.travel(x, y, true);
    }

    fn left(&mut self, angle: f64) {
        self.heading -= angle;
    }

    fn right(&mut self, angle: f64) {
        self.heading += angle;
    }

    fn up(&mut self) {
        self.pen_down = false;
    }

    fn down(&mut self) {
        self.pen_down = true;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.travel(x, y, self.pen_down);
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.heading = 0.0;
        self.canvas.clear();
    }

    fn render_frame(&self) -> String {
        self.canvas.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn forward_follows_heading() {
        let mut turtle = Turtle::new();
        turtle.right(90.0);
        turtle.forward(10.0);
        let (x, y) = turtle.position();
        assert!(close(x, 0.0) && close(y, 10.0), "({x}, {y})");
        assert!(turtle.canvas().get(0.0, 5.0));
    }

    #[test]
    fn back_is_negative_forward() {
        let mut turtle = Turtle::new();
        turtle.back(4.0);
        assert!(close(turtle.position().0, -4.0));
    }

    #[test]
    fn pen_up_only_affects_move_to() {
        let mut turtle = Turtle::new();
        turtle.up();
        turtle.move_to(6.0, 0.0);
        assert!(turtle.canvas().is_empty());
        turtle.forward(4.0);
        assert!(turtle.canvas().get(8.0, 0.0));
        turtle.down();
        turtle.move_to(10.0, 8.0);
        assert!(turtle.canvas().get(10.0, 8.0));
    }

    #[test]
    fn reset_returns_home_but_keeps_pen_state() {
        let mut turtle = Turtle::new();
        turtle.right(30.0);
        turtle.forward(12.0);
        turtle.up();
        turtle.reset();
        assert_eq!(turtle.position(), (0.0, 0.0));
        assert_eq!(turtle.heading(), 0.0);
        assert!(turtle.render_frame().is_empty());
        assert!(!turtle.is_pen_down());
    }

    #[test]
    fn clear_keeps_position() {
        let mut turtle = Turtle::new();
        turtle.forward(5.0);
        turtle.clear();
        assert!(turtle.render_frame().is_empty());
        assert!(close(turtle.position().0, 5.0));
    }
}
