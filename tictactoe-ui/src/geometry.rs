//! Axis-aligned rectangles in logical canvas coordinates

/// Position and size of a drawable, in logical pixels.
///
/// No validation is done on the size; negative extents are stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A `w`×`h` rectangle centered inside `outer`.
    pub fn centered_in(outer: &Bounds, w: f32, h: f32) -> Self {
        Self::new(
            outer.x + (outer.w - w) / 2.0,
            outer.y + (outer.h - h) / 2.0,
            w,
            h,
        )
    }

    pub fn set_size(&mut self, w: f32, h: f32) {
        self.w = w;
        self.h = h;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    /// Translate by a relative offset.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn w(&self) -> f32 {
        self.w
    }

    pub fn h(&self) -> f32 {
        self.h
    }

    /// Read-only view of the whole rectangle.
    pub fn rect(&self) -> &Bounds {
        self
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Closed containment test: points on the edges are inside.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    /// The same rectangle shrunk by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Bounds {
        Bounds::new(
            self.x + amount,
            self.y + amount,
            self.w - amount * 2.0,
            self.h - amount * 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive_of_edges() {
        let b = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert!(b.contains(10.0, 20.0));
        assert!(b.contains(40.0, 60.0));
        assert!(b.contains(25.0, 30.0));
        assert!(!b.contains(9.9, 30.0));
        assert!(!b.contains(25.0, 60.1));
    }

    #[test]
    fn test_move_by_is_relative() {
        let mut b = Bounds::new(1.0, 2.0, 3.0, 4.0);
        b.move_by(5.0, -2.0);
        assert_eq!(b, Bounds::new(6.0, 0.0, 3.0, 4.0));
    }

    #[test]
    fn test_centered_in() {
        let outer = Bounds::new(100.0, 0.0, 60.0, 40.0);
        let inner = Bounds::centered_in(&outer, 20.0, 10.0);
        assert_eq!(inner, Bounds::new(120.0, 15.0, 20.0, 10.0));
    }
}
