//! Flat-colored rectangle

use super::Widget;
use crate::{Bounds, Color, DrawList};

#[derive(Debug, Clone)]
pub struct Rectangle {
    bounds: Bounds,
    color: Color,
}

impl Rectangle {
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            bounds: Bounds::new(0.0, 0.0, w, h),
            color: Color::WHITE,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn bounds_mut(&mut self) -> &mut Bounds {
        &mut self.bounds
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_color_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.color = Color::rgba(r, g, b, a);
    }
}

impl Widget for Rectangle {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn draw(&self, list: &mut DrawList) {
        list.fill_rect(self.bounds, self.color);
    }
}
