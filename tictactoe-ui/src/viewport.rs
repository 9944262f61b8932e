//! Logical canvas to window mapping

use crate::Bounds;

/// Maps a fixed logical canvas onto a window of any size, keeping the
/// aspect ratio and centering the result (letterboxing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    logical_width: f32,
    logical_height: f32,
    physical_width: u32,
    physical_height: u32,
}

impl Viewport {
    pub fn new(logical_width: f32, logical_height: f32) -> Self {
        Self {
            logical_width,
            logical_height,
            physical_width: logical_width as u32,
            physical_height: logical_height as u32,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.physical_width = width;
        self.physical_height = height;
    }

    pub fn logical_size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    pub fn physical_size(&self) -> (u32, u32) {
        (self.physical_width, self.physical_height)
    }

    pub fn scale(&self) -> f32 {
        let sx = self.physical_width as f32 / self.logical_width;
        let sy = self.physical_height as f32 / self.logical_height;
        sx.min(sy)
    }

    /// The region of the window, in physical pixels, the canvas occupies.
    pub fn rect(&self) -> Bounds {
        let scale = self.scale();
        let w = self.logical_width * scale;
        let h = self.logical_height * scale;
        Bounds::new(
            (self.physical_width as f32 - w) / 2.0,
            (self.physical_height as f32 - h) / 2.0,
            w,
            h,
        )
    }

    /// Convert a window position to canvas coordinates. Positions in the
    /// letterbox bars map outside the canvas.
    pub fn to_logical(&self, x: f32, y: f32) -> (f32, f32) {
        let rect = self.rect();
        let scale = self.scale();
        if scale <= 0.0 {
            return (-1.0, -1.0);
        }
        ((x - rect.x()) / scale, (y - rect.y()) / scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_logical_size() {
        let vp = Viewport::new(640.0, 480.0);
        assert_eq!(vp.rect(), Bounds::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(vp.to_logical(100.0, 50.0), (100.0, 50.0));
    }

    #[test]
    fn test_wide_window_is_pillarboxed() {
        let mut vp = Viewport::new(640.0, 480.0);
        vp.resize(1280, 480);
        assert_eq!(vp.rect(), Bounds::new(320.0, 0.0, 640.0, 480.0));
        assert_eq!(vp.to_logical(320.0, 0.0), (0.0, 0.0));
        assert!(vp.to_logical(10.0, 10.0).0 < 0.0);
    }

    #[test]
    fn test_scaled_window_maps_back() {
        let mut vp = Viewport::new(640.0, 480.0);
        vp.resize(1280, 1000);
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.rect(), Bounds::new(0.0, 20.0, 1280.0, 960.0));
        assert_eq!(vp.to_logical(640.0, 500.0), (320.0, 240.0));
    }

    #[test]
    fn test_minimized_window() {
        let mut vp = Viewport::new(640.0, 480.0);
        vp.resize(0, 0);
        assert_eq!(vp.to_logical(5.0, 5.0), (-1.0, -1.0));
    }
}
