//! Recorded draw commands
//!
//! Widgets describe a frame by appending to a `DrawList`; the renderer
//! replays it in order. Keeping the list free of GPU types lets every
//! widget be exercised without a device.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;

use crate::{Bounds, Color};

static NEXT_BITMAP_ID: AtomicU64 = AtomicU64::new(1);

/// Decoded RGBA pixels with a process-unique id the renderer caches GPU
/// textures under.
#[derive(Debug)]
pub struct Bitmap {
    id: u64,
    image: RgbaImage,
}

impl Bitmap {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            id: NEXT_BITMAP_ID.fetch_add(1, Ordering::Relaxed),
            image,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Fill {
        rect: Bounds,
        color: Color,
    },
    Image {
        bitmap: Rc<Bitmap>,
        /// Sub-region of the bitmap in pixels; `None` means the whole bitmap.
        source: Option<Bounds>,
        dest: Bounds,
        /// Clockwise degrees about the center of `dest`.
        angle: f32,
    },
}

/// Bitmaps compare by identity.
impl PartialEq for DrawCommand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                DrawCommand::Fill { rect, color },
                DrawCommand::Fill {
                    rect: other_rect,
                    color: other_color,
                },
            ) => rect == other_rect && color == other_color,
            (
                DrawCommand::Image {
                    bitmap,
                    source,
                    dest,
                    angle,
                },
                DrawCommand::Image {
                    bitmap: other_bitmap,
                    source: other_source,
                    dest: other_dest,
                    angle: other_angle,
                },
            ) => {
                Rc::ptr_eq(bitmap, other_bitmap)
                    && source == other_source
                    && dest == other_dest
                    && angle == other_angle
            }
            _ => false,
        }
    }
}

/// One frame worth of drawing, in painter's order.
#[derive(Debug, Clone)]
pub struct DrawList {
    clear_color: Color,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            clear_color: Color::BLACK,
            commands: Vec::new(),
        }
    }

    /// Drop all commands and start a new frame cleared to `color`.
    pub fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.commands.clear();
    }

    pub fn fill_rect(&mut self, rect: Bounds, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    pub fn draw_image(
        &mut self,
        bitmap: Rc<Bitmap>,
        source: Option<Bounds>,
        dest: Bounds,
        angle: f32,
    ) {
        self.commands.push(DrawCommand::Image {
            bitmap,
            source,
            dest,
            angle,
        });
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_ids_are_unique() {
        let a = Bitmap::new(RgbaImage::new(1, 1));
        let b = Bitmap::new(RgbaImage::new(1, 1));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_clear_resets_commands() {
        let mut list = DrawList::new();
        list.fill_rect(Bounds::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(list.len(), 1);

        list.clear(Color::rgb(1, 2, 3));
        assert!(list.is_empty());
        assert_eq!(list.clear_color(), Color::rgb(1, 2, 3));
    }
}
