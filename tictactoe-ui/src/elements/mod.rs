//! Drawable building blocks
//!
//! Every element owns its `Bounds` and paints inside them when drawn.

pub mod button;
pub mod rectangle;
pub mod texture;

pub use button::{Button, ButtonState, ButtonStyle};
pub use rectangle::Rectangle;
pub use texture::{Texture, TextureError};

use crate::{Bounds, DrawList};

/// Something that occupies a rectangle and can record itself into a frame.
pub trait Widget {
    fn bounds(&self) -> &Bounds;

    fn draw(&self, list: &mut DrawList);
}
