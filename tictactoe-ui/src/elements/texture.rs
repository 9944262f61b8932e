//! Image and text drawable

use std::path::Path;
use std::rc::Rc;

use thiserror::Error;

use super::Widget;
use crate::{AssetError, Bitmap, Bounds, Color, DrawList, Resources};

const DEFAULT_TEXT_SIZE: f32 = 16.0;
const DEFAULT_TEXT_COLOR: Color = Color::rgb(60, 60, 60);

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to render text {text:?}: {source}")]
    Text {
        text: String,
        #[source]
        source: AssetError,
    },
    #[error("Failed to load image: {0}")]
    Image(#[source] AssetError),
}

/// A bitmap painted into its bounds, optionally cropped and rotated.
///
/// The bitmap comes either from an image file or from rendering the
/// current text with the shared font. Natural bitmap size
/// ([`Texture::width`], [`Texture::height`]) is independent of the
/// destination bounds.
pub struct Texture {
    bounds: Bounds,
    resources: Rc<Resources>,
    bitmap: Option<Rc<Bitmap>>,
    text: String,
    text_size: f32,
    text_color: Color,
    source: Option<Bounds>,
    angle: f32,
}

impl Texture {
    pub fn new(resources: &Rc<Resources>) -> Self {
        Self {
            bounds: Bounds::default(),
            resources: Rc::clone(resources),
            bitmap: None,
            text: String::new(),
            text_size: DEFAULT_TEXT_SIZE,
            text_color: DEFAULT_TEXT_COLOR,
            source: None,
            angle: 0.0,
        }
    }

    /// A texture showing an already decoded bitmap at its natural size.
    pub fn from_bitmap(resources: &Rc<Resources>, bitmap: Rc<Bitmap>) -> Self {
        let mut texture = Self::new(resources);
        texture.set_bitmap(bitmap);
        texture
    }

    /// Set text, size and color in one go. Call [`Texture::make_text`] afterwards.
    pub fn setup_text(&mut self, text: &str, size: f32, color: Color) {
        self.set_text(text);
        self.set_text_size(size);
        self.set_text_color(color);
    }

    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.text_size = size;
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the current text into a fresh bitmap.
    ///
    /// On failure the previous bitmap, if any, stays in place.
    pub fn make_text(&mut self) -> Result<(), TextureError> {
        let rasterizer = self
            .resources
            .rasterizer()
            .map_err(|source| TextureError::Text {
                text: self.text.clone(),
                source,
            })?;

        let image = rasterizer.rasterize(&self.text, self.text_size, self.text_color);
        self.set_bitmap(Rc::new(Bitmap::new(image)));
        Ok(())
    }

    /// Decode an image into this texture. On failure the texture is left
    /// without a bitmap and the error is logged.
    pub fn load_image_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), TextureError> {
        match self.resources.image(path) {
            Ok(bitmap) => {
                self.set_bitmap(bitmap);
                Ok(())
            }
            Err(e) => {
                log::error!("{}", e);
                self.bitmap = None;
                Err(TextureError::Image(e))
            }
        }
    }

    /// Replace the bitmap. The destination size follows the new natural size.
    pub fn set_bitmap(&mut self, bitmap: Rc<Bitmap>) {
        self.bounds
            .set_size(bitmap.width() as f32, bitmap.height() as f32);
        self.bitmap = Some(bitmap);
    }

    pub fn bitmap(&self) -> Option<&Rc<Bitmap>> {
        self.bitmap.as_ref()
    }

    pub fn has_bitmap(&self) -> bool {
        self.bitmap.is_some()
    }

    /// Natural width of the bitmap, 0 when absent.
    pub fn width(&self) -> f32 {
        self.bitmap.as_ref().map_or(0.0, |b| b.width() as f32)
    }

    /// Natural height of the bitmap, 0 when absent.
    pub fn height(&self) -> f32 {
        self.bitmap.as_ref().map_or(0.0, |b| b.height() as f32)
    }

    pub fn bounds_mut(&mut self) -> &mut Bounds {
        &mut self.bounds
    }

    pub fn set_rect(&mut self, rect: Bounds) {
        self.bounds = rect;
    }

    pub fn set_source_rect(&mut self, source: Option<Bounds>) {
        self.source = source;
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Draw with explicit parameters instead of the stored ones.
    /// `dest` of `None` uses the texture's own bounds.
    pub fn draw_ex(
        &self,
        list: &mut DrawList,
        source: Option<Bounds>,
        dest: Option<Bounds>,
        angle: f32,
    ) {
        if let Some(bitmap) = &self.bitmap {
            list.draw_image(
                Rc::clone(bitmap),
                source,
                dest.unwrap_or(self.bounds),
                angle,
            );
        }
    }
}

impl Widget for Texture {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn draw(&self, list: &mut DrawList) {
        self.draw_ex(list, self.source, None, self.angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawCommand, GlyphRasterizer};
    use image::RgbaImage;

    /// One pixel per char, `px` pixels tall.
    struct BlockRasterizer;

    impl GlyphRasterizer for BlockRasterizer {
        fn rasterize(&self, text: &str, px: f32, _color: Color) -> RgbaImage {
            RgbaImage::new(text.chars().count().max(1) as u32, px as u32)
        }
    }

    fn stub_resources() -> Rc<Resources> {
        Rc::new(Resources::with_rasterizer(BlockRasterizer))
    }

    #[test]
    fn test_make_text_sizes_bitmap() {
        let resources = stub_resources();
        let mut texture = Texture::new(&resources);
        texture.setup_text("Restart", 16.0, Color::WHITE);
        texture.make_text().unwrap();

        assert_eq!((texture.width(), texture.height()), (7.0, 16.0));
        assert_eq!(texture.bounds().w(), 7.0);
    }

    #[test]
    fn test_failed_make_text_keeps_previous_bitmap() {
        let resources = stub_resources();
        let mut texture = Texture::new(&resources);
        texture.set_text("0");
        texture.make_text().unwrap();
        let before = texture.bitmap().unwrap().id();

        let broken = Rc::new(Resources::new("missing/font.ttf"));
        texture.resources = broken;
        texture.set_text("1");
        assert!(texture.make_text().is_err());
        assert_eq!(texture.bitmap().unwrap().id(), before);
    }

    #[test]
    fn test_failed_image_load_leaves_texture_absent() {
        let resources = stub_resources();
        let mut texture = Texture::new(&resources);
        assert!(texture.load_image_from_file("images/missing.png").is_err());
        assert!(!texture.has_bitmap());

        let mut list = DrawList::new();
        texture.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_draw_carries_source_and_angle() {
        let resources = stub_resources();
        let mut texture = Texture::from_bitmap(&resources, Rc::new(Bitmap::new(RgbaImage::new(8, 8))));
        texture.set_source_rect(Some(Bounds::new(0.0, 0.0, 4.0, 4.0)));
        texture.set_angle(45.0);
        texture.bounds_mut().set_position(10.0, 10.0);

        let mut list = DrawList::new();
        texture.draw(&mut list);
        match &list.commands()[0] {
            DrawCommand::Image {
                source, dest, angle, ..
            } => {
                assert_eq!(*source, Some(Bounds::new(0.0, 0.0, 4.0, 4.0)));
                assert_eq!(*dest, Bounds::new(10.0, 10.0, 8.0, 8.0));
                assert_eq!(*angle, 45.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
