//! Asset loading: the text face and decoded images

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::{Bitmap, Color};

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse font {path}: {reason}")]
    FontParse { path: PathBuf, reason: &'static str },
}

/// Turns a string into a tightly-sized RGBA bitmap in a single color.
pub trait GlyphRasterizer {
    fn rasterize(&self, text: &str, px: f32, color: Color) -> RgbaImage;
}

/// A TTF/OTF face rasterized with fontdue.
pub struct FontFace {
    font: Font,
}

impl FontFace {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, &'static str> {
        let font = Font::from_bytes(bytes, FontSettings::default())?;
        Ok(Self { font })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AssetError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes).map_err(|reason| AssetError::FontParse {
            path: path.to_path_buf(),
            reason,
        })
    }
}

impl GlyphRasterizer for FontFace {
    fn rasterize(&self, text: &str, px: f32, color: Color) -> RgbaImage {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, px, 0));

        let width = layout
            .glyphs()
            .iter()
            .map(|g| (g.x + g.width as f32).ceil().max(0.0) as u32)
            .max()
            .unwrap_or(0)
            .max(1);
        let height = (layout.height().ceil() as u32).max(1);

        let mut image = RgbaImage::from_pixel(width, height, Rgba([color.r, color.g, color.b, 0]));
        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }

            let (metrics, coverage) = self.font.rasterize_config(glyph.key);
            for (i, &alpha) in coverage.iter().enumerate() {
                let x = glyph.x.round() as i64 + (i % metrics.width) as i64;
                let y = glyph.y.round() as i64 + (i / metrics.width) as i64;
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    continue;
                }

                let a = (alpha as u16 * color.a as u16 / 255) as u8;
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                // overlapping glyph edges keep the stronger coverage
                if a > pixel[3] {
                    pixel[3] = a;
                }
            }
        }

        image
    }
}

/// Shared, lazily populated asset store.
///
/// The font is opened on the first text render and reused afterwards. A
/// failed open is not cached, so the next text render tries again. Images
/// are decoded once per path.
pub struct Resources {
    font_path: PathBuf,
    rasterizer: OnceCell<Rc<dyn GlyphRasterizer>>,
    images: RefCell<HashMap<PathBuf, Rc<Bitmap>>>,
}

impl Resources {
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
            rasterizer: OnceCell::new(),
            images: RefCell::new(HashMap::new()),
        }
    }

    /// Resources whose text is produced by `rasterizer` instead of a font file.
    pub fn with_rasterizer(rasterizer: impl GlyphRasterizer + 'static) -> Self {
        let resources = Self::new(PathBuf::new());
        let rasterizer: Rc<dyn GlyphRasterizer> = Rc::new(rasterizer);
        let _ = resources.rasterizer.set(rasterizer);
        resources
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    pub fn rasterizer(&self) -> Result<Rc<dyn GlyphRasterizer>, AssetError> {
        if let Some(rasterizer) = self.rasterizer.get() {
            return Ok(Rc::clone(rasterizer));
        }

        let face = FontFace::from_file(&self.font_path)?;
        log::info!("Loaded font {}", self.font_path.display());
        let rasterizer: Rc<dyn GlyphRasterizer> = Rc::new(face);
        Ok(Rc::clone(self.rasterizer.get_or_init(|| rasterizer)))
    }

    /// Decode (or fetch the cached) image at `path`.
    pub fn image(&self, path: impl AsRef<Path>) -> Result<Rc<Bitmap>, AssetError> {
        let path = path.as_ref();
        if let Some(bitmap) = self.images.borrow().get(path) {
            return Ok(Rc::clone(bitmap));
        }

        let bitmap = Rc::new(Bitmap::new(load_rgba(path)?));
        self.images
            .borrow_mut()
            .insert(path.to_path_buf(), Rc::clone(&bitmap));
        Ok(bitmap)
    }
}

/// Decode an image file into RGBA8 pixels.
pub fn load_rgba(path: impl AsRef<Path>) -> Result<RgbaImage, AssetError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingRasterizer {
        calls: Rc<Cell<u32>>,
    }

    impl GlyphRasterizer for CountingRasterizer {
        fn rasterize(&self, text: &str, px: f32, _color: Color) -> RgbaImage {
            self.calls.set(self.calls.get() + 1);
            RgbaImage::new(text.len() as u32, px as u32)
        }
    }

    #[test]
    fn test_missing_font_is_reported_and_retried() {
        let resources = Resources::new("does/not/exist.ttf");
        assert!(matches!(
            resources.rasterizer(),
            Err(AssetError::FontRead { .. })
        ));
        // nothing cached, a second call fails the same way
        assert!(resources.rasterizer().is_err());
    }

    #[test]
    fn test_injected_rasterizer_is_shared() {
        let calls = Rc::new(Cell::new(0));
        let resources = Resources::with_rasterizer(CountingRasterizer {
            calls: Rc::clone(&calls),
        });

        let first = resources.rasterizer().unwrap();
        let second = resources.rasterizer().unwrap();
        assert!(Rc::ptr_eq(&first, &second));

        let img = first.rasterize("abc", 12.0, Color::WHITE);
        assert_eq!((img.width(), img.height()), (3, 12));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let resources = Resources::new("unused.ttf");
        let err = resources.image("images/nope.png").unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
    }

    #[test]
    fn test_garbage_font_bytes_are_rejected() {
        assert!(FontFace::from_bytes(b"not a font").is_err());
    }
}
