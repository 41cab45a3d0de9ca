use std::rc::Rc;

use latch_core::Size;

use crate::error::{Error, Result};

/// Anything that can report the intrinsic size of a bitmap.
pub trait ImageProvider {
    /// Intrinsic size in logical units.
    fn size(&self) -> Size;
}

struct ImageData {
    width_px: u32,
    height_px: u32,
    scale: f32,
    /// Logical size, fixed at construction.
    size: Size,
    /// Tightly packed RGBA8 rows; `None` for size-only placeholders.
    pixels: Option<Vec<u8>>,
}

/// Shared handle to a decoded bitmap.
///
/// Cloning is cheap and clones compare equal under [`Image::ptr_eq`]. For
/// bitmaps the logical size is the pixel size divided by `scale`.
#[derive(Clone)]
pub struct Image(Rc<ImageData>);

impl Image {
    /// Wraps raw RGBA8 pixels. The buffer must hold exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, scale: f32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            log::warn!(
                "rejecting {width}x{height} image: {} bytes, expected {expected}",
                pixels.len()
            );
            return Err(Error::PixelBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Self::build(width, height, scale, Some(pixels))
    }

    /// Decodes PNG or JPEG bytes; the format is sniffed from the header.
    pub fn decode(bytes: &[u8], scale: f32) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (w, h) = rgba.dimensions();
        Self::build(w, h, scale, Some(rgba.into_raw()))
    }

    /// A size-only image with no pixel data. `size()` returns `size` as
    /// given (negative extents clamp to zero); `pixel_size()` rounds it up.
    pub fn placeholder(size: Size) -> Self {
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        Image(Rc::new(ImageData {
            width_px: size.width.ceil() as u32,
            height_px: size.height.ceil() as u32,
            scale: 1.0,
            size,
            pixels: None,
        }))
    }

    fn build(width: u32, height: u32, scale: f32, pixels: Option<Vec<u8>>) -> Result<Self> {
        if scale.is_nan() || scale <= 0.0 {
            return Err(Error::Scale(scale));
        }
        Ok(Image(Rc::new(ImageData {
            width_px: width,
            height_px: height,
            scale,
            size: Size::new(width as f32 / scale, height as f32 / scale),
            pixels,
        })))
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.0.width_px, self.0.height_px)
    }

    pub fn scale(&self) -> f32 {
        self.0.scale
    }

    pub fn pixels(&self) -> Option<&[u8]> {
        self.0.pixels.as_deref()
    }

    /// True when both handles point at the same bitmap.
    pub fn ptr_eq(&self, other: &Image) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl ImageProvider for Image {
    fn size(&self) -> Size {
        self.0.size
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width_px", &self.0.width_px)
            .field("height_px", &self.0.height_px)
            .field("scale", &self.0.scale)
            .field("size", &self.0.size)
            .field("pixels", &self.0.pixels.as_ref().map(|_| "..."))
            .finish()
    }
}
