//! Textures: pure functions of `(u, v, p)` to a linear RGB color.
//!
//! Textures are immutable after construction and shared between materials
//! through `Arc<dyn Texture>`, so they must be `Send + Sync`.

use std::path::Path;
use std::sync::Arc;

use lux_math::{Interval, Vec3};
use thiserror::Error;

/// Color type alias (linear RGB, unbounded for HDR).
pub type Color = Vec3;

/// Errors that can occur while loading image textures.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer holds {len} texels, expected {width}x{height}")]
    InvalidDimensions { width: u32, height: u32, len: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A color lookup over surface coordinates and hit position.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A texture that returns the same color everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl From<Color> for SolidColor {
    fn from(albedo: Color) -> Self {
        Self::new(albedo)
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// A 3D checkerboard alternating between two textures.
///
/// Cells are cubes of side `scale` in world space, so the pattern is
/// independent of the surface parameterization.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let cell = (self.inv_scale * p).floor();
        // Summed as floats: integer casts overflow for huge or tiny scales.
        let parity = (cell.x + cell.y + cell.z).rem_euclid(2.0);

        if parity == 0.0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Decoded image pixels in linear RGB.
///
/// Stored row-major with row 0 at the top of the image.
#[derive(Clone, Debug)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[f32; 3]>,
}

impl ImageData {
    /// Create image data from linear pixels, validating the buffer length.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 3]>) -> TextureResult<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load an image file and convert its sRGB bytes to linear floats.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels = rgb
            .pixels()
            .map(|p| {
                [
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                ]
            })
            .collect();

        let data = Self::new(width, height, pixels)?;
        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path.display(),
            width,
            height,
            data.size_bytes() as f32 / 1024.0
        );
        Ok(data)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = (y * self.width + x) as usize;
        self.pixels
            .get(idx)
            .map(|&[r, g, b]| Color::new(r, g, b))
            .unwrap_or(Color::ZERO)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 3]>()
    }
}

/// An image mapped over the surface's `(u, v)` coordinates.
pub struct ImageTexture {
    image: Option<ImageData>,
}

impl ImageTexture {
    /// Debug color returned when no image data is available.
    pub const MISSING: Color = Color::new(0.0, 1.0, 1.0);

    pub fn from_image(image: ImageData) -> Self {
        Self { image: Some(image) }
    }

    /// Load an image texture, propagating decode failures.
    pub fn try_open(path: impl AsRef<Path>) -> TextureResult<Self> {
        ImageData::load(path).map(Self::from_image)
    }

    /// Load an image texture, falling back to solid cyan if it can't be read.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match ImageData::load(path) {
            Ok(image) => Self::from_image(image),
            Err(err) => {
                log::warn!("Could not load image texture {}: {}", path.display(), err);
                Self { image: None }
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

impl Texture for ImageTexture {
    /// Bilinear lookup. `(u, v)` are clamped to `[0, 1]` with `v = 0` at the
    /// bottom of the image.
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        let Some(image) = &self.image else {
            return Self::MISSING;
        };

        let u = Interval::UNIT.clamp(u);
        let v = 1.0 - Interval::UNIT.clamp(v);

        let x = u * (image.width - 1) as f32;
        let y = v * (image.height - 1) as f32;

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(image.width - 1);
        let y1 = (y0 + 1).min(image.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let top = image.get_pixel(x0, y0).lerp(image.get_pixel(x1, y0), fx);
        let bottom = image.get_pixel(x0, y1).lerp(image.get_pixel(x1, y1), fx);

        top.lerp(bottom, fy)
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
