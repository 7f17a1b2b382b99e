//! Owned RGB raster used by every pipeline stage.
//!
//! Pixels are stored in a single contiguous buffer. The linear index of pixel
//! `(x, y)` is `x * height + y`; [`RgbImage::index`] is the only place that
//! convention is spelled out, everything else goes through it. The buffer
//! order is also the order of the raw PPM payload, so decoding and encoding
//! never reorder pixels.

use crate::error::{ContourError, ContourResult};

/// One 8-bit-per-channel RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray pixel with all three channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Average luminance `(R + G + B) / 3`, truncated.
    #[inline]
    pub fn luminance(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Owned image with explicit dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Image of the given size with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Wrap an existing pixel buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> ContourResult<Self> {
        if pixels.len() != width * height {
            return Err(ContourError::invalid_size(format!(
                "{}x{} image needs {} pixels, got {}",
                width,
                height,
                width * height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Linear buffer index of pixel `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        linear_index(self.height, x, y)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: Rgb) {
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Borrowed view over this image.
    pub fn view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }
}

/// Read-only view over a pixel buffer with the same indexing as [`RgbImage`].
///
/// Workers build one of these over the shared working buffer once they know
/// no other worker is still writing to it.
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    width: usize,
    height: usize,
    pixels: &'a [Rgb],
}

impl<'a> RasterView<'a> {
    /// # Panics
    /// If `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: &'a [Rgb]) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "raster view over {}x{} needs {} pixels",
            width,
            height,
            width * height
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        linear_index(self.height, x, y)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    /// Pixel at a raw linear buffer index.
    #[inline]
    pub fn at(&self, linear: usize) -> Rgb {
        self.pixels[linear]
    }

    pub fn pixels(&self) -> &'a [Rgb] {
        self.pixels
    }
}

#[inline(always)]
fn linear_index(height: usize, x: usize, y: usize) -> usize {
    x * height + y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_convention() {
        let img = RgbImage::new(4, 3);
        assert_eq!(img.index(0, 0), 0);
        assert_eq!(img.index(0, 2), 2);
        assert_eq!(img.index(1, 0), 3);
        assert_eq!(img.index(3, 2), 11);
    }

    #[test]
    fn test_from_fn_matches_get() {
        let img = RgbImage::from_fn(5, 7, |x, y| Rgb::new(x as u8, y as u8, 0));
        for x in 0..5 {
            for y in 0..7 {
                assert_eq!(img.get(x, y), Rgb::new(x as u8, y as u8, 0));
            }
        }
        assert_eq!(img.view().at(img.index(2, 3)), img.get(2, 3));
    }

    #[test]
    fn test_from_pixels_rejects_wrong_length() {
        let err = RgbImage::from_pixels(2, 2, vec![Rgb::BLACK; 3]).unwrap_err();
        assert!(matches!(err, ContourError::InvalidSize(_)));
    }

    #[test]
    fn test_luminance_truncates() {
        assert_eq!(Rgb::new(255, 255, 255).luminance(), 255);
        assert_eq!(Rgb::new(200, 201, 201).luminance(), 200);
        assert_eq!(Rgb::new(1, 1, 0).luminance(), 0);
    }
}
