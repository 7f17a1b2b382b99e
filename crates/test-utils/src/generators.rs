//! Synthetic image generators.
//!
//! These create predictable, verifiable images that can be used across the
//! test suite. All of them use the workspace pixel convention, so
//! `img.get(x, y)` is the pixel the generator computed for `(x, y)`.

use contour_common::{Rgb, RgbImage};

/// Image with every pixel set to `color`.
pub fn solid_image(width: usize, height: usize, color: Rgb) -> RgbImage {
    RgbImage::filled(width, height, color)
}

/// Gray ramp along x, from black at `x = 0` to white at `x = width - 1`.
pub fn gradient_image(width: usize, height: usize) -> RgbImage {
    let span = width.saturating_sub(1).max(1) as f32;
    RgbImage::from_fn(width, height, |x, _| {
        Rgb::gray((x as f32 / span * 255.0).round() as u8)
    })
}

/// Black disc of `radius` pixels centred in a white image.
///
/// # Example
///
/// ```
/// use test_utils::disc_image;
/// use contour_common::Rgb;
///
/// let img = disc_image(21, 21, 5.0);
/// assert_eq!(img.get(10, 10), Rgb::BLACK);
/// assert_eq!(img.get(0, 0), Rgb::WHITE);
/// ```
pub fn disc_image(width: usize, height: usize, radius: f32) -> RgbImage {
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        if dx * dx + dy * dy <= radius * radius {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    })
}

/// Checkerboard of black and white squares `cell` pixels wide.
pub fn checker_image(width: usize, height: usize, cell: usize) -> RgbImage {
    let cell = cell.max(1);
    RgbImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    })
}

/// Deterministic pseudo-random image (xorshift), reproducible across runs.
pub fn noise_image(width: usize, height: usize, seed: u64) -> RgbImage {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    RgbImage::from_fn(width, height, |_, _| {
        let v = next();
        Rgb::new(v as u8, (v >> 8) as u8, (v >> 16) as u8)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let img = gradient_image(11, 3);
        assert_eq!(img.get(0, 2), Rgb::BLACK);
        assert_eq!(img.get(10, 0), Rgb::WHITE);
    }

    #[test]
    fn test_checker_alternates() {
        let img = checker_image(4, 4, 2);
        assert_eq!(img.get(0, 0), Rgb::BLACK);
        assert_eq!(img.get(2, 0), Rgb::WHITE);
        assert_eq!(img.get(2, 2), Rgb::BLACK);
    }

    #[test]
    fn test_noise_is_reproducible() {
        assert_eq!(noise_image(8, 8, 42), noise_image(8, 8, 42));
        assert_ne!(noise_image(8, 8, 42), noise_image(8, 8, 43));
    }
}
