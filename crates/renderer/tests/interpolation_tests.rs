//! Tests for bicubic resampling.

use contour_common::{Rgb, RgbImage};
use renderer::interpolation::{cubic_hermite, resample, sample_bicubic};
use test_utils::{assert_approx_eq, assert_pixel_near, disc_image, gradient_image, noise_image};

// ============================================================================
// cubic_hermite tests
// ============================================================================

#[test]
fn test_hermite_constant_data() {
    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        assert_approx_eq!(cubic_hermite(42.0, 42.0, 42.0, 42.0, t), 42.0, 1e-4);
    }
}

#[test]
fn test_hermite_reproduces_linear_data() {
    for t in [0.0f32, 0.1, 0.5, 0.9] {
        let expected = 10.0 + 10.0 * t;
        assert_approx_eq!(cubic_hermite(0.0, 10.0, 20.0, 30.0, t), expected, 1e-3);
    }
}

#[test]
fn test_hermite_catmull_rom_coefficients() {
    // a = -A/2 + 3B/2 - 3C/2 + D/2, b = A - 5B/2 + 2C - D/2, c = -A/2 + C/2, d = B
    let (a, b, c, d) = (3.0f32, 7.0, 2.0, 9.0);
    let t = 0.3f32;
    let ca = -a / 2.0 + 3.0 * b / 2.0 - 3.0 * c / 2.0 + d / 2.0;
    let cb = a - 5.0 * b / 2.0 + 2.0 * c - d / 2.0;
    let cc = -a / 2.0 + c / 2.0;
    let expected = ca * t * t * t + cb * t * t + cc * t + b;
    assert_approx_eq!(cubic_hermite(a, b, c, d, t), expected, 1e-4);
}

// ============================================================================
// sample_bicubic tests
// ============================================================================

#[test]
fn test_sample_at_pixel_centres_is_exact() {
    let img = noise_image(9, 5, 7);
    for x in 0..9 {
        for y in 0..5 {
            let u = (x as f32 + 0.5) / 9.0;
            let v = (y as f32 + 0.5) / 5.0;
            assert_pixel_near!(sample_bicubic(img.view(), u, v), img.get(x, y), 1);
        }
    }
}

#[test]
fn test_sample_clamps_at_edges() {
    let img = RgbImage::filled(4, 4, Rgb::new(200, 100, 50));
    // Corners pull neighbours from outside the image, which clamp to the edge
    for (u, v) in [(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)] {
        assert_eq!(sample_bicubic(img.view(), u, v), Rgb::new(200, 100, 50));
    }
}

#[test]
fn test_sample_channels_independent() {
    let img = RgbImage::from_fn(4, 4, |x, _| Rgb::new(255, (x * 60) as u8, 0));
    let px = sample_bicubic(img.view(), 0.5, 0.5);
    assert_eq!(px.r, 255);
    assert_eq!(px.b, 0);
    assert!(px.g > 60 && px.g < 180);
}

#[test]
fn test_sample_overshoot_is_clamped() {
    // Sharp edge: Catmull-Rom rings above 255 and below 0 next to it
    let img = RgbImage::from_fn(8, 1, |x, _| if x < 4 { Rgb::BLACK } else { Rgb::WHITE });
    for i in 0..64 {
        let u = i as f32 / 63.0;
        let px = sample_bicubic(img.view(), u, 0.5);
        assert_eq!(px.r, px.g);
        assert_eq!(px.g, px.b);
    }
}

// ============================================================================
// resample tests
// ============================================================================

#[test]
fn test_resample_to_same_size_is_identity() {
    for img in [noise_image(17, 13, 3), disc_image(32, 32, 9.0), gradient_image(5, 40)] {
        let out = resample(&img, img.width(), img.height());
        assert_eq!((out.width(), out.height()), (img.width(), img.height()));
        for (a, b) in out.pixels().iter().zip(img.pixels()) {
            assert_pixel_near!(*a, *b, 1);
        }
    }
}

#[test]
fn test_resample_constant_image_stays_constant() {
    let img = RgbImage::filled(30, 20, Rgb::new(9, 99, 199));
    let out = resample(&img, 7, 11);
    assert_eq!((out.width(), out.height()), (7, 11));
    assert!(out.pixels().iter().all(|&p| p == Rgb::new(9, 99, 199)));
}

#[test]
fn test_downscale_preserves_gradient_direction() {
    let img = gradient_image(64, 8);
    let out = resample(&img, 16, 4);
    for x in 1..16 {
        assert!(out.get(x, 2).r >= out.get(x - 1, 2).r);
    }
}
