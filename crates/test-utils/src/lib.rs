//! Shared test utilities for the marching-squares workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic image generators
//! - Contour tile fixtures (in memory and on disk)
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{solid_image, tile_images, TileDir};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

pub use contour_common;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert two pixels are equal within `tolerance` on every channel.
#[macro_export]
macro_rules! assert_pixel_near {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: $crate::contour_common::Rgb = $left;
        let right: $crate::contour_common::Rgb = $right;
        let tolerance: i16 = $tolerance;
        for (l, r) in left.channels().iter().zip(right.channels().iter()) {
            if (*l as i16 - *r as i16).abs() > tolerance {
                panic!(
                    "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  tolerance: `{}`",
                    left, right, tolerance
                );
            }
        }
    }};
}
