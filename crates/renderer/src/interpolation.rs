//! Bicubic resampling of RGB images.

use contour_common::{RasterView, Rgb, RgbImage};

/// 1D cubic Hermite interpolation with Catmull-Rom tangents.
///
/// Interpolates between `b` (t = 0) and `c` (t = 1), using `a` and `d` as the
/// outer neighbours.
#[inline]
pub fn cubic_hermite(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let ca = -a / 2.0 + (3.0 * b) / 2.0 - (3.0 * c) / 2.0 + d / 2.0;
    let cb = a - (5.0 * b) / 2.0 + 2.0 * c - d / 2.0;
    let cc = -a / 2.0 + c / 2.0;
    let cd = b;

    ca * t * t * t + cb * t * t + cc * t + cd
}

/// Sample `src` at normalized coordinates `(u, v)` in `[0, 1] x [0, 1]`.
///
/// The 4x4 neighbourhood is read with edge clamping, interpolated along x for
/// each of the four rows, then along y. Each channel is handled on its own and
/// clamped to `[0, 255]` before truncation.
pub fn sample_bicubic(src: RasterView<'_>, u: f32, v: f32) -> Rgb {
    let x = u * src.width() as f32 - 0.5;
    let y = v * src.height() as f32 - 0.5;

    let x_floor = x.floor();
    let y_floor = y.floor();
    let xf = x - x_floor;
    let yf = y - y_floor;
    let xi = x_floor as i64;
    let yi = y_floor as i64;

    // neighbourhood[row][col], rows along y, cols along x
    let mut neighbourhood = [[[0.0f32; 3]; 4]; 4];
    for (j, row) in neighbourhood.iter_mut().enumerate() {
        for (i, sample) in row.iter_mut().enumerate() {
            let px = pixel_clamped(src, xi + i as i64 - 1, yi + j as i64 - 1);
            *sample = px.channels().map(f32::from);
        }
    }

    let mut out = [0u8; 3];
    for (channel, value) in out.iter_mut().enumerate() {
        let mut cols = [0.0f32; 4];
        for (j, col) in cols.iter_mut().enumerate() {
            let row = &neighbourhood[j];
            *col = cubic_hermite(
                row[0][channel],
                row[1][channel],
                row[2][channel],
                row[3][channel],
                xf,
            );
        }

        let v = cubic_hermite(cols[0], cols[1], cols[2], cols[3], yf);
        *value = v.clamp(0.0, 255.0) as u8;
    }

    Rgb::from(out)
}

/// Pixel at `(x, y)` with both coordinates clamped into the image.
#[inline]
fn pixel_clamped(src: RasterView<'_>, x: i64, y: i64) -> Rgb {
    let x = x.clamp(0, src.width() as i64 - 1) as usize;
    let y = y.clamp(0, src.height() as i64 - 1) as usize;
    src.get(x, y)
}

/// Normalized sample position of destination pixel `(x, y)`.
///
/// Uses pixel centres, so a same-size resample lands exactly on source pixels.
/// This is deliberately not the endpoint-aligned `x / (dst_width - 1)` form.
#[inline]
pub fn destination_uv(x: usize, y: usize, dst_width: usize, dst_height: usize) -> (f32, f32) {
    (
        (x as f32 + 0.5) / dst_width as f32,
        (y as f32 + 0.5) / dst_height as f32,
    )
}

/// Resampled value of one destination pixel given by its linear index.
#[inline]
pub fn resample_pixel(src: RasterView<'_>, linear: usize, dst_width: usize, dst_height: usize) -> Rgb {
    let x = linear / dst_height;
    let y = linear % dst_height;
    let (u, v) = destination_uv(x, y, dst_width, dst_height);
    sample_bicubic(src, u, v)
}

/// Resample a whole image on the calling thread.
///
/// # Panics
/// If `src` is empty.
pub fn resample(src: &RgbImage, dst_width: usize, dst_height: usize) -> RgbImage {
    assert!(!src.is_empty(), "cannot resample an empty image");
    let view = src.view();
    RgbImage::from_fn(dst_width, dst_height, |x, y| {
        let (u, v) = destination_uv(x, y, dst_width, dst_height);
        sample_bicubic(view, u, v)
    })
}
