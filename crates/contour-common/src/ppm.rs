//! Binary PPM (P6) encoding and decoding.
//!
//! Parsing and writing go through the `image` crate's PNM codec. On top of it
//! we only accept binary pixmaps with 8-bit components (maxval 255), and we
//! report a short raster as [`ContourError::Truncated`].
//!
//! The payload is copied into the pixel buffer in file order, which is the
//! linear order [`RgbImage`] uses.

use std::fs;
use std::path::Path;

use ::image::codecs::pnm::{PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use ::image::{ColorType, ImageDecoder, ImageEncoder, ImageError};

use crate::error::{ContourError, ContourResult};
use crate::image::{Rgb, RgbImage};

/// The only channel depth we accept
pub const MAX_COLOR_VALUE: u32 = 255;

const PIXMAP: PnmSubtype = PnmSubtype::Pixmap(SampleEncoding::Binary);

/// Read and decode a PPM file.
pub fn read_ppm(path: impl AsRef<Path>) -> ContourResult<RgbImage> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ContourError::io(path, e))?;
    decode_ppm(&bytes)
}

/// Encode an image and write it to `path`, replacing any existing file.
pub fn write_ppm(image: &RgbImage, path: impl AsRef<Path>) -> ContourResult<()> {
    let path = path.as_ref();
    let bytes = encode_ppm(image)?;
    fs::write(path, bytes).map_err(|e| ContourError::io(path, e))
}

/// Encode an image as binary PPM.
pub fn encode_ppm(image: &RgbImage) -> ContourResult<Vec<u8>> {
    let width = dimension_u32(image.width())?;
    let height = dimension_u32(image.height())?;

    let raw: Vec<u8> = image.pixels().iter().flat_map(|px| px.channels()).collect();
    let mut out = Vec::with_capacity(raw.len() + 32);
    PnmEncoder::new(&mut out)
        .with_subtype(PIXMAP)
        .write_image(&raw, width, height, ColorType::Rgb8)
        .map_err(format_error)?;
    Ok(out)
}

/// Decode a binary PPM buffer.
pub fn decode_ppm(bytes: &[u8]) -> ContourResult<RgbImage> {
    // The header parser consumes exactly one whitespace byte after maxval,
    // so what remains of the slice is the raster.
    let (raster, header) = PnmDecoder::new(bytes).map_err(format_error)?.into_inner();

    if header.subtype() != PIXMAP {
        return Err(ContourError::invalid_format(format!(
            "expected binary pixmap 'P6', found {:?}",
            header.subtype()
        )));
    }
    let max_value = header.maximal_sample();
    if max_value != MAX_COLOR_VALUE {
        return Err(ContourError::UnsupportedDepth(max_value));
    }

    let width = header.width() as usize;
    let height = header.height() as usize;
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| ContourError::invalid_size(format!("{}x{} overflows", width, height)))?;
    if raster.len() < expected {
        return Err(ContourError::Truncated {
            expected,
            found: raster.len(),
        });
    }

    let decoder = PnmDecoder::new(bytes).map_err(format_error)?;
    if decoder.color_type() != ColorType::Rgb8 {
        return Err(ContourError::UnsupportedDepth(max_value));
    }
    let mut raw = vec![0u8; expected];
    decoder.read_image(&mut raw).map_err(format_error)?;

    let pixels = raw
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();

    RgbImage::from_pixels(width, height, pixels)
}

fn dimension_u32(value: usize) -> ContourResult<u32> {
    u32::try_from(value)
        .map_err(|_| ContourError::invalid_size(format!("dimension {} exceeds u32", value)))
}

/// Header and raster problems all surface as malformed input; the decoder
/// only ever reads from memory, so its io errors mean the buffer ran out.
fn format_error(err: ImageError) -> ContourError {
    match err {
        ImageError::IoError(e) => ContourError::invalid_format(format!("incomplete header: {}", e)),
        other => ContourError::invalid_format(other.to_string()),
    }
}
