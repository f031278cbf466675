//! 2×2 grid composition.
//!
//! Up to four sampled frames are stretched to a fixed tile size and pasted
//! onto one canvas, giving a single-image vision call a short temporal
//! window. Unused quadrants stay black.

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::RgbImage;

use sightgate_core::SightError;

use crate::video::SampledFrame;

pub const TILE_SIZE: u32 = 300;
pub const GRID_SIZE: u32 = 600;

/// Quadrant offsets in paste order: top-left, top-right, bottom-left,
/// bottom-right.
const QUADRANTS: [(u32, u32); 4] = [
    (0, 0),
    (TILE_SIZE, 0),
    (0, TILE_SIZE),
    (TILE_SIZE, TILE_SIZE),
];

/// Compose up to four frames into a 600×600 grid. Frames beyond the fourth
/// are ignored; each tile is stretched to 300×300 without preserving aspect
/// ratio. Deterministic for a given frame sequence.
pub fn compose_grid(frames: &[SampledFrame]) -> Result<RgbImage, SightError> {
    if frames.is_empty() {
        return Err(SightError::InvalidInput(
            "no frames to compose into a grid".into(),
        ));
    }

    let mut canvas = RgbImage::new(GRID_SIZE, GRID_SIZE);
    for (frame, &(x, y)) in frames.iter().zip(QUADRANTS.iter()) {
        let tile = imageops::resize(
            &frame.image.to_rgb8(),
            TILE_SIZE,
            TILE_SIZE,
            FilterType::Triangle,
        );
        imageops::replace(&mut canvas, &tile, i64::from(x), i64::from(y));
    }
    Ok(canvas)
}

/// Encode a composed grid as JPEG bytes for an inline image reference.
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, SightError> {
    let mut buffer = Vec::new();
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, 90))
        .context("failed to encode grid image as JPEG")?;
    Ok(buffer)
}
