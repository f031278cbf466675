//! Media handling for SightGate: input normalization, video download and
//! frame sampling, and grid composition for single-image vision calls.

pub mod grid;
pub mod input;
pub mod video;

pub use grid::{compose_grid, encode_jpeg, GRID_SIZE, TILE_SIZE};
pub use input::normalize_image_input;
pub use video::{
    download_video, extract_frames, parse_frame_rate, sample_frame_indices, SampledFrame,
};
