pub mod error;
pub mod traits;
pub mod types;

pub use error::SightError;
pub use traits::{VisionProvider, VisionRequest};
pub use types::{ExtractedResult, ImageReference};
