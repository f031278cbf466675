use thiserror::Error;

/// Top-level error type for the SightGate pipelines.
///
/// Every variant's `Display` text is what an HTTP client ultimately sees in
/// the error body, so messages are phrased for the caller, not the operator.
#[derive(Debug, Error)]
pub enum SightError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to decode image data: {0}")]
    Decode(String),

    #[error("failed to download video: {0}")]
    Download(String),

    #[error("failed to open video file: {0}")]
    VideoOpen(String),

    #[error("no frames could be extracted from the video")]
    NoFramesExtracted,

    #[error("vision provider error ({provider}): {message}")]
    Inference { provider: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
