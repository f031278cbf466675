//! The SightGate inference client: a `VisionProvider` implementation for a
//! Groq-hosted OpenAI-compatible vision endpoint, the fixed prompt
//! templates, and the policies that turn free-text replies into structured
//! results.

pub mod groq;
pub mod interpret;
pub mod mock;
pub mod prompts;

pub use groq::{GroqProvider, DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL};
pub use interpret::{interpret_code, interpret_decision, interpret_numeric_id};
pub use mock::MockProvider;
