//! Structured logging for SightGate.
//!
//! Handles tracing initialization (console + rolling JSON file) and
//! credential redaction for strings that leave the process in logs or
//! error bodies.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
