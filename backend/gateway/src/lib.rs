//! SightGate HTTP gateway: the axum router and the four vision pipelines
//! behind it.

pub mod routes;
pub mod server;

pub use server::{build_router, start_server, AppState, ModelConfig};
