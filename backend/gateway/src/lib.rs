//! Snapsight Gateway HTTP API Server
//!
//! Provides the REST surface: health check, bearer-token gate, and the two
//! image analysis endpoints that forward to the vision provider.

pub mod analyze_api;
pub mod auth;
pub mod error;
pub mod health_api;
pub mod server;

pub use error::ApiError;
pub use server::{GatewayState, build_router, start_server};
