//! # Scribe API Server
//!
//! HTTP surface of the blog API: routes under `/api/v1/posts`, a liveness
//! route at `/`, and uniform JSON error bodies.

pub mod app;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use config::{AppConfig, Environment, StoreConfig};
pub use state::AppState;
