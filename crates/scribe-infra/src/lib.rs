//! # Scribe Infrastructure
//!
//! Concrete implementations of the [`PostStore`](scribe_core::ports::PostStore)
//! port defined in `scribe-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - `minimal` - No external dependencies, in-memory store only

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostStore};

#[cfg(feature = "postgres")]
pub use database::PostgresPostStore;
