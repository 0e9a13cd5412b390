//! # Scribe Core
//!
//! The domain layer of the Scribe blog API.
//! This crate contains the post model, its validation rules, and the
//! repository that mediates between the HTTP layer and a [`ports::PostStore`].
//! It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod repository;

pub use error::{DomainError, RepoError};
pub use repository::PostRepository;
