//! Middleware modules.

pub mod error;
mod formatter;

pub use error::{AppError, AppResult};
pub use formatter::ErrorFormatter;
