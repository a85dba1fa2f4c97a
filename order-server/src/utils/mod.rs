//! Utilities: error types, logging, time helpers

pub mod error;
pub mod logger;
pub mod time;

pub use error::{AppError, AppResponse, AppResult};
