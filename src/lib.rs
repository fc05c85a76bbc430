pub mod api;
pub mod config;
pub mod console;
pub mod demo;
pub mod error;

pub use error::{Error, Result};
