//! Application configuration module
//!
//! Handles environment variables and application-wide policy constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
