//! Cadence terminal player
//!
//! Plays the server's catalog through the default audio device, driven by
//! line commands on stdin.

pub mod config;
pub mod error;
pub mod favorites;
pub mod media;
pub mod stream;
pub mod ui;

pub use config::CliConfig;
pub use error::{CliError, Result};
