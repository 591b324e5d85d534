//! Shared domain types for the watermark workspace.

pub mod config;
pub mod frame;

mod errors;

pub use errors::{Result, WatermarkError};
pub use frame::{PixelBuffer, Rgb};
