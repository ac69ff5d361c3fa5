//! Tool definitions module.
//!
//! Each tool is defined in its own file, grouped by concern.

pub mod common;
pub mod gif;
pub mod math;

pub use gif::{GifOutcome, GifSearchError, GiphyClient, SearchGifParams, SearchGifTool};
pub use math::{AddParams, AddTool, CalculateParams, CalculateTool, Operation};
