//! GIF search tool.
//!
//! - `client`: GIPHY REST client (search + download)
//! - `search`: the `searchGif` MCP tool built on top of it

pub mod client;
pub mod search;

pub use client::{GifOutcome, GifSearchError, GiphyClient};
pub use search::{SearchGifParams, SearchGifTool};
