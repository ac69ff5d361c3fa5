//! GIPHY API client.
//!
//! Looks up the first GIF matching a query and downloads its
//! `fixed_height` rendition. Failures are returned as [`GifSearchError`]
//! so the tool layer can turn them into content.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::GiphyConfig;

/// Path of the GIF search endpoint, relative to the API base URL.
const SEARCH_PATH: &str = "/v1/gifs/search";

/// Characters escaped in the search query: everything except
/// alphanumerics and `- _ . ! ~ * ' ( )`.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Errors raised while searching for or downloading a GIF.
#[derive(Debug, Error)]
pub enum GifSearchError {
    /// No API key was configured.
    #[error("GIPHY_API_KEY environment variable is not set")]
    MissingApiKey,

    /// The request could not be sent or its body could not be read.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The search response body was not the expected JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// Any other failure, described by its message (possibly blank).
    #[error("{0}")]
    Other(String),
}

impl GifSearchError {
    /// Human readable description, with a fallback when the error is blank.
    pub fn describe(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "Unknown error occurred".to_string()
        } else {
            message
        }
    }
}

/// Result of a successful search round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GifOutcome {
    /// A GIF was found and downloaded.
    Found {
        /// URL the bytes were downloaded from.
        source_url: String,
        /// Raw GIF bytes.
        data: Vec<u8>,
    },

    /// The search returned no results.
    NoResults,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<GifObject>>,
}

#[derive(Debug, Deserialize)]
struct GifObject {
    images: GifImages,
}

#[derive(Debug, Deserialize)]
struct GifImages {
    fixed_height: Rendition,
}

#[derive(Debug, Deserialize)]
struct Rendition {
    url: String,
}

/// Thin async client over the GIPHY REST API.
#[derive(Debug, Clone)]
pub struct GiphyClient {
    http: reqwest::Client,
    base_url: String,
}

impl GiphyClient {
    /// Create a client targeting the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the server configuration.
    pub fn from_config(config: &GiphyConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// The API base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the search URL: one G-rated English result at offset 0.
    ///
    /// The key is passed through as given; the query is percent-encoded
    /// (a space becomes `%20`).
    fn search_url(&self, api_key: &str, query: &str) -> String {
        format!(
            "{}{}?api_key={}&q={}&limit=1&offset=0&rating=g&lang=en",
            self.base_url,
            SEARCH_PATH,
            api_key,
            utf8_percent_encode(query, QUERY_ESCAPE)
        )
    }

    /// Return the `fixed_height` URL of the first result, if any.
    pub async fn first_gif_url(
        &self,
        api_key: &str,
        query: &str,
    ) -> Result<Option<String>, GifSearchError> {
        let url = self.search_url(api_key, query);
        let body = self.http.get(&url).send().await?.bytes().await?;
        let response: SearchResponse = serde_json::from_slice(&body)?;

        let Some(gif) = response.data.and_then(|results| results.into_iter().next()) else {
            return Ok(None);
        };

        let url = gif.images.fixed_height.url;
        if url.trim().is_empty() {
            return Err(GifSearchError::Other(
                "first result has no fixed_height URL".to_string(),
            ));
        }
        Ok(Some(url))
    }

    /// Download raw bytes from a URL.
    ///
    /// The status code is not checked: whatever body the server sends is
    /// returned.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, GifSearchError> {
        let response = self.http.get(url).send().await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Search for a GIF and download the first match.
    pub async fn search(
        &self,
        api_key: Option<&str>,
        query: &str,
    ) -> Result<GifOutcome, GifSearchError> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or(GifSearchError::MissingApiKey)?;

        let Some(gif_url) = self.first_gif_url(api_key, query).await? else {
            info!("No GIFs found for query '{}'", query);
            return Ok(GifOutcome::NoResults);
        };

        debug!("Downloading GIF from {}", gif_url);
        let data = self.fetch_bytes(&gif_url).await?;
        info!("Downloaded {} bytes from {}", data.len(), gif_url);

        Ok(GifOutcome::Found {
            source_url: gif_url,
            data,
        })
    }
}
