//! GIF search tool definition.
//!
//! Searches GIPHY for a query and returns the first GIF as base64 image
//! content. This tool never fails at the protocol level: a missing API key,
//! an empty result set and upstream failures are all reported as text.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use super::client::{GifOutcome, GifSearchError, GiphyClient};
use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    parse_http_args, parse_route_args, text_result, to_http_value,
};

/// Text preceding the GIF image.
pub const FOUND_MESSAGE: &str = "Here's a GIF for you:";

/// Text returned when the search yields nothing.
pub const NO_RESULTS_MESSAGE: &str = "No GIFs found for your search query";

/// Text returned when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str = "Error: GIPHY_API_KEY environment variable is not set";

/// MIME type of the returned image.
pub const GIF_MIME_TYPE: &str = "image/gif";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the GIF search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchGifParams {
    /// Free-text search query.
    #[schemars(description = "What to search GIPHY for")]
    pub query: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// GIF search tool - returns the first GIPHY match as an image.
///
/// The API key is injected at construction time, so the tool can be built
/// against any key and any API endpoint.
#[derive(Clone)]
pub struct SearchGifTool {
    client: GiphyClient,
    api_key: Option<String>,
}

impl SearchGifTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "searchGif";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search GIPHY for a GIF matching the query and return it as an image.";

    /// Create a tool from an explicit client and API key.
    pub fn new(client: GiphyClient, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    /// Create a tool from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            GiphyClient::from_config(&config.giphy),
            config.credentials.giphy_api_key.clone(),
        )
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(&self, params: &SearchGifParams) -> CallToolResult {
        info!("searchGif called against {}", self.client.base_url());
        let outcome = self
            .client
            .search(self.api_key.as_deref(), &params.query)
            .await;
        Self::render(outcome)
    }

    /// Turn a search outcome into tool content.
    pub fn render(outcome: Result<GifOutcome, GifSearchError>) -> CallToolResult {
        match outcome {
            Ok(GifOutcome::Found { data, .. }) => CallToolResult::success(vec![
                Content::text(FOUND_MESSAGE),
                Content::image(STANDARD.encode(data), GIF_MIME_TYPE),
            ]),
            Ok(GifOutcome::NoResults) => text_result(NO_RESULTS_MESSAGE),
            Err(GifSearchError::MissingApiKey) => {
                warn!("searchGif called without a GIPHY API key");
                text_result(MISSING_KEY_MESSAGE)
            }
            Err(e) => {
                error!("GIF search failed: {}", e);
                text_result(format!("Error searching for GIF: {}", e.describe()))
            }
        }
    }

    /// HTTP handler for this tool (for the HTTP transports).
    pub async fn http_handler(
        &self,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let params: SearchGifParams = parse_http_args(arguments)?;
        to_http_value(&self.execute(&params).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchGifParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>(self) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let tool = self.clone();
            async move {
                let params: SearchGifParams = parse_route_args(args)?;
                Ok(tool.execute(&params).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
