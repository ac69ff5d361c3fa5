//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Used by the STDIO transport. Each tool knows how to create its own route.

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{AddTool, CalculateTool, SearchGifTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: &Config) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(AddTool::create_route())
        .with_route(CalculateTool::create_route())
        .with_route(SearchGifTool::from_config(config).create_route())
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(&Config::default());
        let tools = router.list_all();
        assert_eq!(tools.len(), 3);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"add"));
        assert!(names.contains(&"calculate"));
        assert!(names.contains(&"searchGif"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let config = Config::default();
        let registry = ToolRegistry::new(&config);
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(&config);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
