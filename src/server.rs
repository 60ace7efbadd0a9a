use crate::ckan::CkanClient;
use crate::config::Config;
use crate::error::ExplorerError;
use crate::render::render_markdown;
use crate::search::{DatasetSearchService, MemoryCache, NoCache, SearchCache};
use crate::tools::{ClearCacheParams, GetConfigInfoParams, SearchDatasetsParams};

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogExplorerServer {
    pub config: Config,
    pub service: DatasetSearchService,
}

impl CatalogExplorerServer {
    pub fn new(config: Config) -> crate::error::Result<Self> {
        let client = CkanClient::new(config.api_url.clone())?;
        let cache: Arc<dyn SearchCache> = if config.cache_enabled {
            Arc::new(MemoryCache::new())
        } else {
            Arc::new(NoCache)
        };
        let service = DatasetSearchService::new(client, cache);
        Ok(Self { config, service })
    }
}

#[tool_router]
impl CatalogExplorerServer {
    #[tool(description = r#"
    Searches the open-data catalog and returns the matching datasets as a Markdown list,
    one section per dataset with its last-modified date and a download link per resource.

    The `query` is free text sent to the catalog verbatim (server default when omitted).

    The `file_type` keeps only resources of that format: CSV, XLS, JSON or PDF.
    Datasets left without resources are omitted.

    The `modified_within_days` drops datasets last modified more than N days ago (0 disables).

    The `max_results` is the number of datasets requested from the catalog; filtering happens
    afterwards, so fewer may be returned.
    "#)]
    pub async fn search_datasets(&self, Parameters(params): Parameters<SearchDatasetsParams>) -> Result<String, McpError> {
        params.validate().map_err(|msg| McpError::invalid_params(msg, None))?;
        let search = params.to_search_parameters(&self.config.default_query).map_err(to_mcp_error)?;

        let records = self.service.search(&search).await.map_err(to_mcp_error)?;
        Ok(render_markdown(&records))
    }

    #[tool(description = r#"
    Returns the current catalog explorer configuration and tests the connection to the
    catalog's package_search endpoint.

    Returns
    -------
    str
        A JSON-encoded string containing:
        - `api_url`: The configured package_search endpoint
        - `cache_enabled`: Whether search results are memoized
        - `cached_searches`: Number of memoized searches
        - `default_query`: Query used when none is given
        - `log_level`: Active log filter (`RUST_LOG`, else `CKAN_LOG_LEVEL`)
        - `connection_test`: Result of a zero-row search against the endpoint
          - `status`: Connection status
          - `message`: Status message
          - `response_time_ms`: Response time in milliseconds
          - `dataset_count`: Total datasets reported by the catalog
    "#)]
    pub async fn get_config_info(&self, _params: Parameters<GetConfigInfoParams>) -> Result<String, McpError> {
        let connection_test = self.service.client().test_connection().await;

        let payload = serde_json::json!({
            "api_url": &self.config.api_url,
            "cache_enabled": self.config.cache_enabled,
            "cached_searches": self.service.cache().len(),
            "default_query": &self.config.default_query,
            "log_level": &self.config.log_level,
            "connection_test": connection_test,
        });

        serde_json::to_string_pretty(&payload).map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    #[tool(description = r#"
    Discards all memoized search results so the next searches go to the catalog again.

    Returns: JSON with the number of removed entries
    "#)]
    pub async fn clear_cache(&self, _params: Parameters<ClearCacheParams>) -> Result<String, McpError> {
        let removed = self.service.cache().clear();
        tracing::info!("Cleared {} cached searches", removed);

        let payload = serde_json::json!({
            "cache_enabled": self.config.cache_enabled,
            "removed": removed,
        });

        serde_json::to_string_pretty(&payload).map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

#[tool_handler(router = Self::tool_router())]
impl ServerHandler for CatalogExplorerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "ckan-explorer".into(),
                title: None,
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn to_mcp_error(e: ExplorerError) -> McpError {
    match e {
        ExplorerError::InvalidParam(msg) => McpError::invalid_params(msg, None),
        other => {
            if other.is_transport() {
                tracing::warn!("Catalog request failed: {}", other);
            }
            McpError::internal_error(other.to_string(), None)
        }
    }
}
