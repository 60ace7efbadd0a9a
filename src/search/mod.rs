mod cache;
mod params;
mod service;

pub use cache::{MemoryCache, NoCache, SearchCache};
pub use params::SearchParameters;
pub use service::DatasetSearchService;

use serde::Serialize;

/// A dataset that survived filtering, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub title: String,
    /// Upstream `metadata_modified`, verbatim.
    pub last_modified: String,
    /// Never empty.
    pub resources: Vec<ResourceLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLink {
    pub name: String,
    pub url: String,
    pub format: String,
}
