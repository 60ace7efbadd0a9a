use serde::Deserialize;

/// The `result` object of a successful `package_search` call.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageSearchPage {
    #[serde(default)]
    pub count: Option<u64>,
    pub results: Vec<RawCatalogEntry>,
}

/// A dataset ("package") as returned by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogEntry {
    pub title: String,
    pub metadata_modified: String,
    pub resources: Vec<RawResource>,
}

/// A downloadable file attached to a dataset. Unlisted fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResource {
    pub name: String,
    pub url: String,
    pub format: String,
}
