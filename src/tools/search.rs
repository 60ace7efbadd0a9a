use crate::error::Result;
use crate::search::SearchParameters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const FILE_TYPES: [&str; 4] = ["csv", "xls", "json", "pdf"];

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchDatasetsParams {
    /// Free-text search term (e.g. "dívida"); the server default is used when omitted
    #[serde(default)]
    pub query: Option<String>,

    /// Resource format to keep: CSV, XLS, JSON or PDF (case-insensitive, empty for any)
    #[serde(default)]
    pub file_type: Option<String>,

    /// Only datasets modified within the last N days (0-180, 0 disables, default 60)
    #[serde(default = "default_modified_within_days")]
    pub modified_within_days: u32,

    /// Number of datasets requested from the catalog (10-500, default 100)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_modified_within_days() -> u32 { 60 }
fn default_max_results() -> u32 { 100 }

impl SearchDatasetsParams {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.query.as_deref().is_some_and(|q| q.len() > 2000) {
            return Err("Query exceeds 2000 characters".into());
        }
        if let Some(ft) = self.file_type.as_deref().map(str::trim).filter(|ft| !ft.is_empty()) {
            if !FILE_TYPES.contains(&ft.to_lowercase().as_str()) {
                return Err("file_type must be one of CSV, XLS, JSON, PDF".into());
            }
        }
        if self.modified_within_days > 180 {
            return Err("modified_within_days must be between 0 and 180".into());
        }
        if !(10..=500).contains(&self.max_results) {
            return Err("max_results must be between 10 and 500".into());
        }
        Ok(())
    }

    pub fn to_search_parameters(&self, default_query: &str) -> Result<SearchParameters> {
        SearchParameters::new(
            self.query.clone().unwrap_or_else(|| default_query.to_string()),
            self.file_type.as_deref(),
            Some(self.modified_within_days),
            self.max_results,
        )
    }
}
