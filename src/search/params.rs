use crate::error::{ExplorerError, Result};
use serde::Serialize;

pub const MAX_RESULTS_LIMIT: u32 = 500;

/// Inputs of a single search. Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParameters {
    query: String,
    file_type: Option<String>,
    modified_within_days: Option<u32>,
    max_results: u32,
}

impl SearchParameters {
    /// `file_type` is lowercased here; an empty or blank value means no filter.
    pub fn new(
        query: impl Into<String>,
        file_type: Option<&str>,
        modified_within_days: Option<u32>,
        max_results: u32,
    ) -> Result<Self> {
        if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
            return Err(ExplorerError::InvalidParam(format!(
                "max_results must be between 1 and {MAX_RESULTS_LIMIT}"
            )));
        }

        let file_type = file_type
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());

        Ok(Self {
            query: query.into(),
            file_type,
            modified_within_days,
            max_results,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    pub fn modified_within_days(&self) -> Option<u32> {
        self.modified_within_days
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn cache_key(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_file_type_and_drops_blank() {
        let params = SearchParameters::new("divida", Some(" CSV "), None, 100).unwrap();
        assert_eq!(params.file_type(), Some("csv"));

        let params = SearchParameters::new("divida", Some(""), None, 100).unwrap();
        assert_eq!(params.file_type(), None);
    }

    #[test]
    fn rejects_out_of_range_row_caps() {
        assert!(SearchParameters::new("divida", None, None, 0).is_err());
        assert!(SearchParameters::new("divida", None, None, 501).is_err());
        assert!(SearchParameters::new("divida", None, None, 500).is_ok());
    }

    #[test]
    fn empty_query_passes_through() {
        let params = SearchParameters::new("", None, Some(30), 10).unwrap();
        assert_eq!(params.query(), "");
    }

    #[test]
    fn cache_key_distinguishes_every_field() {
        let base = SearchParameters::new("divida", Some("csv"), Some(30), 100).unwrap();
        let same = SearchParameters::new("divida", Some("CSV"), Some(30), 100).unwrap();
        let other_days = SearchParameters::new("divida", Some("csv"), Some(0), 100).unwrap();
        let other_rows = SearchParameters::new("divida", Some("csv"), Some(30), 10).unwrap();

        assert_eq!(base.cache_key().unwrap(), same.cache_key().unwrap());
        assert_ne!(base.cache_key().unwrap(), other_days.cache_key().unwrap());
        assert_ne!(base.cache_key().unwrap(), other_rows.cache_key().unwrap());
    }
}
