use super::{DisplayRecord, ResourceLink, SearchCache, SearchParameters};
use crate::ckan::{CkanClient, RawCatalogEntry};
use crate::error::{ExplorerError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use std::sync::Arc;
use tracing::debug;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Fetches one page of catalog results and narrows it by recency and resource format.
#[derive(Clone)]
pub struct DatasetSearchService {
    client: CkanClient,
    cache: Arc<dyn SearchCache>,
}

impl DatasetSearchService {
    pub fn new(client: CkanClient, cache: Arc<dyn SearchCache>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &dyn SearchCache {
        self.cache.as_ref()
    }

    pub fn client(&self) -> &CkanClient {
        &self.client
    }

    pub async fn search(&self, params: &SearchParameters) -> Result<Vec<DisplayRecord>> {
        self.search_at(params, Utc::now().naive_utc()).await
    }

    /// Same as [`search`](Self::search) with an explicit "now" for the recency cutoff.
    pub async fn search_at(&self, params: &SearchParameters, now: NaiveDateTime) -> Result<Vec<DisplayRecord>> {
        let key = params.cache_key()?;
        if let Some(records) = self.cache.get(&key) {
            debug!(%key, "search cache hit");
            return Ok(records);
        }

        let records = match self.client.package_search(params.query(), params.max_results()).await? {
            Some(page) => filter_entries(page.results, params, now)?,
            None => Vec::new(),
        };

        debug!(%key, matches = records.len(), "search completed");
        self.cache.put(key, records.clone());
        Ok(records)
    }
}

/// Applies the recency and format filters to upstream entries, keeping upstream order.
pub(crate) fn filter_entries(
    entries: Vec<RawCatalogEntry>,
    params: &SearchParameters,
    now: NaiveDateTime,
) -> Result<Vec<DisplayRecord>> {
    let cutoff = cutoff(params.modified_within_days(), now);
    let mut records = Vec::new();

    for entry in entries {
        let modified = parse_modified(&entry.metadata_modified)?;
        if cutoff.is_some_and(|cutoff| modified < cutoff) {
            continue;
        }

        let resources: Vec<ResourceLink> = entry
            .resources
            .into_iter()
            .filter(|r| params.file_type().is_none_or(|ft| r.format.to_lowercase() == ft))
            .map(|r| ResourceLink { name: r.name, url: r.url, format: r.format })
            .collect();

        if resources.is_empty() {
            continue;
        }

        records.push(DisplayRecord {
            title: entry.title,
            last_modified: entry.metadata_modified,
            resources,
        });
    }

    Ok(records)
}

/// A window reaching past the earliest representable date has no cutoff.
fn cutoff(days: Option<u32>, now: NaiveDateTime) -> Option<NaiveDateTime> {
    match days {
        None | Some(0) => None,
        Some(days) => TimeDelta::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window)),
    }
}

/// Parses `metadata_modified`. Naive timestamps are taken as UTC.
fn parse_modified(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.naive_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return Ok(midnight);
    }
    Err(ExplorerError::InvalidTimestamp { value: raw.to_string() })
}
