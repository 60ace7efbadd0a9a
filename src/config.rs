use crate::error::{ExplorerError, Result};

pub const DEFAULT_API_URL: &str = "http://www.tesourotransparente.gov.br/ckan/api/3/action/package_search";
const DEFAULT_QUERY: &str = "divida";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub cache_enabled: bool,
    pub default_query: String,
    /// `EnvFilter` directives: `RUST_LOG` when set, else `CKAN_LOG_LEVEL`.
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_opt = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        let api_url = env_opt("CKAN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        validate_url(&api_url)?;

        let cache_enabled = match env_opt("CKAN_CACHE_ENABLED") {
            Some(raw) => parse_bool("CKAN_CACHE_ENABLED", &raw)?,
            None => true,
        };

        Ok(Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            cache_enabled,
            default_query: lookup("CKAN_DEFAULT_QUERY").unwrap_or_else(|| DEFAULT_QUERY.into()),
            log_level: env_opt("RUST_LOG")
                .or_else(|| env_opt("CKAN_LOG_LEVEL").map(|level| level.trim().to_lowercase()))
                .unwrap_or_else(|| "info".into()),
        })
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ExplorerError::ConfigInvalid(format!("{name} must be one of true/false, 1/0, yes/no"))),
    }
}

fn validate_url(url: &str) -> Result<()> {
    let url = url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ExplorerError::ConfigInvalid("CKAN_API_URL must be a valid http or https URL".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.cache_enabled);
        assert_eq!(config.default_query, "divida");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn trims_trailing_slash_from_endpoint() {
        let config = load(&[("CKAN_API_URL", "https://dados.gov.br/api/3/action/package_search/")]).unwrap();
        assert_eq!(config.api_url, "https://dados.gov.br/api/3/action/package_search");
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = load(&[("CKAN_API_URL", "ftp://example.org")]).unwrap_err();
        assert!(matches!(err, ExplorerError::ConfigInvalid(_)));
    }

    #[test]
    fn parses_cache_flag() {
        assert!(!load(&[("CKAN_CACHE_ENABLED", "No")]).unwrap().cache_enabled);
        assert!(load(&[("CKAN_CACHE_ENABLED", "1")]).unwrap().cache_enabled);
        assert!(load(&[("CKAN_CACHE_ENABLED", "maybe")]).is_err());
    }

    #[test]
    fn empty_default_query_is_kept_verbatim() {
        let config = load(&[("CKAN_DEFAULT_QUERY", ""), ("CKAN_LOG_LEVEL", "debug")]).unwrap();
        assert_eq!(config.default_query, "");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn rust_log_takes_precedence_over_ckan_log_level() {
        let config = load(&[("RUST_LOG", "ckan_explorer=trace"), ("CKAN_LOG_LEVEL", "warn")]).unwrap();
        assert_eq!(config.log_level, "ckan_explorer=trace");
    }
}
