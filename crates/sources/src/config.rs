use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SourceError;

/// Where the loaders look for data and how long they wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub api_base_url: String,
    /// Value of the `limit` query parameter on `GET /cases`.
    pub case_fetch_limit: u32,
    pub cases_fallback_path: PathBuf,
    pub episode_fallback_path: PathBuf,
    pub synthetic_seed: u64,
    pub request_timeout: Duration,
    /// JSON file holding the device-local marker flags.
    pub markers_path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".into(),
            case_fetch_limit: 5000,
            cases_fallback_path: PathBuf::from("cases.json"),
            episode_fallback_path: PathBuf::from("episode_data.json"),
            synthetic_seed: 1980,
            request_timeout: Duration::from_secs(10),
            markers_path: PathBuf::from("coldcase_markers.json"),
        }
    }
}

impl SourceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `API_BASE_URL`          | `http://localhost:8000`  |
    /// | `CASE_FETCH_LIMIT`      | `5000`                   |
    /// | `CASES_FALLBACK_PATH`   | `cases.json`             |
    /// | `EPISODE_FALLBACK_PATH` | `episode_data.json`      |
    /// | `SYNTHETIC_SEED`        | `1980`                   |
    /// | `REQUEST_TIMEOUT_SECS`  | `10`                     |
    /// | `MARKERS_PATH`          | `coldcase_markers.json`  |
    pub fn from_env() -> Result<Self, SourceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SourceConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SourceError> {
        let defaults = Self::default();

        let api_base_url = lookup("API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let case_fetch_limit =
            parse_var(&lookup, "CASE_FETCH_LIMIT")?.unwrap_or(defaults.case_fetch_limit);

        let cases_fallback_path = lookup("CASES_FALLBACK_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.cases_fallback_path);

        let episode_fallback_path = lookup("EPISODE_FALLBACK_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.episode_fallback_path);

        let synthetic_seed =
            parse_var(&lookup, "SYNTHETIC_SEED")?.unwrap_or(defaults.synthetic_seed);

        let request_timeout = parse_var::<u64>(&lookup, "REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let markers_path = lookup("MARKERS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.markers_path);

        Ok(Self {
            api_base_url,
            case_fetch_limit,
            cases_fallback_path,
            episode_fallback_path,
            synthetic_seed,
            request_timeout,
            markers_path,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, SourceError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SourceError::Config(format!("{key} must be a number, got '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SourceConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config, SourceConfig::default());
        assert_eq!(config.case_fetch_limit, 5000);
        assert_eq!(config.synthetic_seed, 1980);
    }

    #[test]
    fn overrides_are_applied() {
        let config = SourceConfig::from_lookup(lookup(&[
            ("API_BASE_URL", "http://cases.internal:9000/"),
            ("CASE_FETCH_LIMIT", "250"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("MARKERS_PATH", "/var/lib/coldcase/markers.json"),
        ]))
        .expect("valid overrides");
        assert_eq!(config.api_base_url, "http://cases.internal:9000");
        assert_eq!(config.case_fetch_limit, 250);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.markers_path, PathBuf::from("/var/lib/coldcase/markers.json"));
    }

    #[test]
    fn bad_number_is_config_error() {
        let result = SourceConfig::from_lookup(lookup(&[("SYNTHETIC_SEED", "abc")]));
        assert_matches!(result, Err(SourceError::Config(msg)) if msg.contains("SYNTHETIC_SEED"));
    }
}
