use coldcase_sources::{SourceConfig, SourceError};

/// Log output format, from `LOG_FORMAT` (`text` or `json`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Binary configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sources: SourceConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the environment. Data-source variables are
    /// documented on [`SourceConfig::from_env`]; in addition:
    ///
    /// | Env Var      | Default |
    /// |--------------|---------|
    /// | `LOG_FORMAT` | `text`  |
    pub fn from_env() -> Result<Self, SourceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SourceError> {
        let sources = SourceConfig::from_lookup(&lookup)?;

        let log_format = match lookup("LOG_FORMAT") {
            None => LogFormat::Text,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                other => {
                    return Err(SourceError::Config(format!(
                        "LOG_FORMAT must be 'text' or 'json', got '{other}'"
                    )))
                }
            },
        };

        Ok(Self { sources, log_format })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn log_format_defaults_to_text() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.sources, SourceConfig::default());
    }

    #[test]
    fn log_format_json_is_case_insensitive() {
        let config = AppConfig::from_lookup(lookup(&[("LOG_FORMAT", " JSON ")])).expect("valid");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = AppConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")]));
        assert!(matches!(result, Err(SourceError::Config(msg)) if msg.contains("LOG_FORMAT")));
    }
}
