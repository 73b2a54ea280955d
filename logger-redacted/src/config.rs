// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Include file and line for every event
    pub with_source_location: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
            with_source_location: false,
        }
    }
}

impl LoggerConfig {
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.log_level = "debug".to_string();
            self.with_source_location = true;
        }
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Filter used when the environment does not provide one.
    pub fn default_filter(&self) -> String {
        format!(
            "omnia_sso_server={level},auth_gateway={level},auth_omnia={level},auth_identity={level},\
             config_engine={level},tower_http=info,hyper=info,reqwest=info",
            level = self.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_level() {
        let config = LoggerConfig::default().verbose(true);
        assert_eq!(config.log_level, "debug");
        assert!(config.with_source_location);
        assert!(config.default_filter().contains("auth_gateway=debug"));
    }

    #[test]
    fn test_quiet_keeps_defaults() {
        let config = LoggerConfig::default().verbose(false).json(true);
        assert_eq!(config.log_level, "info");
        assert!(config.json);
    }
}
