//! Application configuration. Data paths, analysis latency, catalog source.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Simulated analysis latency when unset.
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 3000;

/// Max symptom suggestions shown per search when unset.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory for the booking store. Read from SYMPTOM_TRIAGE_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Delay in ms before the rule engine runs. Read from SYMPTOM_TRIAGE_ANALYSIS_DELAY_MS.
    #[serde(default)]
    pub analysis_delay_ms: Option<u64>,

    /// Optional CSV file replacing the built-in symptom catalog.
    /// Read from SYMPTOM_TRIAGE_SYMPTOM_CATALOG_PATH.
    #[serde(default)]
    pub symptom_catalog_path: Option<String>,

    /// Suggestions per symptom search. Read from SYMPTOM_TRIAGE_SUGGESTION_LIMIT.
    #[serde(default)]
    pub suggestion_limit: Option<usize>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        let env = config::Environment::with_prefix("SYMPTOM_TRIAGE")
            .try_parsing(true);
        c = c.add_source(env);
        if let Ok(path) = std::env::var("SYMPTOM_TRIAGE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the data directory. Defaults to `./data`.
    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    /// Path of the booking store inside the data directory.
    pub fn bookings_path(&self) -> PathBuf {
        self.data_dir_or_default().join("bookings.json")
    }

    /// Returns the analysis delay. Defaults to DEFAULT_ANALYSIS_DELAY_MS.
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms.unwrap_or(DEFAULT_ANALYSIS_DELAY_MS))
    }

    pub fn symptom_catalog_path(&self) -> Option<PathBuf> {
        self.symptom_catalog_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Returns the suggestion limit. Defaults to DEFAULT_SUGGESTION_LIMIT.
    /// Zero is treated as unset.
    pub fn suggestion_limit_or_default(&self) -> usize {
        match self.suggestion_limit {
            Some(0) | None => DEFAULT_SUGGESTION_LIMIT,
            Some(n) => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.data_dir_or_default(), PathBuf::from("./data"));
        assert_eq!(
            cfg.bookings_path(),
            PathBuf::from("./data").join("bookings.json")
        );
        assert_eq!(cfg.analysis_delay(), Duration::from_millis(3000));
        assert_eq!(cfg.suggestion_limit_or_default(), DEFAULT_SUGGESTION_LIMIT);
        assert!(cfg.symptom_catalog_path().is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            data_dir: Some("/tmp/triage".to_string()),
            analysis_delay_ms: Some(0),
            symptom_catalog_path: Some("  ".to_string()),
            suggestion_limit: Some(0),
        };
        assert_eq!(cfg.analysis_delay(), Duration::ZERO);
        assert_eq!(
            cfg.bookings_path(),
            PathBuf::from("/tmp/triage/bookings.json")
        );
        assert!(cfg.symptom_catalog_path().is_none());
        assert_eq!(cfg.suggestion_limit_or_default(), DEFAULT_SUGGESTION_LIMIT);
    }
}
