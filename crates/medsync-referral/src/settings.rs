//! Runtime settings
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. an optional settings file (`medsync.toml` unless another path is given)
//! 3. `MEDSYNC_*` environment variables, e.g. `MEDSYNC_MAX_RESULTS=3`

use crate::catalog::FacilityCatalog;
use crate::error::Result;
use crate::recommend::{Recommender, DEFAULT_MAX_RESULTS};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file looked up when no explicit path is given
pub const DEFAULT_SETTINGS_FILE: &str = "medsync.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "MEDSYNC";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Recommendations returned per query
    pub max_results: usize,
    /// JSON facility catalog; the built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_results: DEFAULT_MAX_RESULTS,
            catalog_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Assemble settings from defaults, a settings file and the environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("max_results", defaults.max_results as i64)?
            .set_default("log_filter", defaults.log_filter)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Catalog named by the settings, or the built-in one
    pub fn catalog(&self) -> Result<FacilityCatalog> {
        match &self.catalog_path {
            Some(path) => FacilityCatalog::from_json_file(path),
            None => Ok(FacilityCatalog::builtin()),
        }
    }

    /// Recommender over the configured catalog
    pub fn recommender(&self) -> Result<Recommender> {
        Ok(Recommender::new(self.catalog()?).with_max_results(self.max_results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReferralError;
    use std::fs;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("medsync-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_settings_file() {
        let path = temp_file("settings.toml", "max_results = 3\nlog_filter = \"debug\"\n");
        let settings = Settings::load(Some(path.as_path())).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.max_results, 3);
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.catalog_path, None);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("medsync-does-not-exist.toml");
        assert!(matches!(
            Settings::load(Some(path.as_path())),
            Err(ReferralError::Config(_))
        ));
    }

    #[test]
    fn test_recommender_from_catalog_file() {
        let catalog = temp_file(
            "catalog.json",
            r#"[{"id": "c1", "name": "Clinic", "address": "1 Rd", "distance": 1.0,
                 "availableBeds": 1, "totalBeds": 4, "crowdLevel": "Low",
                 "capabilities": ["ECG"], "specialties": []}]"#,
        );
        let settings = Settings {
            max_results: 1,
            catalog_path: Some(catalog.clone()),
            ..Settings::default()
        };
        let recommender = settings.recommender().unwrap();
        fs::remove_file(&catalog).ok();

        assert_eq!(recommender.catalog().len(), 1);
        assert_eq!(recommender.max_results(), 1);
    }

    #[test]
    fn test_default_catalog() {
        let settings = Settings::default();
        assert_eq!(settings.catalog().unwrap().len(), 5);
    }
}
