//! TOML configuration
//!
//! Every section is optional:
//!
//! ```toml
//! [normalizer]
//! url_prefixes = ["https://doi.org/", "doi:"]
//! base_url = "https://doi.org/"
//! case_insensitive = false
//!
//! [tabular]
//! column = "DOI"
//! extensions = ["csv", "tsv", "txt", "xls", "xlsx"]
//!
//! [listing]
//! object_suffix = "/_.html.gz"
//!
//! [partition]
//! unsafe_chars = "/\\:*?\"<>| "
//! max_batch_size = 5000
//! ```

use crate::error::{CliError, Result};
use doi_identifiers::{Normalizer, NormalizerConfig};
use doi_reconcile::PartitionConfig;
use doi_sources::{ListingConfig, TabularConfig};
use serde::Deserialize;
use std::path::Path;

/// Settings for one run, passed explicitly to every command
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalizer: NormalizerConfig,
    pub tabular: TabularConfig,
    pub listing: ListingConfig,
    pub partition: PartitionConfig,
}

impl Config {
    /// Load from a TOML file, or use defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        config.normalizer.validate()?;
        Ok(config)
    }

    /// Build the normalizer described by the `[normalizer]` section
    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::new(self.normalizer.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections() {
        let config = Config::from_toml(
            r#"
            [tabular]
            column = "DI"

            [partition]
            max_batch_size = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.tabular.column, "DI");
        assert_eq!(config.tabular.extensions, TabularConfig::default().extensions);
        assert_eq!(config.partition.max_batch_size, Some(100));
        assert_eq!(config.listing, ListingConfig::default());
    }

    #[test]
    fn rejects_bad_base_url() {
        let err = Config::from_toml("[normalizer]\nbase_url = \"nope\"\n").unwrap_err();
        assert!(matches!(err, CliError::Identifier(_)));
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            Config::from_toml("[tabular\n"),
            Err(CliError::Config(_))
        ));
    }
}
