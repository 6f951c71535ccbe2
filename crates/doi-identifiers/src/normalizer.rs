//! Raw identifier normalization

use crate::error::{IdentifierError, Result};
use crate::identifier::{Identifier, NormalizedKey};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Resolver prefixes stripped by default
pub const DEFAULT_URL_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

/// Base URL used for canonical display forms
pub const DEFAULT_BASE_URL: &str = "https://doi.org/";

lazy_static! {
    static ref DEFAULT_PREFIX_PATTERN: Regex = prefix_pattern(DEFAULT_URL_PREFIXES.iter().copied())
        .expect("default resolver prefixes are valid");
}

/// Normalization options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Prefixes stripped from the front of raw values (matched case-insensitively)
    pub url_prefixes: Vec<String>,
    /// Resolver base used by [`crate::canonical_form`]
    pub base_url: String,
    /// Fold keys to lowercase before comparison
    pub case_insensitive: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            url_prefixes: DEFAULT_URL_PREFIXES.iter().map(|p| p.to_string()).collect(),
            base_url: DEFAULT_BASE_URL.to_string(),
            case_insensitive: false,
        }
    }
}

impl NormalizerConfig {
    /// Check the base URL and prefixes before building a normalizer
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.base_url).map_err(|e| {
            IdentifierError::InvalidConfig(format!("base_url {:?}: {}", self.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(IdentifierError::InvalidConfig(format!(
                "base_url {:?} cannot be a base URL",
                self.base_url
            )));
        }
        if let Some(blank) = self.url_prefixes.iter().find(|p| p.trim().is_empty()) {
            return Err(IdentifierError::InvalidConfig(format!(
                "url_prefixes contains a blank entry: {:?}",
                blank
            )));
        }
        Ok(())
    }
}

/// Converts raw strings into [`Identifier`]s.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    prefixes: Option<Regex>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            config: NormalizerConfig::default(),
            prefixes: Some(DEFAULT_PREFIX_PATTERN.clone()),
        }
    }
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        config.validate()?;
        let prefixes = if config.url_prefixes.is_empty() {
            None
        } else {
            Some(
                prefix_pattern(config.url_prefixes.iter().map(|p| p.trim()))
                    .map_err(|e| IdentifierError::InvalidConfig(e.to_string()))?,
            )
        };
        Ok(Self { config, prefixes })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Normalize a raw value into an identifier.
    ///
    /// Fails with [`IdentifierError::Invalid`] when nothing is left after
    /// stripping, or when the remainder has no registrant separator.
    pub fn normalize(&self, raw: &str) -> Result<Identifier> {
        let key = self.normalize_key(raw)?;
        Ok(Identifier::new(key, raw.trim().to_string()))
    }

    /// Normalize a raw value, keeping only the key
    pub fn normalize_key(&self, raw: &str) -> Result<NormalizedKey> {
        // Folding can expose new whitespace or prefixes, so run to a fixed point
        let mut current = self.fold(raw);
        loop {
            let next = self.fold(&current);
            if next == current {
                break;
            }
            current = next;
        }

        if current.is_empty() || !current.contains('/') {
            return Err(IdentifierError::Invalid {
                raw: raw.to_string(),
            });
        }
        Ok(NormalizedKey::new(current))
    }

    fn fold(&self, raw: &str) -> String {
        let stripped = self.strip_prefixes(raw);
        let folded = if self.config.case_insensitive {
            stripped.to_lowercase()
        } else {
            stripped.to_string()
        };
        folded.nfc().collect::<String>().trim().to_string()
    }

    fn strip_prefixes<'a>(&self, raw: &'a str) -> &'a str {
        let mut current = raw.trim();
        if let Some(pattern) = &self.prefixes {
            while let Some(m) = pattern.find(current) {
                if m.end() == 0 {
                    break;
                }
                current = current[m.end()..].trim();
            }
        }
        current
    }
}

fn prefix_pattern<'a>(
    prefixes: impl Iterator<Item = &'a str>,
) -> std::result::Result<Regex, regex::Error> {
    let alternatives: Vec<String> = prefixes.map(regex::escape).collect();
    Regex::new(&format!(r"(?i)^(?:{})", alternatives.join("|")))
}
