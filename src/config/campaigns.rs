//! Campaign seed loading from config.toml
//!
//! Campaigns and categories are loaded once at startup and are never persisted by
//! the ledger. When no config file exists, the seed shipped with the crate is used.

use crate::core::campaign::{Campaign, Category};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// The seed shipped with the crate, identical to the repository's config.toml.
const BUILTIN_SEED: &str = include_str!("../../config.toml");

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// Donation categories
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Campaigns with their starting raised amounts
    pub campaigns: Vec<Campaign>,
}

/// Parses a seed configuration from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML syntax is invalid or required fields are missing.
pub fn parse_seed(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse campaign seed: {e}"),
    })
}

/// Loads the campaign seed from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path_ref = path.as_ref();
    debug!("Loading campaign seed from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_seed(&contents)
}

/// Loads the seed from `path`, falling back to the built-in seed if the file is absent.
///
/// A file that exists but fails to parse is still an error.
pub fn load_seed_or_default<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_seed(path_ref)
    } else {
        warn!(
            "Seed file {} not found, using built-in campaigns",
            path_ref.display()
        );
        default_seed()
    }
}

/// Returns the built-in seed: six campaigns and eight categories.
pub fn default_seed() -> Result<SeedConfig> {
    parse_seed(BUILTIN_SEED)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_seed() {
        let toml_str = r#"
            [[categories]]
            id = "education"
            name = "Education"
            icon_name = "education"
            count = 12

            [[campaigns]]
            id = 7
            title = "School Meals"
            category = "education"
            description = "Daily meals for students."
            target = 1000.0
            raised = 10.0
            deadline = "2025-01-31"
            donors = 3
            urgent = false
            location = "Khulna"
            created_at = "2024-02-01"
        "#;

        let seed = parse_seed(toml_str).unwrap();
        assert_eq!(seed.categories.len(), 1);
        assert_eq!(seed.campaigns.len(), 1);
        let campaign = &seed.campaigns[0];
        assert_eq!(campaign.id, 7);
        assert_eq!(campaign.raised, 10.0);
        assert!(campaign.image.is_none());
        assert_eq!(
            campaign.deadline,
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_parse_seed_rejects_missing_fields() {
        let toml_str = r#"
            [[campaigns]]
            id = 1
            title = "Incomplete"
        "#;
        let result = parse_seed(toml_str);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_default_seed_matches_stock_data() {
        let seed = default_seed().unwrap();
        assert_eq!(seed.categories.len(), 8);
        assert_eq!(seed.campaigns.len(), 6);

        let flood = &seed.campaigns[0];
        assert_eq!(flood.title, "Flood Relief in Sylhet");
        assert_eq!(flood.target, 500_000.0);
        assert_eq!(flood.raised, 320_000.0);
        assert!(flood.urgent);
    }

    #[test]
    fn test_load_seed_or_default_without_file() {
        let seed = load_seed_or_default("does/not/exist.toml").unwrap();
        assert_eq!(seed.campaigns.len(), 6);
    }

    #[test]
    fn test_load_seed_missing_file_is_config_error() {
        let result = load_seed("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
