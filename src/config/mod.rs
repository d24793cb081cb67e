//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with sort tokens and filter keys that name no registry field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Drop them silently (default)
    #[default]
    Ignore,
    /// Fail the request with `InvalidField`
    Reject,
}

/// Page defaults applied when a request omits `page` or `size`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Zero-based page index
    pub default_page: i64,

    /// Number of rows per page
    pub default_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 0,
            default_size: 5,
        }
    }
}

/// Names of the reserved request parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamNames {
    pub page: String,
    pub size: String,
    pub sort: String,
    pub search: String,
}

impl Default for ParamNames {
    fn default() -> Self {
        Self {
            page: "page".to_string(),
            size: "size".to_string(),
            sort: "sort".to_string(),
            search: "search".to_string(),
        }
    }
}

impl ParamNames {
    /// Keys that are never interpreted as filter fields
    pub fn reserved(&self) -> [&str; 4] {
        [
            self.page.as_str(),
            self.size.as_str(),
            self.sort.as_str(),
            self.search.as_str(),
        ]
    }
}

/// Complete configuration for the listing engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub pagination: PaginationConfig,
    pub params: ParamNames,
    pub unknown_fields: UnknownFieldPolicy,
}

impl ListingConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read listing config '{}'", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to load listing config '{}'", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Invalid listing config YAML")?;
        Ok(config)
    }
}
