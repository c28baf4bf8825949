//! TOML configuration for a [`VcfAnnotator`](crate::VcfAnnotator).
//!
//! ```toml
//! name = "gnomAD"
//! version = "4.1"
//! source = "gnomad.sites.vcf.gz"
//! cache_capacity = 20
//! eviction = "fifo"
//!
//! [overrides]
//! gnomAD_AF = "0"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cache::EvictionPolicy;
use crate::consts::DEFAULT_CACHE_CAPACITY;
use crate::errors::{Result, VcfAnnoError};

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotatorConfig {
    /// Source name; prefixes every output field.
    pub name: String,
    pub version: String,
    /// VCF whose header declares the fields.
    pub source: PathBuf,
    /// Replacement defaults, keyed by namespaced field name.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default)]
    pub eviction: EvictionPolicy,
}

impl AnnotatorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| VcfAnnoError::InvalidConfig(e.to_string()))
    }

    ///
    /// Load a config file. A relative `source` is resolved against the directory
    /// holding the config file.
    ///
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut config = AnnotatorConfig::from_toml_str(&text)?;

        if config.source.is_relative() {
            if let Some(parent) = path.parent() {
                config.source = parent.join(&config.source);
            }
        }

        Ok(config)
    }
}
