//! Site configuration module.
//!
//! Handles loading and validating `pictura.toml`. All settings have stock
//! defaults; the config file is sparse — override just the values you want.
//! Unknown keys are rejected to catch typos early.
//!
//! The loaded [`Config`] is constructed once at process start, is immutable,
//! and is passed explicitly into every pipeline stage. No stage reads
//! ambient global settings.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "output"        # Rendered site + resized images
//! resize_threshold = 800       # Max longest-edge pixels before resizing
//! small_image_marker = "small" # Title token suppressing lightbox treatment
//! feed_item_count = 10         # Most recent N items in the RSS feed
//! page_size = 10               # Photos per index page
//!
//! [site]
//! title = "A photo journal"
//! author = ""
//! base_url = "https://example.com"  # Absolute links in the feed
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Run configuration loaded from `pictura.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the rendered site, resized images, and feed are written.
    pub output_dir: String,
    /// Maximum longest-edge size in pixels before a resized copy is made.
    pub resize_threshold: u32,
    /// Reserved title token that suppresses the resized/lightbox treatment.
    pub small_image_marker: String,
    /// Number of most-recent photos in the RSS feed.
    pub feed_item_count: usize,
    /// Photos per paginated index page.
    pub page_size: usize,
    /// Site identity used in page chrome and the feed channel.
    pub site: SiteInfo,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
            resize_threshold: 800,
            small_image_marker: "small".to_string(),
            feed_item_count: 10,
            page_size: 10,
            site: SiteInfo::default(),
        }
    }
}

/// Site identity for page titles and the feed channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    /// Feed item author; omitted from the feed when empty.
    pub author: String,
    /// Base URL for absolute links in the feed, no trailing slash needed.
    pub base_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "A photo journal".to_string(),
            author: String::new(),
            base_url: "https://example.com".to_string(),
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize_threshold == 0 {
            return Err(ConfigError::Validation(
                "resize_threshold must be non-zero".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Validation("page_size must be non-zero".into()));
        }
        if self.small_image_marker.is_empty() {
            return Err(ConfigError::Validation(
                "small_image_marker must not be empty".into(),
            ));
        }
        if self.small_image_marker.contains('-') {
            // Titles are split on dashes, so a dashed marker can never match
            return Err(ConfigError::Validation(
                "small_image_marker must not contain dashes".into(),
            ));
        }
        if self.site.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from the given file path.
///
/// A missing file yields the stock defaults; an existing file must parse,
/// contain no unknown keys, and pass validation.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `pictura.toml` with all keys explained.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Pictura Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Where the rendered site, resized images, and feed.xml are written.
output_dir = "output"

# Maximum size in pixels on the longest edge. Photos above this get a
# resized copy; photos at or below it ship as-is.
resize_threshold = 800

# Reserved word in a filename title that suppresses the resized/lightbox
# treatment for that photo. Matched against whole dash-separated tokens:
# 2021-06-02-signpost-small.jpg -> title "signpost", no lightbox.
small_image_marker = "small"

# Number of most recent photos included in the RSS feed.
feed_item_count = 10

# Photos per index page. Older photos spill onto index2.html, index3.html...
page_size = 10

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "A photo journal"

# Shown as the author of every feed item; leave empty to omit it.
author = ""

# Used to build absolute links in the feed; pages themselves only ever use
# relative links.
base_url = "https://example.com"
"##
}
