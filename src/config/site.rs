//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    pub permalink: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub tag_dir: String,
    pub archive_dir: String,
    pub category_dir: String,

    // Writing
    /// Publish posts dated in the future
    pub future: bool,
    pub more_link: String,
    pub date_format: String,

    // Listings
    pub per_page: usize,
    pub pagination_dir: String,
    pub feed_limit: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            permalink: ":year/:month/:day/:title/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            tag_dir: "tags".to_string(),
            archive_dir: "archives".to_string(),
            category_dir: "categories".to_string(),

            future: false,
            more_link: "Read more".to_string(),
            date_format: "%Y-%m-%d".to_string(),

            per_page: 10,
            pagination_dir: "page".to_string(),
            feed_limit: 20,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Clamp values that would make listings impossible to paginate
    fn normalized(mut self) -> Self {
        if self.per_page == 0 {
            tracing::warn!("per_page is 0, using 10");
            self.per_page = 10;
        }
        if !self.root.starts_with('/') {
            self.root.insert(0, '/');
        }
        if !self.root.ends_with('/') {
            self.root.push('/');
        }
        self
    }
}
