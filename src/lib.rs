//! blog-index: loads a Markdown blog corpus and renders a static site
//!
//! A build is a single batch pass:
//!
//! 1. [`content::loader`] discovers `.md` files and parses their front-matter
//!    in parallel, turning bad files into [`content::Diagnostic`]s,
//! 2. [`index::ContentIndex`] orders the published posts and groups them by
//!    tag, category and month,
//! 3. [`generator::Generator`] writes post pages, listings, a feed and a
//!    search index from that index.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod index;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::loader::{ContentLoader, LoadReport};
use index::{ContentIndex, IndexOptions};

/// A blog site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);
        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        }
    }

    /// Load every post under the source directory
    pub fn load(&self) -> LoadReport {
        ContentLoader::new(&self.source_dir).load_posts()
    }

    /// Load and index the site; loader diagnostics are carried into the index
    pub fn index(&self, options: &IndexOptions) -> ContentIndex {
        let report = self.load();
        ContentIndex::build(report.posts, &self.config, options).with_diagnostics(report.diagnostics)
    }

    /// Index with the publication rules from the configuration
    pub fn default_index(&self) -> ContentIndex {
        self.index(&IndexOptions::from_config(&self.config))
    }
}
