//! Configuration module for folio-harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use folio_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("folio.toml")).unwrap();
//! println!("Crawling from: {}", config.site.landing_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CategoryErrorPolicy, Config, CrawlConfig, HttpConfig, OutputConfig, SiteConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
