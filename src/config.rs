//! Generator configuration.
//!
//! A single declarative document supplies the site settings and the dimension
//! catalog. TOML is the default format; a path ending in `.json` is read as
//! JSON into the same structure.
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! base_url = "https://example.com"   # required; pages live at {base_url}/{slug}/
//! tool_url = "https://example.com/"  # call-to-action target (default: base_url + "/")
//! name = "Review Translator"
//! language = "en"                    # display locale and <html lang>
//! category = "BusinessApplication"   # JSON-LD applicationCategory
//! cta_text = "Translate a review now"
//! utm_source = "seo"
//! utm_medium = "landing"
//!
//! [sitemap]
//! max_urls_per_file = 50000
//! page_priority = 0.7
//! page_changefreq = "weekly"
//! main_priority = 1.0
//! main_changefreq = "daily"
//!
//! [processing]
//! max_processes = 4                  # omit for auto = CPU cores
//!
//! [[dimensions]]
//! name = "tone"
//! values = [{ id = "harsh", display = "Harsh" }]
//!
//! [[patterns]]
//! dimensions = ["tone", "complaint"]
//! ```
//!
//! Unknown keys are rejected to catch typos early. Validation reports every
//! problem at once rather than stopping at the first.

use crate::catalog::{self, Catalog, Dimension, PatternSpec};
use crate::sitemap::{ChangeFreq, MAX_URLS_PER_FILE};
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
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration:\n{}", bullet_list(.0))]
    Invalid(Vec<String>),
}

fn bullet_list(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("  - {p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteSettings,
    pub sitemap: SitemapSettings,
    pub processing: ProcessingConfig,
    pub dimensions: Vec<Dimension>,
    pub patterns: Vec<PatternSpec>,
}

impl SiteConfig {
    /// Check every setting and the catalog, collecting all problems.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = self.site.problems();
        problems.extend(self.sitemap.problems());
        problems.extend(catalog::check(
            &self.dimensions,
            &self.patterns,
            &self.site.language,
        ));
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Build the validated dimension catalog.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        Catalog::new(
            self.dimensions.clone(),
            &self.patterns,
            &self.site.language,
        )
    }
}

/// Site identity and call-to-action settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Root under which generated pages are published.
    pub base_url: String,
    /// Primary tool URL. Defaults to the site root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_url: Option<String>,
    pub name: String,
    pub language: String,
    /// JSON-LD `applicationCategory`.
    pub category: String,
    pub cta_text: String,
    pub utm_source: String,
    pub utm_medium: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            tool_url: None,
            name: "Review Translator".to_string(),
            language: "en".to_string(),
            category: "BusinessApplication".to_string(),
            cta_text: "Translate a review now".to_string(),
            utm_source: "seo".to_string(),
            utm_medium: "landing".to_string(),
        }
    }
}

impl SiteSettings {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Site root with a trailing slash; the main sitemap entry.
    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url())
    }

    /// Call-to-action target. May live on another host.
    pub fn tool_url(&self) -> String {
        self.tool_url.clone().unwrap_or_else(|| self.root_url())
    }

    /// Public URL of the page published under `slug`.
    pub fn page_url(&self, slug: &str) -> String {
        format!("{}/{}/", self.base_url(), slug)
    }

    /// Public URL of a file at the output root.
    pub fn file_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url(), file_name)
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.base_url.trim().is_empty() {
            problems.push("site.base_url is required".to_string());
        } else if !is_http_url(&self.base_url) {
            problems.push(format!(
                "site.base_url `{}` must start with http:// or https://",
                self.base_url
            ));
        }
        if let Some(tool_url) = &self.tool_url {
            if !is_http_url(tool_url) {
                problems.push(format!(
                    "site.tool_url `{tool_url}` must start with http:// or https://"
                ));
            }
        }
        if self.language.trim().is_empty() {
            problems.push("site.language must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            problems.push("site.name must not be empty".to_string());
        }
        problems
    }
}

fn is_http_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme))
}

/// Sitemap sharding and ranking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapSettings {
    /// URL cap per sitemap shard (1 to 50 000).
    pub max_urls_per_file: usize,
    pub page_priority: f32,
    pub page_changefreq: ChangeFreq,
    pub main_priority: f32,
    pub main_changefreq: ChangeFreq,
}

impl Default for SitemapSettings {
    fn default() -> Self {
        Self {
            max_urls_per_file: MAX_URLS_PER_FILE,
            page_priority: 0.7,
            page_changefreq: ChangeFreq::Weekly,
            main_priority: 1.0,
            main_changefreq: ChangeFreq::Daily,
        }
    }
}

impl SitemapSettings {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(1..=MAX_URLS_PER_FILE).contains(&self.max_urls_per_file) {
            problems.push(format!(
                "sitemap.max_urls_per_file must be 1-{MAX_URLS_PER_FILE}"
            ));
        }
        for (key, priority) in [
            ("page_priority", self.page_priority),
            ("main_priority", self.main_priority),
        ] {
            if !(0.0..=1.0).contains(&priority) {
                problems.push(format!("sitemap.{key} must be 0.0-1.0"));
            }
        }
        if self.main_priority < self.page_priority {
            problems.push("sitemap.main_priority must not be lower than page_priority".to_string());
        }
        if self.main_changefreq.rank() > self.page_changefreq.rank() {
            problems.push(
                "sitemap.main_changefreq must be at least as frequent as page_changefreq"
                    .to_string(),
            );
        }
        problems
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of rendering workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Loading
// =============================================================================

/// Parse a TOML document without validating it.
pub fn parse_toml(content: &str) -> Result<SiteConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Parse a JSON document without validating it.
pub fn parse_json(content: &str) -> Result<SiteConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Load and validate the config document at `path`.
///
/// The format is chosen by extension: `.json` is JSON, anything else TOML.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        parse_json(&content)?
    } else {
        parse_toml(&content)?
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config with a complete sample catalog.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    include_str!("../demos/pages.toml")
}
