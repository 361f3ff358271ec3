//! A full generation run.
//!
//! ```text
//! config ─► catalog ─► plan (enumerate + dedup) ─► derive + render (parallel)
//!                                                        │
//!                           publish ◄── sitemaps ◄───────┘
//! ```
//!
//! De-duplication completes before any page is rendered, and sitemaps are
//! built only once every page is known. Rendering runs on the global rayon
//! pool; collecting from an indexed parallel iterator keeps emission order.

use crate::catalog::Catalog;
use crate::config::{self, ConfigError, SiteConfig};
use crate::enumerate::Plan;
use crate::generate::render_page;
use crate::naming::derive;
use crate::publish::{PublishError, publish};
use crate::sitemap::build_sitemaps;
use crate::types::{Page, PageMeta};
use chrono::NaiveDate;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub planned: usize,
    pub written: usize,
    /// `(file name, entry count)` of the main sitemap, each shard and the index.
    pub sitemap_files: Vec<(String, usize)>,
    pub fingerprint: String,
    pub output_dir: PathBuf,
}

/// Load and validate the config document and build its catalog.
pub fn load(config_path: &Path) -> Result<(SiteConfig, Catalog), BuildError> {
    let config = config::load_config(config_path)?;
    let catalog = config.catalog()?;
    Ok((config, catalog))
}

/// Slug, title, description and URL of every planned page, in emission order.
pub fn page_metas(config: &SiteConfig, plan: &Plan) -> Vec<PageMeta> {
    plan.combinations
        .par_iter()
        .map(|combination| {
            let derived = derive(combination, &config.site.language);
            PageMeta {
                url: config.site.page_url(&derived.slug),
                slug: derived.slug,
                title: derived.title,
                description: derived.description,
                pattern: combination.pattern.name.clone(),
            }
        })
        .collect()
}

/// Render every planned page, in emission order.
pub fn render_pages(config: &SiteConfig, plan: &Plan) -> Vec<Page> {
    page_metas(config, plan)
        .into_par_iter()
        .map(|meta| {
            let html = render_page(&config.site, &meta).into_string();
            Page { meta, html }
        })
        .collect()
}

/// SHA-256 over every page's slug and HTML, in order.
///
/// Independent of the run date: two runs over the same input agree.
pub fn fingerprint(pages: &[Page]) -> String {
    let mut hasher = Sha256::new();
    for page in pages {
        hasher.update(page.meta.slug.as_bytes());
        hasher.update([0u8]);
        hasher.update(page.html.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// Render and publish every planned page and sitemap into `output_dir`.
///
/// `generated` stamps every sitemap `lastmod`.
pub fn build(
    config: &SiteConfig,
    plan: &Plan,
    output_dir: &Path,
    generated: NaiveDate,
) -> Result<BuildReport, BuildError> {
    let pages = render_pages(config, plan);

    let urls: Vec<String> = pages.iter().map(|p| p.meta.url.clone()).collect();
    let sitemaps = build_sitemaps(&config.site, &config.sitemap, &urls, generated);

    let published = publish(output_dir, &pages, &sitemaps)?;

    Ok(BuildReport {
        planned: plan.len(),
        written: published.pages_written,
        sitemap_files: sitemaps
            .documents()
            .map(|doc| (doc.file_name.clone(), doc.url_count))
            .collect(),
        fingerprint: fingerprint(&pages),
        output_dir: output_dir.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::enumerate;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn page_metas_follow_plan_order() {
        let config = sample_config();
        let catalog = config.catalog().unwrap();
        let plan = enumerate(&catalog);
        let metas = page_metas(&config, &plan);

        assert_eq!(metas.len(), plan.len());
        for (meta, combination) in metas.iter().zip(&plan.combinations) {
            assert_eq!(meta.slug, combination.slug());
            assert_eq!(meta.url, format!("https://example.com/{}/", meta.slug));
            assert_eq!(meta.pattern, combination.pattern.name);
        }
    }

    #[test]
    fn rendered_pages_embed_their_meta() {
        let config = sample_config();
        let catalog = config.catalog().unwrap();
        let plan = enumerate(&catalog);
        for page in render_pages(&config, &plan) {
            assert!(page.html.contains(&page.meta.url));
            assert!(page.html.contains(&format!("utm_campaign={}", page.meta.slug)));
        }
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let config = sample_config();
        let catalog = config.catalog().unwrap();
        let plan = enumerate(&catalog);
        let mut pages = render_pages(&config, &plan);

        let first = fingerprint(&pages);
        assert_eq!(first.len(), 64);
        assert_eq!(first, fingerprint(&render_pages(&config, &plan)));

        pages[0].html.push(' ');
        assert_ne!(first, fingerprint(&pages));
    }

    #[test]
    fn build_reports_counts() {
        let tmp = TempDir::new().unwrap();
        let config = sample_config();
        let catalog = config.catalog().unwrap();
        let out = tmp.path().join("dist");

        let plan = enumerate(&catalog);
        let report = build(&config, &plan, &out, date()).unwrap();

        assert_eq!(report.planned, plan.len());
        assert_eq!(report.written, report.planned);
        assert_eq!(report.sitemap_files.first().map(|f| f.0.as_str()), Some("sitemap-main.xml"));
        assert_eq!(report.sitemap_files.last().map(|f| f.0.as_str()), Some("sitemap.xml"));
        let in_shards: usize = report
            .sitemap_files
            .iter()
            .filter(|(name, _)| name.starts_with("sitemap-pages-"))
            .map(|(_, n)| n)
            .sum();
        assert_eq!(in_shards, report.written);
    }

    #[test]
    fn build_publishes_exactly_the_given_plan() {
        let tmp = TempDir::new().unwrap();
        let config = sample_config();
        let catalog = config.catalog().unwrap();
        let out = tmp.path().join("dist");

        let mut plan = enumerate(&catalog);
        plan.combinations.truncate(2);
        let kept: Vec<String> = plan.combinations.iter().map(|c| c.slug().to_string()).collect();

        let report = build(&config, &plan, &out, date()).unwrap();

        assert_eq!(report.planned, 2);
        assert_eq!(report.written, 2);
        for slug in &kept {
            assert!(out.join(slug).join("index.html").exists());
        }
        let dirs = std::fs::read_dir(&out)
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().is_dir())
            .count();
        assert_eq!(dirs, 2);
    }

    #[test]
    fn load_reports_config_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pages.toml");
        std::fs::write(&path, "[site]\nbase_url = \"https://example.com\"\n[[patterns]]\ndimensions = [\"a\", \"b\"]\n").unwrap();
        assert!(matches!(load(&path), Err(BuildError::Config(ConfigError::Invalid(_)))));
    }
}
