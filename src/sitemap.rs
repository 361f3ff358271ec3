//! Sitemap partitioning.
//!
//! Generated page URLs are split into `urlset` shards of at most
//! `max_urls_per_file` entries each, filling earlier shards completely before
//! starting the next. A separate main sitemap lists the site root URL,
//! and a `sitemapindex` references every document actually produced:
//!
//! ```text
//! sitemap.xml              # index → main + every page shard
//! sitemap-main.xml         # site root URL, higher priority
//! sitemap-pages-1.xml      # first max_urls_per_file pages
//! sitemap-pages-2.xml      # ...
//! robots.txt               # advertises sitemap.xml
//! ```
//!
//! Every entry of a run carries the same `lastmod` date. When no pages were
//! generated the index references the main sitemap alone, since an empty
//! `urlset` is not valid under the sitemaps.org 0.9 schema.

use crate::config::{SiteSettings, SitemapSettings};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// XML namespace for sitemaps and sitemap indexes.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
/// Protocol limit on URLs per sitemap file.
pub const MAX_URLS_PER_FILE: usize = 50_000;

pub const INDEX_FILE: &str = "sitemap.xml";
pub const MAIN_FILE: &str = "sitemap-main.xml";
pub const ROBOTS_FILE: &str = "robots.txt";

/// File name of the `n`th (1-based) page shard.
pub fn shard_file_name(n: usize) -> String {
    format!("sitemap-pages-{n}.xml")
}

/// Sitemap `changefreq` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }

    /// Lower is more frequent.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFreq,
    pub priority: f32,
}

/// A rendered sitemap file.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapDocument {
    pub file_name: String,
    /// Entries listed in the document (`<url>` or `<sitemap>` elements).
    pub url_count: usize,
    pub xml: String,
}

/// Every sitemap artifact of one run.
#[derive(Debug, Clone)]
pub struct Sitemaps {
    pub index: SitemapDocument,
    pub main: SitemapDocument,
    pub shards: Vec<SitemapDocument>,
    pub robots: String,
}

impl Sitemaps {
    /// Main sitemap, page shards, then the index.
    pub fn documents(&self) -> impl Iterator<Item = &SitemapDocument> {
        std::iter::once(&self.main)
            .chain(&self.shards)
            .chain(std::iter::once(&self.index))
    }
}

/// Sitemap entries for generated pages, in emission order.
pub fn page_entries(
    urls: &[String],
    settings: &SitemapSettings,
    generated: NaiveDate,
) -> Vec<SitemapEntry> {
    urls.iter()
        .map(|url| SitemapEntry {
            url: url.clone(),
            last_modified: generated,
            change_frequency: settings.page_changefreq,
            priority: settings.page_priority,
        })
        .collect()
}

/// Split entries into consecutive shards of at most `max` entries.
pub fn partition(entries: &[SitemapEntry], max: usize) -> Vec<&[SitemapEntry]> {
    entries.chunks(max.max(1)).collect()
}

/// Render a `urlset` document.
pub fn urlset_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 160);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.format("%Y-%m-%d")
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!(
            "    <priority>{}</priority>\n",
            format_priority(entry.priority)
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Shortest exact form of a priority, with at least one decimal place.
///
/// `1.0` → `1.0`, `0.7` → `0.7`, `0.75` → `0.75`
fn format_priority(priority: f32) -> String {
    if priority.fract() == 0.0 {
        format!("{priority:.1}")
    } else {
        format!("{priority}")
    }
}

/// Render a `sitemapindex` document.
pub fn index_xml(locations: &[String], generated: NaiveDate) -> String {
    let mut xml = String::with_capacity(128 + locations.len() * 120);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<sitemapindex xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for loc in locations {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            generated.format("%Y-%m-%d")
        ));
        xml.push_str("  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

/// Build the main sitemap, page shards, index and robots.txt.
pub fn build_sitemaps(
    site: &SiteSettings,
    settings: &SitemapSettings,
    page_urls: &[String],
    generated: NaiveDate,
) -> Sitemaps {
    let main_entry = SitemapEntry {
        url: site.root_url(),
        last_modified: generated,
        change_frequency: settings.main_changefreq,
        priority: settings.main_priority,
    };
    let main = SitemapDocument {
        file_name: MAIN_FILE.to_string(),
        url_count: 1,
        xml: urlset_xml(std::slice::from_ref(&main_entry)),
    };

    let entries = page_entries(page_urls, settings, generated);
    let shards: Vec<SitemapDocument> = partition(&entries, settings.max_urls_per_file)
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| SitemapDocument {
            file_name: shard_file_name(i + 1),
            url_count: chunk.len(),
            xml: urlset_xml(chunk),
        })
        .collect();

    let locations: Vec<String> = std::iter::once(&main)
        .chain(&shards)
        .map(|doc| site.file_url(&doc.file_name))
        .collect();
    let index = SitemapDocument {
        file_name: INDEX_FILE.to_string(),
        url_count: locations.len(),
        xml: index_xml(&locations, generated),
    };

    let robots = format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.file_url(INDEX_FILE)
    );

    Sitemaps {
        index,
        main,
        shards,
        robots,
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
