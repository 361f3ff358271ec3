//! # Combo Pages
//!
//! A batch generator of SEO landing pages for a review-translation tool.
//! A declarative catalog of dimensions (tone, complaint type, business type,
//! platform) is expanded into every configured combination; each combination
//! becomes one static HTML page with its own slug, title and description, and
//! every page is listed in a sharded sitemap.
//!
//! # Architecture: One-Shot Pipeline
//!
//! ```text
//! 1. Load       pages.toml  →  Catalog          (validated, read-only)
//! 2. Plan       Catalog     →  Plan             (cartesian passes + slug dedup)
//! 3. Render     Plan        →  Vec<Page>        (parallel, order-preserving)
//! 4. Publish    pages       →  dist/            (pages, sitemaps, robots.txt)
//! ```
//!
//! Each stage is a pure function of the previous stage's output up to
//! publishing, so planning and rendering are unit-tested without touching the
//! filesystem. A run is deterministic: the same catalog always yields the same
//! slugs, titles and HTML bodies, in the same order.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `pages.toml` loading, defaults, validation, stock config |
//! | [`catalog`] | Dimensions, values, roles and resolved patterns |
//! | [`enumerate`] | Cartesian passes and first-seen de-duplication by slug |
//! | [`naming`] | Slug, title and description derivation |
//! | [`generate`] | HTML rendering with Maud, JSON-LD and CTA links |
//! | [`sitemap`] | Sitemap shards, main sitemap, index and robots.txt |
//! | [`publish`] | Staged write of the output tree |
//! | [`pipeline`] | Orchestration, build report and output fingerprint |
//! | [`types`] | Page types shared between rendering and publishing |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Slugs Follow Pattern Order
//!
//! A slug is the value ids joined in the order its pattern lists dimensions.
//! Two patterns over the same dimensions in a different order therefore
//! produce distinct pages; the config loader warns when that happens.
//! Titles, in contrast, always read tone → complaint → business → platform.
//!
//! ## Staged Publishing
//!
//! The output directory is rebuilt from scratch each run in a staging sibling
//! and swapped in only when complete, so stale pages from a previous catalog
//! never linger and a failed run never leaves a half-written site behind.

pub mod catalog;
pub mod config;
pub mod enumerate;
pub mod generate;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod publish;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
