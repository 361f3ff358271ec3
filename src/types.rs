//! Shared page types passed between the planning, rendering and publishing stages.

use serde::Serialize;

/// Everything a page's markup is built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    /// Unique slug; also the page's directory name under the output root.
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Canonical public URL.
    pub url: String,
    /// Name of the pattern that produced the page.
    pub pattern: String,
}

/// A rendered page, created once per unique slug.
#[derive(Debug, Clone)]
pub struct Page {
    pub meta: PageMeta,
    pub html: String,
}
