//! Writing the output tree.
//!
//! Every run regenerates the output directory from empty. Files are first
//! written to a sibling staging directory; only once every page and sitemap is
//! on disk is the previous output moved aside and the staging directory
//! renamed into place. A run that fails part-way therefore leaves the previous
//! output untouched and never publishes a sitemap for an incomplete page set.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── sitemap.xml               # sitemap index
//! ├── sitemap-main.xml
//! ├── sitemap-pages-1.xml
//! ├── robots.txt
//! ├── harsh-shipping/
//! │   └── index.html
//! └── polite-shipping/
//!     └── index.html
//! ```
//!
//! Page files are independent of each other and are written in parallel.

use crate::sitemap::{ROBOTS_FILE, Sitemaps};
use crate::types::Page;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of each page inside its slug directory.
pub const PAGE_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("cannot prepare output directory {path}: {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot replace {path} with the new output: {source}")]
    Swap {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Counts of what was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishStats {
    pub pages_written: usize,
}

/// Path of a page's HTML file relative to the output root.
pub fn page_path(slug: &str) -> PathBuf {
    Path::new(slug).join(PAGE_FILE)
}

/// Replace `output_dir` with the given pages and sitemaps.
pub fn publish(
    output_dir: &Path,
    pages: &[Page],
    sitemaps: &Sitemaps,
) -> Result<PublishStats, PublishError> {
    let staging = sibling(output_dir, "staging")?;
    reset_dir(&staging)?;

    pages
        .par_iter()
        .try_for_each(|page| write_page(&staging, page))?;

    for doc in sitemaps.documents() {
        write_file(&staging.join(&doc.file_name), &doc.xml)?;
    }
    write_file(&staging.join(ROBOTS_FILE), &sitemaps.robots)?;

    swap_into_place(&staging, output_dir)?;

    Ok(PublishStats {
        pages_written: pages.len(),
    })
}

fn write_page(root: &Path, page: &Page) -> Result<(), PublishError> {
    let dir = root.join(&page.meta.slug);
    fs::create_dir(&dir).map_err(|source| PublishError::Write {
        path: dir.clone(),
        source,
    })?;
    write_file(&dir.join(PAGE_FILE), &page.html)
}

fn write_file(path: &Path, contents: &str) -> Result<(), PublishError> {
    fs::write(path, contents).map_err(|source| PublishError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// `parent/.name.suffix` next to `output_dir`.
fn sibling(output_dir: &Path, suffix: &str) -> Result<PathBuf, PublishError> {
    let name = output_dir.file_name().ok_or_else(|| PublishError::Prepare {
        path: output_dir.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "output path has no directory name"),
    })?;
    Ok(output_dir.with_file_name(format!(".{}.{suffix}", name.to_string_lossy())))
}

/// Remove `dir` if present and create it empty, including missing parents.
fn reset_dir(dir: &Path) -> Result<(), PublishError> {
    let prepare = |source| PublishError::Prepare {
        path: dir.to_path_buf(),
        source,
    };
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(prepare)?;
    }
    fs::create_dir_all(dir).map_err(prepare)
}

fn swap_into_place(staging: &Path, output_dir: &Path) -> Result<(), PublishError> {
    let swap = |source| PublishError::Swap {
        path: output_dir.to_path_buf(),
        source,
    };

    if output_dir.exists() {
        let previous = sibling(output_dir, "previous")?;
        if previous.exists() {
            fs::remove_dir_all(&previous).map_err(swap)?;
        }
        fs::rename(output_dir, &previous).map_err(swap)?;
        fs::rename(staging, output_dir).map_err(swap)?;
        fs::remove_dir_all(&previous).map_err(swap)?;
    } else {
        fs::rename(staging, output_dir).map_err(swap)?;
    }
    Ok(())
}
