//! Shared test utilities for the combo-pages test suite.
//!
//! Provides catalog builders and lookup helpers that work with
//! enumeration-phase data structures (`Catalog`, `Plan`, `Combination`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = catalog(
//!     vec![
//!         dimension("tone", &["harsh", "polite"]),
//!         dimension("complaint", &["slow-service"]),
//!     ],
//!     &[&["tone", "complaint"]],
//! );
//! let plan = enumerate(&catalog);
//!
//! let combination = find_combination(&plan, "harsh-slow-service");
//! assert_eq!(combination.pattern.name, "tone+complaint");
//! ```

use crate::catalog::{Catalog, Dimension, Label, PatternSpec, Value};
use crate::config::{SiteConfig, SiteSettings};
use crate::enumerate::{Combination, Plan};

// =========================================================================
// Catalog builders
// =========================================================================

/// Title-case a slug-safe id: `slow-service` → `Slow Service`.
fn display_for(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A dimension whose values display as their title-cased ids.
pub fn dimension(name: &str, ids: &[&str]) -> Dimension {
    Dimension {
        name: name.to_string(),
        role: None,
        values: ids
            .iter()
            .map(|id| Value {
                id: id.to_string(),
                display: Label::Plain(display_for(id)),
            })
            .collect(),
    }
}

/// An unnamed pattern over `dimensions`.
pub fn pattern(dimensions: &[&str]) -> PatternSpec {
    PatternSpec {
        name: None,
        dimensions: dimensions.iter().map(|d| d.to_string()).collect(),
    }
}

pub fn named_pattern(name: &str, dimensions: &[&str]) -> PatternSpec {
    PatternSpec {
        name: Some(name.to_string()),
        ..pattern(dimensions)
    }
}

/// Build a valid English catalog. Panics if validation fails.
pub fn catalog(dimensions: Vec<Dimension>, patterns: &[&[&str]]) -> Catalog {
    let specs: Vec<PatternSpec> = patterns.iter().map(|p| pattern(p)).collect();
    match Catalog::new(dimensions, &specs, "en") {
        Ok(catalog) => catalog,
        Err(e) => panic!("test catalog is invalid: {e}"),
    }
}

// =========================================================================
// Sample data
// =========================================================================

fn sample_dimensions() -> Vec<Dimension> {
    vec![
        dimension("tone", &["harsh", "polite"]),
        dimension("complaint", &["slow-service", "refund"]),
        dimension("business", &["restaurants", "hotels"]),
        dimension("platform", &["yelp", "google-maps"]),
    ]
}

fn sample_patterns() -> Vec<PatternSpec> {
    vec![
        pattern(&["tone", "complaint"]),
        pattern(&["complaint", "business", "platform"]),
        pattern(&["tone", "complaint", "business", "platform"]),
    ]
}

/// Four-role catalog with three patterns and no warnings.
pub fn sample_catalog() -> Catalog {
    match Catalog::new(sample_dimensions(), &sample_patterns(), "en") {
        Ok(catalog) => catalog,
        Err(e) => panic!("sample catalog is invalid: {e}"),
    }
}

/// Site settings rooted at `https://example.com`.
pub fn site() -> SiteSettings {
    SiteSettings {
        base_url: "https://example.com".to_string(),
        ..SiteSettings::default()
    }
}

/// A complete, valid config holding the sample catalog.
pub fn sample_config() -> SiteConfig {
    SiteConfig {
        site: site(),
        dimensions: sample_dimensions(),
        patterns: sample_patterns(),
        ..SiteConfig::default()
    }
}

// =========================================================================
// Lookup helpers
// =========================================================================

/// Find a planned combination by slug. Panics with available slugs on miss.
pub fn find_combination<'p, 'a>(plan: &'p Plan<'a>, slug: &str) -> &'p Combination<'a> {
    plan.combinations
        .iter()
        .find(|c| c.slug() == slug)
        .unwrap_or_else(|| {
            let available: Vec<&str> = plan.combinations.iter().map(|c| c.slug()).collect();
            panic!("combination '{}' not found. Available: {:?}", slug, available)
        })
}
