//! Combination enumeration and de-duplication.
//!
//! Every pattern of the catalog is expanded into the full cartesian product of
//! its dimensions' values. The last dimension of a pattern varies fastest, as
//! with one nested loop per dimension in declared order:
//!
//! ```text
//! pattern [tone, complaint], tone = {harsh, polite}, complaint = {late, rude}
//!
//!   harsh-late, harsh-rude, polite-late, polite-rude
//! ```
//!
//! All passes are concatenated in pattern declaration order and reduced by
//! slug, keeping the first combination that reaches each slug
//! ([`dedup_by_slug`]). Patterns may therefore overlap freely: the emitted page
//! count is the number of distinct slugs, and a colliding slug belongs to the
//! earliest pattern.

use crate::catalog::{Catalog, Dimension, Pattern, Value};
use crate::naming::slug_from_ids;
use std::collections::HashSet;

/// One chosen value of one dimension.
#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    /// Position of the dimension in the catalog.
    pub dimension_index: usize,
    pub dimension: &'a Dimension,
    pub value: &'a Value,
}

/// A selection of values across the dimensions of one pattern.
#[derive(Debug, Clone)]
pub struct Combination<'a> {
    pub pattern: &'a Pattern,
    /// Picks in the pattern's declared dimension order.
    pub picks: Vec<Pick<'a>>,
    slug: String,
}

impl<'a> Combination<'a> {
    pub fn new(pattern: &'a Pattern, picks: Vec<Pick<'a>>) -> Self {
        let slug = slug_from_ids(picks.iter().map(|p| p.value.id.as_str()));
        Self {
            pattern,
            picks,
            slug,
        }
    }

    /// Canonical slug, also the de-duplication key.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Value ids in slug order.
    pub fn value_ids(&self) -> Vec<&'a str> {
        self.picks.iter().map(|p| p.value.id.as_str()).collect()
    }
}

/// Per-pattern enumeration counts.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternStats {
    pub name: String,
    /// Size of the pattern's cartesian product.
    pub produced: usize,
    /// Combinations that survived de-duplication.
    pub kept: usize,
}

impl PatternStats {
    pub fn duplicates(&self) -> usize {
        self.produced - self.kept
    }
}

/// The de-duplicated, order-stable combinations of a run.
#[derive(Debug, Clone)]
pub struct Plan<'a> {
    pub combinations: Vec<Combination<'a>>,
    pub stats: Vec<PatternStats>,
}

impl Plan<'_> {
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Sum of all cartesian product sizes, before de-duplication.
    pub fn produced(&self) -> usize {
        self.stats.iter().map(|s| s.produced).sum()
    }
}

/// Full cartesian product of one pattern's dimensions.
///
/// A dimension without values makes the product empty.
pub fn cartesian<'a>(catalog: &'a Catalog, pattern: &'a Pattern) -> Vec<Combination<'a>> {
    let dimensions: Vec<(usize, &Dimension)> = pattern
        .dimensions
        .iter()
        .map(|&i| (i, &catalog.dimensions()[i]))
        .collect();
    if dimensions.is_empty() || dimensions.iter().any(|(_, d)| d.values.is_empty()) {
        return Vec::new();
    }

    let total = dimensions.iter().map(|(_, d)| d.values.len()).product();
    let mut combinations = Vec::with_capacity(total);
    let mut cursor = vec![0usize; dimensions.len()];

    loop {
        let picks = dimensions
            .iter()
            .zip(&cursor)
            .map(|(&(dimension_index, dimension), &v)| Pick {
                dimension_index,
                dimension,
                value: &dimension.values[v],
            })
            .collect();
        combinations.push(Combination::new(pattern, picks));

        // Advance like an odometer: the last dimension is the innermost loop.
        let mut pos = dimensions.len();
        loop {
            if pos == 0 {
                return combinations;
            }
            pos -= 1;
            cursor[pos] += 1;
            if cursor[pos] < dimensions[pos].1.values.len() {
                break;
            }
            cursor[pos] = 0;
        }
    }
}

/// Keep the first combination for each slug, preserving order.
pub fn dedup_by_slug<'a>(
    combinations: impl IntoIterator<Item = Combination<'a>>,
) -> Vec<Combination<'a>> {
    let mut seen = HashSet::new();
    combinations
        .into_iter()
        .filter(|c| seen.insert(c.slug().to_string()))
        .collect()
}

/// Enumerate every pattern of the catalog and de-duplicate by slug.
pub fn enumerate(catalog: &Catalog) -> Plan<'_> {
    let passes: Vec<Vec<Combination>> = catalog
        .patterns()
        .iter()
        .map(|pattern| cartesian(catalog, pattern))
        .collect();
    let produced: Vec<usize> = passes.iter().map(Vec::len).collect();

    let combinations = dedup_by_slug(passes.into_iter().flatten());

    let stats = catalog
        .patterns()
        .iter()
        .zip(produced)
        .map(|(pattern, produced)| PatternStats {
            name: pattern.name.clone(),
            produced,
            kept: combinations
                .iter()
                .filter(|c| std::ptr::eq(c.pattern, pattern))
                .count(),
        })
        .collect();

    Plan {
        combinations,
        stats,
    }
}
