//! The dimension catalog.
//!
//! A catalog is the declarative input of a run: named dimensions (tone,
//! complaint type, business type, platform, ...) each holding an ordered list
//! of values, plus the enumeration patterns that say which dimensions are
//! combined in one cartesian pass.
//!
//! ```toml
//! [[dimensions]]
//! name = "tone"
//! values = [
//!     { id = "harsh", display = "Harsh" },
//!     { id = "polite", display = { en = "Polite", zh = "礼貌" } },
//! ]
//!
//! [[patterns]]
//! dimensions = ["tone", "complaint"]
//! ```
//!
//! The raw serde types ([`Dimension`], [`Value`], [`PatternSpec`]) are what the
//! config file deserializes into. [`Catalog::new`] validates them and resolves
//! pattern dimension names to catalog positions; once built, a catalog is
//! read-only for the rest of the run.
//!
//! ## Roles
//!
//! Titles and descriptions are phrased in a fixed semantic order (tone,
//! complaint, business, platform) regardless of the order a pattern lists its
//! dimensions. Each dimension therefore carries a [`Role`], either declared
//! explicitly or inferred from its name.

use crate::naming::is_slug_safe;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::ConfigError;

/// Shortest pattern that may be declared.
pub const MIN_PATTERN_LEN: usize = 2;
/// Longest pattern that may be declared.
pub const MAX_PATTERN_LEN: usize = 4;

/// Semantic role of a dimension in generated titles and descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tone,
    Complaint,
    Business,
    Platform,
    Other,
}

impl Role {
    /// Infer a role from a dimension name.
    ///
    /// - `"tone"` → `Tone`
    /// - `"complaint"`, `"complaint_type"`, `"complaint-type"` → `Complaint`
    /// - `"business"`, `"business_type"`, `"business-type"` → `Business`
    /// - `"platform"` → `Platform`
    /// - anything else → `Other`
    pub fn from_name(name: &str) -> Self {
        match name {
            "tone" => Role::Tone,
            "complaint" | "complaint_type" | "complaint-type" => Role::Complaint,
            "business" | "business_type" | "business-type" => Role::Business,
            "platform" => Role::Platform,
            _ => Role::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Tone => "tone",
            Role::Complaint => "complaint",
            Role::Business => "business",
            Role::Platform => "platform",
            Role::Other => "other",
        }
    }
}

/// A display label: a plain string, or one string per locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl Label {
    /// The label text for `language`.
    ///
    /// Localized labels fall back to their first locale (alphabetical) when
    /// `language` is missing; validation rejects that case for loaded catalogs.
    pub fn resolve(&self, language: &str) -> &str {
        match self {
            Label::Plain(text) => text,
            Label::Localized(by_locale) => by_locale
                .get(language)
                .or_else(|| by_locale.values().next())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

/// One value of a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Value {
    /// Slug-safe identifier: lowercase ASCII alphanumerics separated by single hyphens.
    pub id: String,
    pub display: Label,
}

/// A named axis of variation with an ordered list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dimension {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Required; `values = []` declares a dimension that produces no pages.
    pub values: Vec<Value>,
}

impl Dimension {
    /// Declared role, or the one inferred from the name.
    pub fn role(&self) -> Role {
        self.role.unwrap_or_else(|| Role::from_name(&self.name))
    }
}

/// A pattern as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub dimensions: Vec<String>,
}

impl PatternSpec {
    /// Declared name, or the dimension names joined by `+`.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.dimensions.join("+"))
    }
}

/// A pattern whose dimension names have been resolved to catalog positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub name: String,
    /// Indices into [`Catalog::dimensions`], in the pattern's declared order.
    pub dimensions: Vec<usize>,
}

/// Validated, read-only dimension catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    dimensions: Vec<Dimension>,
    patterns: Vec<Pattern>,
}

impl Catalog {
    /// Validate dimensions and patterns and build the catalog.
    ///
    /// Every problem found is reported in a single [`ConfigError::Invalid`].
    pub fn new(
        dimensions: Vec<Dimension>,
        specs: &[PatternSpec],
        language: &str,
    ) -> Result<Self, ConfigError> {
        let problems = check(&dimensions, specs, language);
        if !problems.is_empty() {
            return Err(ConfigError::Invalid(problems));
        }

        let positions: HashMap<&str, usize> = dimensions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.as_str(), i))
            .collect();
        let patterns = specs
            .iter()
            .map(|spec| Pattern {
                name: spec.display_name(),
                dimensions: spec
                    .dimensions
                    .iter()
                    .filter_map(|name| positions.get(name.as_str()).copied())
                    .collect(),
            })
            .collect();

        Ok(Self {
            dimensions,
            patterns,
        })
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Dimensions of `pattern` in its declared order.
    pub fn pattern_dimensions<'a>(
        &'a self,
        pattern: &'a Pattern,
    ) -> impl Iterator<Item = &'a Dimension> + 'a {
        pattern.dimensions.iter().map(|&i| &self.dimensions[i])
    }

    /// Likely misconfigurations that are not errors.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.patterns.is_empty() {
            warnings.push("no patterns declared; no pages will be generated".to_string());
        }

        for pattern in &self.patterns {
            for dimension in self.pattern_dimensions(pattern) {
                if dimension.values.is_empty() {
                    warnings.push(format!(
                        "pattern `{}` uses dimension `{}` which has no values; it produces no pages",
                        pattern.name, dimension.name
                    ));
                }
            }
        }

        for (i, first) in self.patterns.iter().enumerate() {
            for second in &self.patterns[i + 1..] {
                if first.dimensions == second.dimensions {
                    warnings.push(format!(
                        "pattern `{}` repeats `{}`; every page it produces is a duplicate",
                        second.name, first.name
                    ));
                } else if same_members(&first.dimensions, &second.dimensions) {
                    warnings.push(format!(
                        "patterns `{}` and `{}` combine the same dimensions in a different order; \
                         their slugs differ, so both sets of pages are generated",
                        first.name, second.name
                    ));
                }
            }
        }

        warnings
    }
}

fn same_members(a: &[usize], b: &[usize]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Collect every problem with the declared dimensions and patterns.
pub fn check(dimensions: &[Dimension], specs: &[PatternSpec], language: &str) -> Vec<String> {
    let mut problems = Vec::new();

    let mut names = HashSet::new();
    let mut roles: HashMap<Role, &str> = HashMap::new();
    for dimension in dimensions {
        let name = dimension.name.as_str();
        if name.trim().is_empty() {
            problems.push("dimension with an empty name".to_string());
            continue;
        }
        if !names.insert(name) {
            problems.push(format!("duplicate dimension `{name}`"));
        }

        let role = dimension.role();
        if role != Role::Other {
            if let Some(previous) = roles.insert(role, name) {
                problems.push(format!(
                    "dimensions `{previous}` and `{name}` both have role `{}`",
                    role.as_str()
                ));
            }
        }

        let mut ids = HashSet::new();
        for value in &dimension.values {
            if !is_slug_safe(&value.id) {
                problems.push(format!(
                    "dimension `{name}`: value id `{}` must be lowercase letters, digits and single hyphens",
                    value.id
                ));
            }
            if !ids.insert(value.id.as_str()) {
                problems.push(format!("dimension `{name}`: duplicate value id `{}`", value.id));
            }
            check_label(name, value, language, &mut problems);
        }
    }

    let mut pattern_names = HashSet::new();
    for spec in specs {
        let pattern = spec.display_name();
        if !pattern_names.insert(pattern.clone()) {
            problems.push(format!("duplicate pattern `{pattern}`"));
        }

        let len = spec.dimensions.len();
        if !(MIN_PATTERN_LEN..=MAX_PATTERN_LEN).contains(&len) {
            problems.push(format!(
                "pattern `{pattern}` has {len} dimensions; expected {MIN_PATTERN_LEN} to {MAX_PATTERN_LEN}"
            ));
        }

        let mut used = HashSet::new();
        for name in &spec.dimensions {
            if !names.contains(name.as_str()) {
                problems.push(format!("pattern `{pattern}` references unknown dimension `{name}`"));
            }
            if !used.insert(name.as_str()) {
                problems.push(format!("pattern `{pattern}` lists dimension `{name}` twice"));
            }
        }
    }

    problems
}

fn check_label(dimension: &str, value: &Value, language: &str, problems: &mut Vec<String>) {
    match &value.display {
        Label::Plain(text) if text.trim().is_empty() => problems.push(format!(
            "dimension `{dimension}`: value `{}` has an empty display string",
            value.id
        )),
        Label::Localized(by_locale) => match by_locale.get(language) {
            None => problems.push(format!(
                "dimension `{dimension}`: value `{}` has no `{language}` display string",
                value.id
            )),
            Some(text) if text.trim().is_empty() => problems.push(format!(
                "dimension `{dimension}`: value `{}` has an empty `{language}` display string",
                value.id
            )),
            Some(_) => {}
        },
        Label::Plain(_) => {}
    }
}
