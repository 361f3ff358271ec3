//! Slug, title and description derivation for combinations.
//!
//! ## Slugs
//!
//! A slug is the value ids of a combination joined by `-`, in the order the
//! originating pattern declares its dimensions:
//!
//! - pattern `[tone, complaint]`, values `harsh`, `shipping` → `harsh-shipping`
//! - pattern `[complaint, tone]`, same values → `shipping-harsh`
//!
//! Ids are validated as slug-safe when the catalog loads, so joining them
//! always yields a slug matching `^[a-z0-9]+(-[a-z0-9]+)*$`. Two combinations
//! are the same page exactly when their slugs are equal.
//!
//! ## Titles and descriptions
//!
//! Titles are phrased in a fixed semantic order (tone, complaint, business,
//! platform) independent of pattern order. Only roles present in the
//! combination contribute, and connective words appear only next to a present
//! segment:
//!
//! - tone + complaint → `Harsh Reviews About Shipping`
//! - complaint + business + platform → `Shipping at Restaurants on Google Maps`
//! - tone + business → `Harsh Reviews for Hotels`
//!
//! Descriptions embed lower-cased display strings and fall back to
//! `professional` (tone) and `negative` (complaint) when those roles are absent.

use crate::catalog::Role;
use crate::enumerate::Combination;

/// Tone used in descriptions when the combination has none.
pub const DEFAULT_TONE: &str = "professional";
/// Complaint used in descriptions when the combination has none.
pub const DEFAULT_COMPLAINT: &str = "negative";

/// Slug, title and description of one combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub slug: String,
    pub title: String,
    pub description: String,
}

/// Whether `s` matches `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn is_slug_safe(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Join value ids into a slug.
pub fn slug_from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    ids.into_iter().collect::<Vec<_>>().join("-")
}

/// Display strings of a combination, grouped by role.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RoleLabels<'a> {
    pub tone: Option<&'a str>,
    pub complaint: Option<&'a str>,
    pub business: Option<&'a str>,
    pub platform: Option<&'a str>,
    /// `Other`-role labels, in catalog order.
    pub other: Vec<&'a str>,
}

impl<'a> RoleLabels<'a> {
    pub fn from_combination(combination: &Combination<'a>, language: &str) -> Self {
        let mut labels = Self::default();
        let mut picks: Vec<_> = combination.picks.iter().collect();
        picks.sort_by_key(|pick| pick.dimension_index);
        for pick in picks {
            let text = pick.value.display.resolve(language);
            match pick.dimension.role() {
                Role::Tone => labels.tone = Some(text),
                Role::Complaint => labels.complaint = Some(text),
                Role::Business => labels.business = Some(text),
                Role::Platform => labels.platform = Some(text),
                Role::Other => labels.other.push(text),
            }
        }
        labels
    }
}

/// Derive slug, title and description for a combination.
pub fn derive(combination: &Combination, language: &str) -> Derived {
    let labels = RoleLabels::from_combination(combination, language);
    Derived {
        slug: combination.slug().to_string(),
        title: title_for(&labels),
        description: description_for(&labels),
    }
}

/// Build the headline phrase from whichever roles are present.
pub fn title_for(labels: &RoleLabels) -> String {
    let mut words: Vec<&str> = Vec::new();

    if let Some(tone) = labels.tone {
        words.push(tone);
    }
    if let Some(complaint) = labels.complaint {
        if !words.is_empty() {
            words.push("Reviews About");
        }
        words.push(complaint);
    }
    if let Some(business) = labels.business {
        if !words.is_empty() {
            words.push(if labels.complaint.is_some() {
                "at"
            } else {
                "Reviews for"
            });
        }
        words.push(business);
    }
    if let Some(platform) = labels.platform {
        if !words.is_empty() {
            let tone_only = labels.complaint.is_none() && labels.business.is_none();
            words.push(if tone_only { "Reviews on" } else { "on" });
        }
        words.push(platform);
    }
    words.extend(labels.other.iter().copied());

    words.join(" ")
}

/// Build the meta description sentence.
pub fn description_for(labels: &RoleLabels) -> String {
    let tone = labels
        .tone
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_TONE.to_string());
    let complaint = labels
        .complaint
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_COMPLAINT.to_string());
    let business = labels
        .business
        .map(|b| format!(" for {}", b.to_lowercase()))
        .unwrap_or_default();
    let platform = labels
        .platform
        .map(|p| format!(" on {}", p.to_lowercase()))
        .unwrap_or_default();

    format!(
        "Paste {complaint} reviews{business}{platform} and get a {tone} translation of what \
         the customer really means and what the boss hears."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::enumerate;
    use crate::test_helpers::*;

    fn labels<'a>(
        tone: Option<&'a str>,
        complaint: Option<&'a str>,
        business: Option<&'a str>,
        platform: Option<&'a str>,
    ) -> RoleLabels<'a> {
        RoleLabels {
            tone,
            complaint,
            business,
            platform,
            other: vec![],
        }
    }

    // =========================================================================
    // Slugs
    // =========================================================================

    #[test]
    fn slug_safe_accepts_hyphenated_ids() {
        assert!(is_slug_safe("harsh"));
        assert!(is_slug_safe("slow-service"));
        assert!(is_slug_safe("top-10-list"));
    }

    #[test]
    fn slug_safe_rejects_malformed_ids() {
        assert!(!is_slug_safe(""));
        assert!(!is_slug_safe("-harsh"));
        assert!(!is_slug_safe("harsh-"));
        assert!(!is_slug_safe("very--harsh"));
        assert!(!is_slug_safe("Harsh"));
        assert!(!is_slug_safe("slow service"));
        assert!(!is_slug_safe("café"));
        assert!(!is_slug_safe("a_b"));
    }

    #[test]
    fn slug_joins_ids_in_order() {
        assert_eq!(slug_from_ids(["harsh", "shipping"]), "harsh-shipping");
        assert_eq!(
            slug_from_ids(["shipping", "slow-service", "yelp"]),
            "shipping-slow-service-yelp"
        );
    }

    // =========================================================================
    // Titles
    // =========================================================================

    #[test]
    fn title_tone_and_complaint() {
        let title = title_for(&labels(Some("Harsh"), Some("Shipping"), None, None));
        assert_eq!(title, "Harsh Reviews About Shipping");
    }

    #[test]
    fn title_all_four_roles() {
        let title = title_for(&labels(
            Some("Harsh"),
            Some("Slow Service"),
            Some("Restaurants"),
            Some("Google Maps"),
        ));
        assert_eq!(
            title,
            "Harsh Reviews About Slow Service at Restaurants on Google Maps"
        );
    }

    #[test]
    fn title_without_tone_has_no_leading_connective() {
        let title = title_for(&labels(
            None,
            Some("Shipping"),
            Some("Restaurants"),
            Some("Yelp"),
        ));
        assert_eq!(title, "Shipping at Restaurants on Yelp");
    }

    #[test]
    fn title_tone_and_business() {
        let title = title_for(&labels(Some("Harsh"), None, Some("Hotels"), None));
        assert_eq!(title, "Harsh Reviews for Hotels");
    }

    #[test]
    fn title_tone_and_platform() {
        let title = title_for(&labels(Some("Polite"), None, None, Some("Yelp")));
        assert_eq!(title, "Polite Reviews on Yelp");
    }

    #[test]
    fn title_business_and_platform() {
        let title = title_for(&labels(None, None, Some("Hotels"), Some("TripAdvisor")));
        assert_eq!(title, "Hotels on TripAdvisor");
    }

    #[test]
    fn title_appends_other_roles() {
        let mut l = labels(Some("Harsh"), Some("Shipping"), None, None);
        l.other.push("in Winter");
        assert_eq!(title_for(&l), "Harsh Reviews About Shipping in Winter");
    }

    // =========================================================================
    // Descriptions
    // =========================================================================

    #[test]
    fn description_lowercases_present_roles() {
        let d = description_for(&labels(
            Some("Harsh"),
            Some("Slow Service"),
            Some("Restaurants"),
            Some("Google Maps"),
        ));
        assert!(d.starts_with(
            "Paste slow service reviews for restaurants on google maps and get a harsh translation"
        ));
    }

    #[test]
    fn description_falls_back_to_generic_words() {
        let d = description_for(&labels(None, None, Some("Hotels"), Some("Yelp")));
        assert!(d.starts_with("Paste negative reviews for hotels on yelp and get a professional"));
    }

    #[test]
    fn description_omits_absent_business_and_platform() {
        let d = description_for(&labels(Some("Polite"), Some("Shipping"), None, None));
        assert!(d.starts_with("Paste shipping reviews and get a polite translation"));
    }

    // =========================================================================
    // derive()
    // =========================================================================

    #[test]
    fn derive_orders_title_semantically_not_by_pattern() {
        let catalog = catalog(
            vec![
                dimension("tone", &["harsh"]),
                dimension("platform", &["yelp"]),
                dimension("complaint", &["shipping"]),
            ],
            &[&["platform", "complaint", "tone"]],
        );
        let plan = enumerate(&catalog);
        let derived = derive(&plan.combinations[0], "en");
        assert_eq!(derived.slug, "yelp-shipping-harsh");
        assert_eq!(derived.title, "Harsh Reviews About Shipping on Yelp");
    }

    #[test]
    fn derive_is_deterministic() {
        let catalog = catalog(
            vec![
                dimension("tone", &["harsh", "polite"]),
                dimension("complaint", &["shipping"]),
            ],
            &[&["tone", "complaint"]],
        );
        let plan = enumerate(&catalog);
        let first: Vec<Derived> = plan.combinations.iter().map(|c| derive(c, "en")).collect();
        let second: Vec<Derived> = plan.combinations.iter().map(|c| derive(c, "en")).collect();
        assert_eq!(first, second);
    }
}
