//! Filename categorization.
//!
//! The category table is an ordered list of [`CategoryRule`]s. Order does two
//! jobs: the first rule whose keyword appears in the filename wins, and the
//! generated HTML lists categories in the same order. The final rule has no
//! keywords and takes every filename nothing else claimed, so categorization
//! is total and never fails.
//!
//! ```text
//! members   ["members-", "member-"]
//! temple    ["temple-", "head-temple-", "salmon-gate-"]
//! fuji      ["mount-fuji-", "fuji-"]
//! ...
//! misc      []                      ← catch-all
//! ```
//!
//! The filename is lower-cased once; keywords are compared exactly as
//! configured. A keyword with upper-case letters therefore never matches.

use crate::types::{CategoryRule, ImageRef};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("category table is empty")]
    Empty,
    #[error("category id must not be empty")]
    EmptyId,
    #[error("duplicate category id '{0}'")]
    DuplicateId(String),
    #[error("last category '{0}' must be a catch-all with no keywords")]
    MissingCatchAll(String),
    #[error("category '{0}' has no keywords but is not the last one")]
    MisplacedCatchAll(String),
    #[error("category '{0}' has an empty keyword, which would match every filename")]
    EmptyKeyword(String),
}

/// A validated, ordered category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl RuleTable {
    /// Validate a list of rules.
    ///
    /// Requires at least one rule, unique non-empty ids, no empty keywords,
    /// and exactly one keyword-less rule in last position.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self, RuleError> {
        let Some(last) = rules.last() else {
            return Err(RuleError::Empty);
        };
        if !last.is_catch_all() {
            return Err(RuleError::MissingCatchAll(last.id.clone()));
        }

        let mut seen = std::collections::HashSet::new();
        for (idx, rule) in rules.iter().enumerate() {
            if rule.id.is_empty() {
                return Err(RuleError::EmptyId);
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleError::DuplicateId(rule.id.clone()));
            }
            if rule.is_catch_all() && idx + 1 != rules.len() {
                return Err(RuleError::MisplacedCatchAll(rule.id.clone()));
            }
            if rule.keywords.iter().any(String::is_empty) {
                return Err(RuleError::EmptyKeyword(rule.id.clone()));
            }
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// The keyword-less rule every unmatched filename falls into.
    pub fn catch_all(&self) -> &CategoryRule {
        // `new` guarantees a non-empty table ending in the catch-all.
        &self.rules[self.rules.len() - 1]
    }

    /// The rule a filename belongs to: first keyword match, else the catch-all.
    pub fn classify(&self, filename: &str) -> &CategoryRule {
        let lowered = filename.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .unwrap_or_else(|| self.catch_all())
    }

    /// Sort images into per-category groups.
    ///
    /// Every category of the table gets a group, in table order, even when it
    /// ends up empty. Within a group, images keep their input order.
    pub fn group(&self, images: impl IntoIterator<Item = ImageRef>) -> CategorizedGroups {
        let mut groups: Vec<Group> = self
            .rules
            .iter()
            .map(|rule| Group {
                rule: rule.clone(),
                images: Vec::new(),
            })
            .collect();

        for image in images {
            let id = &self.classify(&image.filename).id;
            tracing::debug!(file = %image.filename, category = %id, "categorized");
            if let Some(group) = groups.iter_mut().find(|g| &g.rule.id == id) {
                group.images.push(image);
            }
        }

        CategorizedGroups { groups }
    }
}

/// Category id for a filename under the given table.
pub fn categorize<'a>(filename: &str, table: &'a RuleTable) -> &'a str {
    &table.classify(filename).id
}

/// Images of one category, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub rule: CategoryRule,
    pub images: Vec<ImageRef>,
}

/// The result of categorizing a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedGroups {
    groups: Vec<Group>,
}

impl CategorizedGroups {
    /// All groups in table order, empty ones included.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Groups holding at least one image, in table order.
    pub fn non_empty(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| !g.images.is_empty())
    }

    pub fn get(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.rule.id == id)
    }

    /// Total images across every group.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.images.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_table, site_table};

    fn refs(names: &[&str]) -> Vec<ImageRef> {
        names.iter().map(|n| ImageRef::new(n)).collect()
    }

    // =========================================================================
    // Table validation
    // =========================================================================

    #[test]
    fn empty_table_rejected() {
        assert_eq!(RuleTable::new(vec![]), Err(RuleError::Empty));
    }

    #[test]
    fn table_without_catch_all_rejected() {
        let rules = vec![CategoryRule::new("temple", "Temple", "building", &["temple-"])];
        assert_eq!(
            RuleTable::new(rules),
            Err(RuleError::MissingCatchAll("temple".to_string()))
        );
    }

    #[test]
    fn early_catch_all_rejected() {
        let rules = vec![
            CategoryRule::new("misc", "Misc", "camera", &[]),
            CategoryRule::new("other", "Other", "camera", &[]),
        ];
        assert_eq!(
            RuleTable::new(rules),
            Err(RuleError::MisplacedCatchAll("misc".to_string()))
        );
    }

    #[test]
    fn duplicate_id_rejected() {
        let rules = vec![
            CategoryRule::new("fuji", "Fuji", "mountain", &["fuji-"]),
            CategoryRule::new("fuji", "Fuji again", "mountain", &["mount-"]),
            CategoryRule::new("misc", "Misc", "camera", &[]),
        ];
        assert_eq!(
            RuleTable::new(rules),
            Err(RuleError::DuplicateId("fuji".to_string()))
        );
    }

    #[test]
    fn empty_id_rejected() {
        let rules = vec![CategoryRule::new("", "Misc", "camera", &[])];
        assert_eq!(RuleTable::new(rules), Err(RuleError::EmptyId));
    }

    #[test]
    fn single_catch_all_is_valid() {
        let table = RuleTable::new(vec![CategoryRule::new("all", "All", "grid", &[])]).unwrap();
        assert_eq!(categorize("whatever.jpg", &table), "all");
    }

    #[test]
    fn empty_keyword_rejected() {
        let rules = vec![
            CategoryRule::new("everything", "Everything", "grid", &["fuji-", ""]),
            CategoryRule::new("misc", "Misc", "camera", &[]),
        ];
        assert_eq!(
            RuleTable::new(rules),
            Err(RuleError::EmptyKeyword("everything".to_string()))
        );
    }

    #[test]
    fn keywords_kept_as_configured() {
        let table = RuleTable::new(vec![
            CategoryRule::new("travel", "Travel", "airplane", &["CX-"]),
            CategoryRule::new("misc", "Misc", "camera", &[]),
        ])
        .unwrap();
        assert_eq!(table.rules()[0].keywords, vec!["CX-"]);
        // The filename is lower-cased, the keyword is not: no match either way.
        assert_eq!(categorize("cx-510.jpg", &table), "misc");
        assert_eq!(categorize("CX-510.jpg", &table), "misc");
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn worked_example() {
        let table = sample_table();
        assert_eq!(categorize("temple-gate.jpg", &table), "temple");
        assert_eq!(categorize("fuji-view.jpg", &table), "fuji");
        assert_eq!(categorize("random.jpg", &table), "misc");
    }

    #[test]
    fn match_is_case_insensitive_on_filename() {
        let table = sample_table();
        assert_eq!(categorize("TEMPLE-Gate.JPG", &table), "temple");
    }

    #[test]
    fn first_matching_rule_wins() {
        let table = sample_table();
        // Contains both "temple-" and "fuji-"; temple is declared first.
        assert_eq!(categorize("fuji-temple-at-dawn.jpg", &table), "temple");
    }

    #[test]
    fn classification_is_deterministic() {
        let table = site_table();
        for name in ["dinner-ramen.jpg", "narita-gate.png", "x.gif", ""] {
            let first = categorize(name, &table);
            for _ in 0..3 {
                assert_eq!(categorize(name, &table), first);
            }
        }
    }

    #[test]
    fn empty_filename_goes_to_catch_all() {
        let table = site_table();
        assert_eq!(categorize("", &table), "misc");
    }

    #[test]
    fn site_table_precedence() {
        let table = site_table();
        // "head-temple-" is a temple keyword, but "member-" is checked first.
        assert_eq!(categorize("member-at-head-temple-gate.jpg", &table), "members");
        // "fujiyen-hotel" contains "fuji" but not "fuji-", so it lands in accommodation.
        assert_eq!(categorize("fujiyen-hotel-lobby.jpg", &table), "accommodation");
        // "fujinomiya-" contains neither "fuji-" nor "mount-fuji-".
        assert_eq!(categorize("fujinomiya-streets.jpg", &table), "local");
        assert_eq!(categorize("airport-lounge.jpg", &table), "travel");
    }

    // =========================================================================
    // Grouping
    // =========================================================================

    #[test]
    fn group_keeps_table_order_and_scan_order() {
        let table = sample_table();
        let groups = table.group(refs(&[
            "fuji-a.jpg",
            "random.jpg",
            "temple-b.jpg",
            "fuji-c.jpg",
        ]));

        let ids: Vec<&str> = groups.groups().iter().map(|g| g.rule.id.as_str()).collect();
        assert_eq!(ids, vec!["temple", "fuji", "misc"]);

        let fuji: Vec<&str> = groups
            .get("fuji")
            .unwrap()
            .images
            .iter()
            .map(|i| i.filename.as_str())
            .collect();
        assert_eq!(fuji, vec!["fuji-a.jpg", "fuji-c.jpg"]);
    }

    #[test]
    fn every_image_lands_in_exactly_one_group() {
        let table = site_table();
        let names = [
            "members-group.jpg",
            "temple-main.jpg",
            "mount-fuji-1.jpg",
            "cathay-seat.jpg",
            "meal-breakfast.jpg",
            "waterfall.png",
            "IMG_0042.jpg",
            "IMG_0043.jpg",
        ];
        let groups = table.group(refs(&names));
        assert_eq!(groups.total(), names.len());

        for name in names {
            let holders = groups
                .groups()
                .iter()
                .filter(|g| g.images.iter().any(|i| i.filename == name))
                .count();
            assert_eq!(holders, 1, "{name} should be in exactly one group");
        }
    }

    #[test]
    fn empty_categories_still_present_but_not_in_non_empty() {
        let table = sample_table();
        let groups = table.group(refs(&["temple-a.jpg"]));
        assert_eq!(groups.groups().len(), 3);
        let non_empty: Vec<&str> = groups.non_empty().map(|g| g.rule.id.as_str()).collect();
        assert_eq!(non_empty, vec!["temple"]);
    }

    #[test]
    fn grouping_nothing() {
        let groups = sample_table().group(Vec::new());
        assert!(groups.is_empty());
        assert_eq!(groups.non_empty().count(), 0);
    }
}
