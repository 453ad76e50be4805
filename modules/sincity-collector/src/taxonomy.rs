//! Yelp category taxonomy → internal POI category.
//!
//! Classification is an ordered rule table evaluated against every tag alias
//! on a business. The first rule with any matching needle wins, so a ramen
//! shop that is also tagged `bar` stays a restaurant. Anything unmatched is
//! an attraction.

use std::fmt;

use serde::{Deserialize, Serialize};
use yelp_client::Category;

pub const DEFAULT_SUBCATEGORY: &str = "other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiCategory {
    Restaurant,
    Nightlife,
    Shopping,
    Attraction,
}

impl PoiCategory {
    pub const ALL: [PoiCategory; 4] = [
        PoiCategory::Restaurant,
        PoiCategory::Nightlife,
        PoiCategory::Shopping,
        PoiCategory::Attraction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoiCategory::Restaurant => "restaurant",
            PoiCategory::Nightlife => "nightlife",
            PoiCategory::Shopping => "shopping",
            PoiCategory::Attraction => "attraction",
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the rule table: any alias containing any needle maps to `category`.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub needles: &'static [&'static str],
    pub category: PoiCategory,
}

impl ClassificationRule {
    pub fn matches(&self, aliases: &[&str]) -> bool {
        aliases
            .iter()
            .any(|alias| self.needles.iter().any(|needle| alias.contains(needle)))
    }
}

/// Priority order. Restaurant and nightlife rules must stay ahead of shopping.
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        needles: &["restaurant", "food"],
        category: PoiCategory::Restaurant,
    },
    ClassificationRule {
        needles: &["bar", "nightlife"],
        category: PoiCategory::Nightlife,
    },
    ClassificationRule {
        needles: &["shop", "shopping"],
        category: PoiCategory::Shopping,
    },
];

pub const FALLBACK_CATEGORY: PoiCategory = PoiCategory::Attraction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: PoiCategory,
    pub subcategory: String,
}

/// Classify a business by its tag list. Missing and empty tag lists are
/// treated identically.
pub fn classify(tags: Option<&[Category]>) -> Classification {
    classify_with(RULES, tags)
}

pub fn classify_with(rules: &[ClassificationRule], tags: Option<&[Category]>) -> Classification {
    let tags = tags.unwrap_or_default();
    let aliases: Vec<&str> = tags.iter().map(|c| c.alias.as_str()).collect();

    let category = rules
        .iter()
        .find(|rule| rule.matches(&aliases))
        .map(|rule| rule.category)
        .unwrap_or(FALLBACK_CATEGORY);

    let subcategory = aliases
        .first()
        .map(|alias| alias.to_string())
        .unwrap_or_else(|| DEFAULT_SUBCATEGORY.to_string());

    Classification {
        category,
        subcategory,
    }
}
