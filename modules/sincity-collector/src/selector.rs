use std::fmt;

use clap::ValueEnum;

/// Which slice of Yelp's taxonomy a run collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategorySelector {
    Restaurants,
    Bars,
    Shopping,
    Attractions,
    All,
}

impl CategorySelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySelector::Restaurants => "restaurants",
            CategorySelector::Bars => "bars",
            CategorySelector::Shopping => "shopping",
            CategorySelector::Attractions => "attractions",
            CategorySelector::All => "all",
        }
    }

    /// Yelp `categories` filter for this selector.
    pub fn provider_filter(&self) -> &'static str {
        match self {
            CategorySelector::Restaurants => "restaurants",
            CategorySelector::Bars => "bars,nightlife",
            CategorySelector::Shopping => "shopping",
            CategorySelector::Attractions => "entertainment,tours,museums",
            CategorySelector::All => "restaurants,bars,nightlife,shopping,entertainment",
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_parse_from_their_names() {
        for sel in CategorySelector::value_variants() {
            assert_eq!(CategorySelector::from_str(sel.as_str(), false), Ok(*sel));
        }
    }

    #[test]
    fn unknown_selector_is_rejected() {
        assert!(CategorySelector::from_str("casinos", false).is_err());
    }

    #[test]
    fn bars_query_nightlife_too() {
        assert_eq!(CategorySelector::Bars.provider_filter(), "bars,nightlife");
    }
}
