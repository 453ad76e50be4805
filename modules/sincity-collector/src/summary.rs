//! End-of-run statistics over a finished dataset.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::anchors::AnchorSet;
use crate::runner::Dataset;
use crate::taxonomy::PoiCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    /// Every category, zero counts included, in enum order.
    pub by_category: Vec<(PoiCategory, usize)>,
    /// Highest-count anchors first; ties go to the earlier-configured anchor.
    pub top_anchors: Vec<(String, usize)>,
    /// Mean of strictly positive ratings; `None` when no POI has one.
    pub average_rating: Option<f64>,
    pub by_price_tier: BTreeMap<String, usize>,
}

pub fn summarize(dataset: &Dataset, anchors: &AnchorSet, top_n: usize) -> Summary {
    let mut category_counts: HashMap<PoiCategory, usize> = HashMap::new();
    let mut anchor_counts: HashMap<&str, usize> = HashMap::new();
    let mut by_price_tier: BTreeMap<String, usize> = BTreeMap::new();
    let mut rating_sum = 0.0;
    let mut rated = 0usize;

    for poi in dataset.iter() {
        *category_counts.entry(poi.category).or_default() += 1;
        *anchor_counts.entry(poi.anchor_name.as_str()).or_default() += 1;
        *by_price_tier
            .entry(poi.pricing.price_range.clone())
            .or_default() += 1;

        let rating = poi.ratings.yelp.rating;
        if rating > 0.0 {
            rating_sum += rating;
            rated += 1;
        }
    }

    let by_category = PoiCategory::ALL
        .iter()
        .map(|c| (*c, category_counts.get(c).copied().unwrap_or(0)))
        .collect();

    let mut ranked: Vec<(&str, usize)> = anchor_counts.into_iter().collect();
    ranked.sort_by_key(|(name, count)| {
        (
            std::cmp::Reverse(*count),
            anchors.position(name).unwrap_or(usize::MAX),
            name.to_string(),
        )
    });
    let top_anchors = ranked
        .into_iter()
        .take(top_n)
        .map(|(name, count)| (name.to_string(), count))
        .collect();

    let average_rating = (rated > 0).then(|| rating_sum / rated as f64);

    Summary {
        total: dataset.len(),
        by_category,
        top_anchors,
        average_rating,
        by_price_tier,
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary Statistics ({} POIs)", self.total)?;
        writeln!(f, "By Category:")?;
        for (category, count) in &self.by_category {
            writeln!(f, "  - {category}: {count}")?;
        }
        writeln!(f, "Top {} anchors by POI count:", self.top_anchors.len())?;
        for (anchor, count) in &self.top_anchors {
            writeln!(f, "  - {anchor}: {count}")?;
        }
        match self.average_rating {
            Some(avg) => writeln!(f, "Average Yelp Rating: {avg:.2}/5.0")?,
            None => writeln!(f, "Average Yelp Rating: not available")?,
        }
        writeln!(f, "Price Range Distribution:")?;
        for (tier, count) in &self.by_price_tier {
            writeln!(f, "  - {tier}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::Anchor;
    use crate::record::RecordBuilder;
    use chrono::Utc;
    use yelp_client::{Business, Category};

    fn anchors() -> AnchorSet {
        AnchorSet::new(vec![
            Anchor::new("First", 36.10, -115.17, "Mid Strip"),
            Anchor::new("Second", 36.11, -115.17, "Mid Strip"),
            Anchor::new("Third", 36.12, -115.17, "North Strip"),
        ])
    }

    fn dataset(entries: &[(&str, &str, &str, Option<f64>, Option<&str>)]) -> Dataset {
        let builder = RecordBuilder::new(Utc::now());
        let set = anchors();
        let mut dataset = Dataset::new();
        for (i, (id, anchor, alias, rating, price)) in entries.iter().enumerate() {
            let anchor = set.iter().find(|a| a.name == *anchor).unwrap();
            let business = Business {
                id: id.to_string(),
                categories: Some(vec![Category {
                    alias: alias.to_string(),
                    title: alias.to_string(),
                }]),
                rating: *rating,
                price: price.map(str::to_string),
                ..Default::default()
            };
            dataset.push(builder.build(&business, anchor, 1000 + i as u64));
        }
        dataset
    }

    #[test]
    fn empty_dataset_reports_zeroes_and_no_average() {
        let summary = summarize(&Dataset::new(), &anchors(), 10);
        assert_eq!(summary.total, 0);
        assert!(summary.by_category.iter().all(|(_, n)| *n == 0));
        assert_eq!(summary.by_category.len(), 4);
        assert!(summary.top_anchors.is_empty());
        assert_eq!(summary.average_rating, None);
        assert!(summary.by_price_tier.is_empty());
        assert!(summary.to_string().contains("not available"));
    }

    #[test]
    fn counts_categories_and_price_tiers() {
        let ds = dataset(&[
            ("a", "First", "pizza_restaurant", Some(4.0), Some("$$")),
            ("b", "First", "cocktailbars", Some(3.0), None),
            ("c", "Second", "museums", None, Some("$$")),
        ]);
        let summary = summarize(&ds, &anchors(), 10);
        assert_eq!(
            summary.by_category,
            vec![
                (PoiCategory::Restaurant, 1),
                (PoiCategory::Nightlife, 1),
                (PoiCategory::Shopping, 0),
                (PoiCategory::Attraction, 1),
            ]
        );
        assert_eq!(summary.by_price_tier.get("$$"), Some(&2));
        assert_eq!(summary.by_price_tier.get("N/A"), Some(&1));
    }

    #[test]
    fn average_ignores_unrated_pois() {
        let ds = dataset(&[
            ("a", "First", "thai", Some(4.0), None),
            ("b", "First", "thai", Some(5.0), None),
            ("c", "First", "thai", None, None),
            ("d", "First", "thai", Some(0.0), None),
        ]);
        let summary = summarize(&ds, &anchors(), 10);
        assert_eq!(summary.average_rating, Some(4.5));
    }

    #[test]
    fn anchor_ties_rank_by_configured_position() {
        let ds = dataset(&[
            ("a", "Third", "thai", None, None),
            ("b", "Second", "thai", None, None),
            ("c", "First", "thai", None, None),
            ("d", "Third", "thai", None, None),
        ]);
        let summary = summarize(&ds, &anchors(), 2);
        assert_eq!(
            summary.top_anchors,
            vec![("Third".to_string(), 2), ("First".to_string(), 1)]
        );
    }
}
