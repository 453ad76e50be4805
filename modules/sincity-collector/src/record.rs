//! Internal POI record and its construction from a Yelp business.
//!
//! Field names match the POI JSON files consumed by the import tooling, so
//! the anchor appears as `casino_property` and external ids as `yelp_*`.
//! Every optional provider field is defaulted to a neutral value; nothing in
//! a persisted record is ever null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yelp_client::Business;

use crate::anchors::Anchor;
use crate::taxonomy::{classify, PoiCategory};

/// Generated ids start here; lower numbers are reserved for hand-curated POIs.
pub const MANUAL_ID_CEILING: u64 = 1000;

pub const DEFAULT_CITY: &str = "Las Vegas";
pub const DEFAULT_STATE: &str = "NV";
pub const NO_PRICE_TIER: &str = "N/A";
pub const SOURCE_NAME: &str = "yelp_api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalPoi {
    pub id: String,
    pub name: String,
    pub category: PoiCategory,
    pub subcategory: String,
    #[serde(rename = "casino_property")]
    pub anchor_name: String,
    pub location: PoiLocation,
    pub contact: Contact,
    pub pricing: Pricing,
    pub ratings: Ratings,
    pub description: String,
    pub cuisine: Vec<String>,
    pub features: Vec<String>,
    pub tags: Vec<String>,
    pub yelp_id: String,
    pub yelp_url: String,
    pub image_url: String,
    pub is_closed: bool,
    pub data_sources: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Name of the originating anchor.
    pub casino: String,
    pub coordinates: LatLng,
    pub area: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub yelp: ProviderRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProviderRating {
    pub rating: f64,
    pub review_count: u32,
}

// ---------------------------------------------------------------------------
// IdSequence
// ---------------------------------------------------------------------------

/// Monotonic id source for one run.
#[derive(Debug)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(MANUAL_ID_CEILING)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Builds [`InternalPoi`]s stamped with one run's timestamp and provenance.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    collected_at: DateTime<Utc>,
    data_sources: Vec<String>,
}

impl RecordBuilder {
    pub fn new(collected_at: DateTime<Utc>) -> Self {
        let search_tag = format!("yelp_search_{}", collected_at.format("%Y-%m"));
        Self {
            collected_at,
            data_sources: vec![SOURCE_NAME.to_string(), search_tag],
        }
    }

    pub fn build(&self, business: &Business, anchor: &Anchor, sequence_id: u64) -> InternalPoi {
        let tags = business.categories.as_deref();
        let classification = classify(tags);
        let tags = tags.unwrap_or_default();

        let location = business.location.clone().unwrap_or_default();
        let coordinates = business.coordinates.unwrap_or_default();
        let url = business.url.clone().unwrap_or_default();

        let phone = business
            .phone
            .clone()
            .filter(|p| !p.is_empty())
            .or_else(|| business.display_phone.clone())
            .unwrap_or_default();

        InternalPoi {
            id: format!("poi_{sequence_id}"),
            name: business.name.clone().unwrap_or_default(),
            category: classification.category,
            subcategory: classification.subcategory,
            anchor_name: anchor.name.clone(),
            location: PoiLocation {
                address: location.address1.unwrap_or_default(),
                city: non_empty_or(location.city, DEFAULT_CITY),
                state: non_empty_or(location.state, DEFAULT_STATE),
                zip: location.zip_code.unwrap_or_default(),
                casino: anchor.name.clone(),
                coordinates: LatLng {
                    lat: coordinates.latitude.unwrap_or_default(),
                    lng: coordinates.longitude.unwrap_or_default(),
                },
                area: anchor.area.clone(),
            },
            contact: Contact {
                phone,
                website: url.clone(),
            },
            pricing: Pricing {
                price_range: non_empty_or(business.price.clone(), NO_PRICE_TIER),
            },
            ratings: Ratings {
                yelp: ProviderRating {
                    rating: business.rating.unwrap_or_default(),
                    review_count: business.review_count.unwrap_or_default(),
                },
            },
            description: String::new(),
            cuisine: tags.iter().map(|c| c.title.clone()).collect(),
            features: Vec::new(),
            tags: tags.iter().map(|c| c.alias.clone()).collect(),
            yelp_id: business.id.clone(),
            yelp_url: url,
            image_url: business.image_url.clone().unwrap_or_default(),
            is_closed: business.is_closed.unwrap_or(false),
            data_sources: self.data_sources.clone(),
            created_at: self.collected_at,
            updated_at: self.collected_at,
        }
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
