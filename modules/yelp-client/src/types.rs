use serde::{Deserialize, Deserializer, Serialize};

// --- Request ---

/// Query for the `/businesses/search` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters. Yelp caps this at 40000.
    pub radius: u32,
    /// Comma-separated Yelp category aliases, e.g. `"bars,nightlife"`.
    pub categories: String,
    pub limit: u32,
    pub sort_by: SortBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    BestMatch,
    Rating,
    ReviewCount,
    Distance,
}

// --- Response ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Items that fail to decode or carry no id are dropped individually, so
    /// one malformed business never costs the rest of the page.
    #[serde(default, deserialize_with = "usable_businesses")]
    pub businesses: Vec<Business>,
    #[serde(default)]
    pub total: u32,
}

/// A single business as returned by a search. Yelp omits fields freely, so
/// everything is optional; nulls in string fields read as "".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Business {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub display_phone: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_closed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alias: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Location {
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn usable_businesses<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Business>, D::Error> {
    let items = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Business>(item) {
            Ok(business) if !business.id.trim().is_empty() => Some(business),
            Ok(_) => {
                tracing::warn!("Skipping Yelp business without an id");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed Yelp business");
                None
            }
        })
        .collect())
}
