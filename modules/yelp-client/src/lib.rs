pub mod error;
pub mod types;

pub use error::{Result, YelpError};
pub use types::{
    Business, Category, Coordinates, Location, SearchParams, SearchResponse, SortBy,
};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";

pub struct YelpClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YelpClient {
    /// Build a client with a hard per-request timeout. A request that has not
    /// completed within `timeout` fails with [`YelpError::Timeout`].
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search businesses around a point. Returns the raw business list in the
    /// order Yelp ranked them.
    pub async fn search_businesses(&self, params: &SearchParams) -> Result<Vec<Business>> {
        let url = format!("{}/businesses/search", self.base_url);
        tracing::debug!(
            lat = params.latitude,
            lng = params.longitude,
            radius = params.radius,
            categories = %params.categories,
            "Yelp business search"
        );

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YelpError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| YelpError::Parse {
                status: status.as_u16(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            count = parsed.businesses.len(),
            total = parsed.total,
            "Yelp search complete"
        );
        Ok(parsed.businesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_tolerates_sparse_businesses() {
        let json = r#"{
            "businesses": [
                {"id": "abc", "name": "Lotus of Siam",
                 "categories": [{"alias": "thai", "title": "Thai"}],
                 "coordinates": {"latitude": 36.14, "longitude": -115.16},
                 "rating": 4.5, "review_count": 1200, "price": "$$"},
                {"id": "bare"}
            ],
            "total": 2
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.businesses.len(), 2);
        assert_eq!(resp.businesses[0].categories.as_ref().unwrap()[0].alias, "thai");
        assert!(resp.businesses[1].categories.is_none());
        assert!(resp.businesses[1].rating.is_none());
    }

    #[test]
    fn null_categories_deserialize_as_none() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"businesses": [{"id": "x", "categories": null}]}"#).unwrap();
        assert!(resp.businesses[0].categories.is_none());
    }

    #[test]
    fn malformed_items_do_not_sink_the_page() {
        let json = r#"{"businesses": [
            {"id": "ok"},
            {"id": "b", "categories": [{"alias": "bars", "title": null}]},
            {"id": "c", "categories": [{"alias": null, "title": "Lounges"}]},
            {"id": null, "name": "No Id"},
            {"name": "Also No Id"},
            {"id": "bad-rating", "rating": "five stars"},
            {"id": "last"}
        ]}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = resp.businesses.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "b", "c", "last"]);

        let b_tags = resp.businesses[1].categories.as_ref().unwrap();
        assert_eq!(b_tags[0].alias, "bars");
        assert_eq!(b_tags[0].title, "");
        let c_tags = resp.businesses[2].categories.as_ref().unwrap();
        assert_eq!(c_tags[0].alias, "");
        assert_eq!(c_tags[0].title, "Lounges");
    }

    #[test]
    fn null_business_list_is_empty() {
        let resp: SearchResponse = serde_json::from_str(r#"{"businesses": null}"#).unwrap();
        assert!(resp.businesses.is_empty());
    }

    #[test]
    fn missing_business_list_is_empty() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.businesses.is_empty());
    }

    #[test]
    fn sort_order_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&SortBy::Rating).unwrap(), "\"rating\"");
        assert_eq!(serde_json::to_string(&SortBy::BestMatch).unwrap(), "\"best_match\"");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client =
            YelpClient::with_base_url("k".into(), "http://localhost:9/v3/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:9/v3");
    }
}
