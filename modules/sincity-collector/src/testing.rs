// Test doubles for the collection pipeline.
//
// MockSearcher (PoiSearcher) keys canned responses by anchor coordinates and
// records every call it receives, so tests can assert order and count
// without touching the network.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use yelp_client::{Business, Category, SearchParams, YelpError};

use crate::anchors::Anchor;
use crate::search::PoiSearcher;

enum MockResponse {
    Businesses(Vec<Business>),
    Status { status: u16, body: String },
    Transport(String),
    Hang,
}

/// Coordinate-keyed searcher. Anchors with nothing registered return an
/// empty result.
#[derive(Default)]
pub struct MockSearcher {
    responses: HashMap<String, MockResponse>,
    calls: Mutex<Vec<SearchParams>>,
}

fn key(lat: f64, lng: f64) -> String {
    format!("{lat:.5},{lng:.5}")
}

impl MockSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_anchor(mut self, anchor: &Anchor, businesses: Vec<Business>) -> Self {
        self.responses
            .insert(key(anchor.lat, anchor.lng), MockResponse::Businesses(businesses));
        self
    }

    pub fn fail_anchor(mut self, anchor: &Anchor, status: u16, body: &str) -> Self {
        self.responses.insert(
            key(anchor.lat, anchor.lng),
            MockResponse::Status {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn drop_anchor(mut self, anchor: &Anchor, reason: &str) -> Self {
        self.responses.insert(
            key(anchor.lat, anchor.lng),
            MockResponse::Transport(reason.to_string()),
        );
        self
    }

    /// The call for this anchor never completes on its own.
    pub fn hang_anchor(mut self, anchor: &Anchor) -> Self {
        self.responses
            .insert(key(anchor.lat, anchor.lng), MockResponse::Hang);
        self
    }

    pub fn calls(&self) -> Vec<SearchParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PoiSearcher for MockSearcher {
    async fn search(&self, params: &SearchParams) -> yelp_client::Result<Vec<Business>> {
        self.calls.lock().unwrap().push(params.clone());

        match self.responses.get(&key(params.latitude, params.longitude)) {
            None => Ok(Vec::new()),
            Some(MockResponse::Businesses(b)) => Ok(b.clone()),
            Some(MockResponse::Status { status, body }) => Err(YelpError::Api {
                status: *status,
                message: body.clone(),
            }),
            Some(MockResponse::Transport(reason)) => Err(YelpError::Network(reason.clone())),
            Some(MockResponse::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A business with the given id, a name derived from it, and one tag per alias.
pub fn business(id: &str, aliases: &[&str]) -> Business {
    Business {
        id: id.to_string(),
        name: Some(format!("Business {id}")),
        categories: Some(
            aliases
                .iter()
                .map(|a| Category {
                    alias: a.to_string(),
                    title: a.replace('_', " "),
                })
                .collect(),
        ),
        ..Default::default()
    }
}

/// Distinct anchors along the Strip, far enough apart to key separately.
pub fn test_anchor(name: &str, index: usize) -> Anchor {
    Anchor::new(
        name,
        36.10 + index as f64 * 0.01,
        -115.17,
        if index % 2 == 0 { "Mid Strip" } else { "South Strip" },
    )
}
