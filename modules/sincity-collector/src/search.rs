//! Paced, time-bounded business search around one anchor.
//!
//! `PoiSearcher` is the seam between the collector and the provider: the Yelp
//! client implements it for production, `testing::MockSearcher` for tests.
//! `RateLimitedSearchClient` wraps any searcher with the pacing policy and a
//! hard per-call timeout, and turns every failure into a [`SearchFailure`]
//! value instead of an error that could abort the run.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use yelp_client::{Business, SearchParams, SortBy, YelpClient, YelpError};

use crate::anchors::Anchor;
use crate::pacing::PacingPolicy;

#[async_trait]
pub trait PoiSearcher: Send + Sync {
    async fn search(&self, params: &SearchParams) -> yelp_client::Result<Vec<Business>>;
}

#[async_trait]
impl PoiSearcher for YelpClient {
    async fn search(&self, params: &SearchParams) -> yelp_client::Result<Vec<Business>> {
        self.search_businesses(params).await
    }
}

// ---------------------------------------------------------------------------
// SearchFailure
// ---------------------------------------------------------------------------

/// Why a single anchor's search produced no records.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchFailure {
    /// Transport-level failure, including timeouts.
    Network { reason: String },
    /// The provider answered, but not with a usable result.
    Provider { status: u16, body: String },
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchFailure::Network { reason } => write!(f, "network error: {reason}"),
            SearchFailure::Provider { status, body } => {
                write!(f, "provider returned {status}: {body}")
            }
        }
    }
}

impl From<YelpError> for SearchFailure {
    fn from(err: YelpError) -> Self {
        match err {
            YelpError::Network(reason) | YelpError::Timeout(reason) => {
                SearchFailure::Network { reason }
            }
            YelpError::Api { status, message } => SearchFailure::Provider {
                status,
                body: message,
            },
            YelpError::Parse { status, message } => SearchFailure::Provider {
                status,
                body: message,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// RateLimitedSearchClient
// ---------------------------------------------------------------------------

/// Fixed request shape for every anchor in a run.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub radius_m: u32,
    pub result_limit: u32,
    pub timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_m: 500,
            result_limit: 50,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct RateLimitedSearchClient {
    searcher: Arc<dyn PoiSearcher>,
    pacing: Box<dyn PacingPolicy>,
    settings: SearchSettings,
}

impl RateLimitedSearchClient {
    pub fn new(
        searcher: Arc<dyn PoiSearcher>,
        pacing: Box<dyn PacingPolicy>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            searcher,
            pacing,
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn params_for(&self, anchor: &Anchor, category_filter: &str) -> SearchParams {
        SearchParams {
            latitude: anchor.lat,
            longitude: anchor.lng,
            radius: self.settings.radius_m,
            categories: category_filter.to_string(),
            limit: self.settings.result_limit,
            sort_by: SortBy::Rating,
        }
    }

    /// Issue exactly one search for `anchor`. Waits on the pacing policy first;
    /// a call still pending after the configured timeout is abandoned.
    pub async fn search(
        &mut self,
        anchor: &Anchor,
        category_filter: &str,
    ) -> Result<Vec<Business>, SearchFailure> {
        let params = self.params_for(anchor, category_filter);
        self.pacing.wait().await;

        let outcome = tokio::time::timeout(self.settings.timeout, self.searcher.search(&params)).await;
        self.pacing.record_completion();

        match outcome {
            Ok(Ok(businesses)) => Ok(businesses),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(SearchFailure::Network {
                reason: format!("timed out after {:?}", self.settings.timeout),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yelp_errors_classify_into_network_and_provider() {
        assert!(matches!(
            SearchFailure::from(YelpError::Timeout("slow".into())),
            SearchFailure::Network { .. }
        ));
        assert!(matches!(
            SearchFailure::from(YelpError::Network("refused".into())),
            SearchFailure::Network { .. }
        ));
        assert_eq!(
            SearchFailure::from(YelpError::Api {
                status: 429,
                message: "slow down".into()
            }),
            SearchFailure::Provider {
                status: 429,
                body: "slow down".into()
            }
        );
        assert!(matches!(
            SearchFailure::from(YelpError::Parse {
                status: 200,
                message: "expected value".into()
            }),
            SearchFailure::Provider { status: 200, .. }
        ));
    }

    #[test]
    fn failure_display_carries_status_and_body() {
        let f = SearchFailure::Provider {
            status: 401,
            body: "TOKEN_INVALID".into(),
        };
        assert_eq!(f.to_string(), "provider returned 401: TOKEN_INVALID");
    }
}
