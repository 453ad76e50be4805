//! Sequential collection over the anchor set.
//!
//! One anchor at a time, in configured order, one call in flight. Each anchor
//! yields an [`AnchorOutcome`]; the runner folds outcomes into a run-scoped
//! [`CollectionRun`] that owns the dedup set, the id sequence and the growing
//! [`Dataset`]. A failed anchor contributes nothing and never stops the run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use yelp_client::Business;

use crate::anchors::{Anchor, AnchorSet};
use crate::dedup::Deduplicator;
use crate::record::{IdSequence, InternalPoi, RecordBuilder};
use crate::search::{RateLimitedSearchClient, SearchFailure};
use crate::selector::CategorySelector;

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Append-only list of POIs in order of first acceptance.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    pois: Vec<InternalPoi>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, poi: InternalPoi) {
        self.pois.push(poi);
    }

    pub fn pois(&self) -> &[InternalPoi] {
        &self.pois
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InternalPoi> {
        self.pois.iter()
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub anchors_processed: u32,
    pub calls_failed: u32,
    /// Records returned by the provider across all anchors, duplicates included.
    pub records_seen: u32,
    pub records_collected: u32,
    pub duplicates_skipped: u32,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "anchors={} failed={} seen={} collected={} duplicates={}",
            self.anchors_processed,
            self.calls_failed,
            self.records_seen,
            self.records_collected,
            self.duplicates_skipped
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnchorFailure {
    pub anchor: String,
    pub reason: SearchFailure,
}

/// Result of querying one anchor.
#[derive(Debug)]
pub enum AnchorOutcome {
    Fetched(Vec<Business>),
    Failed(SearchFailure),
}

/// Everything one invocation accumulates. Dropped at the end of the run.
pub struct CollectionRun {
    pub selector: CategorySelector,
    pub stats: RunStats,
    pub failures: Vec<AnchorFailure>,
    pub dataset: Dataset,
    dedup: Deduplicator,
    ids: IdSequence,
    builder: RecordBuilder,
}

impl CollectionRun {
    pub fn new(selector: CategorySelector, started_at: DateTime<Utc>) -> Self {
        Self {
            selector,
            stats: RunStats::default(),
            failures: Vec::new(),
            dataset: Dataset::new(),
            dedup: Deduplicator::new(),
            ids: IdSequence::new(),
            builder: RecordBuilder::new(started_at),
        }
    }

    /// Fold one anchor's outcome into the run. Returns how many new POIs it added.
    pub fn absorb(&mut self, anchor: &Anchor, outcome: AnchorOutcome) -> usize {
        self.stats.anchors_processed += 1;

        let businesses = match outcome {
            AnchorOutcome::Fetched(businesses) => businesses,
            AnchorOutcome::Failed(reason) => {
                self.stats.calls_failed += 1;
                warn!(anchor = anchor.name.as_str(), error = %reason, "Anchor search failed, skipping");
                self.failures.push(AnchorFailure {
                    anchor: anchor.name.clone(),
                    reason,
                });
                return 0;
            }
        };

        let mut added = 0;
        for business in &businesses {
            self.stats.records_seen += 1;
            if !self.dedup.accept(&business.id) {
                self.stats.duplicates_skipped += 1;
                continue;
            }
            let poi = self.builder.build(business, anchor, self.ids.next_id());
            self.dataset.push(poi);
            added += 1;
        }
        self.stats.records_collected += added as u32;

        info!(
            anchor = anchor.name.as_str(),
            found = businesses.len(),
            new = added,
            "Anchor search complete"
        );
        added
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

// ---------------------------------------------------------------------------
// CollectionRunner
// ---------------------------------------------------------------------------

pub struct CollectionRunner {
    client: RateLimitedSearchClient,
    anchors: AnchorSet,
}

impl CollectionRunner {
    pub fn new(client: RateLimitedSearchClient, anchors: AnchorSet) -> Self {
        Self { client, anchors }
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub async fn fetch_anchor(&mut self, anchor: &Anchor, filter: &str) -> AnchorOutcome {
        match self.client.search(anchor, filter).await {
            Ok(businesses) => AnchorOutcome::Fetched(businesses),
            Err(failure) => AnchorOutcome::Failed(failure),
        }
    }

    /// Query every anchor in order and return the finished run.
    pub async fn run(&mut self, selector: CategorySelector) -> CollectionRun {
        let mut run = CollectionRun::new(selector, Utc::now());
        let filter = selector.provider_filter();
        let total = self.anchors.len();

        info!(
            category = selector.as_str(),
            filter,
            anchors = total,
            "Starting POI collection"
        );

        let anchors = self.anchors.clone();
        for (i, anchor) in anchors.iter().enumerate() {
            info!("[{}/{}] Searching near {}", i + 1, total, anchor.name);
            let outcome = self.fetch_anchor(anchor, filter).await;
            run.absorb(anchor, outcome);
        }

        info!(
            category = selector.as_str(),
            unique_pois = run.dataset.len(),
            "Collection complete. {}",
            run.stats
        );
        run
    }
}
