use log::{debug, warn};

use crate::catalog::record::{PlanetRecord, PlanetSummary};
use crate::catalog::source::CatalogSource;
use crate::catalog::store::CustomPlanetStore;

/// Front door to planet data. Merges the user's custom planets over a
/// [`CatalogSource`] and turns source failures into "no data".
pub struct CatalogClient<S> {
    source: S,
    listing_limit: Option<usize>,
}

impl<S: CatalogSource> CatalogClient<S> {
    pub fn new(source: S) -> Self {
        Self { source, listing_limit: None }
    }

    /// Cap the number of remote entries returned by [`Self::fetch_listing`].
    pub fn with_listing_limit(mut self, limit: usize) -> Self {
        self.listing_limit = Some(limit);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Remote listing only. Empty on failure.
    pub async fn fetch_listing(&self) -> Vec<PlanetSummary> {
        match self.source.list().await {
            Ok(mut list) => {
                if let Some(limit) = self.listing_limit {
                    list.truncate(limit);
                }
                debug!("catalog listing: {} planets", list.len());
                list
            }
            Err(err) => {
                warn!("planet listing unavailable: {err}");
                Vec::new()
            }
        }
    }

    /// Remote record only. `None` on failure or when the source has no match.
    pub async fn fetch_details(&self, id: &str) -> Option<PlanetRecord> {
        match self.source.details(id).await {
            Ok(record) => record,
            Err(err) => {
                warn!("details for {id} unavailable: {err}");
                None
            }
        }
    }

    /// Custom planets first, then the remote listing.
    pub async fn list_planets(&self, store: &CustomPlanetStore) -> Vec<PlanetSummary> {
        let remote = self.fetch_listing().await;
        store.merge_listing(remote)
    }

    /// Custom planets are consulted before the source.
    pub async fn get_planet_details(&self, store: &CustomPlanetStore, id: &str) -> Option<PlanetRecord> {
        if let Some(record) = store.get(id) {
            return Some(record.clone());
        }
        self.fetch_details(id).await
    }
}

/// Case-insensitive match on display name or identifier. An empty query
/// keeps everything.
pub fn filter_listing<'a>(listing: &'a [PlanetSummary], query: &str) -> Vec<&'a PlanetSummary> {
    let needle = query.trim().to_lowercase();
    listing
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.display_name().to_lowercase().contains(&needle)
                || s.kepoi_name.to_lowercase().contains(&needle)
        })
        .collect()
}
